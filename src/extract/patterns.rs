//! Extraction patterns and keyword sets
//!
//! ORDER MATTERS in `FILE_PATTERNS`: absolute Windows paths are tried before
//! absolute Unix paths, then bare tokens, then quoted paths. The first family
//! with a match anywhere in the utterance decides the file path. Absolute
//! families must start a token, so `data/scene.tif` stays a relative path.

use once_cell::sync::Lazy;
use regex::Regex;

/// Signed decimal literal: `12`, `-3.5`, `+0.25`, `.75`, `40.`
const NUMBER: &str = r"[-+]?(?:\d+(?:\.\d*)?|\.\d+)";

pub const ANALYZE_KEYWORDS: &[&str] =
    &["analyze", "process", "examine", "check", "inspect", "load", "open", "read", "save"];

pub const CROP_KEYWORDS: &[&str] = &["crop", "cut", "slice", "extract", "region"];

pub const INDEX_KEYWORDS: &[&str] = &["ndvi", "vegetation", "index", "plant"];

pub struct FilePattern {
    pub name: &'static str,
    pub pattern: Regex,
}

pub static FILE_PATTERNS: Lazy<Vec<FilePattern>> = Lazy::new(|| {
    vec![
        FilePattern {
            name: "windows_path",
            pattern: Regex::new(r#"(?i)(?:^|[\s"'(])([a-z]:[/\\]\S+\.(?:tiff?|jp2))"#)
                .expect("valid regex"),
        },
        FilePattern {
            name: "unix_path",
            pattern: Regex::new(r#"(?i)(?:^|[\s"'(])(/\S+\.(?:tiff?|jp2))"#).expect("valid regex"),
        },
        FilePattern {
            name: "bare_token",
            pattern: Regex::new(r"(?i)\S+\.(?:tiff?|jp2)").expect("valid regex"),
        },
        FilePattern {
            name: "double_quoted",
            pattern: Regex::new(r#"(?i)"([^"]+\.(?:tiff?|jp2))""#).expect("valid regex"),
        },
        FilePattern {
            name: "single_quoted",
            pattern: Regex::new(r"(?i)'([^']+\.(?:tiff?|jp2))'").expect("valid regex"),
        },
    ]
});

/// `minx`, `miny`, `maxx`, `maxy` tokens in bounding-box order.
pub static BBOX_PATTERNS: Lazy<[(&'static str, Regex); 4]> = Lazy::new(|| {
    let named = |name: &str| {
        Regex::new(&format!(r"(?i){name}[:=\s]+({NUMBER})")).expect("valid regex")
    };
    [("minx", named("minx")), ("miny", named("miny")), ("maxx", named("maxx")), ("maxy", named("maxy"))]
});

/// `from X,Y to Z,W` phrasing for a crop window.
pub static FROM_TO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\bfrom\s+({NUMBER})[,\s]+({NUMBER})\s+to\s+({NUMBER})[,\s]+({NUMBER})"
    ))
    .expect("valid regex")
});

// `x`/`y` must start a word so `minx:`/`maxy:` tokens never count as a point.
pub static POINT_X_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\bx[:=\s]+({NUMBER})")).expect("valid regex"));

pub static POINT_Y_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\by[:=\s]+({NUMBER})")).expect("valid regex"));

/// Case-insensitive substring test against a keyword set.
pub fn mentions_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lowered.contains(k))
}
