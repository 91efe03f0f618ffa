//! Intent extraction from free-text requests
//!
//! Pure pattern matching: one utterance in, zero or more intents out. Every
//! intent needs a raster file path, so an utterance without one yields nothing.

pub mod coords;
pub mod patterns;

use crate::domain::Intent;
use patterns::{mentions_any, ANALYZE_KEYWORDS, CROP_KEYWORDS, FILE_PATTERNS, INDEX_KEYWORDS};

pub use coords::{extract_bbox, extract_point};

/// Recognize every intent in `utterance`.
///
/// Detections are independent: one request may ask for analysis, a crop and
/// an NDVI sample at once. The result follows detection order; use
/// [`crate::plan::plan`] for execution order.
pub fn extract(utterance: &str) -> Vec<Intent> {
    let Some(filepath) = extract_filepath(utterance) else {
        return Vec::new();
    };
    let lowered = utterance.to_lowercase();
    let mut intents = Vec::new();

    if mentions_any(&lowered, ANALYZE_KEYWORDS) {
        intents.push(Intent::Analyze { filepath: filepath.clone() });
    }

    if mentions_any(&lowered, CROP_KEYWORDS) {
        if let Some(bbox) = extract_bbox(utterance) {
            intents.push(Intent::Crop { filepath: filepath.clone(), bbox });
        }
    }

    if mentions_any(&lowered, INDEX_KEYWORDS) {
        if let Some(point) = extract_point(utterance) {
            intents.push(Intent::ComputeIndex { filepath, point });
        }
    }

    intents
}

/// Find the raster file referenced by `utterance`, quotes stripped.
pub fn extract_filepath(utterance: &str) -> Option<String> {
    FILE_PATTERNS.iter().find_map(|family| {
        let caps = family.pattern.captures(utterance)?;
        let matched = caps.get(1).or_else(|| caps.get(0))?;
        let path = matched.as_str().trim_matches(|c| c == '"' || c == '\'');
        tracing::debug!(pattern = family.name, path, "matched file path");
        Some(path.to_string())
    })
}
