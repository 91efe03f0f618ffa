//! Usage guidance shown on `help` or when a request is not understood.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::Operation;

/// `help` or `how` as whole words turn a line into a help request.
static HELP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:help|how)\b").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    General,
    Analyze,
    Crop,
    Ndvi,
}

const TOPIC_KEYWORDS: &[(&str, HelpTopic)] = &[
    ("analyze", HelpTopic::Analyze),
    ("crop", HelpTopic::Crop),
    ("cut", HelpTopic::Crop),
    ("ndvi", HelpTopic::Ndvi),
    ("vegetation", HelpTopic::Ndvi),
];

pub fn wants_help(input: &str) -> bool {
    HELP_PATTERN.is_match(input)
}

/// Topic of the earliest topic keyword in `input`, or the general summary.
pub fn topic_for(input: &str) -> HelpTopic {
    let lowered = input.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .filter_map(|(keyword, topic)| lowered.find(keyword).map(|pos| (pos, *topic)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, topic)| topic)
        .unwrap_or(HelpTopic::General)
}

pub fn help_text(topic: HelpTopic) -> String {
    match topic {
        HelpTopic::Analyze => "\
To analyze a raster, name the file and say what to do with it:
  • \"Analyze this file: C:/data/image.tiff\"
  • \"Process /srv/rasters/satellite.jp2\"
"
        .to_string(),
        HelpTopic::Crop => "\
To crop, give the file and all four bounds:
  • \"Crop image.tiff minx:100 miny:200 maxx:800 maxy:600\"
  • \"Cut from 100,200 to 800,600 in satellite.jp2\"
"
        .to_string(),
        HelpTopic::Ndvi => "\
To sample NDVI, give the file and a point:
  • \"Calculate NDVI: field.tiff x:500 y:300\"
  • \"Vegetation index of satellite.tiff at x=27.1 y=38.4\"
"
        .to_string(),
        HelpTopic::General => general_help(),
    }
}

fn general_help() -> String {
    let mut text = String::from("Geospatial raster assistant\n\nAvailable tools:\n");
    for op in Operation::ALL {
        text.push_str(&format!("  {:<14} {}\n", op.tool_name(), op.description()));
    }
    text.push_str(
        "\nSample requests:
  • \"Analyze this file: C:/data/image.tiff\"
  • \"Crop image.tiff minx:100 miny:200 maxx:800 maxy:600\"
  • \"Calculate NDVI: satellite.tiff x:500 y:300\"

Ask \"how do I crop\" for topic help, \"exit\" to quit.
",
    );
    text
}
