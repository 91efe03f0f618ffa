//! Coordinate extraction for crop windows and NDVI sample points

use std::collections::BTreeMap;

use regex::Regex;

use super::patterns::{BBOX_PATTERNS, FROM_TO_PATTERN, POINT_X_PATTERN, POINT_Y_PATTERN};
use crate::domain::{BoundingBox, Point};

/// Extract a complete crop window, or nothing.
///
/// Explicit `name:value` tokens are searched independently. When fewer than
/// four are found, a `from X,Y to Z,W` phrase replaces the partial set as a
/// whole; the two sources are never merged.
pub fn extract_bbox(text: &str) -> Option<BoundingBox> {
    let mut coords: BTreeMap<&'static str, f64> = BTreeMap::new();
    for (name, pattern) in BBOX_PATTERNS.iter() {
        if let Some(value) = first_number(pattern, text) {
            coords.insert(*name, value);
        }
    }

    if coords.len() < 4 {
        if let Some(from_to) = from_to_bbox(text) {
            return Some(from_to);
        }
        tracing::debug!(found = coords.len(), "incomplete crop window, no crop intent");
        return None;
    }

    Some(BoundingBox {
        minx: coords["minx"],
        miny: coords["miny"],
        maxx: coords["maxx"],
        maxy: coords["maxy"],
    })
}

fn from_to_bbox(text: &str) -> Option<BoundingBox> {
    let caps = FROM_TO_PATTERN.captures(text)?;
    let mut values = (1..=4).map(|i| caps.get(i).and_then(|m| parse_coordinate(m.as_str())));
    Some(BoundingBox {
        minx: values.next()??,
        miny: values.next()??,
        maxx: values.next()??,
        maxy: values.next()??,
    })
}

/// Extract an NDVI sample point. The rightmost `x` and rightmost `y` win, so a
/// restated coordinate overrides an earlier one.
pub fn extract_point(text: &str) -> Option<Point> {
    let x = last_number(&POINT_X_PATTERN, text)?;
    let y = last_number(&POINT_Y_PATTERN, text)?;
    Some(Point { x, y })
}

fn first_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern.captures(text).and_then(|caps| caps.get(1)).and_then(|m| parse_coordinate(m.as_str()))
}

fn last_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).and_then(|m| parse_coordinate(m.as_str())))
        .last()
}

/// Digit runs too long for `f64` parse to infinity; those are not coordinates.
fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
