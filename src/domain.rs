//! Core types shared by extraction, planning and dispatch

use serde_json::{json, Map, Value};
use std::fmt;

/// Remote operations exposed by the raster tool server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    Analyze,
    Crop,
    ComputeIndex,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Analyze, Operation::Crop, Operation::ComputeIndex];

    /// Name the tool is registered under on the server.
    pub fn tool_name(self) -> &'static str {
        match self {
            Operation::Analyze => "analyze_tiff",
            Operation::Crop => "crop_image",
            Operation::ComputeIndex => "get_ndvi",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Operation::Analyze => "Analyzes a TIFF file and returns metadata",
            Operation::Crop => {
                "Crops the TIFF file according to the given coordinates and saves as PNG"
            }
            Operation::ComputeIndex => "Calculates the NDVI value at the given coordinates",
        }
    }

    /// Position in a call plan. Crop and NDVI read the reprojected raster that
    /// analyze leaves behind on the server, so analyze always runs first.
    pub fn rank(self) -> u8 {
        match self {
            Operation::Analyze => 0,
            Operation::Crop => 1,
            Operation::ComputeIndex => 2,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tool_name())
    }
}

/// Axis-aligned crop window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A recognized operation together with the parameters pulled out of the text.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Analyze { filepath: String },
    Crop { filepath: String, bbox: BoundingBox },
    ComputeIndex { filepath: String, point: Point },
}

impl Intent {
    pub fn operation(&self) -> Operation {
        match self {
            Intent::Analyze { .. } => Operation::Analyze,
            Intent::Crop { .. } => Operation::Crop,
            Intent::ComputeIndex { .. } => Operation::ComputeIndex,
        }
    }

    pub fn filepath(&self) -> &str {
        match self {
            Intent::Analyze { filepath }
            | Intent::Crop { filepath, .. }
            | Intent::ComputeIndex { filepath, .. } => filepath,
        }
    }

    /// Tool arguments as sent over the wire.
    pub fn arguments(&self) -> Map<String, Value> {
        let value = match self {
            Intent::Analyze { filepath } => json!({ "filepath": filepath }),
            Intent::Crop { filepath, bbox } => json!({
                "filepath": filepath,
                "minx": bbox.minx,
                "miny": bbox.miny,
                "maxx": bbox.maxx,
                "maxy": bbox.maxy,
            }),
            Intent::ComputeIndex { filepath, point } => json!({
                "filepath": filepath,
                "x": point.x,
                "y": point.y,
            }),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// One entry of a call plan: the tool to invoke and its argument object.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCall {
    pub operation: Operation,
    pub arguments: Map<String, Value>,
}

impl PlannedCall {
    pub fn tool_name(&self) -> &'static str {
        self.operation.tool_name()
    }

    pub fn filepath(&self) -> Option<&str> {
        self.arguments.get("filepath").and_then(Value::as_str)
    }
}

impl From<Intent> for PlannedCall {
    fn from(intent: Intent) -> Self {
        PlannedCall { operation: intent.operation(), arguments: intent.arguments() }
    }
}
