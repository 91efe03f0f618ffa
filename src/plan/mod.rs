//! Call planning: execution order for the intents of one request

use crate::domain::{Intent, PlannedCall};

/// Order intents into the calls to run: analyze, then crop, then NDVI,
/// whatever order they were mentioned in.
pub fn plan(intents: Vec<Intent>) -> Vec<PlannedCall> {
    let mut intents = intents;
    intents.sort_by_key(|intent| intent.operation().rank());
    intents.into_iter().map(PlannedCall::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoundingBox, Operation, Point};

    fn crop() -> Intent {
        Intent::Crop {
            filepath: "a.tif".to_string(),
            bbox: BoundingBox { minx: 0.0, miny: 0.0, maxx: 1.0, maxy: 1.0 },
        }
    }

    fn analyze() -> Intent {
        Intent::Analyze { filepath: "a.tif".to_string() }
    }

    fn ndvi() -> Intent {
        Intent::ComputeIndex { filepath: "a.tif".to_string(), point: Point { x: 0.5, y: 0.5 } }
    }

    fn operations(calls: &[PlannedCall]) -> Vec<Operation> {
        calls.iter().map(|c| c.operation).collect()
    }

    #[test]
    fn analyze_moves_ahead_of_crop() {
        let calls = plan(vec![crop(), analyze()]);
        assert_eq!(operations(&calls), vec![Operation::Analyze, Operation::Crop]);
    }

    #[test]
    fn full_plan_order_is_fixed() {
        let calls = plan(vec![ndvi(), crop(), analyze()]);
        assert_eq!(
            operations(&calls),
            vec![Operation::Analyze, Operation::Crop, Operation::ComputeIndex]
        );
        assert_eq!(calls[2].tool_name(), "get_ndvi");
    }

    #[test]
    fn empty_intents_give_empty_plan() {
        assert!(plan(Vec::new()).is_empty());
    }
}
