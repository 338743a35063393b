//! Frame-level aggregation of detections into a danger verdict

use serde::{Deserialize, Serialize};

use crate::danger::DangerSet;
use crate::types::Detection;

/// Cumulative counters for one run. Owned by the loop controller,
/// zero-initialized, reported at exit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunCounters {
    /// Total dangerous detections across the whole run (one per detection,
    /// not per frame)
    pub total_dangerous_detections: u64,
}

/// Per-frame aggregate decision, discarded after the cycle that produced it
#[derive(Debug, Clone, Default)]
pub struct FrameVerdict {
    /// True iff at least one dangerous detection is present
    pub is_dangerous: bool,

    /// Labels of dangerous detections, in detector order, duplicates retained
    pub dangerous_labels: Vec<String>,
}

/// Reduce a frame's detections against the danger set.
///
/// Every dangerous detection appends its label (three knives yield "knife"
/// three times) and bumps the run counter once.
pub fn aggregate(
    detections: &[Detection],
    danger_set: &DangerSet,
    counters: &mut RunCounters,
) -> FrameVerdict {
    let mut dangerous_labels = Vec::new();

    for detection in detections {
        if danger_set.is_dangerous(&detection.label) {
            dangerous_labels.push(detection.label.clone());
            counters.total_dangerous_detections += 1;
        }
    }

    FrameVerdict {
        is_dangerous: !dangerous_labels.is_empty(),
        dangerous_labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;

    fn det(label: &str, confidence: f32) -> Detection {
        Detection::new(label, confidence, BoundingBox::new(0, 0, 10, 10))
    }

    #[test]
    fn single_knife_flags_frame() {
        let set = DangerSet::default();
        let mut counters = RunCounters::default();

        let verdict = aggregate(&[det("knife", 0.9)], &set, &mut counters);

        assert!(verdict.is_dangerous);
        assert_eq!(verdict.dangerous_labels, vec!["knife"]);
        assert_eq!(counters.total_dangerous_detections, 1);
    }

    #[test]
    fn benign_frame_leaves_counter_untouched() {
        let set = DangerSet::default();
        let mut counters = RunCounters::default();

        let verdict = aggregate(&[det("person", 0.99)], &set, &mut counters);

        assert!(!verdict.is_dangerous);
        assert!(verdict.dangerous_labels.is_empty());
        assert_eq!(counters.total_dangerous_detections, 0);
    }

    #[test]
    fn duplicates_and_order_retained() {
        let set = DangerSet::default();
        let mut counters = RunCounters::default();

        let detections = [
            det("knife", 0.8),
            det("person", 0.9),
            det("scissors", 0.7),
            det("knife", 0.6),
        ];
        let verdict = aggregate(&detections, &set, &mut counters);

        assert_eq!(verdict.dangerous_labels, vec!["knife", "scissors", "knife"]);
        assert_eq!(counters.total_dangerous_detections, 3);
    }

    #[test]
    fn counter_accumulates_across_frames() {
        let set = DangerSet::default();
        let mut counters = RunCounters::default();

        aggregate(&[det("knife", 0.8)], &set, &mut counters);
        aggregate(&[det("person", 0.9)], &set, &mut counters);
        aggregate(&[det("blade", 0.8), det("weapon", 0.8)], &set, &mut counters);

        assert_eq!(counters.total_dangerous_detections, 3);
    }

    #[test]
    fn verdict_invariant_holds_for_empty_input() {
        let set = DangerSet::default();
        let mut counters = RunCounters::default();

        let verdict = aggregate(&[], &set, &mut counters);

        assert!(!verdict.is_dangerous);
        assert!(verdict.dangerous_labels.is_empty());
    }
}
