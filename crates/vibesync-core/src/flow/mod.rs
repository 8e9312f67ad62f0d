//! Flow score history and charting.
//!
//! A [`FlowRecord`] is appended for every completed focus cycle and never
//! mutated or deleted. Aggregation over the history is pure -- see
//! [`flow_chart`].

mod chart;

pub use chart::{flow_chart, Bar, ChartView, FlowChart};

use serde::{Deserialize, Serialize};

/// Points awarded per completed focus cycle.
pub const CYCLE_SCORE: i64 = 25;

/// An immutable, timestamped scored event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowRecord {
    /// Epoch milliseconds.
    pub timestamp_ms: i64,
    pub score: i64,
}

/// All-time score sum, independent of any chart window.
pub fn total_score(history: &[FlowRecord]) -> i64 {
    history.iter().map(|r| r.score).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_score_sums_all_records() {
        let history = [
            FlowRecord {
                timestamp_ms: 1,
                score: 25,
            },
            FlowRecord {
                timestamp_ms: 2,
                score: 25,
            },
            FlowRecord {
                timestamp_ms: 3,
                score: 10,
            },
        ];
        assert_eq!(total_score(&history), 60);
        assert_eq!(total_score(&[]), 0);
    }
}
