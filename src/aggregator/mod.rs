// 10.0: the aggregation orchestrator. walks the fixed stage pipeline, merges
// per-source results, converts soft failures into accumulated text, and returns
// the bundle. deterministic stage order is what makes runs reproducible.

mod core;
mod results;

pub use core::HistoryAggregator;
pub use results::{AggregatorError, HistoryBundle};
