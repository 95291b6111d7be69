// history-core: historical event aggregation engine.
// soft-failure-first architecture: one failing source never aborts a run.
// the engine consumes abstract source/storage capabilities and does no I/O itself.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: Timestamp, Asset, Address, Location, TradePair
//   2.x  events.rs: the six event kinds + HistoryEvent trait + TimelineEntry
//   3.x  trim.rs: inclusive window trimming over sorted timelines
//   4.x  run_state.rs: per-run progress counter and soft-error accumulator
//   5.x  sources.rs: exchange and chain source capabilities
//   6.x  modules.rs: AMM venues, protocol modules, module registry
//   7.x  storage.rs: local trade/ledger-action reads (faults are fatal)
//   8.x  report.rs: fire-and-forget operator error sink
//   9.x  loans.rs: margin-loan auxiliary-payload post-processing
//   10.x aggregator/: the stage pipeline: query, merge, sort, bundle

// event model and primitives
pub mod events;
pub mod loans;
pub mod types;

// capabilities consumed by the engine
pub mod modules;
pub mod report;
pub mod sources;
pub mod storage;

// the engine itself
pub mod aggregator;
pub mod run_state;
pub mod trim;

// re exports for convenience
pub use aggregator::*;
pub use events::*;
pub use loans::*;
pub use modules::*;
pub use report::*;
pub use run_state::*;
pub use sources::*;
pub use storage::*;
pub use trim::*;
pub use types::*;
