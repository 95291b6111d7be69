// 10.0.2: result types and errors for aggregation runs.

use crate::events::{AssetMovement, ChainTransaction, LedgerAction, ProtocolEvent, TimelineEntry};
use crate::loans::Loan;
use crate::storage::StorageError;

// 10.1: everything one run produced. the timeline holds trades and margin
// positions sorted ascending by timestamp, equal timestamps keeping the
// stage/registration order they were collected in. the other five collections
// stay un-merged, each only internally ordered as its source produced it.
// nothing here is mutated after the run returns.
#[derive(Debug, Clone, Default)]
pub struct HistoryBundle {
    /// Accumulated soft-failure messages in occurrence order, empty on a clean run.
    pub error_text: String,
    pub timeline: Vec<TimelineEntry>,
    pub loans: Vec<Loan>,
    pub asset_movements: Vec<AssetMovement>,
    pub chain_transactions: Vec<ChainTransaction>,
    pub protocol_events: Vec<ProtocolEvent>,
    pub ledger_actions: Vec<LedgerAction>,
}

impl HistoryBundle {
    pub fn has_errors(&self) -> bool {
        !self.error_text.is_empty()
    }
}

// 10.2: the only hard failure a run can end in. every source failure is soft;
// a local storage fault aborts the run with no partial bundle.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AggregatorError {
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}
