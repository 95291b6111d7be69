// 7.0: local storage reads. synchronous, no network. unlike source failures,
// storage faults are fatal to a run: the aggregator aborts with no partial bundle.

use crate::events::{LedgerAction, Trade};
use crate::types::{Location, Timestamp};

#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(String),

    #[error("corrupt storage entry: {0}")]
    Corrupt(String),
}

// 7.1: trade and ledger-action reads, optionally filtered by venue. a None
// location means all venues.
pub trait Storage {
    fn trades(
        &self,
        from: Timestamp,
        to: Timestamp,
        location: Option<Location>,
    ) -> Result<Vec<Trade>, StorageError>;

    fn ledger_actions(
        &self,
        from: Timestamp,
        to: Timestamp,
        location: Option<Location>,
    ) -> Result<Vec<LedgerAction>, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_messages() {
        let err = StorageError::Io("disk unreadable".to_string());
        assert_eq!(err.to_string(), "storage I/O error: disk unreadable");

        let err = StorageError::Corrupt("trade row 17".to_string());
        assert_eq!(err.to_string(), "corrupt storage entry: trade row 17");
    }
}
