// 5.0: source capabilities. the engine is agnostic to whether history comes from
// a REST connector, a websocket dump, or a fixture. we define traits and result
// types that any source can implement; concrete protocol clients live elsewhere.

use crate::events::{AssetMovement, ChainTransaction, MarginPosition, ProtocolEvent, Trade};
use crate::loans::RawLoanRecord;
use crate::types::{Address, Location, Timestamp};

// 5.1: every source failure is an explicit value. at the aggregation level all of
// these are soft: they become accumulated error text, never an abort.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("remote error: {0}")]
    Remote(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("authentication error: {0}")]
    Auth(String),
}

// 5.2: one exchange's full history answer. partial success is allowed: any of the
// lists may be empty, and loan_data is only present for venues with margin-loan
// ledgers (currently exactly one exchange kind reports it).
#[derive(Debug, Clone, Default)]
pub struct ExchangeBatch {
    pub trades: Vec<Trade>,
    pub margin_positions: Vec<MarginPosition>,
    pub asset_movements: Vec<AssetMovement>,
    pub loan_data: Option<Vec<RawLoanRecord>>,
}

// 5.3: a connected exchange. implementations must convert transport and protocol
// faults into SourceError, never panic or block the run permanently.
pub trait ExchangeSource {
    fn name(&self) -> &str;

    fn location(&self) -> Location;

    fn query_history(&self, from: Timestamp, to: Timestamp)
        -> Result<ExchangeBatch, SourceError>;
}

// 5.4: the blockchain transaction indexer plus engine-native staking history.
pub trait ChainSource {
    /// Transactions for the given addresses (None = all tracked addresses).
    /// `oldest_first` and `with_limit` mirror the indexer's paging controls;
    /// historical processing passes oldest_first = true and with_limit = false
    /// so nothing is silently truncated.
    fn query_transactions(
        &self,
        addresses: Option<&[Address]>,
        from: Timestamp,
        to: Timestamp,
        oldest_first: bool,
        with_limit: bool,
    ) -> Result<Vec<ChainTransaction>, SourceError>;

    fn native_staking_events(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<ProtocolEvent>, SourceError>;
}
