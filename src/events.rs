// 2.0: the six dated event kinds the engine aggregates. the HistoryEvent trait gives
// uniform timestamp/kind access so the aggregator never inspects payload fields.
// payloads (assets, amounts, counterparties) are opaque to everything in this crate.

use crate::types::{
    Address, Amount, Asset, AssetMovementCategory, LedgerActionType, Location, Timestamp,
    TradePair, TradeType,
};
use serde::{Deserialize, Serialize};

// 2.1: discriminator for the six variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Trade,
    MarginPosition,
    AssetMovement,
    LedgerAction,
    ChainTransaction,
    ProtocolEvent,
}

// 2.2: uniform access across heterogeneous event types. the aggregator sorts and
// trims through this trait alone.
pub trait HistoryEvent {
    fn timestamp(&self) -> Timestamp;
    fn kind(&self) -> EventKind;
}

// 2.3: a spot trade executed at some venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub timestamp: Timestamp,
    pub location: Location,
    pub pair: TradePair,
    pub trade_type: TradeType,
    pub amount: Amount,
    pub rate: Amount,
    pub fee: Amount,
    pub fee_currency: Asset,
    // venue-side identifier for cross-referencing, empty if the venue has none
    pub link: String,
}

impl HistoryEvent for Trade {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn kind(&self) -> EventKind {
        EventKind::Trade
    }
}

// 2.4: a closed margin position. the engine timestamp is the close time, falling
// back to the open time for positions the venue reported without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginPosition {
    pub location: Location,
    pub open_time: Timestamp,
    pub close_time: Option<Timestamp>,
    pub profit_loss: Amount,
    pub pl_currency: Asset,
    pub fee: Amount,
    pub link: String,
}

impl HistoryEvent for MarginPosition {
    fn timestamp(&self) -> Timestamp {
        self.close_time.unwrap_or(self.open_time)
    }

    fn kind(&self) -> EventKind {
        EventKind::MarginPosition
    }
}

// 2.5: a deposit or withdrawal at a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMovement {
    pub location: Location,
    pub category: AssetMovementCategory,
    pub timestamp: Timestamp,
    pub asset: Asset,
    pub amount: Amount,
    pub fee: Amount,
}

impl HistoryEvent for AssetMovement {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn kind(&self) -> EventKind {
        EventKind::AssetMovement
    }
}

// 2.6: a manually tracked action (income, airdrop, gift, ...) from local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerAction {
    pub identifier: u64,
    pub timestamp: Timestamp,
    pub action_type: LedgerActionType,
    pub location: Location,
    pub amount: Amount,
    pub asset: Asset,
}

impl HistoryEvent for LedgerAction {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn kind(&self) -> EventKind {
        EventKind::LedgerAction
    }
}

// 2.7: an on-chain transaction from the chain indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainTransaction {
    pub tx_hash: String,
    pub timestamp: Timestamp,
    pub from_address: Address,
    pub to_address: Option<Address>,
    pub value: Amount,
    pub nonce: u64,
}

impl HistoryEvent for ChainTransaction {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn kind(&self) -> EventKind {
        EventKind::ChainTransaction
    }
}

// 2.8: an event produced by an on-chain protocol module (accrued interest,
// vault deposit, staking reward, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolEvent {
    pub timestamp: Timestamp,
    // module label, e.g. "savings_rate" or "staking_pools"
    pub module: String,
    pub description: String,
    pub asset: Asset,
    pub amount: Amount,
}

impl HistoryEvent for ProtocolEvent {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn kind(&self) -> EventKind {
        EventKind::ProtocolEvent
    }
}

// 2.9: entry of the merged timeline. only trades and margin positions are merged;
// everything else stays in its own collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimelineEntry {
    Trade(Trade),
    Margin(MarginPosition),
}

impl HistoryEvent for TimelineEntry {
    fn timestamp(&self) -> Timestamp {
        match self {
            TimelineEntry::Trade(t) => t.timestamp(),
            TimelineEntry::Margin(m) => m.timestamp(),
        }
    }

    fn kind(&self) -> EventKind {
        match self {
            TimelineEntry::Trade(t) => t.kind(),
            TimelineEntry::Margin(m) => m.kind(),
        }
    }
}

impl From<Trade> for TimelineEntry {
    fn from(trade: Trade) -> Self {
        TimelineEntry::Trade(trade)
    }
}

impl From<MarginPosition> for TimelineEntry {
    fn from(position: MarginPosition) -> Self {
        TimelineEntry::Margin(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_trade(ts: i64, location: Location) -> Trade {
        Trade {
            timestamp: Timestamp::from_secs(ts),
            location,
            pair: TradePair::new(Asset::new("BTC"), Asset::new("EUR")),
            trade_type: TradeType::Buy,
            amount: dec!(0.5),
            rate: dec!(40000),
            fee: dec!(10),
            fee_currency: Asset::new("EUR"),
            link: String::new(),
        }
    }

    #[test]
    fn trade_exposes_timestamp_and_kind() {
        let trade = sample_trade(100, Location::Kraken);
        assert_eq!(trade.timestamp(), Timestamp::from_secs(100));
        assert_eq!(trade.kind(), EventKind::Trade);
    }

    #[test]
    fn margin_position_timestamp_prefers_close_time() {
        let mut position = MarginPosition {
            location: Location::Bitmex,
            open_time: Timestamp::from_secs(50),
            close_time: Some(Timestamp::from_secs(200)),
            profit_loss: dec!(12.5),
            pl_currency: Asset::new("BTC"),
            fee: dec!(0.1),
            link: String::new(),
        };
        assert_eq!(position.timestamp(), Timestamp::from_secs(200));

        position.close_time = None;
        assert_eq!(position.timestamp(), Timestamp::from_secs(50));
    }

    #[test]
    fn timeline_entry_delegates() {
        let entry: TimelineEntry = sample_trade(300, Location::Poloniex).into();
        assert_eq!(entry.timestamp(), Timestamp::from_secs(300));
        assert_eq!(entry.kind(), EventKind::Trade);
    }

    #[test]
    fn events_serialize_round_trip() {
        let trade = sample_trade(100, Location::Binance);
        let json = serde_json::to_string(&trade).unwrap();
        let back: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, back);
    }
}
