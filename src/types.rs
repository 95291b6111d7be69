// 1.0: all the primitives live here. nothing in the engine works without these types.
// timestamps, assets, addresses, venues. each is a newtype so the compiler catches type mixups.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// 1.1: integer seconds on the domain clock. every event carries one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    // engine-determined lower bound for full-history queries
    pub const GENESIS: Timestamp = Timestamp(0);

    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp())
    }

    pub fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.2: asset symbol. opaque to the engine, it never does asset math.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset(pub String);

impl Asset {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn symbol(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.3: chain/account address. used only to scope module and chain queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.4: base/quote pair a trade was executed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradePair {
    pub base: Asset,
    pub quote: Asset,
}

impl TradePair {
    pub fn new(base: Asset, quote: Asset) -> Self {
        Self { base, quote }
    }
}

impl fmt::Display for TradePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

// 1.5: where an event happened. External marks manually entered data in local storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    External,
    Kraken,
    Poloniex,
    Binance,
    Bitmex,
    Uniswap,
    Balancer,
    Blockchain,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Location::External => "external",
            Location::Kraken => "kraken",
            Location::Poloniex => "poloniex",
            Location::Binance => "binance",
            Location::Bitmex => "bitmex",
            Location::Uniswap => "uniswap",
            Location::Balancer => "balancer",
            Location::Blockchain => "blockchain",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetMovementCategory {
    Deposit,
    Withdrawal,
}

// 1.6: taxonomy for manually tracked ledger actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerActionType {
    Income,
    Expense,
    Loss,
    DividendsIncome,
    Airdrop,
    Gift,
}

// convenience alias: every amount in the engine is a Decimal
pub type Amount = Decimal;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_ordering() {
        assert!(Timestamp::GENESIS < Timestamp::from_secs(1));
        assert_eq!(Timestamp::from_secs(42).as_secs(), 42);
    }

    #[test]
    fn pair_display() {
        let pair = TradePair::new(Asset::new("ETH"), Asset::new("USD"));
        assert_eq!(pair.to_string(), "ETH/USD");
    }

    #[test]
    fn location_display() {
        assert_eq!(Location::External.to_string(), "external");
        assert_eq!(Location::Blockchain.to_string(), "blockchain");
    }
}
