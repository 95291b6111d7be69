// 6.0: on-chain protocol modules and AMM trade venues. both sets are fixed and
// canonically ordered: the iteration order below is the tie-break authority for
// equal-timestamp events and must stay stable across runs.

use crate::events::{ProtocolEvent, Trade};
use crate::sources::SourceError;
use crate::types::{Address, Location, Timestamp};

// 6.1: venues whose swaps count as trades in the merged timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmmVenue {
    Balancer,
    Uniswap,
}

impl AmmVenue {
    pub const ALL: [AmmVenue; 2] = [AmmVenue::Balancer, AmmVenue::Uniswap];

    pub fn name(&self) -> &'static str {
        match self {
            AmmVenue::Balancer => "balancer",
            AmmVenue::Uniswap => "uniswap",
        }
    }

    pub fn location(&self) -> Location {
        match self {
            AmmVenue::Balancer => Location::Balancer,
            AmmVenue::Uniswap => Location::Uniswap,
        }
    }
}

// 6.2: the protocol module kinds with history worth accounting for. the first
// three accrue continuously, so their history is queried from genesis no matter
// what window the caller asked for; the two staking-reward style kinds at the
// end are queried from the caller's actual start. domain rule, not an accident:
// cost basis needs the full accrual history but only the requested reward slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolModuleKind {
    SavingsRate,
    CollateralVaults,
    YieldVaults,
    LendingMarkets,
    StakingPools,
}

impl ProtocolModuleKind {
    pub const ALL: [ProtocolModuleKind; 5] = [
        ProtocolModuleKind::SavingsRate,
        ProtocolModuleKind::CollateralVaults,
        ProtocolModuleKind::YieldVaults,
        ProtocolModuleKind::LendingMarkets,
        ProtocolModuleKind::StakingPools,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProtocolModuleKind::SavingsRate => "savings_rate",
            ProtocolModuleKind::CollateralVaults => "collateral_vaults",
            ProtocolModuleKind::YieldVaults => "yield_vaults",
            ProtocolModuleKind::LendingMarkets => "lending_markets",
            ProtocolModuleKind::StakingPools => "staking_pools",
        }
    }

    /// Lower bound of this module's query window for a run starting at `run_start`.
    pub fn window_start(&self, run_start: Timestamp) -> Timestamp {
        match self {
            ProtocolModuleKind::SavingsRate
            | ProtocolModuleKind::CollateralVaults
            | ProtocolModuleKind::YieldVaults => Timestamp::GENESIS,
            ProtocolModuleKind::LendingMarkets | ProtocolModuleKind::StakingPools => run_start,
        }
    }
}

// 6.3: swap history of one AMM venue, restricted to the addresses registered
// for that venue.
pub trait AmmTradeSource {
    fn trades(
        &self,
        addresses: &[Address],
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Trade>, SourceError>;
}

// 6.4: history events of one protocol module.
pub trait ProtocolModule {
    fn history_events(
        &self,
        addresses: &[Address],
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<ProtocolEvent>, SourceError>;
}

// 6.5: which modules are active for this user, and which addresses each one
// watches. an absent module means the stage is skipped (progress still advances).
pub trait ModuleRegistry {
    fn amm_venue(&self, venue: AmmVenue) -> Option<&dyn AmmTradeSource>;

    fn protocol_module(&self, kind: ProtocolModuleKind) -> Option<&dyn ProtocolModule>;

    fn addresses_for_amm(&self, venue: AmmVenue) -> Vec<Address>;

    fn addresses_for_module(&self, kind: ProtocolModuleKind) -> Vec<Address>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_orders_are_stable() {
        assert_eq!(AmmVenue::ALL, [AmmVenue::Balancer, AmmVenue::Uniswap]);
        assert_eq!(ProtocolModuleKind::ALL.len(), 5);
        assert_eq!(ProtocolModuleKind::ALL[0], ProtocolModuleKind::SavingsRate);
        assert_eq!(ProtocolModuleKind::ALL[4], ProtocolModuleKind::StakingPools);
    }

    #[test]
    fn accrual_modules_query_from_genesis() {
        let run_start = Timestamp::from_secs(1_600_000_000);
        assert_eq!(
            ProtocolModuleKind::SavingsRate.window_start(run_start),
            Timestamp::GENESIS
        );
        assert_eq!(
            ProtocolModuleKind::CollateralVaults.window_start(run_start),
            Timestamp::GENESIS
        );
        assert_eq!(
            ProtocolModuleKind::YieldVaults.window_start(run_start),
            Timestamp::GENESIS
        );
    }

    #[test]
    fn staking_style_modules_respect_run_start() {
        let run_start = Timestamp::from_secs(1_600_000_000);
        assert_eq!(ProtocolModuleKind::LendingMarkets.window_start(run_start), run_start);
        assert_eq!(ProtocolModuleKind::StakingPools.window_start(run_start), run_start);
    }
}
