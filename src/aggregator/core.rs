// 10.1 aggregator/core.rs: the run loop. holds the capability handles and walks
// the stage pipeline in its one fixed order.

use super::results::{AggregatorError, HistoryBundle};
use crate::events::{HistoryEvent, TimelineEntry};
use crate::loans::process_margin_loans;
use crate::modules::{AmmVenue, ModuleRegistry, ProtocolModuleKind};
use crate::report::ErrorSink;
use crate::run_state::{NullProgress, ProgressObserver, RunContext, SoftErrors};
use crate::sources::{ChainSource, ExchangeSource};
use crate::storage::{Storage, StorageError};
use crate::types::Timestamp;
use tracing::{info, warn};

/** 10.2: the orchestrator. owns its capabilities; per-run state lives in a fresh
RunContext per call, so the same instance can serve sequential runs. it must not
serve two concurrent runs (single-flight per instance). */
pub struct HistoryAggregator {
    // registration order doubles as the timeline tie-break order
    exchanges: Vec<Box<dyn ExchangeSource>>,
    chain: Box<dyn ChainSource>,
    storage: Box<dyn Storage>,
    registry: Box<dyn ModuleRegistry>,
    sink: Box<dyn ErrorSink>,
    observer: Box<dyn ProgressObserver>,
}

// advance then notify, so observers see the post-stage percentage
fn advance(ctx: &mut RunContext, observer: &mut dyn ProgressObserver) {
    ctx.advance();
    observer.on_progress(ctx.stage(), ctx.percentage());
}

impl HistoryAggregator {
    pub fn new(
        chain: Box<dyn ChainSource>,
        storage: Box<dyn Storage>,
        registry: Box<dyn ModuleRegistry>,
        sink: Box<dyn ErrorSink>,
    ) -> Self {
        Self {
            exchanges: Vec::new(),
            chain,
            storage,
            registry,
            sink,
            observer: Box::new(NullProgress),
        }
    }

    /// Replaces the progress observer. Updates arrive once per completed stage.
    pub fn set_progress_observer(&mut self, observer: Box<dyn ProgressObserver>) {
        self.observer = observer;
    }

    /// Registers a connected exchange. Registration order is preserved and
    /// becomes part of the canonical event ordering.
    pub fn register_exchange(&mut self, exchange: Box<dyn ExchangeSource>) {
        self.exchanges.push(exchange);
    }

    pub fn connected_exchanges(&self) -> usize {
        self.exchanges.len()
    }

    /// Aggregates history over `[start_ts, end_ts]`.
    ///
    /// Every per-source failure is soft: it becomes a line of the bundle's
    /// `error_text` and the run continues. The single hard failure is a local
    /// storage fault, which aborts with no partial bundle.
    ///
    /// Exchange, chain and accrual-style module stages are queried from
    /// genesis rather than `start_ts`: downstream cost-basis processing needs
    /// complete history. Only ledger actions and the staking-style stages use
    /// the caller's actual start.
    pub fn run(
        &mut self,
        start_ts: Timestamp,
        end_ts: Timestamp,
        has_premium: bool,
    ) -> Result<HistoryBundle, AggregatorError> {
        let mut ctx = RunContext::new(self.exchanges.len());
        let mut soft = SoftErrors::new();
        info!(
            start_ts = start_ts.as_secs(),
            end_ts = end_ts.as_secs(),
            total_steps = ctx.total_steps(),
            "aggregating history"
        );

        let mut timeline: Vec<TimelineEntry> = Vec::new();
        let mut loans = Vec::new();
        let mut asset_movements = Vec::new();
        let mut protocol_events = Vec::new();

        // stage 1: connected exchanges, full history regardless of start_ts
        for exchange in &self.exchanges {
            ctx.set_stage(format!("Querying {} exchange history", exchange.name()));
            match exchange.query_history(Timestamp::GENESIS, end_ts) {
                Ok(batch) => {
                    timeline.extend(batch.trades.into_iter().map(TimelineEntry::from));
                    timeline.extend(batch.margin_positions.into_iter().map(TimelineEntry::from));
                    asset_movements.extend(batch.asset_movements);
                    if let Some(records) = batch.loan_data {
                        // loans always use the full window, independent of start_ts
                        loans.extend(process_margin_loans(
                            self.sink.as_mut(),
                            exchange.location(),
                            &records,
                            Timestamp::GENESIS,
                            end_ts,
                        ));
                    }
                }
                Err(err) => {
                    warn!(exchange = exchange.name(), %err, "exchange history query failed");
                    soft.push(err.to_string());
                }
            }
            advance(&mut ctx, self.observer.as_mut());
        }

        // stage 2: chain transactions for all addresses, oldest first, no cap.
        // a failing indexer is converted into an empty result, never propagated.
        ctx.set_stage("Querying chain transactions history");
        let chain_transactions = match self.chain.query_transactions(
            None,
            Timestamp::GENESIS,
            end_ts,
            true,
            false,
        ) {
            Ok(transactions) => transactions,
            Err(err) => {
                warn!(%err, "chain transaction query failed");
                self.sink.report(format!(
                    "There was an error when querying the chain indexer for transactions: {err}. \
                     The history result will not include chain transactions",
                ));
                soft.push(err.to_string());
                Vec::new()
            }
        };
        advance(&mut ctx, self.observer.as_mut());

        // stage 3: locally stored external trades. storage faults abort the run.
        ctx.set_stage("Querying external trades history");
        let external_trades =
            self.storage
                .trades(Timestamp::GENESIS, end_ts, Some(crate::types::Location::External))?;
        timeline.extend(external_trades.into_iter().map(TimelineEntry::from));
        advance(&mut ctx, self.observer.as_mut());

        // stage 4: ledger actions, the one stage that uses the caller's start
        ctx.set_stage("Querying ledger actions history");
        let ledger_actions = self.query_ledger_actions(has_premium, start_ts, end_ts)?;
        advance(&mut ctx, self.observer.as_mut());

        // stage 5: AMM venues in canonical order; inactive venues skip but still count
        for venue in AmmVenue::ALL {
            if let Some(amm) = self.registry.amm_venue(venue) {
                ctx.set_stage(format!("Querying {} trade history", venue.name()));
                let addresses = self.registry.addresses_for_amm(venue);
                match amm.trades(&addresses, Timestamp::GENESIS, end_ts) {
                    Ok(trades) => {
                        timeline.extend(trades.into_iter().map(TimelineEntry::from));
                    }
                    Err(err) => {
                        warn!(venue = venue.name(), %err, "AMM trade query failed");
                        soft.push(err.to_string());
                    }
                }
            }
            advance(&mut ctx, self.observer.as_mut());
        }

        // stage 6: protocol modules in canonical order. accrual-style modules are
        // queried from genesis, the staking-style ones from the caller's start.
        for kind in ProtocolModuleKind::ALL {
            if let Some(module) = self.registry.protocol_module(kind) {
                ctx.set_stage(format!("Querying {} history", kind.name()));
                let addresses = self.registry.addresses_for_module(kind);
                match module.history_events(&addresses, kind.window_start(start_ts), end_ts) {
                    Ok(events) => protocol_events.extend(events),
                    Err(err) => {
                        warn!(module = kind.name(), %err, "protocol module query failed");
                        soft.push(err.to_string());
                    }
                }
            }
            advance(&mut ctx, self.observer.as_mut());
        }

        // stage 7: engine-native staking events, unconditional
        ctx.set_stage("Querying native staking history");
        match self.chain.native_staking_events(start_ts, end_ts) {
            Ok(events) => protocol_events.extend(events),
            Err(err) => {
                warn!(%err, "native staking query failed");
                soft.push(err.to_string());
            }
        }
        advance(&mut ctx, self.observer.as_mut());

        // stage 8: stable sort keeps the stage/registration order for equal
        // timestamps, which is the canonical tie-break
        timeline.sort_by_key(|entry| entry.timestamp());

        info!(
            timeline = timeline.len(),
            soft_errors = soft.len(),
            progress = ctx.percentage(),
            "history aggregation complete"
        );

        Ok(HistoryBundle {
            error_text: soft.into_text(),
            timeline,
            loans,
            asset_movements,
            chain_transactions,
            protocol_events,
            ledger_actions,
        })
    }

    // entitlement caps were removed upstream; the flag stays for interface
    // stability and gates nothing today
    fn query_ledger_actions(
        &self,
        _has_premium: bool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<crate::events::LedgerAction>, StorageError> {
        self.storage.ledger_actions(from, to, None)
    }
}
