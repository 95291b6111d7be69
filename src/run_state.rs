// 4.0: per-run progress and soft-error accounting. a RunContext is created fresh
// for every aggregation call and dropped with it, so consecutive runs on the same
// aggregator never see stale state. one run per context; never share across runs.

use tracing::info;

// fixed stages beyond the per-exchange ones: chain transactions, external trades,
// ledger actions, the AMM venues, the protocol modules, native staking.
pub const NUM_FIXED_QUERY_STEPS: usize = 12;

// 4.1: step counter plus stage label. completed is monotonically non-decreasing
// within a run. the terminal percentage is deliberately not forced to 100: the
// fixed-step constant counts one step more than the stages actually executed,
// so a finished run reports (total - 1) * 100 / total.
#[derive(Debug, Clone)]
pub struct RunContext {
    stage: String,
    completed: usize,
    total: usize,
}

impl RunContext {
    pub fn new(connected_exchanges: usize) -> Self {
        Self {
            stage: "initializing".to_string(),
            completed: 0,
            total: connected_exchanges + NUM_FIXED_QUERY_STEPS,
        }
    }

    pub fn set_stage(&mut self, stage: impl Into<String>) {
        self.stage = stage.into();
        info!(stage = %self.stage, progress = self.percentage(), "history stage");
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn advance(&mut self) {
        self.completed += 1;
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total_steps(&self) -> usize {
        self.total
    }

    pub fn percentage(&self) -> f64 {
        self.completed as f64 * 100.0 / self.total as f64
    }
}

// 4.2: run-scoped progress notifications. the run loop pushes an update after
// every completed stage so a UI can show progress while the run blocks. the
// counters themselves stay owned by the run's RunContext.
pub trait ProgressObserver {
    fn on_progress(&mut self, stage: &str, percentage: f64);
}

// observer that drops everything, for callers without a progress surface
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressObserver for NullProgress {
    fn on_progress(&mut self, _stage: &str, _percentage: f64) {}
}

// 4.3: ordered accumulator for recoverable failures. messages are joined in the
// order they occurred; the run never aborts because of anything recorded here.
#[derive(Debug, Default)]
pub struct SoftErrors {
    messages: Vec<String>,
}

impl SoftErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn into_text(self) -> String {
        self.messages.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_monotonic() {
        let mut ctx = RunContext::new(3);
        assert_eq!(ctx.total_steps(), 3 + NUM_FIXED_QUERY_STEPS);
        assert_eq!(ctx.percentage(), 0.0);

        let mut last = 0.0;
        for _ in 0..10 {
            ctx.advance();
            assert!(ctx.percentage() >= last);
            last = ctx.percentage();
        }
        assert_eq!(ctx.completed(), 10);
    }

    #[test]
    fn terminal_percentage_stays_below_100() {
        // zero exchanges: 11 executed stages against a total of 12
        let mut ctx = RunContext::new(0);
        for _ in 0..NUM_FIXED_QUERY_STEPS - 1 {
            ctx.advance();
        }
        let expected = (NUM_FIXED_QUERY_STEPS as f64 - 1.0) * 100.0 / NUM_FIXED_QUERY_STEPS as f64;
        assert_eq!(ctx.percentage(), expected);
        assert!(ctx.percentage() < 100.0);
    }

    #[test]
    fn stage_label_updates() {
        let mut ctx = RunContext::new(0);
        assert_eq!(ctx.stage(), "initializing");
        ctx.set_stage("Querying kraken exchange history");
        assert_eq!(ctx.stage(), "Querying kraken exchange history");
    }

    #[test]
    fn null_progress_observer_accepts_updates() {
        let mut observer = NullProgress;
        observer.on_progress("Querying kraken exchange history", 25.0);
    }

    #[test]
    fn soft_errors_join_in_order() {
        let mut errors = SoftErrors::new();
        assert!(errors.is_empty());
        errors.push("first");
        errors.push("second");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.into_text(), "first\nsecond");
    }

    #[test]
    fn empty_soft_errors_yield_empty_text() {
        assert_eq!(SoftErrors::new().into_text(), "");
    }
}
