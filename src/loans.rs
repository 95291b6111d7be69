// 9.0: margin-loan post-processing. one exchange kind reports a raw loan ledger
// as auxiliary payload next to its trade history; this module turns those rows
// into typed loan events. the orchestrator always passes a window starting at
// genesis: loans must be visible from the dawn of history because cost basis
// carries forward indefinitely.

use crate::report::ErrorSink;
use crate::types::{Amount, Asset, Location, Timestamp};
use serde::{Deserialize, Serialize};

// 9.1: a raw margin-loan ledger row as the venue reports it. not validated yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLoanRecord {
    pub open_time: Timestamp,
    pub close_time: Timestamp,
    pub asset: Asset,
    pub amount_lent: Amount,
    pub earned: Amount,
    pub fee: Amount,
}

// 9.2: a validated loan event. its engine timestamp is the close time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub location: Location,
    pub open_time: Timestamp,
    pub close_time: Timestamp,
    pub asset: Asset,
    pub amount_lent: Amount,
    pub earned: Amount,
    pub fee: Amount,
}

/// Converts raw loan rows into loan events for the window `[start, end]`
/// (bounded by close time). Malformed rows are reported to the sink and
/// dropped; the processor itself never fails, hard failures are the calling
/// stage's responsibility. Output is sorted ascending by close time.
pub fn process_margin_loans(
    sink: &mut dyn ErrorSink,
    location: Location,
    records: &[RawLoanRecord],
    start: Timestamp,
    end: Timestamp,
) -> Vec<Loan> {
    let mut loans = Vec::new();
    for record in records {
        if record.close_time < record.open_time {
            sink.report(format!(
                "Ignoring {location} loan of {} closing at {} before it opened at {}",
                record.asset, record.close_time, record.open_time,
            ));
            continue;
        }
        if record.amount_lent <= Amount::ZERO {
            sink.report(format!(
                "Ignoring {location} loan of {} with non-positive lent amount {}",
                record.asset, record.amount_lent,
            ));
            continue;
        }
        if record.close_time < start || record.close_time > end {
            continue;
        }
        loans.push(Loan {
            location,
            open_time: record.open_time,
            close_time: record.close_time,
            asset: record.asset.clone(),
            amount_lent: record.amount_lent,
            earned: record.earned,
            fee: record.fee,
        });
    }

    loans.sort_by_key(|loan| loan.close_time);
    loans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CollectingSink;
    use rust_decimal_macros::dec;

    fn record(open: i64, close: i64, lent: &str) -> RawLoanRecord {
        RawLoanRecord {
            open_time: Timestamp::from_secs(open),
            close_time: Timestamp::from_secs(close),
            asset: Asset::new("BTC"),
            amount_lent: lent.parse().unwrap(),
            earned: dec!(0.01),
            fee: dec!(0.001),
        }
    }

    #[test]
    fn loans_filtered_by_close_time_and_sorted() {
        let mut sink = CollectingSink::new();
        let records = vec![record(10, 500, "1"), record(20, 100, "2"), record(30, 900, "3")];

        let loans = process_margin_loans(
            &mut sink,
            Location::Poloniex,
            &records,
            Timestamp::GENESIS,
            Timestamp::from_secs(600),
        );

        let closes: Vec<i64> = loans.iter().map(|l| l.close_time.as_secs()).collect();
        assert_eq!(closes, vec![100, 500]);
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn malformed_rows_reported_and_dropped() {
        let mut sink = CollectingSink::new();
        let records = vec![
            record(200, 100, "1"), // closes before it opens
            record(10, 50, "0"),   // nothing lent
            record(10, 60, "5"),
        ];

        let loans = process_margin_loans(
            &mut sink,
            Location::Poloniex,
            &records,
            Timestamp::GENESIS,
            Timestamp::from_secs(1_000),
        );

        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].close_time.as_secs(), 60);
        assert_eq!(sink.messages().len(), 2);
        assert!(sink.messages()[0].contains("before it opened"));
        assert!(sink.messages()[1].contains("non-positive lent amount"));
    }

    #[test]
    fn empty_input_produces_no_loans() {
        let mut sink = CollectingSink::new();
        let loans = process_margin_loans(
            &mut sink,
            Location::Poloniex,
            &[],
            Timestamp::GENESIS,
            Timestamp::from_secs(100),
        );
        assert!(loans.is_empty());
    }
}
