// 3.0: window trimming over an already-sorted timeline. callers that need a
// sub-range view of a finished run use this instead of re-querying every source.

use crate::events::HistoryEvent;
use crate::types::Timestamp;

/// Returns the contiguous subslice of `entries` whose timestamps fall in the
/// inclusive range `[start, end]`.
///
/// Precondition: `entries` is non-decreasing by timestamp. The result is
/// unspecified if it is not; the input is never re-sorted.
///
/// Boundary semantics: the slice begins at the first element with
/// `timestamp >= start` and ends before the first element after it with
/// `timestamp > end`. Binary search via `partition_point`, which reduces to
/// bisect-left on `start` and bisect-right on `end`.
pub fn trim_to_window<T: HistoryEvent>(entries: &[T], start: Timestamp, end: Timestamp) -> &[T] {
    if entries.is_empty() {
        return entries;
    }

    let start_idx = if entries[0].timestamp() >= start {
        // needs no trimming at the front
        0
    } else {
        let idx = entries.partition_point(|e| e.timestamp() < start);
        if idx == entries.len() {
            // every element precedes the window
            return &entries[..0];
        }
        idx
    };

    let end_idx = if entries[entries.len() - 1].timestamp() <= end {
        // needs no trimming at the back
        entries.len()
    } else {
        start_idx + entries[start_idx..].partition_point(|e| e.timestamp() <= end)
    };

    &entries[start_idx..end_idx]
}
