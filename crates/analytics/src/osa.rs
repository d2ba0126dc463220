//! On-shelf availability: share of the report window during which an item's
//! last known balance was positive.

use crate::model::StockEvent;
use crate::window::{hours_between, ReportWindow};

/// Availability percent (2 decimals) for one item's timeline.
///
/// `events` is sorted in place by timestamp (stable, so equal timestamps keep
/// their ledger order). The sweep:
/// - starts at the window start, holding the first event's opening balance;
/// - events before the window only update the held balance;
/// - events at or after the window end stop the sweep;
/// - every other event credits the elapsed interval if the held balance was
///   positive, then moves the cursor to the event and holds its closing balance;
/// - the tail up to the window end is credited if the final balance is positive.
///
/// An empty timeline or a window with no hours yields `0.0`.
pub fn on_shelf_availability(events: &mut [StockEvent], window: &ReportWindow) -> f64 {
    if events.is_empty() {
        return 0.0;
    }

    events.sort_by_key(|e| e.at);

    let start = window.start();
    let end = window.end();

    let mut balance = events[0].opening;
    let mut cursor = start;
    let mut available_hours = 0.0;

    for event in events.iter() {
        if event.at < start {
            balance = event.closing;
            continue;
        }
        if event.at >= end {
            break;
        }

        if balance > 0.0 {
            available_hours += hours_between(cursor, event.at);
        }
        balance = event.closing;
        cursor = event.at;
    }

    if cursor < end && balance > 0.0 {
        available_hours += hours_between(cursor, end);
    }

    let total_hours = window.total_hours();
    if total_hours <= 0.0 {
        return 0.0;
    }

    let ratio = available_hours / total_hours;
    (ratio * 10_000.0).round() / 100.0
}
