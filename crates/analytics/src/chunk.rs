//! Per-chunk extraction of stock timelines and shrinkage quantities.

use std::collections::HashMap;

use stocklens_core::ItemCode;

use crate::datetime::parse_period;
use crate::model::StockEvent;
use crate::partition::Chunk;

/// Chunk-local result: everything one worker learned from one chunk.
///
/// Immutable once built; the merge coordinator owns it after the worker hands it over.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChunkResult {
    /// Events per item, in chunk order (not yet time-sorted).
    pub events: HashMap<ItemCode, Vec<StockEvent>>,
    /// Shrinkage quantity per item (units, not currency).
    pub losses: HashMap<ItemCode, f64>,
    pub index: usize,
}

/// Build per-item timelines and shrinkage totals for one chunk.
///
/// Records with a blank code or an unparseable period are skipped silently.
/// A skipped record contributes neither an event nor a loss.
pub fn process_chunk(chunk: &Chunk<'_>) -> ChunkResult {
    let mut result = ChunkResult {
        index: chunk.index,
        ..ChunkResult::default()
    };

    for record in chunk.records {
        let Some(code) = ItemCode::parse(&record.code) else {
            continue;
        };
        let Some(at) = parse_period(&record.period) else {
            continue;
        };

        result.events.entry(code.clone()).or_default().push(StockEvent {
            at,
            opening: record.opening,
            closing: record.closing,
        });

        if let Some(lost) = record.shrinkage() {
            *result.losses.entry(code).or_insert(0.0) += lost;
        }
    }

    result
}
