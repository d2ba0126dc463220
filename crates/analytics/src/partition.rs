//! Contiguous partitioning of the ledger into per-worker chunks.

use crate::model::LedgerRecord;

/// A contiguous slice of the ledger assigned to one worker.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Chunk<'a> {
    pub records: &'a [LedgerRecord],
    pub index: usize,
}

/// Split `records` into near-equal contiguous chunks, one per worker.
///
/// Chunk size is `ceil(len / workers)`, so every chunk but the last is full
/// and the chunk count is `ceil(len / chunk_size)`. Concatenating the chunks
/// in index order reproduces `records` exactly. `workers` is clamped to at
/// least 1; an empty ledger yields no chunks.
pub fn split_into_chunks(records: &[LedgerRecord], workers: usize) -> Vec<Chunk<'_>> {
    if records.is_empty() {
        return Vec::new();
    }

    let workers = workers.max(1);
    let chunk_size = records.len().div_ceil(workers);

    records
        .chunks(chunk_size)
        .enumerate()
        .map(|(index, records)| Chunk { records, index })
        .collect()
}
