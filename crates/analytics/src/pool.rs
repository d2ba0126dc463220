//! Fixed-size worker pool over ledger chunks, with a single-threaded merge.
//!
//! Layout of one run:
//! - a dispatcher thread feeds chunks into a bounded work queue, then closes it;
//! - `workers` threads pull chunks, run [`process_chunk`], and send one
//!   immutable [`ChunkResult`] per chunk;
//! - the results channel disconnects once every worker has returned (each
//!   worker owns one sender clone), which ends the collector loop;
//! - the calling thread collects, orders by chunk index and merges.
//!
//! Workers never touch the merged maps, so no lock is needed around them.

use std::collections::HashMap;
use std::thread;

use crossbeam_channel::bounded;
use tracing::debug;

use stocklens_core::ItemCode;

use crate::chunk::{process_chunk, ChunkResult};
use crate::model::{LedgerRecord, StockEvent};
use crate::partition::split_into_chunks;

/// Global per-item state after all chunks are merged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedLedger {
    pub events: HashMap<ItemCode, Vec<StockEvent>>,
    pub losses: HashMap<ItemCode, f64>,
}

impl MergedLedger {
    /// Fold one chunk result in: concatenate event lists, sum loss quantities.
    pub fn absorb(&mut self, chunk: ChunkResult) {
        for (code, events) in chunk.events {
            self.events.entry(code).or_default().extend(events);
        }
        for (code, lost) in chunk.losses {
            *self.losses.entry(code).or_insert(0.0) += lost;
        }
    }

    /// Merge chunk results in chunk-index order.
    ///
    /// Ordering by index makes every event list equal to the ledger's own
    /// record order, whatever order the workers finished in.
    pub fn from_chunks(mut chunks: Vec<ChunkResult>) -> Self {
        chunks.sort_by_key(|c| c.index);
        let mut merged = Self::default();
        for chunk in chunks {
            merged.absorb(chunk);
        }
        merged
    }

    pub fn loss_quantity(&self, code: &ItemCode) -> f64 {
        self.losses.get(code).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// Pool with `workers` threads (at least 1).
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Partition `records`, process every chunk concurrently and merge.
    pub fn run(&self, records: &[LedgerRecord]) -> MergedLedger {
        let chunks = split_into_chunks(records, self.workers);
        let chunk_count = chunks.len();
        if chunk_count == 0 {
            return MergedLedger::default();
        }

        let (work_tx, work_rx) = bounded(chunk_count);
        let (result_tx, result_rx) = bounded::<ChunkResult>(chunk_count);

        let collected = thread::scope(|scope| {
            for worker in 0..self.workers {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    let mut processed = 0usize;
                    for chunk in work_rx.iter() {
                        if result_tx.send(process_chunk(&chunk)).is_err() {
                            break;
                        }
                        processed += 1;
                    }
                    debug!(worker, processed, "ledger worker finished");
                });
            }
            drop(work_rx);
            drop(result_tx);

            scope.spawn(move || {
                for chunk in chunks {
                    if work_tx.send(chunk).is_err() {
                        break;
                    }
                }
            });

            result_rx.iter().collect::<Vec<_>>()
        });

        debug!(chunks = collected.len(), workers = self.workers, "merging chunk results");
        MergedLedger::from_chunks(collected)
    }
}
