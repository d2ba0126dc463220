//! Upstream data seam.
//!
//! The engine never performs IO itself: callers hand it a [`DatasetSource`]
//! (files, database, fixtures) and any failure there fails the whole call
//! before chunking begins.

use std::sync::Arc;

use thiserror::Error;

use crate::model::{LedgerRecord, SalesRecord};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The backing store could not be read (missing file, connection refused, ...).
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// The backing store was read but its content could not be decoded.
    #[error("malformed data: {0}")]
    Malformed(String),
}

/// Provider of the two input collections.
pub trait DatasetSource: Send + Sync {
    fn load_ledger(&self) -> Result<Vec<LedgerRecord>, SourceError>;

    fn load_sales(&self) -> Result<Vec<SalesRecord>, SourceError>;
}

impl<S> DatasetSource for Arc<S>
where
    S: DatasetSource + ?Sized,
{
    fn load_ledger(&self) -> Result<Vec<LedgerRecord>, SourceError> {
        (**self).load_ledger()
    }

    fn load_sales(&self) -> Result<Vec<SalesRecord>, SourceError> {
        (**self).load_sales()
    }
}

/// Fixed in-memory dataset for tests/dev.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataset {
    ledger: Vec<LedgerRecord>,
    sales: Vec<SalesRecord>,
}

impl InMemoryDataset {
    pub fn new(ledger: Vec<LedgerRecord>, sales: Vec<SalesRecord>) -> Self {
        Self { ledger, sales }
    }
}

impl DatasetSource for InMemoryDataset {
    fn load_ledger(&self) -> Result<Vec<LedgerRecord>, SourceError> {
        Ok(self.ledger.clone())
    }

    fn load_sales(&self) -> Result<Vec<SalesRecord>, SourceError> {
        Ok(self.sales.clone())
    }
}
