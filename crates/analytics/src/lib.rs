//! Item-level sales analytics over stock ledger and sales data.
//!
//! For every item sold the engine reports sales amount, shrinkage loss,
//! loss share, on-shelf availability for a reporting window and an ABC
//! class. Ledger records are processed by a fixed worker pool; results do
//! not depend on the worker count.

pub mod abc;
pub mod chunk;
pub mod datetime;
pub mod model;
pub mod osa;
pub mod partition;
pub mod pool;
pub mod service;
pub mod source;
pub mod window;

pub use abc::{classify, classify_in_order, AbcOrder};
pub use model::{
    AbcClass, AnalyticsResponse, ItemAnalytics, ItemAnalyticsRequest, LedgerRecord, SalesRecord,
    StockEvent, SHRINKAGE_MARKER, UNGROUPED_LABEL,
};
pub use osa::on_shelf_availability;
pub use partition::split_into_chunks;
pub use pool::{MergedLedger, WorkerPool};
pub use service::{AnalyticsConfig, AnalyticsService};
pub use source::{DatasetSource, InMemoryDataset, SourceError};
pub use window::ReportWindow;

pub use stocklens_core::{AnalyticsError, AnalyticsResult, DateField, ItemCode};
