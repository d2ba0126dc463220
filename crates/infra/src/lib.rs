//! Infrastructure layer: configuration, on-disk dumps, token file.

pub mod config;
pub mod dump;
pub mod token_file;

pub use config::{Config, ConfigError};
pub use dump::{load_sales_dump, load_stock_dump, JsonDumpDataset, LoadError};
pub use token_file::seed_token_store;
