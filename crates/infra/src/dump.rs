//! JSON dump loaders for the stock ledger and sales exports.
//!
//! Dumps are arrays of flat objects keyed by the accounting system's
//! (Cyrillic) field names. Missing or `null` fields decode as empty/zero.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, info};

use stocklens_analytics::{DatasetSource, LedgerRecord, SalesRecord, SourceError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<LoadError> for SourceError {
    fn from(err: LoadError) -> Self {
        match &err {
            LoadError::Io { .. } => SourceError::Unavailable(err.to_string()),
            LoadError::Parse { .. } => SourceError::Malformed(err.to_string()),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StockRow {
    #[serde(rename = "НоменклатураКод", deserialize_with = "null_as_default")]
    code: String,
    #[serde(rename = "Родитель", deserialize_with = "null_as_default")]
    group: String,
    #[serde(rename = "Период", deserialize_with = "null_as_default")]
    period: String,
    #[serde(rename = "НачальныйОстаток", deserialize_with = "null_as_default")]
    opening: f64,
    #[serde(rename = "КонечныйОстаток", deserialize_with = "null_as_default")]
    closing: f64,
    #[serde(rename = "СтатьяРасходов")]
    expense_category: Option<String>,
}

impl From<StockRow> for LedgerRecord {
    fn from(row: StockRow) -> Self {
        Self {
            code: row.code,
            group: row.group,
            period: row.period,
            opening: row.opening,
            closing: row.closing,
            expense_category: row.expense_category,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SalesRow {
    #[serde(rename = "Код", deserialize_with = "null_as_default")]
    code: String,
    #[serde(rename = "Номенклатура", deserialize_with = "null_as_default")]
    name: String,
    #[serde(rename = "Количество", deserialize_with = "null_as_default")]
    quantity: f64,
    #[serde(rename = "Сумма", deserialize_with = "null_as_default")]
    amount: f64,
}

impl From<SalesRow> for SalesRecord {
    fn from(row: SalesRow) -> Self {
        Self {
            code: row.code,
            name: row.name,
            quantity: row.quantity,
            amount: row.amount,
        }
    }
}

fn read_rows<T>(path: &Path) -> Result<Vec<T>, LoadError>
where
    T: for<'de> Deserialize<'de>,
{
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read dump file");
    serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_stock_dump(path: impl AsRef<Path>) -> Result<Vec<LedgerRecord>, LoadError> {
    let path = path.as_ref();
    let rows: Vec<StockRow> = read_rows(path)?;
    info!(path = %path.display(), records = rows.len(), "loaded stock dump");
    Ok(rows.into_iter().map(LedgerRecord::from).collect())
}

pub fn load_sales_dump(path: impl AsRef<Path>) -> Result<Vec<SalesRecord>, LoadError> {
    let path = path.as_ref();
    let rows: Vec<SalesRow> = read_rows(path)?;
    info!(path = %path.display(), records = rows.len(), "loaded sales dump");
    Ok(rows.into_iter().map(SalesRecord::from).collect())
}

/// Reads both dumps from disk on every call, so refreshed exports are
/// picked up without a restart.
#[derive(Debug, Clone)]
pub struct JsonDumpDataset {
    stock_path: PathBuf,
    sales_path: PathBuf,
}

impl JsonDumpDataset {
    pub fn new(stock_path: impl Into<PathBuf>, sales_path: impl Into<PathBuf>) -> Self {
        Self {
            stock_path: stock_path.into(),
            sales_path: sales_path.into(),
        }
    }

    pub fn stock_path(&self) -> &Path {
        &self.stock_path
    }

    pub fn sales_path(&self) -> &Path {
        &self.sales_path
    }
}

impl DatasetSource for JsonDumpDataset {
    fn load_ledger(&self) -> Result<Vec<LedgerRecord>, SourceError> {
        Ok(load_stock_dump(&self.stock_path)?)
    }

    fn load_sales(&self) -> Result<Vec<SalesRecord>, SourceError> {
        Ok(load_sales_dump(&self.sales_path)?)
    }
}
