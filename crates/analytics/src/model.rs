//! Input records, intermediate events and result rows.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use stocklens_core::ItemCode;

/// Expense category that marks a ledger movement as shrinkage (spoilage in storage).
pub const SHRINKAGE_MARKER: &str = "Порча на складах (94)";

/// Group label used when the ledger carries no parent group for an item.
pub const UNGROUPED_LABEL: &str = "Без группы 🤔";

/// One balance snapshot for one item at one instant.
///
/// `code` and `period` are kept raw: blank codes and unparseable periods are
/// filtered out by the chunk processor, not at construction time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub code: String,
    pub group: String,
    pub period: String,
    pub opening: f64,
    pub closing: f64,
    pub expense_category: Option<String>,
}

impl LedgerRecord {
    /// Positive `opening - closing` when this record is a shrinkage write-off.
    ///
    /// The category must equal [`SHRINKAGE_MARKER`] exactly (no trimming, no case folding).
    pub fn shrinkage(&self) -> Option<f64> {
        if self.expense_category.as_deref() != Some(SHRINKAGE_MARKER) {
            return None;
        }
        let diff = self.opening - self.closing;
        (diff > 0.0).then_some(diff)
    }
}

/// Aggregated sales line for one item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesRecord {
    pub code: String,
    pub name: String,
    pub quantity: f64,
    pub amount: f64,
}

/// Normalized ledger snapshot on an item's timeline.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEvent {
    pub at: NaiveDateTime,
    pub opening: f64,
    pub closing: f64,
}

/// Sales-concentration tier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

impl AbcClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbcClass::A => "A",
            AbcClass::B => "B",
            AbcClass::C => "C",
        }
    }
}

impl core::fmt::Display for AbcClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-item output row.
///
/// Field names on the wire match what existing dashboards consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAnalytics {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Code")]
    pub code: ItemCode,
    #[serde(rename = "Group")]
    pub group: String,
    /// Sales amount, 2 decimals.
    #[serde(rename = "Sales")]
    pub sales: f64,
    /// Shrinkage loss in currency, 2 decimals.
    #[serde(rename = "Loss")]
    pub loss: f64,
    /// Loss as percent of sales, 3 decimals.
    #[serde(rename = "LossOfProfit")]
    pub loss_of_profit: f64,
    /// On-shelf availability percent, 2 decimals.
    #[serde(rename = "OSA")]
    pub osa: f64,
    /// `None` until classified; serialized as an empty string.
    #[serde(rename = "ABC", with = "abc_label", default)]
    pub abc: Option<AbcClass>,
}

/// Analytics request as posted by clients.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemAnalyticsRequest {
    #[serde(default)]
    pub token: String,
    #[serde(rename = "StartDate", default)]
    pub start_date: String,
    #[serde(rename = "FinishDate", default)]
    pub finish_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub items: Vec<ItemAnalytics>,
    pub total: usize,
}

impl AnalyticsResponse {
    pub fn new(items: Vec<ItemAnalytics>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

mod abc_label {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::AbcClass;

    pub fn serialize<S>(value: &Option<AbcClass>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.map(|c| c.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<AbcClass>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "" => Ok(None),
            "A" => Ok(Some(AbcClass::A)),
            "B" => Ok(Some(AbcClass::B)),
            "C" => Ok(Some(AbcClass::C)),
            other => Err(serde::de::Error::custom(format!(
                "expected ABC label A, B, C or empty, got '{other}'"
            ))),
        }
    }
}
