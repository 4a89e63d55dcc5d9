use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::settings::SplitRatio;
use crate::core::constants::TYPE_EXPENSE;

fn default_kind() -> String {
    TYPE_EXPENSE.to_string()
}

/// A transaction as entered by a caller, before it is made canonical.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct NewTransaction {
    /// Defaults to the current local time.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2024-06-01T00:00:00")]
    pub timestamp: Option<NaiveDateTime>,
    /// Defaults to the payer.
    #[serde(default)]
    pub entry_user: Option<String>,
    pub paid_by: String,
    /// Defaults to both parties.
    #[serde(default)]
    pub paid_for: Option<String>,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub category: String,
    /// Defaults to the base currency.
    #[serde(default)]
    pub currency: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub notes: String,
    /// Per-transaction split; only honored for shared expenses.
    #[serde(default)]
    pub split: Option<SplitRatio>,
}

/// Canonical field name to value, ready to be appended by storage.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TransactionRecord {
    pub fields: BTreeMap<String, String>,
}

impl TransactionRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(field.to_string(), value.into());
    }

    /// Values laid out in `header` order; unknown labels get an empty cell.
    pub fn ordered_for(&self, header: &[String]) -> Vec<String> {
        header
            .iter()
            .map(|label| self.fields.get(&label.trim().to_lowercase()).cloned().unwrap_or_default())
            .collect()
    }
}
