use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::party::{Beneficiary, Parties, Party};
use crate::core::constants::{COL_CURRENCY, LEGACY_TYPE_EXPENSE, TX_HEADERS, TYPE_EXPENSE};

/// One typed ledger row.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Transaction {
    #[schema(value_type = Option<String>, example = "2024-06-01T12:34:56")]
    pub timestamp: Option<NaiveDateTime>,
    pub entry_user: String,
    pub paid_by: String,
    pub paid_for: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub currency: String,
    pub amount: Option<f64>,
    pub notes: String,
    pub split_a: Option<f64>,
    pub split_b: Option<f64>,
    pub amount_a: Option<f64>,
    pub amount_b: Option<f64>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        let kind = self.kind.trim();
        kind.eq_ignore_ascii_case(TYPE_EXPENSE) || kind.eq_ignore_ascii_case(LEGACY_TYPE_EXPENSE)
    }

    pub fn payer(&self, parties: &Parties) -> Option<Party> {
        parties.identify(&self.paid_by)
    }

    pub fn beneficiary(&self, parties: &Parties) -> Beneficiary {
        Beneficiary::classify(&self.paid_for, parties)
    }

    /// Per-row split, only when both proportions are present.
    pub fn explicit_split(&self) -> Option<(f64, f64)> {
        match (self.split_a, self.split_b) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }
}

/// The normalized transaction table.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Ledger {
    /// Header labels in storage order, after view-time patching.
    pub columns: Vec<String>,
    pub transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn empty() -> Self {
        Ledger {
            columns: TX_HEADERS.iter().map(|c| c.to_string()).collect(),
            transactions: Vec::new(),
        }
    }

    pub fn has_column(&self, label: &str) -> bool {
        self.columns.iter().any(|c| c.trim().eq_ignore_ascii_case(label))
    }

    pub fn has_currency_column(&self) -> bool {
        self.has_column(COL_CURRENCY)
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }
}
