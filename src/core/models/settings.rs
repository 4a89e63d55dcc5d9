use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::constants::{DEFAULT_CATEGORIES, DEFAULT_SPLIT_A, DEFAULT_SPLIT_B};

/// Proportions of a shared expense owed by each party.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SplitRatio {
    pub a: f64,
    pub b: f64,
}

impl SplitRatio {
    pub fn new(a: f64, b: f64) -> Self {
        SplitRatio { a, b }
    }

    pub fn apply(&self, amount: f64) -> (f64, f64) {
        (amount * self.a, amount * self.b)
    }
}

impl Default for SplitRatio {
    fn default() -> Self {
        SplitRatio {
            a: DEFAULT_SPLIT_A,
            b: DEFAULT_SPLIT_B,
        }
    }
}

/// Ledger-wide configuration stored next to the transactions.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Settings {
    pub default_split: SplitRatio,
    pub categories: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_split: SplitRatio::default(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}
