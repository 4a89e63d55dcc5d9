use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::party::{Parties, Party};
use crate::core::constants::SETTLEMENT_EPSILON;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SettlementDirection {
    BOwesA,
    AOwesB,
    Settled,
}

/// Single-direction debt between the two parties.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Settlement {
    pub direction: SettlementDirection,
    pub amount: f64,
}

impl Settlement {
    pub fn settled() -> Self {
        Settlement {
            direction: SettlementDirection::Settled,
            amount: 0.0,
        }
    }

    /// Derives the settlement from party A's net balance.
    pub fn from_net_a(net_a: f64) -> Self {
        if net_a > SETTLEMENT_EPSILON {
            Settlement {
                direction: SettlementDirection::BOwesA,
                amount: net_a,
            }
        } else if net_a < -SETTLEMENT_EPSILON {
            Settlement {
                direction: SettlementDirection::AOwesB,
                amount: -net_a,
            }
        } else {
            Self::settled()
        }
    }

    pub fn b_owes_a(&self) -> f64 {
        match self.direction {
            SettlementDirection::BOwesA => self.amount.max(0.0),
            _ => 0.0,
        }
    }

    pub fn a_owes_b(&self) -> f64 {
        match self.direction {
            SettlementDirection::AOwesB => self.amount.max(0.0),
            _ => 0.0,
        }
    }

    /// `(debtor, creditor)` unless settled.
    pub fn parties(&self) -> Option<(Party, Party)> {
        match self.direction {
            SettlementDirection::BOwesA => Some((Party::B, Party::A)),
            SettlementDirection::AOwesB => Some((Party::A, Party::B)),
            SettlementDirection::Settled => None,
        }
    }
}

/// Aggregator output for one set of transactions.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DebtSummary {
    pub net_a: f64,
    pub net_b: f64,
    pub settlement: Settlement,
    /// Expense rows that contributed to the sums.
    pub counted: usize,
}

impl DebtSummary {
    pub fn zero() -> Self {
        DebtSummary {
            net_a: 0.0,
            net_b: 0.0,
            settlement: Settlement::settled(),
            counted: 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CurrencyBalance {
    pub currency: String,
    pub net_a: f64,
    pub net_b: f64,
    pub settlement: Settlement,
    /// False when no transaction at all exists in this currency.
    pub has_activity: bool,
}

impl CurrencyBalance {
    pub fn new(currency: impl Into<String>, summary: DebtSummary, has_activity: bool) -> Self {
        CurrencyBalance {
            currency: currency.into(),
            net_a: summary.net_a,
            net_b: summary.net_b,
            settlement: summary.settlement,
            has_activity,
        }
    }

    /// Human readable settlement, e.g. `Mailu owes Juan 40.00 ARS`.
    pub fn summary(&self, parties: &Parties) -> String {
        match self.settlement.parties() {
            Some((debtor, creditor)) => format!(
                "{} owes {} {:.2} {}",
                parties.name(debtor),
                parties.name(creditor),
                self.settlement.amount,
                self.currency
            ),
            None if self.has_activity => format!("{}: settled", self.currency),
            None => format!("{}: no transactions", self.currency),
        }
    }
}
