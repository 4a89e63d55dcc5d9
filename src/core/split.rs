use crate::core::models::{Beneficiary, Parties, Party, SplitRatio, Transaction};

/// Portion of a transaction amount each party is responsible for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OwedShares {
    pub a: f64,
    pub b: f64,
}

impl OwedShares {
    pub fn total(&self) -> f64 {
        self.a + self.b
    }
}

impl From<(f64, f64)> for OwedShares {
    fn from((a, b): (f64, f64)) -> Self {
        OwedShares { a, b }
    }
}

/// Resolves who owes what for one transaction.
///
/// A per-row split is honored only for shared transactions; a single-party
/// `paid_for` always wins over it. Unrecognized `paid_for` values are treated
/// as shared but use the default split. Stored splits that do not add up to 1
/// are used as they are.
pub fn resolve(beneficiary: Beneficiary, explicit: Option<(f64, f64)>, amount: f64, defaults: &SplitRatio) -> OwedShares {
    match (beneficiary, explicit) {
        (Beneficiary::Both, Some((split_a, split_b))) => OwedShares {
            a: amount * split_a,
            b: amount * split_b,
        },
        (Beneficiary::Both, None) => defaults.apply(amount).into(),
        (Beneficiary::Only(Party::A), _) => OwedShares { a: amount, b: 0.0 },
        (Beneficiary::Only(Party::B), _) => OwedShares { a: 0.0, b: amount },
        (Beneficiary::Unrecognized, _) => defaults.apply(amount).into(),
    }
}

pub fn owed_shares(tx: &Transaction, amount: f64, defaults: &SplitRatio, parties: &Parties) -> OwedShares {
    resolve(tx.beneficiary(parties), tx.explicit_split(), amount, defaults)
}
