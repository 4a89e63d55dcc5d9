use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::constants::{LEGACY_PAID_FOR_BOTH, PAID_FOR_BOTH};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Party {
    A,
    B,
}

/// Display names of the two ledger parties.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Parties {
    pub a: String,
    pub b: String,
}

impl Parties {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Parties { a: a.into(), b: b.into() }
    }

    pub fn name(&self, party: Party) -> &str {
        match party {
            Party::A => &self.a,
            Party::B => &self.b,
        }
    }

    /// Party-named column label, e.g. `split_juan`.
    pub fn column(&self, prefix: &str, party: Party) -> String {
        format!("{}_{}", prefix, self.name(party).trim().to_lowercase())
    }

    /// Case-insensitive lookup of a stored party name.
    pub fn identify(&self, raw: &str) -> Option<Party> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(self.a.trim()) {
            Some(Party::A)
        } else if raw.eq_ignore_ascii_case(self.b.trim()) {
            Some(Party::B)
        } else {
            None
        }
    }
}

/// Who a transaction was for, as read from `paid_for`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Beneficiary {
    Only(Party),
    Both,
    /// Empty or unknown value. Resolved like `Both`.
    Unrecognized,
}

impl Beneficiary {
    pub fn classify(raw: &str, parties: &Parties) -> Self {
        let value = raw.trim();
        if value.eq_ignore_ascii_case(PAID_FOR_BOTH) || value.eq_ignore_ascii_case(LEGACY_PAID_FOR_BOTH) {
            return Beneficiary::Both;
        }
        match parties.identify(value) {
            Some(party) => Beneficiary::Only(party),
            None => Beneficiary::Unrecognized,
        }
    }

    /// Value written to the `paid_for` column.
    pub fn label<'a>(&self, parties: &'a Parties) -> &'a str {
        match self {
            Beneficiary::Only(party) => parties.name(*party),
            Beneficiary::Both | Beneficiary::Unrecognized => PAID_FOR_BOTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parties() -> Parties {
        Parties::new("Juan", "Mailu")
    }

    #[test]
    fn identify_ignores_case_and_whitespace() {
        assert_eq!(parties().identify("juan"), Some(Party::A));
        assert_eq!(parties().identify(" MAILU "), Some(Party::B));
        assert_eq!(parties().identify("Pedro"), None);
        assert_eq!(parties().identify(""), None);
    }

    #[test]
    fn classify_paid_for() {
        assert_eq!(Beneficiary::classify("Both", &parties()), Beneficiary::Both);
        assert_eq!(Beneficiary::classify("Ambos", &parties()), Beneficiary::Both);
        assert_eq!(Beneficiary::classify("JUAN", &parties()), Beneficiary::Only(Party::A));
        assert_eq!(Beneficiary::classify("mailu", &parties()), Beneficiary::Only(Party::B));
        assert_eq!(Beneficiary::classify("", &parties()), Beneficiary::Unrecognized);
        assert_eq!(Beneficiary::classify("the dog", &parties()), Beneficiary::Unrecognized);
    }

    #[test]
    fn party_column_labels() {
        assert_eq!(parties().column("split", Party::A), "split_juan");
        assert_eq!(Parties::new(" Ana María ", "Bo").column("amount", Party::A), "amount_ana maría");
    }

    #[test]
    fn labels() {
        assert_eq!(Beneficiary::Only(Party::B).label(&parties()), "Mailu");
        assert_eq!(Beneficiary::Unrecognized.label(&parties()), "both");
    }
}
