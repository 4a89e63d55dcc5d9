use chrono::{Local, NaiveDateTime};

use crate::core::constants::*;
use crate::core::errors::LedgerError;
use crate::core::models::{Beneficiary, NewTransaction, Parties, Party, SplitRatio, TransactionRecord};
use crate::core::split::resolve;

fn validate_amount(amount: f64) -> Result<(), LedgerError> {
    if !amount.is_finite() {
        return Err(LedgerError::invalid_input(
            COL_AMOUNT,
            "Invalid Amount",
            "Amount must be a finite number",
        ));
    }
    if amount < 0.0 {
        return Err(LedgerError::invalid_input(
            COL_AMOUNT,
            "Invalid Amount",
            "Amount cannot be negative",
        ));
    }
    Ok(())
}

pub(crate) fn validate_split(split: &SplitRatio) -> Result<(), LedgerError> {
    for (field, value) in [(COL_SPLIT_A, split.a), (COL_SPLIT_B, split.b)] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(LedgerError::invalid_input(
                field,
                "Invalid Split",
                "Split proportions must be between 0 and 1",
            ));
        }
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl NewTransaction {
    /// Builds the canonical record appended to storage.
    ///
    /// Every canonical field is filled in: the effective split and the
    /// resulting shares are computed here so storage never sees a placeholder.
    pub fn into_record(
        self,
        defaults: &SplitRatio,
        parties: &Parties,
        base_currency: &str,
    ) -> Result<TransactionRecord, LedgerError> {
        self.into_record_at(defaults, parties, base_currency, Local::now().naive_local())
    }

    pub fn into_record_at(
        self,
        defaults: &SplitRatio,
        parties: &Parties,
        base_currency: &str,
        now: NaiveDateTime,
    ) -> Result<TransactionRecord, LedgerError> {
        validate_amount(self.amount)?;
        if let Some(split) = &self.split {
            validate_split(split)?;
        }
        let payer = parties
            .identify(&self.paid_by)
            .ok_or_else(|| LedgerError::UnknownParty(self.paid_by.clone()))?;

        let beneficiary = match non_empty(self.paid_for.as_deref()) {
            Some(raw) => match Beneficiary::classify(raw, parties) {
                Beneficiary::Unrecognized => return Err(LedgerError::UnknownParty(raw.to_string())),
                known => known,
            },
            None => Beneficiary::Both,
        };

        let effective = match beneficiary {
            Beneficiary::Only(Party::A) => SplitRatio::new(1.0, 0.0),
            Beneficiary::Only(Party::B) => SplitRatio::new(0.0, 1.0),
            _ => self.split.unwrap_or(*defaults),
        };
        let owed = resolve(beneficiary, Some((effective.a, effective.b)), self.amount, defaults);

        let payer_name = parties.name(payer).to_string();
        let kind = match self.kind.trim() {
            "" => TYPE_EXPENSE.to_string(),
            kind => kind.to_string(),
        };
        let currency = non_empty(self.currency.as_deref())
            .unwrap_or(base_currency)
            .to_string();
        let entry_user = non_empty(self.entry_user.as_deref())
            .unwrap_or(&payer_name)
            .to_string();

        let mut record = TransactionRecord::default();
        record.insert(
            COL_TIMESTAMP,
            self.timestamp.unwrap_or(now).format(TIMESTAMP_FORMAT).to_string(),
        );
        record.insert(COL_ENTRY_USER, entry_user);
        record.insert(COL_PAID_BY, payer_name);
        record.insert(COL_PAID_FOR, beneficiary.label(parties));
        record.insert(COL_TYPE, kind);
        record.insert(COL_CATEGORY, self.category.trim());
        record.insert(COL_CURRENCY, currency);
        record.insert(COL_AMOUNT, self.amount.to_string());
        record.insert(COL_NOTES, self.notes);
        record.insert(COL_SPLIT_A, effective.a.to_string());
        record.insert(COL_SPLIT_B, effective.b.to_string());
        record.insert(COL_AMOUNT_A, owed.a.to_string());
        record.insert(COL_AMOUNT_B, owed.b.to_string());
        // Sheets laid out with party-named split columns get the same values.
        for (prefix, party, value) in [
            ("split", Party::A, effective.a),
            ("split", Party::B, effective.b),
            ("amount", Party::A, owed.a),
            ("amount", Party::B, owed.b),
        ] {
            record.insert(&parties.column(prefix, party), value.to_string());
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parties() -> Parties {
        Parties::new("Juan", "Mailu")
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(9, 15, 0))
            .unwrap()
    }

    fn new_tx(paid_by: &str, amount: f64) -> NewTransaction {
        NewTransaction {
            timestamp: None,
            entry_user: None,
            paid_by: paid_by.to_string(),
            paid_for: None,
            kind: "expense".to_string(),
            category: "Comidas".to_string(),
            currency: None,
            amount,
            notes: "cena".to_string(),
            split: None,
        }
    }

    #[test]
    fn record_has_every_canonical_field() {
        let record = new_tx("juan", 100.0)
            .into_record_at(&SplitRatio::default(), &parties(), "ARS", now())
            .unwrap();
        for field in TX_HEADERS {
            assert!(record.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(record.get(COL_TIMESTAMP), Some("2024-05-01 09:15:00"));
        assert_eq!(record.get(COL_ENTRY_USER), Some("Juan"));
        assert_eq!(record.get(COL_PAID_BY), Some("Juan"));
        assert_eq!(record.get(COL_PAID_FOR), Some("both"));
        assert_eq!(record.get(COL_CURRENCY), Some("ARS"));
        assert_eq!(record.get(COL_SPLIT_A), Some("0.6"));
        assert_eq!(record.get(COL_SPLIT_B), Some("0.4"));
        assert_eq!(record.get(COL_AMOUNT_A), Some("60"));
        assert_eq!(record.get(COL_AMOUNT_B), Some("40"));
    }

    #[test]
    fn explicit_split_is_written() {
        let mut tx = new_tx("Mailu", 200.0);
        tx.split = Some(SplitRatio::new(0.25, 0.75));
        tx.currency = Some("USD".to_string());
        let record = tx
            .into_record_at(&SplitRatio::default(), &parties(), "ARS", now())
            .unwrap();
        assert_eq!(record.get(COL_CURRENCY), Some("USD"));
        assert_eq!(record.get(COL_AMOUNT_A), Some("50"));
        assert_eq!(record.get(COL_AMOUNT_B), Some("150"));
    }

    #[test]
    fn single_party_overrides_split() {
        let mut tx = new_tx("Juan", 80.0);
        tx.paid_for = Some("mailu".to_string());
        tx.split = Some(SplitRatio::new(0.5, 0.5));
        let record = tx
            .into_record_at(&SplitRatio::default(), &parties(), "ARS", now())
            .unwrap();
        assert_eq!(record.get(COL_PAID_FOR), Some("Mailu"));
        assert_eq!(record.get(COL_SPLIT_A), Some("0"));
        assert_eq!(record.get(COL_SPLIT_B), Some("1"));
        assert_eq!(record.get(COL_AMOUNT_B), Some("80"));
    }

    #[test]
    fn invalid_input_is_rejected() {
        let result = new_tx("Juan", -1.0).into_record_at(&SplitRatio::default(), &parties(), "ARS", now());
        assert!(matches!(result, Err(LedgerError::InvalidInput(field, _)) if field == "amount"));

        let result = new_tx("Juan", f64::NAN).into_record_at(&SplitRatio::default(), &parties(), "ARS", now());
        assert!(matches!(result, Err(LedgerError::InvalidInput(_, _))));

        let result = new_tx("Pedro", 1.0).into_record_at(&SplitRatio::default(), &parties(), "ARS", now());
        assert!(matches!(result, Err(LedgerError::UnknownParty(name)) if name == "Pedro"));

        let mut tx = new_tx("Juan", 1.0);
        tx.split = Some(SplitRatio::new(1.5, -0.5));
        let result = tx.into_record_at(&SplitRatio::default(), &parties(), "ARS", now());
        assert!(matches!(result, Err(LedgerError::InvalidInput(field, _)) if field == "split_a"));

        let mut tx = new_tx("Juan", 1.0);
        tx.paid_for = Some("the dog".to_string());
        let result = tx.into_record_at(&SplitRatio::default(), &parties(), "ARS", now());
        assert!(matches!(result, Err(LedgerError::UnknownParty(_))));
    }

    #[test]
    fn record_orders_by_storage_header() {
        let record = new_tx("Juan", 10.0)
            .into_record_at(&SplitRatio::default(), &parties(), "ARS", now())
            .unwrap();
        let header = vec!["amount".to_string(), "legacy".to_string(), "paid_by".to_string()];
        assert_eq!(record.ordered_for(&header), vec!["10", "", "Juan"]);
    }
}
