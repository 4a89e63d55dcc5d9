use log::debug;
use std::collections::BTreeMap;

use crate::core::aggregator::aggregate;
use crate::core::models::{CurrencyBalance, DebtSummary, Ledger, Parties, SplitRatio, Transaction};

/// Groups transactions by currency code. Every row lands in exactly one group.
pub fn partition_by_currency(ledger: &Ledger) -> BTreeMap<&str, Vec<&Transaction>> {
    let mut partitions: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for tx in &ledger.transactions {
        partitions.entry(tx.currency.as_str()).or_default().push(tx);
    }
    partitions
}

/// Balance of a single currency. Amounts in other currencies are ignored.
///
/// A ledger without a `currency` column predates multi-currency support:
/// all of it counts as `base_currency` and every other currency is empty.
pub fn balance_for_currency(
    ledger: &Ledger,
    currency: &str,
    defaults: &SplitRatio,
    parties: &Parties,
    base_currency: &str,
) -> CurrencyBalance {
    if !ledger.has_currency_column() {
        if currency == base_currency {
            let summary = aggregate(&ledger.transactions, defaults, parties);
            return CurrencyBalance::new(currency, summary, !ledger.is_empty());
        }
        debug!("Legacy ledger has no {} transactions", currency);
        return CurrencyBalance::new(currency, DebtSummary::zero(), false);
    }

    let subset: Vec<&Transaction> = ledger.transactions.iter().filter(|tx| tx.currency == currency).collect();
    let summary = aggregate(subset.iter().copied(), defaults, parties);
    CurrencyBalance::new(currency, summary, !subset.is_empty())
}

/// One independent balance per currency in `report`, plus any other currency
/// found in the ledger, in that order.
pub fn balances_by_currency(
    ledger: &Ledger,
    defaults: &SplitRatio,
    parties: &Parties,
    base_currency: &str,
    report: &[String],
) -> Vec<CurrencyBalance> {
    let mut currencies: Vec<String> = report.to_vec();
    if ledger.has_currency_column() {
        for currency in partition_by_currency(ledger).into_keys() {
            if !currencies.iter().any(|c| c == currency) {
                currencies.push(currency.to_string());
            }
        }
    } else if !currencies.iter().any(|c| c == base_currency) {
        currencies.push(base_currency.to_string());
    }

    currencies
        .iter()
        .map(|currency| balance_for_currency(ledger, currency, defaults, parties, base_currency))
        .collect()
}
