use log::debug;

use crate::core::models::{DebtSummary, Parties, Party, Settlement, SplitRatio, Transaction};
use crate::core::split::owed_shares;

/// Folds expense transactions into net balances and a settlement.
///
/// Only rows whose type is an expense take part. Rows without a readable
/// amount contribute nothing to either side. An empty expense set gives the
/// zero summary.
pub fn aggregate<'a, I>(transactions: I, defaults: &SplitRatio, parties: &Parties) -> DebtSummary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut paid_a = 0.0;
    let mut paid_b = 0.0;
    let mut owed_a = 0.0;
    let mut owed_b = 0.0;
    let mut counted = 0usize;
    let mut skipped = 0usize;

    for tx in transactions.into_iter().filter(|tx| tx.is_expense()) {
        let Some(amount) = tx.amount else {
            skipped += 1;
            continue;
        };

        let owed = owed_shares(tx, amount, defaults, parties);
        owed_a += owed.a;
        owed_b += owed.b;
        match tx.payer(parties) {
            Some(Party::A) => paid_a += amount,
            Some(Party::B) => paid_b += amount,
            None => {}
        }
        counted += 1;
    }

    if skipped > 0 {
        debug!("Skipped {} expense rows with missing amount", skipped);
    }
    if counted == 0 {
        return DebtSummary::zero();
    }

    let net_a = paid_a - owed_a;
    let net_b = paid_b - owed_b;
    DebtSummary {
        net_a,
        net_b,
        settlement: Settlement::from_net_a(net_a),
        counted,
    }
}
