//! Monthly aggregation of a date-sorted ledger

use cashlens_core::{CategorizationPolicy, Flow, MetricsError, MonthKey, MonthlyBucket, TransactionLedger};
use std::collections::BTreeMap;

/// Group transactions by calendar month, oldest month first.
///
/// `end_balance` is the balance of the last transaction of each month; the
/// ledger's date ordering makes that the chronologically latest one.
pub fn aggregate_monthly(
    ledger: &TransactionLedger,
    policy: CategorizationPolicy,
) -> Result<Vec<MonthlyBucket>, MetricsError> {
    let mut months: BTreeMap<MonthKey, MonthlyBucket> = BTreeMap::new();

    for txn in ledger {
        let key = MonthKey::of(txn.date);
        let bucket = months.entry(key).or_insert_with(|| MonthlyBucket::empty(key));

        match policy.classify(txn) {
            Flow::Income => bucket.income += txn.abs_amount(),
            Flow::Expense => bucket.expenses += txn.abs_amount(),
        }
        bucket.end_balance = txn.balance;
    }

    if months.is_empty() {
        return Err(MetricsError::Unavailable);
    }

    Ok(months.into_values().collect())
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0 for an empty slice
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let squares: Vec<f64> = values.iter().map(|v| (v - avg).powi(2)).collect();
    mean(&squares).sqrt()
}
