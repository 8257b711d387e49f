//! Transaction records produced by the statement parser

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single bank-statement row after validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Calendar date of the transaction
    pub date: NaiveDate,
    /// Lower-cased transaction type label ("deposit", "debit card", ...). May be empty.
    #[serde(rename = "type")]
    pub kind: String,
    /// Trimmed free-text description
    pub description: String,
    /// Positive = income, negative = expense
    pub amount: f64,
    /// Account balance reported on this row ("current balance" column)
    pub balance: f64,
}

/// Direction of money movement for a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Flow {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl Transaction {
    /// Create a new Transaction
    pub fn new(
        date: NaiveDate,
        kind: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        balance: f64,
    ) -> Self {
        Self {
            date,
            kind: kind.into(),
            description: description.into(),
            amount,
            balance,
        }
    }

    /// Flow under the default (amount sign) policy
    pub fn flow(&self) -> Flow {
        if self.amount >= 0.0 { Flow::Income } else { Flow::Expense }
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// Transactions in ascending date order.
///
/// The only way to build a ledger is through [`TransactionLedger::from_unsorted`],
/// which performs a stable sort, so rows sharing a date keep their file order.
/// Month aggregation relies on this to pick the last balance of each month.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct TransactionLedger(Vec<Transaction>);

impl TransactionLedger {
    pub fn from_unsorted(mut txns: Vec<Transaction>) -> Self {
        txns.sort_by_key(|t| t.date);
        Self(txns)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<&Transaction> {
        self.0.first()
    }

    /// Chronologically last transaction
    pub fn last(&self) -> Option<&Transaction> {
        self.0.last()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a TransactionLedger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
