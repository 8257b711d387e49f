//! cashlens-core: shared types for the cashflow stability pipeline

pub mod error;
pub mod monthly;
pub mod stability;
pub mod transaction;

pub use error::{AnalysisError, MetricsError, ParseError, RowError, RowErrorKind};
pub use monthly::{MonthKey, MonthlyBucket};
pub use stability::{
    ChartPoint, Flag, FlagKind, Indicator, Metrics, RiskTier, ScoreColor, StabilityResult,
    Summary, TierLabel,
};
pub use transaction::{Flow, Transaction, TransactionLedger};

/// Income/expense classification policies
pub mod categorizer {
    use super::{Flow, Transaction};
    use serde::{Deserialize, Serialize};

    /// Type labels treated as income under [`CategorizationPolicy::TypeName`]
    pub const INCOME_TYPES: [&str; 3] = ["deposit", "direct payment", "interest earned"];

    /// Type labels treated as expenses under [`CategorizationPolicy::TypeName`]
    pub const EXPENSE_TYPES: [&str; 3] = ["withdrawal", "debit card", "zelle"];

    /// How a transaction is classified as income or expense.
    ///
    /// `AmountSign` is what the scoring pipeline uses unless told otherwise.
    #[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "kebab-case")]
    pub enum CategorizationPolicy {
        #[default]
        AmountSign,
        TypeName,
    }

    impl CategorizationPolicy {
        pub fn classify(&self, txn: &Transaction) -> Flow {
            match self {
                CategorizationPolicy::AmountSign => txn.flow(),
                CategorizationPolicy::TypeName => classify_by_type(txn),
            }
        }
    }

    /// Known type labels first, amount sign for anything else
    pub fn classify_by_type(txn: &Transaction) -> Flow {
        let kind = txn.kind.as_str();
        if INCOME_TYPES.contains(&kind) {
            return Flow::Income;
        }
        if EXPENSE_TYPES.contains(&kind) {
            return Flow::Expense;
        }
        txn.flow()
    }

}

pub use categorizer::CategorizationPolicy;
