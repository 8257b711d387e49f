//! Error types for statement parsing and metric computation

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a single data row was skipped (or degraded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowErrorKind {
    InvalidDate,
    InvalidAmount,
    /// Balance could not be read; the row is kept with a zero balance
    InvalidBalance,
}

impl RowErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            RowErrorKind::InvalidDate => "Invalid date format",
            RowErrorKind::InvalidAmount => "Invalid amount",
            RowErrorKind::InvalidBalance => "Invalid balance",
        }
    }
}

/// A row-level problem. `row` is the 1-based line number, header included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize,
    pub kind: RowErrorKind,
}

impl RowError {
    pub fn new(row: usize, kind: RowErrorKind) -> Self {
        Self { row, kind }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.kind.message())
    }
}

impl std::error::Error for RowError {}

/// Fatal outcomes of parsing a statement
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("CSV file must contain a header row and at least one data row.")]
    EmptyOrHeaderOnlyInput,

    #[error(
        "Missing required columns: {}. Ensure the spelling of the columns match what is shown in the expected CSV format.",
        .missing.join(", ")
    )]
    MissingColumns { missing: Vec<String> },

    #[error("{}", render_row_errors(.row_errors))]
    NoValidTransactions { row_errors: Vec<RowError> },
}

impl ParseError {
    /// Structural failures are about the file's shape, not its rows
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ParseError::EmptyOrHeaderOnlyInput | ParseError::MissingColumns { .. }
        )
    }

    /// Comma-joined missing column list, for renderers that emphasise it
    pub fn missing_columns(&self) -> Option<String> {
        match self {
            ParseError::MissingColumns { missing } => Some(missing.join(", ")),
            _ => None,
        }
    }
}

fn render_row_errors(errors: &[RowError]) -> String {
    if errors.is_empty() {
        return "No valid transactions found in CSV.".to_string();
    }
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Metrics could not be derived from the parsed transactions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    #[error("Unable to calculate metrics from the provided data.")]
    Unavailable,
}

/// Any failure of the full text-to-result pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Metrics(#[from] MetricsError),
}
