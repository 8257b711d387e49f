//! Bank statement CSV parser.
//!
//! Expected header (case-insensitive, any order, extra columns ignored):
//!   Date,Type,Description,Amount,Current Balance
//!   1/5/2025,Deposit,Direct Deposit - Employer,3500.00,5200.00
//!   1/7/2025,Debit Card,Grocery Store,-125.50,5074.50
//!
//! Structural problems (no data rows, missing columns) fail the whole parse.
//! Bad dates and amounts only skip their row and are reported as warnings.

use cashlens_core::{ParseError, RowError, RowErrorKind, Transaction, TransactionLedger};
use tracing::debug;

use crate::fields::{parse_amount, parse_date};
use crate::tokenizer::split_line;

/// Columns every statement must carry, in reporting order
pub const REQUIRED_COLUMNS: [&str; 5] = ["date", "type", "description", "amount", "current balance"];

/// Minimal statement in the expected format
pub const SAMPLE_CSV: &str = "Date,Type,Description,Amount,Current Balance
1/5/2025,Deposit,Direct Deposit - Employer,3500.00,5200.00
1/7/2025,Debit Card,Grocery Store,-125.50,5074.50
1/10/2025,Withdrawal,ATM Withdrawal,-200.00,4874.50";

/// A successful parse: date-sorted transactions plus non-fatal row problems
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStatement {
    pub ledger: TransactionLedger,
    pub warnings: Vec<RowError>,
}

/// Positions of the required columns within a row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    kind: usize,
    description: usize,
    amount: usize,
    balance: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self, ParseError> {
        let find = |col: &str| headers.iter().position(|h| h == col);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&col| find(col).is_none())
            .map(|col| col.to_string())
            .collect();

        match (find("date"), find("type"), find("description"), find("amount"), find("current balance")) {
            (Some(date), Some(kind), Some(description), Some(amount), Some(balance)) => Ok(Self {
                date,
                kind,
                description,
                amount,
                balance,
            }),
            _ => Err(ParseError::MissingColumns { missing }),
        }
    }
}

/// Parse full statement text into validated, date-sorted transactions.
pub fn parse_statement(text: &str) -> Result<ParsedStatement, ParseError> {
    let text = text.trim_start_matches('\u{feff}');
    let lines: Vec<&str> = text.trim().lines().collect();
    if lines.len() < 2 {
        return Err(ParseError::EmptyOrHeaderOnlyInput);
    }

    let headers = split_line(&lines[0].to_lowercase());
    let columns = ColumnIndex::resolve(&headers)?;

    let mut txns = Vec::new();
    let mut warnings = Vec::new();

    for (i, line) in lines.iter().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let row = i + 1;
        match parse_row(line, &columns) {
            Ok((txn, balance_ok)) => {
                if !balance_ok {
                    debug!(row, "unreadable balance, using 0");
                    warnings.push(RowError::new(row, RowErrorKind::InvalidBalance));
                }
                txns.push(txn);
            }
            Err(kind) => {
                debug!(row, reason = kind.message(), "skipping row");
                warnings.push(RowError::new(row, kind));
            }
        }
    }

    if txns.is_empty() {
        return Err(ParseError::NoValidTransactions { row_errors: warnings });
    }

    debug!(
        transactions = txns.len(),
        warnings = warnings.len(),
        "parsed statement"
    );

    Ok(ParsedStatement {
        ledger: TransactionLedger::from_unsorted(txns),
        warnings,
    })
}

/// Returns the transaction and whether its balance was readable
fn parse_row(line: &str, columns: &ColumnIndex) -> Result<(Transaction, bool), RowErrorKind> {
    let values = split_line(line);
    let field = |idx: usize| values.get(idx).map(String::as_str).unwrap_or("");

    let date = parse_date(field(columns.date)).ok_or(RowErrorKind::InvalidDate)?;
    let amount = parse_amount(field(columns.amount)).ok_or(RowErrorKind::InvalidAmount)?;
    let balance = parse_amount(field(columns.balance));

    let txn = Transaction::new(
        date,
        field(columns.kind).to_lowercase(),
        field(columns.description),
        amount,
        balance.unwrap_or(0.0),
    );

    Ok((txn, balance.is_some()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashlens_core::Flow;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    const HEADER: &str = "Date,Type,Description,Amount,Current Balance";

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_basic_rows() {
        let text = r#"
Date,Type,Description,Amount,Current Balance
1/5/2025,Deposit,Pay,3500.00,5200.00
1/7/2025,Debit Card,Groceries,-125.50,5074.50
"#;

        let parsed = parse_statement(text).unwrap();
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.ledger.len(), 2);

        let txns = parsed.ledger.as_slice();
        assert_eq!(txns[0].date, d(2025, 1, 5));
        assert_eq!(txns[0].kind, "deposit");
        assert_eq!(txns[0].description, "Pay");
        assert_eq!(txns[0].flow(), Flow::Income);
        assert_eq!(txns[1].kind, "debit card");
        assert_eq!(txns[1].amount, -125.50);
        assert_eq!(txns[1].balance, 5074.50);
        assert_eq!(txns[1].flow(), Flow::Expense);
    }

    #[test]
    fn test_sample_csv_parses_cleanly() {
        let parsed = parse_statement(SAMPLE_CSV).unwrap();
        assert_eq!(parsed.ledger.len(), 3);
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.ledger.last().unwrap().balance, 4874.50);
    }

    #[test]
    fn test_currency_formatting_and_bad_amount() {
        let text = format!(
            "{HEADER}\n1/5/2025,Deposit,Bonus,\"$1,200.00\",\"$6,400.00\"\n1/6/2025,Deposit,Oops,abc,6400.00\n"
        );

        let parsed = parse_statement(&text).unwrap();
        assert_eq!(parsed.ledger.len(), 1);
        assert_eq!(parsed.ledger.as_slice()[0].amount, 1200.0);
        assert_eq!(parsed.ledger.as_slice()[0].balance, 6400.0);
        assert_eq!(parsed.warnings, vec![RowError::new(3, RowErrorKind::InvalidAmount)]);
        assert_eq!(parsed.warnings[0].to_string(), "Row 3: Invalid amount");
    }

    #[test]
    fn test_bad_date_reported_before_amount() {
        let text = format!("{HEADER}\nnot-a-date,Deposit,Pay,abc,1\n2025-01-02,Deposit,Pay,1,1");
        let parsed = parse_statement(&text).unwrap();
        assert_eq!(parsed.warnings, vec![RowError::new(2, RowErrorKind::InvalidDate)]);
    }

    #[test]
    fn test_byte_order_mark_before_header() {
        let text = format!("\u{feff}{HEADER}\n1/5/2025,Deposit,Pay,10,10");
        let parsed = parse_statement(&text).unwrap();
        assert_eq!(parsed.ledger.len(), 1);
        assert_eq!(parsed.ledger.as_slice()[0].date, d(2025, 1, 5));
    }

    #[test]
    fn test_two_digit_year_rows_stay_in_their_year() {
        let text = format!(
            "{HEADER}\n1/5/25,Deposit,Pay,3000,3000\n1/20/25,Debit Card,Rent,-1000,2000\n2/5/25,Deposit,Pay,3000,5000"
        );
        let parsed = parse_statement(&text).unwrap();
        assert!(parsed.warnings.is_empty());
        let dates: Vec<_> = parsed.ledger.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![d(2025, 1, 5), d(2025, 1, 20), d(2025, 2, 5)]);
    }

    #[test]
    fn test_amount_with_currency_suffix() {
        let text = format!("{HEADER}\n1/5/2025,Deposit,Pay,12.50 USD,\"1,200.00CR\"");
        let parsed = parse_statement(&text).unwrap();
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.ledger.as_slice()[0].amount, 12.5);
        assert_eq!(parsed.ledger.as_slice()[0].balance, 1200.0);
    }

    #[test]
    fn test_header_only_is_structural() {
        let err = parse_statement(HEADER).unwrap_err();
        assert_eq!(err, ParseError::EmptyOrHeaderOnlyInput);
        assert!(err.is_structural());

        assert_eq!(parse_statement("").unwrap_err(), ParseError::EmptyOrHeaderOnlyInput);
        assert_eq!(
            parse_statement(&format!("\n\n{HEADER}\n   \n\n")).unwrap_err(),
            ParseError::EmptyOrHeaderOnlyInput
        );
    }

    #[test]
    fn test_missing_current_balance() {
        let text = "Date,Type,Description,Amount\n1/5/2025,Deposit,Pay,3500.00";
        let err = parse_statement(text).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingColumns {
                missing: vec!["current balance".to_string()]
            }
        );
    }

    #[test]
    fn test_missing_amount_regardless_of_order() {
        let text = "current balance , DESCRIPTION,type,Date,Memo\n1,Pay,deposit,1/5/2025,x";
        let err = parse_statement(text).unwrap_err();
        assert_eq!(err.missing_columns().as_deref(), Some("amount"));
    }

    #[test]
    fn test_missing_columns_listed_in_canonical_order() {
        let err = parse_statement("Description,Foo\nx,y").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingColumns {
                missing: vec![
                    "date".to_string(),
                    "type".to_string(),
                    "amount".to_string(),
                    "current balance".to_string(),
                ]
            }
        );
    }

    #[test]
    fn test_no_survivors_carries_row_errors() {
        let text = format!("{HEADER}\nbad,Deposit,Pay,1,1\n1/5/2025,Deposit,Pay,,1");
        let err = parse_statement(&text).unwrap_err();
        assert!(!err.is_structural());
        assert_eq!(
            err,
            ParseError::NoValidTransactions {
                row_errors: vec![
                    RowError::new(2, RowErrorKind::InvalidDate),
                    RowError::new(3, RowErrorKind::InvalidAmount),
                ]
            }
        );
    }

    #[test]
    fn test_reordered_and_extra_columns() {
        let text = "Memo,Amount,Current Balance,Description,Type,Date\n\
                    ignored,-20.00,980.00,Coffee,Debit Card,2025-03-02\n";
        let parsed = parse_statement(text).unwrap();
        let t = &parsed.ledger.as_slice()[0];
        assert_eq!(t.date, d(2025, 3, 2));
        assert_eq!(t.amount, -20.0);
        assert_eq!(t.balance, 980.0);
        assert_eq!(t.description, "Coffee");
    }

    #[test]
    fn test_short_row_is_invalid_amount() {
        let text = format!("{HEADER}\n1/5/2025,Deposit\n1/6/2025,Deposit,Pay,5,5");
        let parsed = parse_statement(&text).unwrap();
        assert_eq!(parsed.ledger.len(), 1);
        assert_eq!(parsed.warnings, vec![RowError::new(2, RowErrorKind::InvalidAmount)]);
    }

    #[test]
    fn test_unreadable_balance_keeps_row() {
        let text = format!("{HEADER}\n1/5/2025,Deposit,Pay,5,n/a");
        let parsed = parse_statement(&text).unwrap();
        assert_eq!(parsed.ledger.len(), 1);
        assert_eq!(parsed.ledger.as_slice()[0].balance, 0.0);
        assert_eq!(parsed.warnings, vec![RowError::new(2, RowErrorKind::InvalidBalance)]);
    }

    #[test]
    fn test_blank_lines_keep_row_numbers() {
        let text = format!("{HEADER}\n1/5/2025,Deposit,Pay,5,5\n\n1/6/2025,Deposit,Pay,x,5\r\n1/7/2025,Deposit,Pay,5,5");
        let parsed = parse_statement(&text).unwrap();
        assert_eq!(parsed.ledger.len(), 2);
        assert_eq!(parsed.warnings, vec![RowError::new(4, RowErrorKind::InvalidAmount)]);
    }

    #[test]
    fn test_rows_sorted_by_date_stably() {
        let text = format!(
            "{HEADER}\n2/1/2025,Deposit,feb,1,1\n1/15/2025,Deposit,jan a,2,2\n2025-01-15,Deposit,jan b,3,3\n1/2/2025,Deposit,early,4,4"
        );
        let parsed = parse_statement(&text).unwrap();
        let order: Vec<_> = parsed.ledger.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, vec!["early", "jan a", "jan b", "feb"]);
    }

    fn row_strategy() -> impl Strategy<Value = (u32, u32, bool, i64)> {
        // (month, day, amount_valid, cents)
        (1u32..=12, 1u32..=28, any::<bool>(), -500_000i64..500_000)
    }

    proptest! {
        #[test]
        fn prop_count_and_order(rows in prop::collection::vec(row_strategy(), 1..40)) {
            let mut text = String::from(HEADER);
            for (m, day, valid, cents) in &rows {
                let amount = if *valid {
                    format!("{:.2}", *cents as f64 / 100.0)
                } else {
                    "n/a".to_string()
                };
                text.push_str(&format!("\n{m}/{day}/2025,Deposit,row,{amount},100.00"));
            }

            let expected = rows.iter().filter(|r| r.2).count();
            match parse_statement(&text) {
                Ok(parsed) => {
                    prop_assert_eq!(parsed.ledger.len(), expected);
                    prop_assert_eq!(parsed.warnings.len(), rows.len() - expected);
                    let dates: Vec<_> = parsed.ledger.iter().map(|t| t.date).collect();
                    prop_assert!(dates.windows(2).all(|w| w[0] <= w[1]));
                    prop_assert_eq!(parse_statement(&text), Ok(parsed));
                }
                Err(err) => {
                    prop_assert_eq!(expected, 0);
                    let is_empty_result = matches!(err, ParseError::NoValidTransactions { .. });
                    prop_assert!(is_empty_result);
                }
            }
        }
    }
}
