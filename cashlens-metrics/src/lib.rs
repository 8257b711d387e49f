//! cashlens-metrics: monthly aggregation, stability scoring, and result assembly

pub mod aggregator;
pub mod assembler;
pub mod scorer;

pub use aggregator::aggregate_monthly;
pub use assembler::{assemble, format_currency, format_percent};
pub use scorer::{IndicatorKind, RawIndicators, Scorecard, UNLIMITED_BUFFER_DAYS};

use cashlens_core::{
    AnalysisError, CategorizationPolicy, MetricsError, RowError, StabilityResult,
    TransactionLedger,
};
use cashlens_ingest::parse_statement;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Knobs for a single analysis run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub categorization: CategorizationPolicy,
}

/// A completed analysis plus the rows that were skipped or degraded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub result: StabilityResult,
    pub warnings: Vec<RowError>,
}

/// Run the whole pipeline on statement text with default options.
pub fn analyze(csv_text: &str) -> Result<Analysis, AnalysisError> {
    analyze_with(csv_text, &AnalysisOptions::default())
}

pub fn analyze_with(csv_text: &str, options: &AnalysisOptions) -> Result<Analysis, AnalysisError> {
    let parsed = parse_statement(csv_text)?;
    let result = compute_stability(&parsed.ledger, options.categorization)?;

    info!(
        transactions = result.summary.total_transactions,
        months = result.summary.months_analyzed,
        score = result.stability_score,
        tier = result.risk_tier.label.as_str(),
        warnings = parsed.warnings.len(),
        "stability analysis complete"
    );

    Ok(Analysis {
        result,
        warnings: parsed.warnings,
    })
}

/// Metrics stage only: ledger in, assembled result out.
pub fn compute_stability(
    ledger: &TransactionLedger,
    policy: CategorizationPolicy,
) -> Result<StabilityResult, MetricsError> {
    let months = aggregate_monthly(ledger, policy)?;
    let card = Scorecard::from_months(&months)?;
    debug!(
        volatility = card.raw.income_volatility,
        surplus = card.raw.surplus_ratio,
        buffer_days = card.raw.cash_buffer_days,
        trend = card.raw.income_trend,
        "raw indicators"
    );

    Ok(assemble(ledger, &months, &card))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashlens_core::{FlagKind, ParseError, TierLabel};

    const EXAMPLE: &str = "Date,Type,Description,Amount,Current Balance
1/5/2025,Deposit,Direct Deposit - Employer,3500.00,5200.00
1/7/2025,Debit Card,Grocery Store,-125.50,5074.50
1/10/2025,Withdrawal,ATM Withdrawal,-200.00,4874.50";

    #[test]
    fn test_analyze_example_statement() {
        let analysis = analyze(EXAMPLE).unwrap();
        let r = &analysis.result;

        assert!(analysis.warnings.is_empty());
        assert_eq!(r.summary.total_transactions, 3);
        assert_eq!(r.summary.months_analyzed, 1);
        assert_eq!(r.summary.avg_monthly_income, 3500.0);
        assert_eq!(r.summary.avg_monthly_expenses, 325.5);
        assert_eq!(r.summary.current_balance, 4874.5);

        assert_eq!(r.chart_data.len(), 1);
        assert_eq!(r.chart_data[0].month, "2025-01");
        assert_eq!(r.chart_data[0].balance, 4874.5);

        // One month: no volatility, no trend, ample surplus and buffer
        assert_eq!(r.metrics.income_volatility.score, 100);
        assert_eq!(r.metrics.surplus_ratio.score, 100);
        assert_eq!(r.metrics.cash_buffer_days.score, 100);
        assert_eq!(r.metrics.income_trend.score, 80);
        assert_eq!(r.stability_score, 98);
        assert_eq!(r.risk_tier.label, TierLabel::Stable);
        assert_eq!(r.flags.len(), 1);
        assert_eq!(r.flags[0].kind, FlagKind::Positive);
    }

    #[test]
    fn test_parse_errors_pass_through() {
        let err = analyze("Date,Type,Description,Amount,Current Balance").unwrap_err();
        assert_eq!(err, AnalysisError::Parse(ParseError::EmptyOrHeaderOnlyInput));
        assert_eq!(
            err.to_string(),
            "CSV file must contain a header row and at least one data row."
        );
    }

    #[test]
    fn test_empty_ledger_metrics_unavailable() {
        let ledger = TransactionLedger::default();
        assert_eq!(
            compute_stability(&ledger, CategorizationPolicy::AmountSign),
            Err(MetricsError::Unavailable)
        );
    }

    #[test]
    fn test_two_digit_year_statement_buckets() {
        let text = "\u{feff}Date,Type,Description,Amount,Current Balance
1/5/25,Deposit,Pay,3000,3000
1/20/25,Debit Card,Rent,-1000,2000
2/5/25,Deposit,Pay,3000,5000";

        let analysis = analyze(text).unwrap();
        assert!(analysis.warnings.is_empty());
        let months: Vec<_> = analysis.result.chart_data.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(months, vec!["2025-01", "2025-02"]);
        assert_eq!(analysis.result.summary.current_balance, 5000.0);
    }

    #[test]
    fn test_type_name_policy_changes_totals() {
        let text = "Date,Type,Description,Amount,Current Balance
1/5/2025,Deposit,Pay,3000.00,3000.00
1/6/2025,Zelle,Rent share,500.00,3500.00";

        let by_sign = analyze(text).unwrap();
        assert_eq!(by_sign.result.summary.avg_monthly_income, 3500.0);

        let options = AnalysisOptions {
            categorization: CategorizationPolicy::TypeName,
        };
        let by_type = analyze_with(text, &options).unwrap();
        assert_eq!(by_type.result.summary.avg_monthly_income, 3000.0);
        assert_eq!(by_type.result.summary.avg_monthly_expenses, 500.0);
    }
}
