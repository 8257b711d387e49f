//! Packaging of scorer output into the renderable result

use cashlens_core::{
    ChartPoint, Indicator, Metrics, MonthlyBucket, StabilityResult, Summary, TransactionLedger,
};

use crate::scorer::{IndicatorKind, Scorecard};

/// Build the full result from already-computed months and scores.
pub fn assemble(
    ledger: &TransactionLedger,
    months: &[MonthlyBucket],
    card: &Scorecard,
) -> StabilityResult {
    StabilityResult {
        stability_score: card.stability_score,
        risk_tier: card.risk_tier(),
        metrics: Metrics {
            income_volatility: indicator(card, IndicatorKind::IncomeVolatility),
            surplus_ratio: indicator(card, IndicatorKind::SurplusRatio),
            cash_buffer_days: indicator(card, IndicatorKind::CashBufferDays),
            income_trend: indicator(card, IndicatorKind::IncomeTrend),
        },
        flags: card.flags(),
        chart_data: chart_series(months),
        summary: Summary {
            total_transactions: ledger.len(),
            months_analyzed: months.len(),
            avg_monthly_income: card.raw.mean_income,
            avg_monthly_expenses: card.raw.mean_expenses,
            current_balance: ledger.last().map(|t| t.balance).unwrap_or(0.0),
        },
    }
}

fn indicator(card: &Scorecard, kind: IndicatorKind) -> Indicator {
    let raw_value = card.raw.value(kind);
    let score = card.score(kind);

    Indicator {
        score,
        category: kind.category(score).to_string(),
        interpretation: kind.interpretation().to_string(),
        raw_value,
        display: display_value(kind, raw_value),
        label: kind.label().to_string(),
    }
}

/// Human-readable form of a raw indicator value
pub fn display_value(kind: IndicatorKind, raw: f64) -> String {
    match kind {
        IndicatorKind::IncomeVolatility | IndicatorKind::SurplusRatio => format_percent(raw),
        IndicatorKind::CashBufferDays => format!("{} days", raw.round() as i64),
        IndicatorKind::IncomeTrend => {
            let sign = if raw >= 0.0 { "+" } else { "" };
            format!("{sign}{}", format_percent(raw))
        }
    }
}

/// Ratio as a percentage with one decimal ("0.125" -> "12.5%")
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Dollar amount with thousands separators, e.g. `$12,345.60`
pub fn format_currency(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (whole, frac) = match fixed.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // No "-$0.00" for values that round to zero
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match frac {
        Some(f) => format!("{sign}${grouped}.{f}"),
        None => format!("{sign}${grouped}"),
    }
}

fn chart_series(months: &[MonthlyBucket]) -> Vec<ChartPoint> {
    months
        .iter()
        .map(|m| ChartPoint {
            month: m.key.to_string(),
            income: m.income,
            expenses: m.expenses,
            balance: m.end_balance,
        })
        .collect()
}
