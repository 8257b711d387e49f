//! Terminal and JSON rendering of an analysis

use anyhow::Result;
use cashlens_core::{
    AnalysisError, FlagKind, Indicator, MonthKey, ParseError, ScoreColor, StabilityResult,
};
use cashlens_metrics::{format_currency, Analysis};
use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    file_name: &'a str,
    result: &'a StabilityResult,
    warnings: Vec<String>,
}

pub fn render_json(analysis: &Analysis, file_name: &str) -> Result<String> {
    let report = JsonReport {
        file_name,
        result: &analysis.result,
        warnings: analysis.warnings.iter().map(|w| w.to_string()).collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Options for the text report
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub color: bool,
    pub show_warnings: bool,
}

fn paint(text: &str, color: ScoreColor, enabled: bool) -> ColoredString {
    if !enabled {
        return text.normal();
    }
    match color {
        ScoreColor::Green => text.green().bold(),
        ScoreColor::LightGreen => text.bright_green(),
        ScoreColor::Yellow => text.yellow().bold(),
        ScoreColor::Orange => text.truecolor(255, 140, 0),
        ScoreColor::Red => text.red().bold(),
    }
}

fn month_label(month: &str) -> String {
    month
        .parse::<MonthKey>()
        .map(|k| k.label())
        .unwrap_or_else(|_| month.to_string())
}

pub fn render_text(analysis: &Analysis, file_name: &str, style: TextStyle) -> String {
    let r = &analysis.result;
    let mut out = String::new();

    let _ = writeln!(out, "Analyzing: {}\n", file_name);

    // Summary stats
    let s = &r.summary;
    let _ = writeln!(out, "{:<22}{}", "Transactions", s.total_transactions);
    let _ = writeln!(out, "{:<22}{}", "Months Analyzed", s.months_analyzed);
    let _ = writeln!(out, "{:<22}{}", "Avg Monthly Income", format_currency(s.avg_monthly_income, 0));
    let _ = writeln!(out, "{:<22}{}", "Avg Monthly Expenses", format_currency(s.avg_monthly_expenses, 0));
    let _ = writeln!(out, "{:<22}{}\n", "Current Balance", format_currency(s.current_balance, 2));

    // Score and tier
    let tier = &r.risk_tier;
    let score = paint(&format!("{} / 100", r.stability_score), tier.color, style.color);
    let label = paint(tier.label.as_str(), tier.color, style.color);
    let _ = writeln!(out, "Stability Score: {}  [{}]", score, label);
    let _ = writeln!(out, "{}\n", tier.description);

    for indicator in r.metrics.iter() {
        render_indicator(&mut out, indicator, style.color);
    }

    let _ = writeln!(out, "Flags");
    for flag in &r.flags {
        let (marker, color) = match flag.kind {
            FlagKind::Warning => ("!", ScoreColor::Red),
            FlagKind::Caution => ("~", ScoreColor::Yellow),
            FlagKind::Positive => ("+", ScoreColor::Green),
        };
        let _ = writeln!(out, "  {} {}", paint(marker, color, style.color), flag.message);
    }

    let _ = writeln!(out, "\nMonthly cashflow");
    let _ = writeln!(
        out,
        "  {:<10}{:>14}{:>14}{:>14}",
        "Month", "Income", "Expenses", "Balance"
    );
    for point in &r.chart_data {
        let _ = writeln!(
            out,
            "  {:<10}{:>14}{:>14}{:>14}",
            month_label(&point.month),
            format_currency(point.income, 2),
            format_currency(point.expenses, 2),
            format_currency(point.balance, 2)
        );
    }

    if style.show_warnings && !analysis.warnings.is_empty() {
        let _ = writeln!(out, "\nWarnings ({})", analysis.warnings.len());
        for w in &analysis.warnings {
            let _ = writeln!(out, "  {}", w);
        }
    }

    out
}

fn render_indicator(out: &mut String, indicator: &Indicator, color: bool) {
    let band = ScoreColor::for_score(indicator.score);
    let score = paint(&format!("{:>3}", indicator.score), band, color);
    let _ = writeln!(
        out,
        "{:<26}{}  {:<24}{}",
        indicator.label, score, indicator.category, indicator.display
    );
    let _ = writeln!(out, "  {}\n", indicator.interpretation);
}

/// Fatal error text, with the missing column list emphasised when present
pub fn render_error(err: &AnalysisError, color: bool) -> String {
    let message = err.to_string();
    match err {
        AnalysisError::Parse(e @ ParseError::MissingColumns { .. }) if color => {
            match e.missing_columns() {
                Some(cols) => message.replacen(&cols, &cols.bold().to_string(), 1),
                None => message,
            }
        }
        _ => message,
    }
}
