//! Output structures of a stability analysis.
//!
//! Field names serialize in the camelCase shape the presentation layer
//! consumes (`stabilityScore`, `riskTier`, `chartData`, ...). Indicator
//! fields keep `raw_value`.

use serde::{Deserialize, Serialize};

/// One scored stability indicator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Indicator {
    /// Discrete score from the indicator's ladder (0-100)
    pub score: u8,
    /// Qualitative label derived from the score
    pub category: String,
    /// Static explanation of what the indicator measures
    pub interpretation: String,
    /// Underlying ratio or day count
    pub raw_value: f64,
    /// Formatted raw value ("12.5%", "42 days", "+3.0%")
    pub display: String,
    /// Title
    pub label: String,
}

/// The four indicators, keyed the way the presentation layer expects
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub income_volatility: Indicator,
    pub surplus_ratio: Indicator,
    pub cash_buffer_days: Indicator,
    pub income_trend: Indicator,
}

impl Metrics {
    /// Indicators in display order
    pub fn iter(&self) -> impl Iterator<Item = &Indicator> {
        [
            &self.income_volatility,
            &self.surplus_ratio,
            &self.cash_buffer_days,
            &self.income_trend,
        ]
        .into_iter()
    }
}

/// Display palette shared by risk tiers and per-indicator scores
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScoreColor {
    Green,
    #[serde(rename = "lightgreen")]
    LightGreen,
    Yellow,
    Orange,
    Red,
}

impl ScoreColor {
    /// Five-band color for a single 0-100 score
    pub fn for_score(score: u8) -> Self {
        match score {
            80.. => ScoreColor::Green,
            60..=79 => ScoreColor::LightGreen,
            40..=59 => ScoreColor::Yellow,
            20..=39 => ScoreColor::Orange,
            _ => ScoreColor::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreColor::Green => "green",
            ScoreColor::LightGreen => "lightgreen",
            ScoreColor::Yellow => "yellow",
            ScoreColor::Orange => "orange",
            ScoreColor::Red => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TierLabel {
    Stable,
    Watch,
    Risky,
}

impl TierLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierLabel::Stable => "Stable",
            TierLabel::Watch => "Watch",
            TierLabel::Risky => "Risky",
        }
    }
}

/// Qualitative bucket for the composite score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskTier {
    pub label: TierLabel,
    pub color: ScoreColor,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    Warning,
    Caution,
    Positive,
}

/// Human-readable observation about the raw indicator values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flag {
    #[serde(rename = "type")]
    pub kind: FlagKind,
    pub message: String,
}

impl Flag {
    pub fn new(kind: FlagKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// One month of the chart series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    /// "YYYY-MM"
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_transactions: usize,
    pub months_analyzed: usize,
    pub avg_monthly_income: f64,
    pub avg_monthly_expenses: f64,
    /// Balance on the chronologically last transaction
    pub current_balance: f64,
}

/// Everything the presentation layer renders for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StabilityResult {
    pub stability_score: u8,
    pub risk_tier: RiskTier,
    pub metrics: Metrics,
    pub flags: Vec<Flag>,
    pub chart_data: Vec<ChartPoint>,
    pub summary: Summary,
}
