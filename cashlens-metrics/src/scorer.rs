//! Stability indicators, their score ladders, the composite score, risk
//! tiers and narrative flags.
//!
//! The ladders are hand-tuned lookup tables. Each one is evaluated top-down
//! and the first matching rung wins; the boundaries are inclusive.

use cashlens_core::{Flag, FlagKind, MetricsError, MonthlyBucket, RiskTier, ScoreColor, TierLabel};
use serde::{Deserialize, Serialize};

use crate::aggregator::{mean, std_dev};

/// Cash buffer reported when there are no expenses at all
pub const UNLIMITED_BUFFER_DAYS: f64 = 999.0;

/// Days per month used to turn monthly expenses into daily spending
const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum IndicatorKind {
    IncomeVolatility,
    SurplusRatio,
    CashBufferDays,
    IncomeTrend,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 4] = [
        IndicatorKind::IncomeVolatility,
        IndicatorKind::SurplusRatio,
        IndicatorKind::CashBufferDays,
        IndicatorKind::IncomeTrend,
    ];

    /// Map a raw value onto the indicator's discrete score
    pub fn score(&self, raw: f64) -> u8 {
        match self {
            // Lower is better
            IndicatorKind::IncomeVolatility => {
                if raw <= 0.10 {
                    100
                } else if raw <= 0.20 {
                    85
                } else if raw <= 0.35 {
                    70
                } else if raw <= 0.50 {
                    50
                } else {
                    25
                }
            }
            IndicatorKind::SurplusRatio => {
                if raw >= 0.25 {
                    100
                } else if raw >= 0.15 {
                    85
                } else if raw >= 0.05 {
                    70
                } else if raw >= 0.00 {
                    50
                } else {
                    20
                }
            }
            IndicatorKind::CashBufferDays => {
                if raw >= 90.0 {
                    100
                } else if raw >= 45.0 {
                    85
                } else if raw >= 15.0 {
                    70
                } else if raw >= 7.0 {
                    50
                } else {
                    25
                }
            }
            IndicatorKind::IncomeTrend => {
                if raw >= 0.10 {
                    95
                } else if raw >= 0.00 {
                    80
                } else if raw >= -0.05 {
                    65
                } else if raw >= -0.15 {
                    45
                } else {
                    20
                }
            }
        }
    }

    /// Category labels for scores >=85, >=70, >=50, >=30, and below
    fn category_ladder(&self) -> [&'static str; 5] {
        match self {
            IndicatorKind::IncomeVolatility => [
                "Strong Stability",
                "Stable",
                "Moderate Risk",
                "High Risk",
                "Severe Risk",
            ],
            IndicatorKind::SurplusRatio => [
                "Strong Surplus",
                "Adequate",
                "Thin Margin",
                "Structural Risk",
                "Deficit Risk",
            ],
            IndicatorKind::CashBufferDays => [
                "Strong Liquidity",
                "Adequate Buffer",
                "Limited Cushion",
                "Fragile",
                "Critical Liquidity Risk",
            ],
            IndicatorKind::IncomeTrend => [
                "Positive Momentum",
                "Stable Income Trend",
                "Mild Concern",
                "Deteriorating Income",
                "Severe Income Decline",
            ],
        }
    }

    pub fn category(&self, score: u8) -> &'static str {
        let ladder = self.category_ladder();
        let rung = match score {
            85.. => 0,
            70..=84 => 1,
            50..=69 => 2,
            30..=49 => 3,
            _ => 4,
        };
        ladder[rung]
    }

    pub fn interpretation(&self) -> &'static str {
        match self {
            IndicatorKind::IncomeVolatility => {
                "Measures how predictable monthly income is. High volatility increases short-term repayment risk."
            }
            IndicatorKind::SurplusRatio => {
                "Measures whether income consistently exceeds expenses. Persistent deficits significantly increase delinquency risk."
            }
            IndicatorKind::CashBufferDays => {
                "Estimates how long expenses can be covered without new income. Low liquidity increases short-term repayment vulnerability."
            }
            IndicatorKind::IncomeTrend => {
                "Measures directional income movement. Declining trends are early warning signals for repayment stress."
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IndicatorKind::IncomeVolatility => "Income Volatility Score",
            IndicatorKind::SurplusRatio => "Surplus Strength Score",
            IndicatorKind::CashBufferDays => "Cash Buffer Score",
            IndicatorKind::IncomeTrend => "Income Trend Score",
        }
    }

    /// Weight in the composite score
    pub fn weight(&self) -> f64 {
        match self {
            IndicatorKind::IncomeVolatility => 0.30,
            IndicatorKind::SurplusRatio => 0.30,
            IndicatorKind::CashBufferDays => 0.30,
            IndicatorKind::IncomeTrend => 0.10,
        }
    }
}

/// Unscored indicator values computed from the monthly series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawIndicators {
    pub income_volatility: f64,
    pub surplus_ratio: f64,
    pub cash_buffer_days: f64,
    pub income_trend: f64,
    pub mean_income: f64,
    pub mean_expenses: f64,
    pub mean_balance: f64,
}

impl RawIndicators {
    pub fn from_months(months: &[MonthlyBucket]) -> Result<Self, MetricsError> {
        if months.is_empty() {
            return Err(MetricsError::Unavailable);
        }

        let income: Vec<f64> = months.iter().map(|m| m.income).collect();
        let expenses: Vec<f64> = months.iter().map(|m| m.expenses).collect();
        let balances: Vec<f64> = months.iter().map(|m| m.end_balance).collect();

        let mean_income = mean(&income);
        let mean_expenses = mean(&expenses);
        let mean_balance = mean(&balances);

        let income_volatility = if mean_income > 0.0 {
            std_dev(&income) / mean_income
        } else {
            0.0
        };

        let surplus_ratio = if mean_income > 0.0 {
            (mean_income - mean_expenses) / mean_income
        } else {
            0.0
        };

        let daily_spending = mean_expenses / DAYS_PER_MONTH;
        let cash_buffer_days = if daily_spending > 0.0 {
            mean_balance / daily_spending
        } else {
            UNLIMITED_BUFFER_DAYS
        };

        let first = income.first().copied().unwrap_or(0.0);
        let last = income.last().copied().unwrap_or(0.0);
        let income_trend = if first > 0.0 { (last - first) / first } else { 0.0 };

        Ok(Self {
            income_volatility,
            surplus_ratio,
            cash_buffer_days,
            income_trend,
            mean_income,
            mean_expenses,
            mean_balance,
        })
    }

    pub fn value(&self, kind: IndicatorKind) -> f64 {
        match kind {
            IndicatorKind::IncomeVolatility => self.income_volatility,
            IndicatorKind::SurplusRatio => self.surplus_ratio,
            IndicatorKind::CashBufferDays => self.cash_buffer_days,
            IndicatorKind::IncomeTrend => self.income_trend,
        }
    }
}

/// Raw values plus their ladder scores and the weighted composite
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub raw: RawIndicators,
    pub income_volatility: u8,
    pub surplus_ratio: u8,
    pub cash_buffer_days: u8,
    pub income_trend: u8,
    pub stability_score: u8,
}

impl Scorecard {
    pub fn from_months(months: &[MonthlyBucket]) -> Result<Self, MetricsError> {
        Ok(Self::from_raw(RawIndicators::from_months(months)?))
    }

    pub fn from_raw(raw: RawIndicators) -> Self {
        let income_volatility = IndicatorKind::IncomeVolatility.score(raw.income_volatility);
        let surplus_ratio = IndicatorKind::SurplusRatio.score(raw.surplus_ratio);
        let cash_buffer_days = IndicatorKind::CashBufferDays.score(raw.cash_buffer_days);
        let income_trend = IndicatorKind::IncomeTrend.score(raw.income_trend);

        Self {
            raw,
            income_volatility,
            surplus_ratio,
            cash_buffer_days,
            income_trend,
            stability_score: composite_score(
                income_volatility,
                surplus_ratio,
                cash_buffer_days,
                income_trend,
            ),
        }
    }

    pub fn score(&self, kind: IndicatorKind) -> u8 {
        match kind {
            IndicatorKind::IncomeVolatility => self.income_volatility,
            IndicatorKind::SurplusRatio => self.surplus_ratio,
            IndicatorKind::CashBufferDays => self.cash_buffer_days,
            IndicatorKind::IncomeTrend => self.income_trend,
        }
    }

    pub fn risk_tier(&self) -> RiskTier {
        risk_tier(self.stability_score)
    }

    pub fn flags(&self) -> Vec<Flag> {
        generate_flags(&self.raw)
    }
}

/// Weighted sum of the four component scores, rounded to an integer
pub fn composite_score(volatility: u8, surplus: u8, buffer: u8, trend: u8) -> u8 {
    let weighted = IndicatorKind::IncomeVolatility.weight() * f64::from(volatility)
        + IndicatorKind::SurplusRatio.weight() * f64::from(surplus)
        + IndicatorKind::CashBufferDays.weight() * f64::from(buffer)
        + IndicatorKind::IncomeTrend.weight() * f64::from(trend);

    weighted.round().clamp(0.0, 100.0) as u8
}

pub fn risk_tier(score: u8) -> RiskTier {
    let (label, color, description) = match score {
        80.. => (
            TierLabel::Stable,
            ScoreColor::Green,
            "Low risk - strong financial stability",
        ),
        50..=79 => (
            TierLabel::Watch,
            ScoreColor::Yellow,
            "Moderate risk - some concerns present",
        ),
        _ => (
            TierLabel::Risky,
            ScoreColor::Red,
            "High risk - significant stability concerns",
        ),
    };

    RiskTier {
        label,
        color,
        description: description.to_string(),
    }
}

/// Narrative flags from the raw values.
///
/// Thresholds here are separate from the score ladders. Groups are checked in
/// a fixed order (volatility, surplus, buffer, trend) and may all fire.
pub fn generate_flags(raw: &RawIndicators) -> Vec<Flag> {
    let mut flags = Vec::new();

    if raw.income_volatility > 0.40 {
        flags.push(Flag::new(
            FlagKind::Warning,
            "High income volatility detected — income varies significantly month-to-month",
        ));
    } else if raw.income_volatility > 0.25 {
        flags.push(Flag::new(
            FlagKind::Caution,
            "Moderate income volatility — some variation in monthly income",
        ));
    }

    if raw.surplus_ratio < 0.0 {
        flags.push(Flag::new(
            FlagKind::Warning,
            "Negative surplus ratio — spending exceeds income on average",
        ));
    } else if raw.surplus_ratio < 0.10 {
        flags.push(Flag::new(
            FlagKind::Caution,
            "Low surplus margin — little buffer between income and expenses",
        ));
    }

    if raw.cash_buffer_days < 14.0 {
        flags.push(Flag::new(
            FlagKind::Warning,
            "Critical cash buffer — less than 2 weeks of expenses covered",
        ));
    } else if raw.cash_buffer_days < 30.0 {
        flags.push(Flag::new(
            FlagKind::Caution,
            "Limited cash buffer — less than 1 month of expenses covered",
        ));
    }

    if raw.income_trend < -0.10 {
        flags.push(Flag::new(
            FlagKind::Warning,
            "Declining income trend — income has decreased significantly",
        ));
    } else if raw.income_trend > 0.10 {
        flags.push(Flag::new(
            FlagKind::Positive,
            "Growing income trend — income has increased over the period",
        ));
    }

    if flags.is_empty() {
        flags.push(Flag::new(
            FlagKind::Positive,
            "No significant concerns detected — stable cashflow patterns",
        ));
    }

    flags
}
