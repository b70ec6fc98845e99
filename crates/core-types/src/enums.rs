use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const APPROX_BDAYS_PER_YEAR: u32 = 252;
pub const WEEKS_PER_YEAR: u32 = 52;
pub const MONTHS_PER_YEAR: u32 = 12;
pub const DAYS_PER_YEAR: u32 = 365;

/// The sampling frequency of a return series.
///
/// Each period maps to the annualization factor used to scale per-period
/// statistics up to yearly figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Trading days, 252 per year.
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Calendar days, 365 per year.
    NaturalDaily,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::Daily,
        Period::Weekly,
        Period::Monthly,
        Period::Yearly,
        Period::NaturalDaily,
    ];

    /// Number of periods per year.
    pub fn annual_factor(&self) -> f64 {
        let periods = match self {
            Period::Daily => APPROX_BDAYS_PER_YEAR,
            Period::Weekly => WEEKS_PER_YEAR,
            Period::Monthly => MONTHS_PER_YEAR,
            Period::Yearly => 1,
            Period::NaturalDaily => DAYS_PER_YEAR,
        };
        f64::from(periods)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
            Period::NaturalDaily => "natural_daily",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|period| period.as_str() == s)
            .ok_or_else(|| CoreError::UnknownPeriod {
                value: s.to_string(),
                expected: Period::ALL.map(|p| p.as_str()).join(", "),
            })
    }
}

/// Which generation of formulas the engine evaluates.
///
/// The two families differ in how the annual risk-free rate is converted to a
/// per-period rate and in the threshold used for downside risk. They are never
/// mixed within one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaSet {
    /// `rf / annual_factor`; downside risk measured below the per-period risk-free rate.
    Classic,
    /// `(1 + rf)^(1 / annual_factor) - 1`; downside risk measured below the mean return.
    #[default]
    Compounded,
}

impl FormulaSet {
    pub const ALL: [FormulaSet; 2] = [FormulaSet::Classic, FormulaSet::Compounded];

    /// Converts an annualized risk-free rate into the per-period rate of this family.
    pub fn per_period_rate(&self, risk_free_rate: f64, annual_factor: f64) -> f64 {
        match self {
            FormulaSet::Classic => risk_free_rate / annual_factor,
            FormulaSet::Compounded => (1.0 + risk_free_rate).powf(1.0 / annual_factor) - 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormulaSet::Classic => "classic",
            FormulaSet::Compounded => "compounded",
        }
    }
}

impl fmt::Display for FormulaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormulaSet {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormulaSet::ALL
            .into_iter()
            .find(|set| set.as_str() == s)
            .ok_or_else(|| CoreError::UnknownFormulaSet {
                value: s.to_string(),
                expected: FormulaSet::ALL.map(|f| f.as_str()).join(", "),
            })
    }
}
