use crate::error::ConfigError;
use core_types::{FormulaSet, Period};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub risk: RiskSettings,
}

/// Scalar inputs of the indicator engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSettings {
    /// Annualized risk-free rate (0.03 corresponds to 3%).
    pub risk_free_rate: f64,
    /// Sampling frequency of the return series.
    pub period: Period,
    /// Formula generation used for risk-free conversion and downside risk.
    pub formula_set: FormulaSet,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            period: Period::Daily,
            formula_set: FormulaSet::Compounded,
        }
    }
}

impl RiskSettings {
    /// Rejects rates the compounded conversion cannot handle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.risk_free_rate.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "risk_free_rate must be finite, got {}",
                self.risk_free_rate
            )));
        }
        if self.risk_free_rate <= -1.0 {
            return Err(ConfigError::ValidationError(format!(
                "risk_free_rate must be greater than -1, got {}",
                self.risk_free_rate
            )));
        }
        if self.risk_free_rate > 1.0 {
            warn!(
                risk_free_rate = self.risk_free_rate,
                "risk_free_rate above 100%; rates are fractions, not percentages"
            );
        }
        Ok(())
    }

    /// Overlays the values explicitly given on the command line.
    pub fn apply(&mut self, overrides: &RiskOverrides) {
        if let Some(rate) = overrides.risk_free_rate {
            self.risk_free_rate = rate;
        }
        if let Some(period) = overrides.period {
            self.period = period;
        }
        if let Some(formula_set) = overrides.formula_set {
            self.formula_set = formula_set;
        }
    }
}

/// Optional per-invocation overrides of `RiskSettings`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct RiskOverrides {
    /// Annualized risk-free rate (e.g. 0.03).
    #[cfg_attr(feature = "clap", arg(long, allow_hyphen_values = true))]
    pub risk_free_rate: Option<f64>,

    /// Period of the return series: daily, weekly, monthly, yearly or natural_daily.
    #[cfg_attr(feature = "clap", arg(long))]
    pub period: Option<Period>,

    /// Formula set: classic or compounded.
    #[cfg_attr(feature = "clap", arg(long))]
    pub formula_set: Option<FormulaSet>,
}
