use crate::error::AnalyticsError;
use crate::indicator::Indicator;
use crate::math::{
    DRAWDOWN_EPSILON, annualize, covariance, cumulative_return, drawdown_ratios, max_drawdown,
    mean, safe_div, sign, std_dev, variance,
};
use crate::report::RiskReport;
use core_types::{FormulaSet, Period, ReturnSeries};
use statrs::distribution::{ContinuousCDF, Normal};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Confidence tail used by the `var` indicator.
pub const DEFAULT_VAR_ALPHA: f64 = 0.05;

/// Derives risk and performance indicators from a portfolio return series and
/// its benchmark.
///
/// Indicators are computed lazily on first access and memoized for the
/// lifetime of the engine. An indicator that depends on another one reads it
/// through the same memoized accessor, so nothing is evaluated twice. The memo
/// slots are `OnceLock`s, which makes a shared engine safe to read from
/// several threads.
#[derive(Debug)]
pub struct RiskEngine {
    portfolio: Vec<f64>,
    benchmark: Vec<f64>,
    /// `portfolio[i] - benchmark[i]`
    active_returns: Vec<f64>,
    /// `(1 + portfolio[i]) / (1 + benchmark[i]) - 1`
    geometric_excess_returns: Vec<f64>,
    period: Period,
    formula_set: FormulaSet,
    risk_free_rate: f64,
    risk_free_per_period: f64,
    annual_factor: f64,
    period_count: usize,
    avg_excess_return: f64,
    cache: [OnceLock<f64>; Indicator::COUNT],
}

impl RiskEngine {
    /// Creates an engine evaluating the default (compounded) formula set.
    ///
    /// # Arguments
    ///
    /// * `portfolio` - Periodic portfolio returns, oldest first (0.01 = 1%).
    /// * `benchmark` - Benchmark returns for the same periods.
    /// * `risk_free_rate` - Annualized risk-free rate.
    /// * `period` - Sampling frequency of both series.
    pub fn new(
        portfolio: impl Into<Vec<f64>>,
        benchmark: impl Into<Vec<f64>>,
        risk_free_rate: f64,
        period: Period,
    ) -> Result<Self, AnalyticsError> {
        Self::with_formula_set(
            portfolio,
            benchmark,
            risk_free_rate,
            period,
            FormulaSet::default(),
        )
    }

    /// Creates an engine evaluating an explicit formula set.
    pub fn with_formula_set(
        portfolio: impl Into<Vec<f64>>,
        benchmark: impl Into<Vec<f64>>,
        risk_free_rate: f64,
        period: Period,
        formula_set: FormulaSet,
    ) -> Result<Self, AnalyticsError> {
        let portfolio = portfolio.into();
        let benchmark = benchmark.into();
        if portfolio.len() != benchmark.len() {
            return Err(AnalyticsError::LengthMismatch {
                portfolio: portfolio.len(),
                benchmark: benchmark.len(),
            });
        }

        let period_count = portfolio.len();
        let annual_factor = period.annual_factor();
        let risk_free_per_period = formula_set.per_period_rate(risk_free_rate, annual_factor);
        let avg_excess_return = mean(&portfolio) - risk_free_per_period;

        let active_returns = portfolio.iter().zip(&benchmark).map(|(p, b)| p - b).collect();
        let geometric_excess_returns = portfolio
            .iter()
            .zip(&benchmark)
            .map(|(p, b)| (1.0 + p) / (1.0 + b) - 1.0)
            .collect();

        debug!(
            %period,
            %formula_set,
            period_count,
            risk_free_rate,
            "Risk engine created"
        );

        Ok(Self {
            portfolio,
            benchmark,
            active_returns,
            geometric_excess_returns,
            period,
            formula_set,
            risk_free_rate,
            risk_free_per_period,
            annual_factor,
            period_count,
            avg_excess_return,
            cache: std::array::from_fn(|_| OnceLock::new()),
        })
    }

    /// Creates an engine from a deserialized series pair.
    pub fn from_series(
        series: ReturnSeries,
        risk_free_rate: f64,
        period: Period,
        formula_set: FormulaSet,
    ) -> Result<Self, AnalyticsError> {
        let (portfolio, benchmark) = series.into_parts();
        Self::with_formula_set(portfolio, benchmark, risk_free_rate, period, formula_set)
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn formula_set(&self) -> FormulaSet {
        self.formula_set
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    pub fn annual_factor(&self) -> f64 {
        self.annual_factor
    }

    pub fn period_count(&self) -> usize {
        self.period_count
    }

    /// Returns the memoized value of `indicator`, computing it on first access.
    pub fn get(&self, indicator: Indicator) -> f64 {
        *self.cache[indicator as usize].get_or_init(|| self.compute(indicator))
    }

    /// Every indicator keyed by name.
    pub fn all(&self) -> BTreeMap<&'static str, f64> {
        Indicator::ALL
            .iter()
            .map(|indicator| (indicator.name(), self.get(*indicator)))
            .collect()
    }

    /// Every indicator together with the settings that produced them.
    pub fn report(&self) -> RiskReport {
        RiskReport {
            period: self.period,
            formula_set: self.formula_set,
            risk_free_rate: self.risk_free_rate,
            period_count: self.period_count,
            indicators: self
                .all()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

    /// Parametric Value-at-Risk at tail probability `alpha`.
    ///
    /// Fits a normal distribution (population standard deviation) to the log
    /// returns and maps its `alpha` quantile back to a simple return, reported
    /// as a positive loss. Returns NaN when the fit is degenerate or `alpha`
    /// lies outside `[0, 1]`.
    pub fn param_var(&self, alpha: f64) -> f64 {
        if !(0.0..=1.0).contains(&alpha) {
            return f64::NAN;
        }
        let log_returns: Vec<f64> = self.portfolio.iter().map(|r| r.ln_1p()).collect();
        match Normal::new(mean(&log_returns), std_dev(&log_returns, 0)) {
            Ok(normal) => (-normal.inverse_cdf(alpha)).exp_m1(),
            Err(_) => f64::NAN,
        }
    }

    /// Applies the minimum-sample-size policy before evaluating the formula.
    fn compute(&self, indicator: Indicator) -> f64 {
        let min_period_count = indicator.min_period_count();
        if self.period_count < min_period_count {
            trace!(
                indicator = indicator.name(),
                period_count = self.period_count,
                min_period_count,
                "Sample too short, using fallback"
            );
            return indicator.fallback();
        }
        let value = self.evaluate(indicator);
        trace!(indicator = indicator.name(), value, "Indicator computed");
        value
    }

    fn evaluate(&self, indicator: Indicator) -> f64 {
        let sqrt_factor = self.annual_factor.sqrt();
        match indicator {
            Indicator::ReturnRate => cumulative_return(&self.portfolio),
            Indicator::AnnualReturn => self.annualized(self.return_rate()),
            Indicator::BenchmarkReturn => cumulative_return(&self.benchmark),
            Indicator::BenchmarkAnnualReturn => self.annualized(self.benchmark_return()),
            Indicator::Alpha => {
                let beta = self.beta();
                let rf = self.risk_free_per_period;
                let residuals: Vec<f64> = self
                    .portfolio
                    .iter()
                    .zip(&self.benchmark)
                    .map(|(p, b)| p - rf - beta * (b - rf))
                    .collect();
                mean(&residuals) * self.annual_factor
            }
            Indicator::Beta => safe_div(
                covariance(&self.portfolio, &self.benchmark),
                variance(&self.benchmark, 1),
            ),
            Indicator::Volatility => std_dev(&self.portfolio, 1),
            Indicator::AnnualVolatility => self.volatility() * sqrt_factor,
            Indicator::BenchmarkVolatility => std_dev(&self.benchmark, 1),
            Indicator::BenchmarkAnnualVolatility => self.benchmark_volatility() * sqrt_factor,
            Indicator::MaxDrawdown => max_drawdown(&self.portfolio),
            Indicator::TrackingError => {
                if self.benchmark_missing() {
                    return f64::NAN;
                }
                std_dev(&self.active_returns, 1)
            }
            Indicator::AnnualTrackingError => {
                if self.benchmark_missing() {
                    return f64::NAN;
                }
                self.tracking_error() * sqrt_factor
            }
            Indicator::InformationRatio => safe_div(
                sqrt_factor * mean(&self.active_returns),
                self.tracking_error(),
            ),
            Indicator::Sharpe => {
                let excess: Vec<f64> = self
                    .portfolio
                    .iter()
                    .map(|p| p - self.risk_free_per_period)
                    .collect();
                safe_div(sqrt_factor * self.avg_excess_return, std_dev(&excess, 1))
            }
            Indicator::ExcessSharpe => self.information_ratio(),
            Indicator::DownsideRisk => self.semi_deviation(),
            Indicator::AnnualDownsideRisk => self.downside_risk() * sqrt_factor,
            Indicator::Sortino => safe_div(
                self.annual_factor * self.avg_excess_return,
                self.annual_downside_risk(),
            ),
            Indicator::Calmar => {
                let drawdown = self.max_drawdown();
                let annual_return = self.annual_return();
                if drawdown.abs() <= DRAWDOWN_EPSILON {
                    f64::INFINITY * sign(annual_return)
                } else {
                    annual_return / drawdown
                }
            }
            Indicator::ExcessReturnRate => cumulative_return(&self.active_returns),
            Indicator::ExcessAnnualReturn => self.annualized(self.excess_return_rate()),
            Indicator::ExcessVolatility => std_dev(&self.active_returns, 1),
            Indicator::ExcessAnnualVolatility => self.excess_volatility() * sqrt_factor,
            Indicator::ExcessMaxDrawdown => max_drawdown(&self.active_returns),
            Indicator::GeometricExcessReturn => cumulative_return(&self.geometric_excess_returns),
            Indicator::GeometricExcessAnnualReturn => {
                self.annualized(self.geometric_excess_return())
            }
            Indicator::GeometricExcessDrawdown => max_drawdown(&self.geometric_excess_returns),
            Indicator::Var => self.param_var(DEFAULT_VAR_ALPHA),
            Indicator::WinRate => self.share_of_periods(|p, _| p > 0.0),
            Indicator::ExcessWinRate => self.share_of_periods(|p, b| p > b),
            Indicator::Correlation => safe_div(
                covariance(&self.portfolio, &self.benchmark),
                std_dev(&self.portfolio, 1) * std_dev(&self.benchmark, 1),
            ),
            Indicator::UlcerIndex => {
                let squares: Vec<f64> = drawdown_ratios(&self.portfolio)
                    .into_iter()
                    .map(|ratio| ratio * ratio)
                    .collect();
                mean(&squares).sqrt()
            }
            Indicator::UlcerPerformanceIndex => safe_div(
                self.annual_return() - self.risk_free_rate,
                self.ulcer_index(),
            ),
        }
    }

    fn annualized(&self, total_return: f64) -> f64 {
        annualize(total_return, self.annual_factor, self.period_count)
    }

    /// True when no benchmark value is known (including the empty series).
    fn benchmark_missing(&self) -> bool {
        self.benchmark.iter().all(|b| b.is_nan())
    }

    /// Downside deviation below the threshold of the active formula set.
    fn semi_deviation(&self) -> f64 {
        let threshold = match self.formula_set {
            FormulaSet::Classic => self.risk_free_per_period,
            FormulaSet::Compounded => mean(&self.portfolio),
        };
        let sum_sq: f64 = self
            .portfolio
            .iter()
            .map(|p| {
                // Keeps NaN, unlike `min(0.0)`.
                let diff = p - threshold;
                if diff > 0.0 { 0.0 } else { diff * diff }
            })
            .sum();
        (sum_sq / (self.period_count - 1) as f64).sqrt()
    }

    fn share_of_periods(&self, predicate: impl Fn(f64, f64) -> bool) -> f64 {
        let hits = self
            .portfolio
            .iter()
            .zip(&self.benchmark)
            .filter(|&(&p, &b)| predicate(p, b))
            .count();
        hits as f64 / self.period_count as f64
    }
}
