use crate::engine::RiskEngine;
use crate::error::AnalyticsError;
use std::fmt;
use std::str::FromStr;

/// Declares every indicator once: the `Indicator` variant, its registry
/// metadata (name, minimum sample size, fallback) and the typed accessor on
/// `RiskEngine`. Variant order is registry order.
macro_rules! indicators {
    ($(
        $(#[$doc:meta])*
        $variant:ident => $method:ident, min = $min:expr, fallback = $fallback:expr;
    )+) => {
        /// A named scalar derived from a `RiskEngine`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Indicator {
            $( $(#[$doc])* $variant, )+
        }

        impl Indicator {
            /// Every indicator, in registry order.
            pub const ALL: &'static [Indicator] = &[ $( Indicator::$variant, )+ ];
            pub const COUNT: usize = Self::ALL.len();

            /// The key used by `RiskEngine::all` and the report.
            pub fn name(&self) -> &'static str {
                match self {
                    $( Indicator::$variant => stringify!($method), )+
                }
            }

            /// Below this many periods the formula is not evaluated.
            pub fn min_period_count(&self) -> usize {
                match self {
                    $( Indicator::$variant => $min, )+
                }
            }

            /// Value reported when the sample is shorter than `min_period_count`.
            pub fn fallback(&self) -> f64 {
                match self {
                    $( Indicator::$variant => $fallback, )+
                }
            }
        }

        impl RiskEngine {
            $(
                $(#[$doc])*
                pub fn $method(&self) -> f64 {
                    self.get(Indicator::$variant)
                }
            )+
        }
    };
}

indicators! {
    /// Total compounded portfolio return.
    ReturnRate => return_rate, min = 0, fallback = f64::NAN;
    /// Portfolio return scaled to one year.
    AnnualReturn => annual_return, min = 1, fallback = f64::NAN;
    BenchmarkReturn => benchmark_return, min = 0, fallback = f64::NAN;
    BenchmarkAnnualReturn => benchmark_annual_return, min = 1, fallback = f64::NAN;
    /// Annualized mean of the portfolio return left after removing the beta-scaled benchmark.
    Alpha => alpha, min = 2, fallback = f64::NAN;
    /// Sample covariance with the benchmark over the benchmark variance.
    Beta => beta, min = 2, fallback = f64::NAN;
    /// Per-period sample standard deviation.
    Volatility => volatility, min = 2, fallback = 0.0;
    AnnualVolatility => annual_volatility, min = 0, fallback = f64::NAN;
    BenchmarkVolatility => benchmark_volatility, min = 2, fallback = 0.0;
    BenchmarkAnnualVolatility => benchmark_annual_volatility, min = 0, fallback = f64::NAN;
    /// Largest peak-to-trough decline, as a non-negative fraction.
    MaxDrawdown => max_drawdown, min = 1, fallback = f64::NAN;
    /// Standard deviation of the active return; NaN without any benchmark data.
    TrackingError => tracking_error, min = 2, fallback = 0.0;
    AnnualTrackingError => annual_tracking_error, min = 0, fallback = f64::NAN;
    InformationRatio => information_ratio, min = 2, fallback = f64::NAN;
    Sharpe => sharpe, min = 2, fallback = f64::NAN;
    /// Alias of the information ratio.
    ExcessSharpe => excess_sharpe, min = 0, fallback = f64::NAN;
    /// Semi-deviation below the threshold of the engine's formula set.
    DownsideRisk => downside_risk, min = 2, fallback = 0.0;
    AnnualDownsideRisk => annual_downside_risk, min = 0, fallback = f64::NAN;
    Sortino => sortino, min = 0, fallback = f64::NAN;
    /// Annual return over max drawdown; signed infinity when there is no drawdown.
    Calmar => calmar, min = 0, fallback = f64::NAN;
    ExcessReturnRate => excess_return_rate, min = 0, fallback = f64::NAN;
    ExcessAnnualReturn => excess_annual_return, min = 1, fallback = f64::NAN;
    ExcessVolatility => excess_volatility, min = 2, fallback = 0.0;
    ExcessAnnualVolatility => excess_annual_volatility, min = 0, fallback = f64::NAN;
    ExcessMaxDrawdown => excess_max_drawdown, min = 1, fallback = f64::NAN;
    /// Compounded `(1 + p) / (1 + b) - 1`.
    GeometricExcessReturn => geometric_excess_return, min = 0, fallback = f64::NAN;
    GeometricExcessAnnualReturn => geometric_excess_annual_return, min = 1, fallback = f64::NAN;
    GeometricExcessDrawdown => geometric_excess_drawdown, min = 1, fallback = f64::NAN;
    /// Parametric 95% Value-at-Risk.
    Var => var, min = 0, fallback = f64::NAN;
    /// Share of periods with a positive portfolio return.
    WinRate => win_rate, min = 1, fallback = f64::NAN;
    /// Share of periods in which the portfolio beat the benchmark.
    ExcessWinRate => excess_win_rate, min = 1, fallback = f64::NAN;
    Correlation => correlation, min = 2, fallback = f64::NAN;
    /// Root mean square of the per-period drawdown ratios.
    UlcerIndex => ulcer_index, min = 1, fallback = f64::NAN;
    UlcerPerformanceIndex => ulcer_performance_index, min = 0, fallback = f64::NAN;
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Indicator {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Indicator::ALL
            .iter()
            .copied()
            .find(|indicator| indicator.name() == s)
            .ok_or_else(|| AnalyticsError::UnknownIndicator(s.to_string()))
    }
}
