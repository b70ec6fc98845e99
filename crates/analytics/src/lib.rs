//! # Portfolio Risk Analytics
//!
//! This crate derives standard performance and risk statistics (returns,
//! volatility, drawdown, Sharpe/Sortino/Calmar, alpha/beta, tracking error,
//! Value-at-Risk, win rates, correlation, ulcer index) from a portfolio return
//! series and an aligned benchmark series.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O. The crate depends only on `core-types` for the
//!   period and formula-set vocabulary.
//! - **Lazy, memoized indicators:** the `RiskEngine` computes each indicator on
//!   first access and keeps it for its lifetime. Degenerate input (short
//!   series, zero variance, missing benchmark) resolves to NaN, zero or a
//!   signed infinity; indicator reads never fail.
//!
//! ## Public API
//!
//! - `RiskEngine`: owns the series and exposes one accessor per indicator,
//!   `param_var`, `all` and `report`.
//! - `Indicator`: the static registry of indicator names and their
//!   minimum-sample-size policy.
//! - `RiskReport`: the serializable snapshot of every indicator.
//! - `AnalyticsError`: construction errors.

pub mod engine;
pub mod error;
pub mod indicator;
pub mod math;
pub mod report;

pub use engine::{DEFAULT_VAR_ALPHA, RiskEngine};
pub use error::AnalyticsError;
pub use indicator::Indicator;
pub use math::safe_div;
pub use report::RiskReport;
