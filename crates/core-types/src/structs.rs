use serde::{Deserialize, Serialize};

/// A pair of aligned periodic return series, oldest period first.
///
/// This is the on-disk shape consumed by the CLI. When `benchmark` is omitted
/// every benchmark period is treated as missing (NaN).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    pub portfolio: Vec<f64>,
    #[serde(default)]
    pub benchmark: Option<Vec<f64>>,
}

impl ReturnSeries {
    pub fn new(portfolio: Vec<f64>, benchmark: Vec<f64>) -> Self {
        Self {
            portfolio,
            benchmark: Some(benchmark),
        }
    }

    /// Splits the series into `(portfolio, benchmark)`, filling a missing
    /// benchmark with NaN so both sides have the same length.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        let benchmark = self
            .benchmark
            .unwrap_or_else(|| vec![f64::NAN; self.portfolio.len()]);
        (self.portfolio, benchmark)
    }
}
