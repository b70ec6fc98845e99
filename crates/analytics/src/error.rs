use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error(
        "Portfolio and benchmark must cover the same periods: got {portfolio} portfolio and {benchmark} benchmark returns"
    )]
    LengthMismatch { portfolio: usize, benchmark: usize },

    #[error("Invalid engine configuration: {0}")]
    Core(#[from] CoreError),

    #[error("Unknown indicator '{0}'")]
    UnknownIndicator(String),
}
