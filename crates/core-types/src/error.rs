use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("period cannot be '{value}', possible values: {expected}")]
    UnknownPeriod { value: String, expected: String },

    #[error("formula set cannot be '{value}', possible values: {expected}")]
    UnknownFormulaSet { value: String, expected: String },
}
