/// Structured validation errors for pantryctl-core.
///
/// Uses `thiserror` so the store and CLI can compose these into their own
/// error types. User-facing wording lives in the CLI, not here.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field did not parse as an integer
    #[error("{field} must be a whole number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    /// Month outside 1-12
    #[error("month must be between 1 and 12, got {0}")]
    MonthOutOfRange(i32),
}
