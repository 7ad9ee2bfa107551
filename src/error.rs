use thiserror::Error;

/// Errors raised by the navigator widgets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigatorError {
    /// The `step` option does not name a known view step.
    #[error("E1033 - Unknown step in the scheduler navigator: '{step}'")]
    UnknownStep { step: String },
}
