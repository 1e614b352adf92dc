use crate::validation::ParamField;

/// Message surfaced for every failure the user cannot act on.
pub const INTERNAL_MESSAGE: &str = "internal";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Internal,
    OutOfRange,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TriggerError {
    /// Bad input shape, unknown trigger id or an unexpected failure.
    #[error("internal")]
    Internal,
    #[error(
        "{field} out of range/step ({min}…{max}{}, step {step})",
        .field.unit_suffix()
    )]
    OutOfRange {
        field: ParamField,
        min: i64,
        max: i64,
        step: i64,
    },
    /// Field-scoped message produced by a trigger backend, passed through verbatim.
    #[error("{0}")]
    Rejected(String),
}

impl TriggerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TriggerError::Internal => ErrorKind::Internal,
            TriggerError::OutOfRange { .. } | TriggerError::Rejected(_) => ErrorKind::OutOfRange,
        }
    }
}

/// Collapses an update result into the UI string protocol: empty on success,
/// otherwise the error text.
pub fn to_ui_message(result: Result<(), TriggerError>) -> String {
    match result {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}
