use crate::error::INTERNAL_MESSAGE;
use crate::trigger::TriggerCollection;

/// Outcome reported by a [`TriggerBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendVerdict {
    /// The backend validated and applied the update itself.
    Applied,
    /// The update is invalid; the message is shown to the user as-is.
    Rejected(String),
    /// The backend has no opinion; the built-in rule table decides.
    Deferred,
}

impl BackendVerdict {
    /// Maps the string protocol used by script-side models: empty means
    /// applied, `"internal"` means defer, anything else is a rejection.
    pub fn from_message(message: &str) -> Self {
        if message.is_empty() {
            BackendVerdict::Applied
        } else if message == INTERNAL_MESSAGE {
            BackendVerdict::Deferred
        } else {
            BackendVerdict::Rejected(message.to_string())
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error("trigger backend failed: {0}")]
    Failed(String),
}

/// Optional validate-and-update hook owned by the triggers model.
pub trait TriggerBackend {
    fn validate_and_update(
        &mut self,
        triggers: &mut TriggerCollection,
        id: i64,
        frequency_hz: i64,
        duration_ms: i64,
        volume_percent: i64,
    ) -> Result<BackendVerdict, BackendError>;
}

impl<F> TriggerBackend for F
where
    F: FnMut(&mut TriggerCollection, i64, i64, i64, i64) -> Result<BackendVerdict, BackendError>,
{
    fn validate_and_update(
        &mut self,
        triggers: &mut TriggerCollection,
        id: i64,
        frequency_hz: i64,
        duration_ms: i64,
        volume_percent: i64,
    ) -> Result<BackendVerdict, BackendError> {
        self(triggers, id, frequency_hz, duration_ms, volume_percent)
    }
}
