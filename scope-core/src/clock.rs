use std::time::{SystemTime, UNIX_EPOCH};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("system clock is set before the unix epoch")]
    BeforeEpoch,
    #[error("clock unavailable: {0}")]
    Unavailable(String),
}

pub trait Clock {
    /// Whole seconds since the unix epoch.
    fn now_secs(&self) -> Result<i64, ClockError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> Result<i64, ClockError> {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| ClockError::BeforeEpoch)?;
        i64::try_from(elapsed.as_secs()).map_err(|e| ClockError::Unavailable(e.to_string()))
    }
}
