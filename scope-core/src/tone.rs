#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ToneError {
    #[error("test tone disabled")]
    Disabled,
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
}

/// Short preview tone played after a trigger's parameters change.
pub trait TestTone {
    fn play_test_tone(
        &mut self,
        frequency_hz: u32,
        duration_ms: u32,
        volume_percent: u8,
    ) -> Result<(), ToneError>;
}

/// Records the request in the log instead of producing audio.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTone;

impl TestTone for LogTone {
    fn play_test_tone(
        &mut self,
        frequency_hz: u32,
        duration_ms: u32,
        volume_percent: u8,
    ) -> Result<(), ToneError> {
        log::info!("test tone {frequency_hz} Hz for {duration_ms} ms at {volume_percent} %");
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledTone;

impl TestTone for DisabledTone {
    fn play_test_tone(&mut self, _: u32, _: u32, _: u8) -> Result<(), ToneError> {
        Err(ToneError::Disabled)
    }
}
