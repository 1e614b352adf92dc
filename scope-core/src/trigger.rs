use crate::error::TriggerError;
use crate::validation::Validator;
use serde::Serialize;

/// Frequency, duration and volume of a trigger's tone. Only constructible
/// through validation, so a value of this type is always in range and on step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriggerParams {
    frequency_hz: u32,
    duration_ms: u32,
    volume_percent: u8,
}

impl TriggerParams {
    pub fn new(frequency_hz: i64, duration_ms: i64, volume_percent: i64) -> Result<Self, TriggerError> {
        Validator::check_params(frequency_hz, duration_ms, volume_percent)?;
        Ok(Self {
            frequency_hz: u32::try_from(frequency_hz).map_err(|_| TriggerError::Internal)?,
            duration_ms: u32::try_from(duration_ms).map_err(|_| TriggerError::Internal)?,
            volume_percent: u8::try_from(volume_percent).map_err(|_| TriggerError::Internal)?,
        })
    }

    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn volume_percent(&self) -> u8 {
        self.volume_percent
    }
}

impl Default for TriggerParams {
    fn default() -> Self {
        Self {
            frequency_hz: 1000,
            duration_ms: 200,
            volume_percent: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trigger {
    id: u64,
    level: f64,
    #[serde(flatten)]
    params: TriggerParams,
    trigger_bool: bool,
    level_timestamp: i64,
}

impl Trigger {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn params(&self) -> TriggerParams {
        self.params
    }

    /// Whether the monitored curve was at or above `level` when the trigger
    /// was placed. Never recomputed.
    pub fn trigger_bool(&self) -> bool {
        self.trigger_bool
    }

    /// Seconds since the unix epoch at creation.
    pub fn level_timestamp(&self) -> i64 {
        self.level_timestamp
    }

    pub fn apply(&mut self, params: TriggerParams) {
        self.params = params;
    }

    pub(crate) fn record_snapshot(&mut self, trigger_bool: bool, level_timestamp: i64) {
        self.trigger_bool = trigger_bool;
        self.level_timestamp = level_timestamp;
    }
}

/// Ordered trigger list. Insertion order is display order; ids start at 1 and
/// are never reused.
#[derive(Debug, Clone)]
pub struct TriggerCollection {
    triggers: Vec<Trigger>,
    next_id: u64,
    defaults: TriggerParams,
}

impl Default for TriggerCollection {
    fn default() -> Self {
        Self::new(TriggerParams::default())
    }
}

impl TriggerCollection {
    pub fn new(defaults: TriggerParams) -> Self {
        Self {
            triggers: Vec::new(),
            next_id: 1,
            defaults,
        }
    }

    pub fn add(&mut self, level: f64) -> &mut Trigger {
        let id = self.next_id;
        self.next_id += 1;
        self.triggers.push(Trigger {
            id,
            level,
            params: self.defaults,
            trigger_bool: false,
            level_timestamp: 0,
        });
        let idx = self.triggers.len() - 1;
        &mut self.triggers[idx]
    }

    pub fn get(&self, id: u64) -> Option<&Trigger> {
        self.triggers.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Trigger> {
        self.triggers.iter_mut().find(|t| t.id == id)
    }

    pub fn remove(&mut self, id: u64) -> Option<Trigger> {
        let idx = self.triggers.iter().position(|t| t.id == id)?;
        Some(self.triggers.remove(idx))
    }

    pub fn as_slice(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trigger> {
        self.triggers.iter()
    }
}
