use crate::backend::{BackendVerdict, TriggerBackend};
use crate::error::{TriggerError, INTERNAL_MESSAGE};
use crate::trigger::{Trigger, TriggerCollection, TriggerParams};

/// How a parameter update was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamsUpdate {
    /// The backend accepted and applied the update.
    Delegated,
    /// The built-in rule table accepted the values and they were applied.
    Applied(TriggerParams),
}

/// Owns the trigger collection and the optional backend that may take over
/// validation.
#[derive(Default)]
pub struct TriggersModel {
    triggers: TriggerCollection,
    backend: Option<Box<dyn TriggerBackend>>,
}

impl TriggersModel {
    pub fn new(defaults: TriggerParams) -> Self {
        Self {
            triggers: TriggerCollection::new(defaults),
            backend: None,
        }
    }

    pub fn set_backend(&mut self, backend: Option<Box<dyn TriggerBackend>>) {
        self.backend = backend;
    }

    pub fn triggers(&self) -> &TriggerCollection {
        &self.triggers
    }

    pub fn triggers_mut(&mut self) -> &mut TriggerCollection {
        &mut self.triggers
    }

    pub fn get(&self, id: u64) -> Option<&Trigger> {
        self.triggers.get(id)
    }

    /// Validates `(hz, time, vol)` and applies it to trigger `id` in one step.
    ///
    /// The backend, when present, is asked first. `Applied` and a non-empty
    /// `Rejected` end the update there. `Deferred`, an empty or `"internal"`
    /// rejection, and backend errors all fall back to the built-in rule table.
    /// On any error the trigger is left untouched.
    pub fn update_trigger_params(
        &mut self,
        id: i64,
        frequency_hz: i64,
        duration_ms: i64,
        volume_percent: i64,
    ) -> Result<ParamsUpdate, TriggerError> {
        if let Some(backend) = self.backend.as_mut() {
            match backend.validate_and_update(
                &mut self.triggers,
                id,
                frequency_hz,
                duration_ms,
                volume_percent,
            ) {
                Ok(BackendVerdict::Applied) => return Ok(ParamsUpdate::Delegated),
                Ok(BackendVerdict::Rejected(message))
                    if !message.trim().is_empty() && message != INTERNAL_MESSAGE =>
                {
                    return Err(TriggerError::Rejected(message));
                }
                Ok(_) => log::debug!("trigger backend deferred update of {id}"),
                Err(err) => log::warn!("trigger backend failed, using built-in rules: {err}"),
            }
        }

        let params = TriggerParams::new(frequency_hz, duration_ms, volume_percent)?;
        let trigger = u64::try_from(id)
            .ok()
            .and_then(|id| self.triggers.get_mut(id))
            .ok_or(TriggerError::Internal)?;
        trigger.apply(params);
        log::info!(
            "trigger {id} set to {} Hz, {} ms, {} %",
            params.frequency_hz(),
            params.duration_ms(),
            params.volume_percent()
        );
        Ok(ParamsUpdate::Applied(params))
    }
}
