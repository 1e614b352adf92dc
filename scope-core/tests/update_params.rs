use scope_core::{
    BackendError, BackendVerdict, ScopeData, ScopeEvent, TestTone, ToneError, TriggerBackend,
    TriggerCollection, TriggerError, TriggerParams, INTERNAL_MESSAGE,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

type ToneLog = Rc<RefCell<Vec<(u32, u32, u8)>>>;

struct RecordingTone {
    played: ToneLog,
    fail: bool,
}

impl TestTone for RecordingTone {
    fn play_test_tone(
        &mut self,
        frequency_hz: u32,
        duration_ms: u32,
        volume_percent: u8,
    ) -> Result<(), ToneError> {
        self.played
            .borrow_mut()
            .push((frequency_hz, duration_ms, volume_percent));
        if self.fail {
            Err(ToneError::Unavailable("no device".to_string()))
        } else {
            Ok(())
        }
    }
}

fn scope_with_tone(fail: bool) -> (ScopeData, ToneLog) {
    let played = ToneLog::default();
    let scope = ScopeData::new().with_tone(Box::new(RecordingTone {
        played: Rc::clone(&played),
        fail,
    }));
    (scope, played)
}

#[test]
fn valid_update_applies_notifies_and_plays_tone() {
    let (mut scope, played) = scope_with_tone(false);
    let id = scope.add_trigger(0.5);
    let events = scope.subscribe();

    scope
        .try_update_trigger_params(id as i64, 440, 120, 75)
        .expect("update");

    let params = scope.trigger(id).unwrap().params();
    assert_eq!(params, TriggerParams::new(440, 120, 75).unwrap());
    assert_eq!(events.drain(), vec![ScopeEvent::TriggersChanged]);
    assert_eq!(*played.borrow(), vec![(440, 120, 75)]);
}

#[test]
fn failing_tone_does_not_fail_update() {
    let (mut scope, played) = scope_with_tone(true);
    let id = scope.add_trigger(0.0);
    assert_eq!(scope.try_update_trigger_params(id as i64, 1000, 500, 10), Ok(()));
    assert_eq!(played.borrow().len(), 1);
    assert_eq!(scope.trigger(id).unwrap().params().duration_ms(), 500);
}

#[test]
fn off_step_hz_is_out_of_range() {
    let mut scope = ScopeData::new();
    let id = scope.add_trigger(0.0);
    assert_eq!(id, 1);
    let message = scope.update_trigger_params(&json!(1), &json!(25), &json!(20), &json!(50));
    assert_eq!(message, "Hz out of range/step (20…15000, step 10)");
}

#[test]
fn unknown_trigger_is_internal() {
    let mut scope = ScopeData::new();
    scope.add_trigger(0.0);
    assert_eq!(
        scope.try_update_trigger_params(999, 20, 20, 0),
        Err(TriggerError::Internal)
    );
    assert_eq!(
        scope.update_trigger_params(&json!(999), &json!(20), &json!(20), &json!(0)),
        INTERNAL_MESSAGE
    );
    assert_eq!(
        scope.try_update_trigger_params(-1, 20, 20, 0),
        Err(TriggerError::Internal)
    );
}

#[test]
fn failed_update_leaves_every_field_untouched() {
    let (mut scope, played) = scope_with_tone(false);
    let id = scope.add_trigger(0.0);
    let before = scope.trigger(id).unwrap().params();
    let events = scope.subscribe();

    for (hz, time_ms, vol) in [(440, 120, 101), (440, 125, 75), (25, 120, 75), (15_010, 20, 0)] {
        assert!(scope
            .try_update_trigger_params(id as i64, hz, time_ms, vol)
            .is_err());
        assert_eq!(scope.trigger(id).unwrap().params(), before);
    }
    assert!(events.drain().is_empty());
    assert!(played.borrow().is_empty());
}

#[test]
fn uncoercible_input_is_internal() {
    let mut scope = ScopeData::new();
    let id = scope.add_trigger(0.0);
    let message = scope.update_trigger_params(&json!(id), &json!("loud"), &json!(20), &json!(0));
    assert_eq!(message, INTERNAL_MESSAGE);
    let message = scope.update_trigger_params(&json!(null), &json!(20), &json!(20), &json!(0));
    assert_eq!(message, INTERNAL_MESSAGE);
}

#[test]
fn ui_values_are_coerced_before_validation() {
    let mut scope = ScopeData::new();
    let id = scope.add_trigger(0.0);
    let message = scope.update_trigger_params(&json!(id.to_string()), &json!(440.0), &json!("30"), &json!(7.9));
    assert_eq!(message, "");
    let params = scope.trigger(id).unwrap().params();
    assert_eq!(
        (params.frequency_hz(), params.duration_ms(), params.volume_percent()),
        (440, 30, 7)
    );
}

#[test]
fn oversized_ui_values_report_the_field() {
    let mut scope = ScopeData::new();
    let id = scope.add_trigger(0.0);
    let message = scope.update_trigger_params(&json!(id), &json!(1e20), &json!(20), &json!(0));
    assert_eq!(message, "Hz out of range/step (20…15000, step 10)");
    let message = scope.update_trigger_params(
        &json!(id),
        &json!(20),
        &json!("-100000000000000000000"),
        &json!(0),
    );
    assert_eq!(message, "time out of range/step (20…5000 ms, step 10)");
    let message = scope.update_trigger_params(&json!(id), &json!(20), &json!(20), &json!(u64::MAX));
    assert_eq!(message, "vol out of range/step (0…100 %, step 1)");

    // Ids never saturate onto a real trigger.
    let message = scope.update_trigger_params(&json!(1e20), &json!(20), &json!(20), &json!(0));
    assert_eq!(message, INTERNAL_MESSAGE);
    assert_eq!(scope.trigger(id).unwrap().params(), TriggerParams::default());
}

#[test]
fn backend_applied_short_circuits_fallback() {
    let calls = Rc::new(RefCell::new(0));
    let seen = Rc::clone(&calls);
    // Accepts values the built-in table would reject.
    let backend = move |_: &mut TriggerCollection,
                        _: i64,
                        _: i64,
                        _: i64,
                        _: i64|
          -> Result<BackendVerdict, BackendError> {
        *seen.borrow_mut() += 1;
        Ok(BackendVerdict::Applied)
    };
    let (scope, played) = scope_with_tone(false);
    let mut scope = scope.with_backend(Box::new(backend));
    let events = scope.subscribe();

    assert_eq!(scope.try_update_trigger_params(999, 25, 7, 500), Ok(()));
    assert_eq!(*calls.borrow(), 1);
    assert_eq!(events.drain(), vec![ScopeEvent::TriggersChanged]);
    assert!(played.borrow().is_empty());
}

#[test]
fn backend_can_apply_through_the_collection() {
    let backend = |triggers: &mut TriggerCollection,
                   id: i64,
                   hz: i64,
                   time_ms: i64,
                   vol: i64|
     -> Result<BackendVerdict, BackendError> {
        let params = TriggerParams::new(hz, time_ms, vol)
            .map_err(|err| BackendError::Failed(err.to_string()))?;
        match u64::try_from(id).ok().and_then(|id| triggers.get_mut(id)) {
            Some(trigger) => {
                trigger.apply(params);
                Ok(BackendVerdict::Applied)
            }
            None => Ok(BackendVerdict::Deferred),
        }
    };
    let mut scope = ScopeData::new().with_backend(Box::new(backend));
    let id = scope.add_trigger(0.0);
    assert_eq!(scope.try_update_trigger_params(id as i64, 2000, 300, 90), Ok(()));
    assert_eq!(scope.trigger(id).unwrap().params().volume_percent(), 90);
}

#[test]
fn backend_rejection_is_propagated() {
    let backend = |_: &mut TriggerCollection,
                   _: i64,
                   _: i64,
                   _: i64,
                   _: i64|
     -> Result<BackendVerdict, BackendError> {
        Ok(BackendVerdict::from_message(
            "frequency too close to another trigger",
        ))
    };
    let mut scope = ScopeData::new().with_backend(Box::new(backend));
    let id = scope.add_trigger(0.0);
    let before = scope.trigger(id).unwrap().params();

    let message = scope.update_trigger_params(&json!(id), &json!(440), &json!(100), &json!(50));
    assert_eq!(message, "frequency too close to another trigger");
    assert_eq!(scope.trigger(id).unwrap().params(), before);
}

fn deferring(
    _: &mut TriggerCollection,
    _: i64,
    _: i64,
    _: i64,
    _: i64,
) -> Result<BackendVerdict, BackendError> {
    Ok(BackendVerdict::from_message(INTERNAL_MESSAGE))
}

fn failing(
    _: &mut TriggerCollection,
    _: i64,
    _: i64,
    _: i64,
    _: i64,
) -> Result<BackendVerdict, BackendError> {
    Err(BackendError::Failed("model not loaded".to_string()))
}

fn blank(
    _: &mut TriggerCollection,
    _: i64,
    _: i64,
    _: i64,
    _: i64,
) -> Result<BackendVerdict, BackendError> {
    Ok(BackendVerdict::Rejected("  ".to_string()))
}

#[test]
fn backend_deferral_and_errors_fall_back_to_rule_table() {
    let backends: Vec<Box<dyn TriggerBackend>> =
        vec![Box::new(deferring), Box::new(failing), Box::new(blank)];

    for backend in backends {
        let mut scope = ScopeData::new().with_backend(backend);
        let id = scope.add_trigger(0.0) as i64;

        assert_eq!(scope.try_update_trigger_params(id, 880, 40, 60), Ok(()));
        assert_eq!(scope.trigger(id as u64).unwrap().params().frequency_hz(), 880);

        let message = scope.update_trigger_params(&json!(id), &json!(25), &json!(40), &json!(60));
        assert!(message.starts_with("Hz out of range/step"), "{message}");
        assert_eq!(
            scope.update_trigger_params(&json!(42), &json!(20), &json!(20), &json!(0)),
            INTERNAL_MESSAGE
        );
    }
}

#[test]
fn from_message_follows_string_protocol() {
    assert_eq!(BackendVerdict::from_message(""), BackendVerdict::Applied);
    assert_eq!(BackendVerdict::from_message("internal"), BackendVerdict::Deferred);
    assert_eq!(
        BackendVerdict::from_message("nope"),
        BackendVerdict::Rejected("nope".to_string())
    );
}
