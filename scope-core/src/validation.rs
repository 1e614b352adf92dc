use crate::error::TriggerError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::num::IntErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

impl FieldRule {
    pub fn accepts(&self, value: i64) -> bool {
        Validator::validate_field(value, self.min, self.max, self.step)
    }
}

pub const FREQUENCY_RULE: FieldRule = FieldRule {
    min: 20,
    max: 15_000,
    step: 10,
};
pub const DURATION_RULE: FieldRule = FieldRule {
    min: 20,
    max: 5_000,
    step: 10,
};
pub const VOLUME_RULE: FieldRule = FieldRule {
    min: 0,
    max: 100,
    step: 1,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamField {
    Frequency,
    Duration,
    Volume,
}

impl ParamField {
    /// Validation order.
    pub const ALL: [ParamField; 3] = [ParamField::Frequency, ParamField::Duration, ParamField::Volume];

    pub fn label(self) -> &'static str {
        match self {
            ParamField::Frequency => "Hz",
            ParamField::Duration => "time",
            ParamField::Volume => "vol",
        }
    }

    pub fn unit_suffix(self) -> &'static str {
        match self {
            ParamField::Frequency => "",
            ParamField::Duration => " ms",
            ParamField::Volume => " %",
        }
    }

    pub fn rule(self) -> FieldRule {
        match self {
            ParamField::Frequency => FREQUENCY_RULE,
            ParamField::Duration => DURATION_RULE,
            ParamField::Volume => VOLUME_RULE,
        }
    }
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct Validator;

impl Validator {
    pub fn validate_field(value: i64, min: i64, max: i64, step: i64) -> bool {
        step > 0
            && min <= value
            && value <= max
            && value.checked_sub(min).is_some_and(|offset| offset % step == 0)
    }

    pub fn check_field(field: ParamField, value: i64) -> Result<(), TriggerError> {
        let rule = field.rule();
        if rule.accepts(value) {
            Ok(())
        } else {
            Err(TriggerError::OutOfRange {
                field,
                min: rule.min,
                max: rule.max,
                step: rule.step,
            })
        }
    }

    /// Checks hz, time and vol in that order and stops at the first bad one.
    pub fn check_params(frequency_hz: i64, duration_ms: i64, volume_percent: i64) -> Result<(), TriggerError> {
        let values = [frequency_hz, duration_ms, volume_percent];
        for (field, value) in ParamField::ALL.into_iter().zip(values) {
            Self::check_field(field, value)?;
        }
        Ok(())
    }

    /// Integer coercion for ids arriving from the UI layer. Floats are
    /// truncated toward zero, strings must hold a plain integer. Anything
    /// that does not fit an `i64` is `Internal`.
    pub fn coerce_int(value: &Value) -> Result<i64, TriggerError> {
        Self::coerce(value, false)
    }

    /// Like [`Validator::coerce_int`], but integers too large for an `i64`
    /// saturate instead of failing, so they still reach the range check
    /// and report the field.
    pub fn coerce_param(value: &Value) -> Result<i64, TriggerError> {
        Self::coerce(value, true)
    }

    fn coerce(value: &Value, saturate: bool) -> Result<i64, TriggerError> {
        match value {
            Value::Number(number) => {
                if let Some(v) = number.as_i64() {
                    return Ok(v);
                }
                if number.is_u64() {
                    return if saturate {
                        Ok(i64::MAX)
                    } else {
                        Err(TriggerError::Internal)
                    };
                }
                let v = number.as_f64().ok_or(TriggerError::Internal)?.trunc();
                if !v.is_finite() {
                    return Err(TriggerError::Internal);
                }
                if saturate || (v >= i64::MIN as f64 && v < i64::MAX as f64) {
                    // `as` saturates at the i64 bounds.
                    Ok(v as i64)
                } else {
                    Err(TriggerError::Internal)
                }
            }
            Value::String(text) => match text.trim().parse::<i64>() {
                Ok(v) => Ok(v),
                Err(err) if saturate => match err.kind() {
                    IntErrorKind::PosOverflow => Ok(i64::MAX),
                    IntErrorKind::NegOverflow => Ok(i64::MIN),
                    _ => Err(TriggerError::Internal),
                },
                Err(_) => Err(TriggerError::Internal),
            },
            Value::Bool(flag) => Ok(i64::from(*flag)),
            Value::Null | Value::Array(_) | Value::Object(_) => Err(TriggerError::Internal),
        }
    }
}
