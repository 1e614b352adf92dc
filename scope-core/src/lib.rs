//! State behind a real-time scope widget: plotted curves, axes and the
//! level-trigger overlay drawn on top of them.
//!
//! The two pieces with real logic are trigger parameter validation
//! ([`TriggersModel::update_trigger_params`]) and the bisection that maps data
//! levels back to axis fractions ([`coordinate::invert`]). [`ScopeData`] wires
//! them to curves, axes, a clock, a test-tone player and a change signal.

pub mod axis;
pub mod backend;
pub mod clock;
pub mod coordinate;
pub mod curve;
pub mod error;
pub mod model;
pub mod scope;
pub mod settings;
pub mod tone;
pub mod trigger;
pub mod validation;

pub use axis::Axis;
pub use backend::{BackendError, BackendVerdict, TriggerBackend};
pub use clock::{Clock, ClockError, SystemClock};
pub use coordinate::{invert, to_level, AxisError, AxisScale, AxisTransform, CoordinateTransform};
pub use curve::{Curve, CurveError, SampleCurve, SampleWriter};
pub use error::{to_ui_message, ErrorKind, TriggerError, INTERNAL_MESSAGE};
pub use model::{ParamsUpdate, TriggersModel};
pub use scope::{ScopeData, ScopeEvent};
pub use settings::{
    load_settings_file, normalize_settings, save_settings_file, AxisSettings, ScopeSettings,
    SettingsError, TriggerDefaults,
};
pub use tone::{DisabledTone, LogTone, TestTone, ToneError};
pub use trigger::{Trigger, TriggerCollection, TriggerParams};
pub use validation::{FieldRule, ParamField, Validator};
