use crate::coordinate::{AxisError, AxisScale, CoordinateTransform};
use crate::error::TriggerError;
use crate::trigger::TriggerParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeSettings {
    pub test_tone: bool,
    pub show_legend: bool,
    pub show_color_axis: bool,
    pub trigger_defaults: TriggerDefaults,
    pub vertical_axis: AxisSettings,
    pub horizontal_axis: AxisSettings,
}

impl Default for ScopeSettings {
    fn default() -> Self {
        Self {
            test_tone: true,
            show_legend: true,
            show_color_axis: false,
            trigger_defaults: TriggerDefaults::default(),
            vertical_axis: AxisSettings {
                min: -1.0,
                max: 1.0,
                scale: AxisScale::Linear,
            },
            horizontal_axis: AxisSettings {
                min: 0.0,
                max: 1.0,
                scale: AxisScale::Linear,
            },
        }
    }
}

/// Parameters given to newly placed triggers. Raw integers here; they are
/// checked against the trigger rule table when settings are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerDefaults {
    pub frequency_hz: i64,
    pub duration_ms: i64,
    pub volume_percent: i64,
}

impl Default for TriggerDefaults {
    fn default() -> Self {
        let params = TriggerParams::default();
        Self {
            frequency_hz: i64::from(params.frequency_hz()),
            duration_ms: i64::from(params.duration_ms()),
            volume_percent: i64::from(params.volume_percent()),
        }
    }
}

impl TriggerDefaults {
    pub fn params(&self) -> Result<TriggerParams, TriggerError> {
        TriggerParams::new(self.frequency_hz, self.duration_ms, self.volume_percent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSettings {
    pub min: f64,
    pub max: f64,
    pub scale: AxisScale,
}

impl AxisSettings {
    pub fn transform(&self) -> Result<CoordinateTransform, AxisError> {
        CoordinateTransform::new(self.scale, self.min, self.max)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("toml write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),
    #[error("invalid trigger defaults: {0}")]
    TriggerDefaults(#[source] TriggerError),
    #[error("invalid {axis} axis: {source}")]
    Axis {
        axis: &'static str,
        #[source]
        source: AxisError,
    },
}

pub fn normalize_settings(settings: ScopeSettings) -> Result<ScopeSettings, SettingsError> {
    settings
        .trigger_defaults
        .params()
        .map_err(SettingsError::TriggerDefaults)?;
    settings
        .vertical_axis
        .transform()
        .map_err(|source| SettingsError::Axis {
            axis: "vertical",
            source,
        })?;
    settings
        .horizontal_axis
        .transform()
        .map_err(|source| SettingsError::Axis {
            axis: "horizontal",
            source,
        })?;
    Ok(settings)
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false)
}

/// Reads `.toml` files as TOML and anything else as JSON.
pub fn load_settings_file(path: &Path) -> Result<ScopeSettings, SettingsError> {
    let data = std::fs::read_to_string(path)?;
    let settings: ScopeSettings = if is_toml(path) {
        toml::from_str(&data)?
    } else {
        serde_json::from_str(&data)?
    };
    normalize_settings(settings)
}

pub fn save_settings_file(path: &Path, settings: &ScopeSettings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let data = if is_toml(path) {
        toml::to_string_pretty(settings)?
    } else {
        serde_json::to_string_pretty(settings)?
    };
    std::fs::write(path, data)?;
    Ok(())
}
