use scope_core::{
    load_settings_file, save_settings_file, AxisError, AxisScale, AxisSettings, ScopeData,
    ScopeSettings, SettingsError, TriggerDefaults,
};

#[test]
fn json_and_toml_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut settings = ScopeSettings::default();
    settings.trigger_defaults = TriggerDefaults {
        frequency_hz: 440,
        duration_ms: 100,
        volume_percent: 30,
    };
    settings.vertical_axis = AxisSettings {
        min: 20.0,
        max: 20_000.0,
        scale: AxisScale::Log,
    };
    settings.show_legend = false;

    for name in ["scope.json", "nested/scope.toml"] {
        let path = dir.path().join(name);
        save_settings_file(&path, &settings).expect("save settings");
        let loaded = load_settings_file(&path).expect("load settings");
        assert_eq!(loaded, settings, "{name}");
    }
}

#[test]
fn missing_fields_take_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("partial.json");
    std::fs::write(&path, r#"{"test_tone": false, "trigger_defaults": {"volume_percent": 80}}"#)
        .expect("write settings");

    let loaded = load_settings_file(&path).expect("load settings");
    assert!(!loaded.test_tone);
    assert_eq!(loaded.trigger_defaults.volume_percent, 80);
    assert_eq!(
        loaded.trigger_defaults.frequency_hz,
        TriggerDefaults::default().frequency_hz
    );
    assert_eq!(loaded.vertical_axis, ScopeSettings::default().vertical_axis);
}

#[test]
fn invalid_trigger_defaults_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[trigger_defaults]\nfrequency_hz = 25\n").expect("write settings");

    let err = load_settings_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::TriggerDefaults(_)), "{err}");
    assert!(err.to_string().contains("Hz out of range/step"), "{err}");
}

#[test]
fn invalid_axis_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad_axis.json");
    std::fs::write(
        &path,
        r#"{"vertical_axis": {"min": 0.0, "max": 10.0, "scale": "log"}}"#,
    )
    .expect("write settings");

    let err = load_settings_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Axis { axis: "vertical", .. }), "{err}");
}

#[test]
fn reversed_axis_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("reversed.json");
    std::fs::write(
        &path,
        r#"{"vertical_axis": {"min": 0.0, "max": -60.0, "scale": "linear"}}"#,
    )
    .expect("write settings");

    let err = load_settings_file(&path).unwrap_err();
    assert!(
        matches!(
            err,
            SettingsError::Axis {
                axis: "vertical",
                source: AxisError::Reversed { .. }
            }
        ),
        "{err}"
    );

    let mut settings = ScopeSettings::default();
    settings.vertical_axis = AxisSettings {
        min: 0.0,
        max: -60.0,
        scale: AxisScale::Linear,
    };
    assert!(ScopeData::from_settings(&settings).is_err());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_settings_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SettingsError::Io(_)));
}

#[test]
fn scope_data_uses_settings() {
    let mut settings = ScopeSettings::default();
    settings.trigger_defaults.frequency_hz = 250;
    settings.vertical_axis = AxisSettings {
        min: -60.0,
        max: 0.0,
        scale: AxisScale::Linear,
    };
    settings.show_color_axis = true;

    let mut scope = ScopeData::from_settings(&settings).expect("scope from settings");
    assert_eq!(scope.vertical_axis().bounds(), (-60.0, 0.0));
    assert!(scope.show_color_axis());
    assert_eq!(scope.to_level(0.5), -30.0);

    let id = scope.add_trigger(-30.0);
    assert_eq!(scope.trigger(id).unwrap().params().frequency_hz(), 250);
}
