use crate::axis::Axis;
use crate::backend::TriggerBackend;
use crate::clock::{Clock, SystemClock};
use crate::coordinate::{self, AxisError, CoordinateTransform};
use crate::curve::Curve;
use crate::error::{to_ui_message, TriggerError};
use crate::model::{ParamsUpdate, TriggersModel};
use crate::settings::{ScopeSettings, SettingsError};
use crate::tone::{DisabledTone, LogTone, TestTone};
use crate::trigger::Trigger;
use crate::validation::Validator;
use serde_json::Value;
use signal::{Signal, Subscription};

fn coerce_update(
    id: &Value,
    frequency_hz: &Value,
    duration_ms: &Value,
    volume_percent: &Value,
) -> Result<[i64; 4], TriggerError> {
    Ok([
        Validator::coerce_int(id)?,
        Validator::coerce_param(frequency_hz)?,
        Validator::coerce_param(duration_ms)?,
        Validator::coerce_param(volume_percent)?,
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeEvent {
    PlotItemsChanged,
    TriggersChanged,
    ShowLegendChanged(bool),
    ShowColorAxisChanged(bool),
    AxisRevChanged(u64),
}

/// Everything a scope view binds to: curves, axes, display flags and the
/// level-trigger overlay. Mutated from a single thread; observers follow
/// along through [`ScopeData::subscribe`].
pub struct ScopeData {
    plot_items: Vec<Box<dyn Curve>>,
    horizontal_axis: Axis,
    vertical_axis: Axis,
    color_axis: Axis,
    show_color_axis: bool,
    show_legend: bool,
    axis_rev: u64,
    triggers: TriggersModel,
    tone: Box<dyn TestTone>,
    clock: Box<dyn Clock>,
    events: Signal<ScopeEvent>,
}

impl Default for ScopeData {
    fn default() -> Self {
        Self {
            plot_items: Vec::new(),
            horizontal_axis: Axis::new("horizontal", CoordinateTransform::default()),
            vertical_axis: Axis::new("vertical", CoordinateTransform::default()),
            color_axis: Axis::new("color", CoordinateTransform::default()),
            show_color_axis: false,
            show_legend: true,
            axis_rev: 0,
            triggers: TriggersModel::default(),
            tone: Box::new(LogTone),
            clock: Box::new(SystemClock),
            events: Signal::new(),
        }
    }
}

impl ScopeData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &ScopeSettings) -> Result<Self, SettingsError> {
        let defaults = settings
            .trigger_defaults
            .params()
            .map_err(SettingsError::TriggerDefaults)?;
        let vertical = settings
            .vertical_axis
            .transform()
            .map_err(|source| SettingsError::Axis {
                axis: "vertical",
                source,
            })?;
        let horizontal = settings
            .horizontal_axis
            .transform()
            .map_err(|source| SettingsError::Axis {
                axis: "horizontal",
                source,
            })?;
        let tone: Box<dyn TestTone> = if settings.test_tone {
            Box::new(LogTone)
        } else {
            Box::new(DisabledTone)
        };
        Ok(Self {
            horizontal_axis: Axis::new("horizontal", horizontal),
            vertical_axis: Axis::new("vertical", vertical),
            show_color_axis: settings.show_color_axis,
            show_legend: settings.show_legend,
            triggers: TriggersModel::new(defaults),
            tone,
            ..Self::default()
        })
    }

    pub fn with_backend(mut self, backend: Box<dyn TriggerBackend>) -> Self {
        self.triggers.set_backend(Some(backend));
        self
    }

    pub fn with_tone(mut self, tone: Box<dyn TestTone>) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn subscribe(&mut self) -> Subscription<ScopeEvent> {
        self.events.subscribe()
    }

    fn notify(&mut self, event: ScopeEvent) {
        if let Err(err) = self.events.emit(event) {
            log::debug!("scope event {event:?} not delivered everywhere: {err}");
        }
    }

    // ---- plot items ----

    pub fn plot_items(&self) -> &[Box<dyn Curve>] {
        &self.plot_items
    }

    pub fn add_plot_item(&mut self, item: Box<dyn Curve>) {
        self.plot_items.push(item);
        self.notify(ScopeEvent::PlotItemsChanged);
    }

    /// Indices past the end append.
    pub fn insert_plot_item(&mut self, index: usize, item: Box<dyn Curve>) {
        let index = index.min(self.plot_items.len());
        self.plot_items.insert(index, item);
        self.notify(ScopeEvent::PlotItemsChanged);
    }

    pub fn remove_plot_item(&mut self, index: usize) -> Option<Box<dyn Curve>> {
        if index >= self.plot_items.len() {
            return None;
        }
        let item = self.plot_items.remove(index);
        self.notify(ScopeEvent::PlotItemsChanged);
        Some(item)
    }

    // ---- axes and display flags ----

    pub fn horizontal_axis(&self) -> &Axis {
        &self.horizontal_axis
    }

    pub fn vertical_axis(&self) -> &Axis {
        &self.vertical_axis
    }

    pub fn color_axis(&self) -> &Axis {
        &self.color_axis
    }

    pub fn set_horizontal_transform(&mut self, transform: CoordinateTransform) {
        self.horizontal_axis.set_transform(transform);
    }

    pub fn set_color_transform(&mut self, transform: CoordinateTransform) {
        self.color_axis.set_transform(transform);
    }

    /// Trigger lines are positioned on the vertical axis, so every change
    /// there bumps `axis_rev`.
    pub fn set_vertical_transform(&mut self, transform: CoordinateTransform) {
        if self.vertical_axis.set_transform(transform) {
            self.bump_axis_rev();
        }
    }

    pub fn set_vertical_range(&mut self, min: f64, max: f64) -> Result<(), AxisError> {
        if self.vertical_axis.set_range(min, max)? {
            self.bump_axis_rev();
        }
        Ok(())
    }

    fn bump_axis_rev(&mut self) {
        self.axis_rev += 1;
        self.notify(ScopeEvent::AxisRevChanged(self.axis_rev));
    }

    pub fn axis_rev(&self) -> u64 {
        self.axis_rev
    }

    pub fn show_legend(&self) -> bool {
        self.show_legend
    }

    pub fn set_show_legend(&mut self, show_legend: bool) {
        if self.show_legend != show_legend {
            self.show_legend = show_legend;
            self.notify(ScopeEvent::ShowLegendChanged(show_legend));
        }
    }

    pub fn show_color_axis(&self) -> bool {
        self.show_color_axis
    }

    pub fn set_show_color_axis(&mut self, show_color_axis: bool) {
        if self.show_color_axis != show_color_axis {
            self.show_color_axis = show_color_axis;
            self.notify(ScopeEvent::ShowColorAxisChanged(show_color_axis));
        }
    }

    // ---- triggers ----

    pub fn triggers(&self) -> &[Trigger] {
        self.triggers.triggers().as_slice()
    }

    pub fn trigger(&self, id: u64) -> Option<&Trigger> {
        self.triggers.get(id)
    }

    pub fn remove_trigger(&mut self, id: u64) -> bool {
        let removed = self.triggers.triggers_mut().remove(id).is_some();
        if removed {
            self.notify(ScopeEvent::TriggersChanged);
        }
        removed
    }

    /// Places a trigger at `level` and snapshots whether the first curve's
    /// latest sample is at or above it. Returns the new trigger's id.
    pub fn add_trigger(&mut self, level: f64) -> u64 {
        let current = self.current_level();
        let timestamp = self.timestamp_secs();
        let trigger = self.triggers.triggers_mut().add(level);
        let above = current.map_or(false, |value| value >= level);
        trigger.record_snapshot(above, timestamp);
        let id = trigger.id();
        log::info!("trigger {id} added at level {level} (current {current:?}, above {above})");
        self.notify(ScopeEvent::TriggersChanged);
        id
    }

    fn current_level(&self) -> Option<f64> {
        let curve = self.plot_items.first()?;
        match curve.latest_value() {
            Ok(value) => value,
            Err(err) => {
                log::debug!("could not sample curve '{}': {err}", curve.name());
                None
            }
        }
    }

    fn timestamp_secs(&self) -> i64 {
        match self.clock.now_secs() {
            Ok(secs) => secs,
            Err(err) => {
                log::debug!("clock failed, falling back to system time: {err}");
                SystemClock.now_secs().unwrap_or_else(|err| {
                    log::debug!("system time unavailable: {err}");
                    0
                })
            }
        }
    }

    /// Typed form of [`ScopeData::update_trigger_params`].
    pub fn try_update_trigger_params(
        &mut self,
        id: i64,
        frequency_hz: i64,
        duration_ms: i64,
        volume_percent: i64,
    ) -> Result<(), TriggerError> {
        let update = self
            .triggers
            .update_trigger_params(id, frequency_hz, duration_ms, volume_percent)?;
        self.notify(ScopeEvent::TriggersChanged);
        if let ParamsUpdate::Applied(params) = update {
            if let Err(err) = self.tone.play_test_tone(
                params.frequency_hz(),
                params.duration_ms(),
                params.volume_percent(),
            ) {
                log::debug!("test tone skipped: {err}");
            }
        }
        Ok(())
    }

    /// UI entry point: coerces the raw values to integers and returns an
    /// empty string on success or the error text otherwise.
    pub fn update_trigger_params(
        &mut self,
        id: &Value,
        frequency_hz: &Value,
        duration_ms: &Value,
        volume_percent: &Value,
    ) -> String {
        let result = coerce_update(id, frequency_hz, duration_ms, volume_percent)
            .and_then(|[id, hz, time_ms, vol]| self.try_update_trigger_params(id, hz, time_ms, vol));
        to_ui_message(result)
    }

    // ---- coordinates ----

    /// `y_frac` is measured from the top of the plot.
    pub fn to_level(&self, y_frac: f64) -> f64 {
        coordinate::to_level(&self.vertical_axis, y_frac)
    }

    /// Fraction of the vertical axis (from the bottom) at which `level` sits.
    pub fn to_normalized_y(&self, level: f64) -> f64 {
        coordinate::invert(&self.vertical_axis, level)
    }
}
