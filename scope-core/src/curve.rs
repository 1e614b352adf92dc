use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("curve '{0}' sample buffer is poisoned")]
    Poisoned(String),
    #[error("curve data unavailable: {0}")]
    Unavailable(String),
}

/// A plotted data series as seen by the trigger overlay.
pub trait Curve {
    fn name(&self) -> &str;

    /// Most recent sample, `None` while the series is empty.
    fn latest_value(&self) -> Result<Option<f64>, CurveError>;
}

/// Bounded sample history shared between a producer ([`SampleWriter`]) and
/// the plot. Oldest samples are dropped once `capacity` is reached.
#[derive(Debug)]
pub struct SampleCurve {
    name: String,
    samples: Arc<Mutex<VecDeque<f64>>>,
    capacity: usize,
}

impl SampleCurve {
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            name: name.into(),
            samples: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn writer(&self) -> SampleWriter {
        SampleWriter {
            name: self.name.clone(),
            samples: Arc::clone(&self.samples),
            capacity: self.capacity,
        }
    }

    pub fn snapshot(&self) -> Result<Vec<f64>, CurveError> {
        let samples = self
            .samples
            .lock()
            .map_err(|_| CurveError::Poisoned(self.name.clone()))?;
        Ok(samples.iter().copied().collect())
    }
}

impl Curve for SampleCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn latest_value(&self) -> Result<Option<f64>, CurveError> {
        let samples = self
            .samples
            .lock()
            .map_err(|_| CurveError::Poisoned(self.name.clone()))?;
        Ok(samples.back().copied())
    }
}

#[derive(Debug, Clone)]
pub struct SampleWriter {
    name: String,
    samples: Arc<Mutex<VecDeque<f64>>>,
    capacity: usize,
}

impl SampleWriter {
    pub fn push(&self, value: f64) -> Result<(), CurveError> {
        self.extend(std::iter::once(value))
    }

    pub fn extend<I: IntoIterator<Item = f64>>(&self, values: I) -> Result<(), CurveError> {
        let mut samples = self
            .samples
            .lock()
            .map_err(|_| CurveError::Poisoned(self.name.clone()))?;
        for value in values {
            if samples.len() == self.capacity {
                samples.pop_front();
            }
            samples.push_back(value);
        }
        Ok(())
    }
}
