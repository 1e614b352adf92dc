use crate::coordinate::{AxisError, AxisScale, AxisTransform, CoordinateTransform};

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    name: String,
    transform: CoordinateTransform,
}

impl Axis {
    pub fn new(name: impl Into<String>, transform: CoordinateTransform) -> Self {
        Self {
            name: name.into(),
            transform,
        }
    }

    pub fn scale(&self) -> AxisScale {
        self.transform.scale()
    }

    pub fn bounds(&self) -> (f64, f64) {
        self.transform.bounds()
    }

    /// Returns whether the transform actually changed.
    pub fn set_transform(&mut self, transform: CoordinateTransform) -> bool {
        if self.transform == transform {
            return false;
        }
        log::debug!("{} axis set to {transform:?}", self.name);
        self.transform = transform;
        true
    }

    /// Keeps the current scale.
    pub fn set_range(&mut self, min: f64, max: f64) -> Result<bool, AxisError> {
        let transform = CoordinateTransform::new(self.scale(), min, max)?;
        Ok(self.set_transform(transform))
    }
}

impl AxisTransform for Axis {
    fn to_plot(&self, fraction: f64) -> f64 {
        self.transform.to_plot(fraction)
    }
}
