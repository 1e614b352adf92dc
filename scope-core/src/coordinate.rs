use serde::{Deserialize, Serialize};

/// Number of halvings used by [`invert`]; leaves an interval of width 2^-32.
pub const BISECTION_STEPS: usize = 32;

/// Forward mapping from an axis fraction in `[0, 1]` to a data value.
/// Implementations are expected to be non-decreasing.
pub trait AxisTransform {
    fn to_plot(&self, fraction: f64) -> f64;
}

impl<F> AxisTransform for F
where
    F: Fn(f64) -> f64,
{
    fn to_plot(&self, fraction: f64) -> f64 {
        self(fraction)
    }
}

/// Finds the fraction whose plotted value is closest to `target` from below.
///
/// Runs exactly [`BISECTION_STEPS`] iterations and returns the lower bound of
/// the final interval, not its midpoint. Targets below the axis range give
/// `0.0`; targets above give `1.0 - 2^-32`. For a non-monotonic transform the
/// result is deterministic but otherwise unspecified.
pub fn invert<T: AxisTransform + ?Sized>(transform: &T, target: f64) -> f64 {
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if transform.to_plot(mid) < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Maps a fraction measured from the top of the plot to a data value.
pub fn to_level<T: AxisTransform + ?Sized>(transform: &T, y_frac: f64) -> f64 {
    transform.to_plot(1.0 - y_frac)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    Linear,
    Log,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AxisError {
    #[error("axis range is empty ({min}..{max})")]
    EmptyRange { min: f64, max: f64 },
    #[error("axis range is reversed ({min}..{max})")]
    Reversed { min: f64, max: f64 },
    #[error("axis bounds must be finite ({min}..{max})")]
    NonFinite { min: f64, max: f64 },
    #[error("log axis needs positive bounds ({min}..{max})")]
    NonPositiveLog { min: f64, max: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateTransform {
    Linear { min: f64, max: f64 },
    Log { min: f64, max: f64 },
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        CoordinateTransform::Linear { min: 0.0, max: 1.0 }
    }
}

impl CoordinateTransform {
    pub fn new(scale: AxisScale, min: f64, max: f64) -> Result<Self, AxisError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(AxisError::NonFinite { min, max });
        }
        if min == max {
            return Err(AxisError::EmptyRange { min, max });
        }
        if min > max {
            return Err(AxisError::Reversed { min, max });
        }
        match scale {
            AxisScale::Linear => Ok(CoordinateTransform::Linear { min, max }),
            AxisScale::Log if min > 0.0 && max > 0.0 => Ok(CoordinateTransform::Log { min, max }),
            AxisScale::Log => Err(AxisError::NonPositiveLog { min, max }),
        }
    }

    pub fn scale(&self) -> AxisScale {
        match self {
            CoordinateTransform::Linear { .. } => AxisScale::Linear,
            CoordinateTransform::Log { .. } => AxisScale::Log,
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            CoordinateTransform::Linear { min, max } | CoordinateTransform::Log { min, max } => {
                (min, max)
            }
        }
    }
}

impl AxisTransform for CoordinateTransform {
    fn to_plot(&self, fraction: f64) -> f64 {
        match *self {
            CoordinateTransform::Linear { min, max } => min + fraction * (max - min),
            CoordinateTransform::Log { min, max } => {
                (min.ln() + fraction * (max.ln() - min.ln())).exp()
            }
        }
    }
}
