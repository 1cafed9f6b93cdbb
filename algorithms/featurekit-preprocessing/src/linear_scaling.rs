//! Linear Scaling methods
//!
//! Scalers that map one number to one number with an affine function learned from a column:
//!
//! * [`Identity`]: passes the value through
//! * [`MinMaxScaler`]: maps the fitted range to `[0, 1]`
//! * [`MaxAbsScaler`]: maps the fitted range to `[-1, 1]` by the maximum absolute value
//! * [`StandardScaler`]: subtracts the mean and divides by the standard deviation

use featurekit::traits::{Fit, Transformer};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Passes values through unchanged. Fitting is a no-op.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Identity;

impl Fit<f64> for Identity {
    fn fit(&mut self, _column: &[f64]) {}
}

impl Transformer<f64, f64> for Identity {
    fn transform(&self, x: f64) -> f64 {
        x
    }
}

/// Min-Max scaler: learns the minimum and maximum of a column and maps values of that range
/// to `[0, 1]`. Values outside of the fitted range are clamped.
///
/// ### Example
///
/// ```rust
/// use featurekit::traits::{Fit, Transformer};
/// use featurekit_preprocessing::linear_scaling::MinMaxScaler;
///
/// let mut scaler = MinMaxScaler::default();
/// scaler.fit(&[500., 900.]);
/// assert_eq!(scaler.transform(700.), 0.5);
/// assert_eq!(scaler.transform(1000.), 1.);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// Builds an already fitted scaler
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Fit<f64> for MinMaxScaler {
    /// Scans the column for its extremes. An empty column resets the scaler to `min = max = 0`.
    fn fit(&mut self, column: &[f64]) {
        *self = Self::default();
        if let Some(&first) = column.first() {
            self.min = first;
            self.max = first;
        }
        for &v in column {
            if v < self.min {
                self.min = v;
            }
            if v > self.max {
                self.max = v;
            }
        }
    }
}

impl Transformer<f64, f64> for MinMaxScaler {
    /// Returns `0` when the fitted range is degenerate (`min == max`).
    fn transform(&self, x: f64) -> f64 {
        if self.min == self.max || x < self.min {
            return 0.;
        }
        if x > self.max {
            return 1.;
        }
        (x - self.min) / (self.max - self.min)
    }
}

/// MaxAbs scaler: scales each value by the inverse of the maximum absolute value seen during
/// fitting, so that the fitted column fits in `[-1, 1]`.
///
/// The bound is seeded with the first sample as is (sign included) and then raised to the
/// absolute value of any sample whose magnitude exceeds it, the first sample included.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MaxAbsScaler {
    max: f64,
}

impl MaxAbsScaler {
    /// Builds an already fitted scaler
    pub fn new(max: f64) -> Self {
        Self { max }
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Fit<f64> for MaxAbsScaler {
    fn fit(&mut self, column: &[f64]) {
        self.max = column.first().copied().unwrap_or(0.);
        for &v in column {
            if v.abs() > self.max {
                self.max = v.abs();
            }
        }
    }
}

impl Transformer<f64, f64> for MaxAbsScaler {
    fn transform(&self, x: f64) -> f64 {
        if self.max == 0. {
            return 0.;
        }
        let bound = self.max.abs();
        if x > bound {
            1.
        } else if x < -bound {
            -1.
        } else {
            x / bound
        }
    }
}

/// Standard scaler: subtracts the fitted mean and divides by the fitted standard deviation.
///
/// The standard deviation is the square root of the summed squared deviations divided by
/// `n - 1`. A constant column gives a standard deviation of zero and transforming then yields
/// infinities or `NaN`. A single sample divides zero by zero, the standard deviation is `NaN`
/// and so is every transformed value. Neither case is special cased.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StandardScaler {
    mean: f64,
    std: f64,
}

impl StandardScaler {
    /// Builds an already fitted scaler
    pub fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std(&self) -> f64 {
        self.std
    }
}

impl Fit<f64> for StandardScaler {
    fn fit(&mut self, column: &[f64]) {
        *self = Self::default();
        if column.is_empty() {
            return;
        }
        let n = column.len() as f64;
        self.mean = column.iter().sum::<f64>() / n;
        let squared: f64 = column.iter().map(|v| (v - self.mean) * (v - self.mean)).sum();
        self.std = (squared / (n - 1.)).sqrt();
    }
}

impl Transformer<f64, f64> for StandardScaler {
    fn transform(&self, x: f64) -> f64 {
        (x - self.mean) / self.std
    }
}
