//! Rank based scaling
//!
//! [`QuantileScaler`] maps a value to the fraction of fitted quantile boundaries at or below
//! it, turning any distribution into a roughly uniform one on `(0, 1]`.
//! [`KBinsDiscretizer`] uses the same boundaries but returns the 1-based bin index instead.

use featurekit::traits::{Fit, Transformer};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Number of quantiles used when none has been requested
pub const DEFAULT_N_QUANTILES: usize = 1000;

/// Quantile scaler: learns `n_quantiles` boundaries from the sorted fitted column and maps
/// each value to `(i + 1) / n` where `i` is the first boundary greater than or equal to it.
///
/// ### Example
///
/// ```rust
/// use featurekit::traits::{Fit, Transformer};
/// use featurekit_preprocessing::quantile_scaling::QuantileScaler;
///
/// let mut scaler = QuantileScaler::new(4);
/// scaler.fit(&[25., 50., 75., 100.]);
/// assert_eq!(scaler.transform(0.), 0.25);
/// assert_eq!(scaler.transform(40.), 0.5);
/// assert_eq!(scaler.transform(101.), 1.);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuantileScaler {
    quantiles: Vec<f64>,
    n_quantiles: usize,
}

impl QuantileScaler {
    /// Requests `n_quantiles` boundaries. Zero falls back to [`DEFAULT_N_QUANTILES`] when
    /// fitting.
    pub fn new(n_quantiles: usize) -> Self {
        Self {
            quantiles: Vec::new(),
            n_quantiles,
        }
    }

    /// Builds an already fitted scaler from sorted boundaries
    pub fn from_quantiles(quantiles: Vec<f64>) -> Self {
        let n_quantiles = quantiles.len();
        Self {
            quantiles,
            n_quantiles,
        }
    }

    /// Fitted boundaries, in ascending order
    pub fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    /// Requested number of boundaries. Fitting lowers it to the column length when the column
    /// is shorter.
    pub fn n_quantiles(&self) -> usize {
        self.n_quantiles
    }

    /// Index of the first boundary that is greater than or equal to `x`. `NaN` compares
    /// false against every boundary and lands past the last one.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    fn search(&self, x: f64) -> usize {
        self.quantiles.partition_point(|&q| !(q >= x))
    }
}

impl Fit<f64> for QuantileScaler {
    fn fit(&mut self, column: &[f64]) {
        if self.n_quantiles == 0 {
            self.n_quantiles = DEFAULT_N_QUANTILES;
        }
        self.quantiles.clear();
        if column.is_empty() {
            return;
        }
        if column.len() < self.n_quantiles {
            self.n_quantiles = column.len();
        }

        let mut sorted = column.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let step = sorted.len() as f64 / self.n_quantiles as f64;
        self.quantiles = (0..self.n_quantiles)
            .map(|i| sorted[(i as f64 * step) as usize])
            .collect();
        log::trace!(
            "quantile scaler fitted {} boundaries over {} values",
            self.quantiles.len(),
            sorted.len()
        );
    }
}

impl Transformer<f64, f64> for QuantileScaler {
    /// Returns `0` when nothing has been fitted.
    fn transform(&self, x: f64) -> f64 {
        if self.quantiles.is_empty() {
            return 0.;
        }
        let i = self.search(x);
        if i >= self.quantiles.len() {
            return 1.;
        }
        (i + 1) as f64 / self.quantiles.len() as f64
    }
}

/// K-bins discretizer with the quantile strategy: values are mapped to the 1-based index of
/// the first fitted boundary greater than or equal to them, values above every boundary fall
/// into the overflow bin `n + 1`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KBinsDiscretizer {
    scaler: QuantileScaler,
}

impl KBinsDiscretizer {
    /// Requests `n_bins` quantile boundaries
    pub fn new(n_bins: usize) -> Self {
        Self {
            scaler: QuantileScaler::new(n_bins),
        }
    }

    /// Builds an already fitted discretizer from sorted boundaries
    pub fn from_quantiles(quantiles: Vec<f64>) -> Self {
        Self {
            scaler: QuantileScaler::from_quantiles(quantiles),
        }
    }

    pub fn scaler(&self) -> &QuantileScaler {
        &self.scaler
    }
}

impl Fit<f64> for KBinsDiscretizer {
    fn fit(&mut self, column: &[f64]) {
        self.scaler.fit(column);
    }
}

impl Transformer<f64, f64> for KBinsDiscretizer {
    /// Returns `0` when nothing has been fitted.
    fn transform(&self, x: f64) -> f64 {
        let n = self.scaler.quantiles.len();
        if n == 0 {
            return 0.;
        }
        let i = self.scaler.search(x);
        if i >= n {
            return (n + 1) as f64;
        }
        (i + 1) as f64
    }
}
