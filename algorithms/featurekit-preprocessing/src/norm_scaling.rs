//! Sample normalization methods
use featurekit::traits::{Fit, Transformer};
use ndarray::{Array1, ArrayBase, ArrayViewMut1, Data, Ix1, Zip};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
enum Norms {
    L1,
    L2,
}

/// Norm scaler: scales a sample to have unit norm, according to the specified norm measure.
/// A sample with zero norm is mapped to zeros.
///
/// ### Example
///
/// ```rust
/// use featurekit::traits::Transformer;
/// use featurekit_preprocessing::norm_scaling::NormScaler;
/// use ndarray::array;
///
/// let scaler = NormScaler::l1();
/// assert_eq!(scaler.transform(&array![1., -1., 2.]), array![0.25, -0.25, 0.5]);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormScaler {
    norm: Norms,
}

impl NormScaler {
    /// Initializes a norm scaler that uses l2 norm
    pub fn l2() -> Self {
        Self { norm: Norms::L2 }
    }

    /// Initializes a norm scaler that uses l1 norm
    pub fn l1() -> Self {
        Self { norm: Norms::L1 }
    }

    fn norm_of<S: Data<Elem = f64>>(&self, x: &ArrayBase<S, Ix1>) -> f64 {
        match self.norm {
            Norms::L1 => x.mapv(f64::abs).sum(),
            Norms::L2 => x.dot(x).sqrt(),
        }
    }

    /// Writes the normalized `src` into `dest`. Does nothing when the lengths differ.
    pub fn transform_inplace<S: Data<Elem = f64>>(
        &self,
        mut dest: ArrayViewMut1<'_, f64>,
        src: &ArrayBase<S, Ix1>,
    ) {
        if dest.len() != src.len() {
            return;
        }
        let norm = self.norm_of(src);
        Zip::from(&mut dest).and(src).for_each(|d, &s| {
            *d = if norm == 0. { 0. } else { s / norm };
        });
    }

    /// Normalizes `buf` in place, source and destination being the same buffer
    pub fn normalize_inplace(&self, mut buf: ArrayViewMut1<'_, f64>) {
        let norm = self.norm_of(&buf);
        if norm == 0. {
            buf.fill(0.);
        } else {
            buf.mapv_inplace(|v| v / norm);
        }
    }
}

impl std::default::Default for NormScaler {
    fn default() -> Self {
        Self::l2()
    }
}

impl Fit<f64> for NormScaler {
    fn fit(&mut self, _column: &[f64]) {}
}

impl<'a, S: Data<Elem = f64>> Transformer<&'a ArrayBase<S, Ix1>, Array1<f64>> for NormScaler {
    /// Scales the sample to have unit norm.
    fn transform(&self, x: &'a ArrayBase<S, Ix1>) -> Array1<f64> {
        let mut out = x.to_owned();
        self.normalize_inplace(out.view_mut());
        out
    }
}
