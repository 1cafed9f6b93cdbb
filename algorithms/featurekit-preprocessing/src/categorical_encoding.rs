//! Categorical encoding methods
//!
//! * [`OneHotEncoder`]: one column per fitted category, `1` in the column of the value
//! * [`OrdinalEncoder`]: a single column holding the 1-based rank of the value

use featurekit::traits::{FeatureNames, Fit, TransformInplace, Transformer};
use ndarray::{Array1, ArrayViewMut1};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One-hot encoder: learns the distinct values of a column in order of first appearance and
/// expands each value into a vector with a single `1` at the index of that value.
///
/// The fitted values double as feature names.
///
/// ### Example
///
/// ```rust
/// use featurekit::traits::{Fit, Transformer};
/// use featurekit_preprocessing::categorical_encoding::OneHotEncoder;
/// use ndarray::array;
///
/// let mut encoder = OneHotEncoder::default();
/// encoder.fit(&["male", "female", "male"]);
/// assert_eq!(encoder.transform("female"), Some(array![0., 1.]));
/// assert_eq!(encoder.transform("other"), Some(array![0., 0.]));
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OneHotEncoder {
    values: Vec<String>,
}

impl OneHotEncoder {
    /// Builds an already fitted encoder, `values` being in output order
    pub fn new<S: ToString>(values: &[S]) -> Self {
        Self {
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Fitted categories, in output order
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl<S: AsRef<str>> Fit<S> for OneHotEncoder {
    fn fit(&mut self, column: &[S]) {
        let mut seen = HashSet::with_capacity(column.len());
        self.values = column
            .iter()
            .map(|v| v.as_ref())
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect();
    }
}

impl FeatureNames for OneHotEncoder {
    fn num_features(&self) -> usize {
        self.values.len()
    }

    fn feature_names(&self) -> Vec<String> {
        self.values.clone()
    }
}

impl<'a> Transformer<&'a str, Option<Array1<f64>>> for OneHotEncoder {
    /// Returns `None` when nothing has been fitted and all zeros for an unseen value.
    fn transform(&self, x: &'a str) -> Option<Array1<f64>> {
        if self.values.is_empty() {
            return None;
        }
        let mut flags = Array1::zeros(self.values.len());
        self.transform_inplace(flags.view_mut(), x);
        Some(flags)
    }
}

impl<'a> TransformInplace<&'a str> for OneHotEncoder {
    fn transform_inplace(&self, mut dest: ArrayViewMut1<'_, f64>, x: &'a str) {
        if self.values.is_empty() || dest.len() != self.values.len() {
            return;
        }
        for (flag, value) in dest.iter_mut().zip(&self.values) {
            *flag = if value == x { 1. } else { 0. };
        }
    }
}

/// Ordinal encoder: assigns each distinct value of a column an increasing rank starting at
/// `1`, in order of first appearance.
///
/// Unseen values are encoded as `0`, no fitted value can ever get that rank.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrdinalEncoder {
    mapping: HashMap<String, usize>,
}

impl OrdinalEncoder {
    /// Builds an already fitted encoder from a value to rank mapping
    pub fn new(mapping: HashMap<String, usize>) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &HashMap<String, usize> {
        &self.mapping
    }
}

impl<S: AsRef<str>> Fit<S> for OrdinalEncoder {
    fn fit(&mut self, column: &[S]) {
        self.mapping.clear();
        for v in column {
            let rank = self.mapping.len() + 1;
            self.mapping.entry(v.as_ref().to_string()).or_insert(rank);
        }
    }
}

impl<'a> Transformer<&'a str, f64> for OrdinalEncoder {
    fn transform(&self, x: &'a str) -> f64 {
        self.mapping.get(x).map_or(0., |&rank| rank as f64)
    }
}
