//! Capabilities shared by all transformers
//!
//! A transformer implements the subset of these traits that makes sense for it. Scalar
//! transformers only fit and transform; expanding transformers (one-hot, count, tf-idf) also
//! report their width and feature names and can write into a pre-allocated buffer.

use ndarray::ArrayViewMut1;

/// Learns the transformer state from a column of raw values
///
/// Calling `fit` again discards the previous state and learns a new one from the given column,
/// fitting is not incremental.
pub trait Fit<T> {
    fn fit(&mut self, column: &[T]);
}

/// Maps a single input to an output using the fitted state
pub trait Transformer<X, Y> {
    fn transform(&self, x: X) -> Y;
}

/// Writes the transformed value into a caller-owned buffer
///
/// Implementations leave `dest` untouched when its length does not match the output width.
/// This is not reported as an error: callers that care should size the buffer with
/// [`FeatureNames::num_features`] beforehand.
pub trait TransformInplace<X> {
    fn transform_inplace(&self, dest: ArrayViewMut1<'_, f64>, x: X);
}

/// Width and column names of a transformer output
pub trait FeatureNames {
    /// Number of values produced by a single transform
    fn num_features(&self) -> usize;

    /// Names of the produced values, in output order. Empty when nothing has been fitted.
    fn feature_names(&self) -> Vec<String>;
}
