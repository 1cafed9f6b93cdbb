//! Count vectorization methods

use featurekit::traits::{FeatureNames, Fit, TransformInplace, Transformer};
use ndarray::{Array1, ArrayViewMut1};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use std::collections::HashMap;

/// Separator used when none has been set
pub const DEFAULT_SEPARATOR: &str = " ";

/// Count vectorizer: learns a vocabulary from a sequence of texts and maps each
/// vocabulary entry to an integer index, in order of first appearance. Transforming a text
/// counts the occurrences of each vocabulary entry in it.
///
/// ### Attributes
///
/// * `separator`: the string documents are split on. Empty tokens are never part of the
///   vocabulary. Defaults to a single space.
///
/// ### Example
///
/// ```rust
/// use featurekit::traits::{Fit, Transformer};
/// use featurekit_preprocessing::count_vectorization::CountVectorizer;
/// use ndarray::array;
///
/// let mut vectorizer = CountVectorizer::default();
/// vectorizer.fit(&["a b", "b a", "a", "b", ""]);
/// assert_eq!(vectorizer.transform("a a a b b"), Some(array![3., 2.]));
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct CountVectorizer {
    pub(crate) vocabulary: HashMap<String, usize>,
    separator: String,
}

impl std::default::Default for CountVectorizer {
    fn default() -> Self {
        Self {
            vocabulary: HashMap::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl CountVectorizer {
    /// Builds an already fitted vectorizer from a token to index mapping
    pub fn new(vocabulary: HashMap<String, usize>, separator: &str) -> Self {
        Self {
            vocabulary,
            separator: separator.to_string(),
        }
    }

    pub fn separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }

    /// Token to index mapping learned during fitting
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    /// Separator actually used for splitting, an empty separator falls back to the default one
    pub fn split_on(&self) -> &str {
        if self.separator.is_empty() {
            DEFAULT_SEPARATOR
        } else {
            &self.separator
        }
    }

    /// Whether every stored index addresses a slot of the vocabulary width
    pub(crate) fn indices_in_range(&self) -> bool {
        let n = self.vocabulary.len();
        self.vocabulary.values().all(|&idx| idx < n)
    }

    /// Writes the counts of the known tokens of `document` to `counts`. Returns `false` without
    /// touching `counts` when its width does not match the vocabulary. Tokens whose stored
    /// index falls outside of `counts` are not counted.
    pub(crate) fn accumulate(&self, counts: &mut ArrayViewMut1<'_, f64>, document: &str) -> bool {
        let n = self.vocabulary.len();
        if n == 0 || counts.len() != n {
            return false;
        }
        counts.fill(0.);
        for token in document.split(self.split_on()) {
            if let Some(c) = self.vocabulary.get(token).and_then(|&idx| counts.get_mut(idx)) {
                *c += 1.;
            }
        }
        true
    }
}

impl<S: AsRef<str>> Fit<S> for CountVectorizer {
    fn fit(&mut self, column: &[S]) {
        if self.separator.is_empty() {
            self.separator = DEFAULT_SEPARATOR.to_string();
        }
        let mut vocabulary = HashMap::new();
        for document in column {
            for token in document.as_ref().split(self.separator.as_str()) {
                if token.is_empty() {
                    continue;
                }
                let len = vocabulary.len();
                vocabulary.entry(token.to_string()).or_insert(len);
            }
        }
        log::debug!(
            "count vectorizer learned {} tokens from {} documents",
            vocabulary.len(),
            column.len()
        );
        self.vocabulary = vocabulary;
    }
}

impl FeatureNames for CountVectorizer {
    fn num_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Vocabulary entries ordered by their index
    fn feature_names(&self) -> Vec<String> {
        let mut names = vec![String::new(); self.vocabulary.len()];
        for (token, &idx) in &self.vocabulary {
            if let Some(name) = names.get_mut(idx) {
                *name = token.clone();
            }
        }
        names
    }
}

impl<'a> Transformer<&'a str, Option<Array1<f64>>> for CountVectorizer {
    /// Returns `None` when the vocabulary is empty.
    fn transform(&self, x: &'a str) -> Option<Array1<f64>> {
        if self.vocabulary.is_empty() {
            return None;
        }
        let mut counts = Array1::zeros(self.vocabulary.len());
        self.accumulate(&mut counts.view_mut(), x);
        Some(counts)
    }
}

impl<'a> TransformInplace<&'a str> for CountVectorizer {
    /// Leaves `dest` untouched when its width does not match the vocabulary or when a stored
    /// index falls outside of it.
    fn transform_inplace(&self, mut dest: ArrayViewMut1<'_, f64>, x: &'a str) {
        if self.indices_in_range() {
            self.accumulate(&mut dest, x);
        }
    }
}
