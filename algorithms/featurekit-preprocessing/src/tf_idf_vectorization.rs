//! Term frequency - inverse document frequency vectorization methods

use crate::count_vectorization::CountVectorizer;
use crate::norm_scaling::NormScaler;
use featurekit::traits::{FeatureNames, Fit, TransformInplace, Transformer};
use ndarray::{Array1, ArrayViewMut1, Zip};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Computes the idf of a vocabulary entry as `log(n/document_frequency) + 1`. The "plus one"
/// after the log allows vocabulary entries that appear in every document to still be
/// considered with a weight of one instead of being completely discarded. Entries with a
/// zero document frequency get a weight of zero.
fn compute_idf(n: usize, df: usize) -> f64 {
    if df == 0 {
        return 0.;
    }
    (n as f64 / df as f64).ln() + 1.
}

/// Tf-idf vectorizer: counts the vocabulary entries of a text like a [`CountVectorizer`],
/// weights each count by the inverse document frequency of its entry and scales the result to
/// unit l2 norm.
///
/// ### Example
///
/// ```rust
/// use featurekit::traits::{Fit, Transformer};
/// use featurekit_preprocessing::tf_idf_vectorization::TfIdfVectorizer;
///
/// let mut vectorizer = TfIdfVectorizer::default();
/// vectorizer.fit(&["a a b", "a c"]);
/// let weights = vectorizer.transform("a b").unwrap();
/// assert_eq!(weights.len(), 3);
/// assert!((weights.dot(&weights) - 1.).abs() < 1e-12);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct TfIdfVectorizer {
    count_vectorizer: CountVectorizer,
    doc_count: Vec<usize>,
    num_documents: usize,
    normalizer: NormScaler,
}

impl std::default::Default for TfIdfVectorizer {
    fn default() -> Self {
        Self {
            count_vectorizer: CountVectorizer::default(),
            doc_count: Vec::new(),
            num_documents: 0,
            normalizer: NormScaler::l2(),
        }
    }
}

impl TfIdfVectorizer {
    /// Builds an already fitted vectorizer. `doc_count[i]` is the number of fitted documents
    /// holding the vocabulary entry of index `i`.
    pub fn new(
        count_vectorizer: CountVectorizer,
        doc_count: Vec<usize>,
        num_documents: usize,
    ) -> Self {
        Self {
            count_vectorizer,
            doc_count,
            num_documents,
            normalizer: NormScaler::l2(),
        }
    }

    pub fn separator(mut self, separator: &str) -> Self {
        self.count_vectorizer = self.count_vectorizer.separator(separator);
        self
    }

    pub fn count_vectorizer(&self) -> &CountVectorizer {
        &self.count_vectorizer
    }

    /// Per vocabulary index, the number of fitted documents holding that entry
    pub fn doc_count(&self) -> &[usize] {
        &self.doc_count
    }

    pub fn num_documents(&self) -> usize {
        self.num_documents
    }

    fn weigh(&self, mut dest: ArrayViewMut1<'_, f64>, document: &str) {
        if !self.count_vectorizer.accumulate(&mut dest, document) {
            return;
        }
        Zip::indexed(&mut dest).for_each(|i, w| {
            let df = self.doc_count.get(i).copied().unwrap_or(0);
            *w = if *w > 0. {
                *w * compute_idf(self.num_documents, df)
            } else {
                0.
            };
        });
        self.normalizer.normalize_inplace(dest);
    }
}

impl<S: AsRef<str>> Fit<S> for TfIdfVectorizer {
    fn fit(&mut self, column: &[S]) {
        self.count_vectorizer.fit(column);
        self.num_documents = column.len();

        let n = self.count_vectorizer.num_features();
        self.doc_count = vec![0; n];
        let mut counts = Array1::zeros(n);
        for document in column {
            if !self
                .count_vectorizer
                .accumulate(&mut counts.view_mut(), document.as_ref())
            {
                continue;
            }
            for (df, &c) in self.doc_count.iter_mut().zip(counts.iter()) {
                if c > 0. {
                    *df += 1;
                }
            }
        }
    }
}

impl FeatureNames for TfIdfVectorizer {
    fn num_features(&self) -> usize {
        self.count_vectorizer.num_features()
    }

    fn feature_names(&self) -> Vec<String> {
        self.count_vectorizer.feature_names()
    }
}

impl<'a> Transformer<&'a str, Option<Array1<f64>>> for TfIdfVectorizer {
    /// Returns `None` when the vocabulary is empty.
    fn transform(&self, x: &'a str) -> Option<Array1<f64>> {
        let n = self.num_features();
        if n == 0 {
            return None;
        }
        let mut weights = Array1::zeros(n);
        self.weigh(weights.view_mut(), x);
        Some(weights)
    }
}

impl<'a> TransformInplace<&'a str> for TfIdfVectorizer {
    /// Leaves `dest` untouched when its width does not match the vocabulary or when a stored
    /// index falls outside of it.
    fn transform_inplace(&self, dest: ArrayViewMut1<'_, f64>, x: &'a str) {
        if self.count_vectorizer.indices_in_range() {
            self.weigh(dest, x);
        }
    }
}
