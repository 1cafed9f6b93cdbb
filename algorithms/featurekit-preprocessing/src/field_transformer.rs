//! Tag based selection of a transformer for a single record field
//!
//! Every field of a record is processed by one of a closed set of transformers, chosen by a
//! tag such as `"minmax"` or `"onehot"`. [`TransformerKind`] is the result of looking a tag up
//! and [`FieldTransformer`] holds the transformer itself together with its fitted state.

use crate::categorical_encoding::{OneHotEncoder, OrdinalEncoder};
use crate::count_vectorization::CountVectorizer;
use crate::error::{PreprocessingError, Result};
use crate::linear_scaling::{Identity, MaxAbsScaler, MinMaxScaler, StandardScaler};
use crate::quantile_scaling::{KBinsDiscretizer, QuantileScaler};
use crate::tf_idf_vectorization::TfIdfVectorizer;
use featurekit::traits::{FeatureNames, Fit, TransformInplace, Transformer};
use ndarray::ArrayViewMut1;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of value a field holds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Numeric,
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Numeric => write!(f, "numeric"),
            ValueKind::Text => write!(f, "text"),
        }
    }
}

/// A single value read from a record
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue<'a> {
    Numeric(f64),
    Text(&'a str),
}

impl<'a> FieldValue<'a> {
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Numeric(_) => ValueKind::Numeric,
            FieldValue::Text(_) => ValueKind::Text,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformerKind {
    Identity,
    MinMax,
    MaxAbs,
    Standard,
    Quantile,
    OneHot,
    Ordinal,
    KBins,
    CountVectorizer,
    TfIdf,
}

/// Tag vocabulary
const TAGS: [(&str, TransformerKind); 10] = [
    ("identity", TransformerKind::Identity),
    ("minmax", TransformerKind::MinMax),
    ("maxabs", TransformerKind::MaxAbs),
    ("standard", TransformerKind::Standard),
    ("quantile", TransformerKind::Quantile),
    ("onehot", TransformerKind::OneHot),
    ("ordinal", TransformerKind::Ordinal),
    ("kbins", TransformerKind::KBins),
    ("countvectorizer", TransformerKind::CountVectorizer),
    ("tfidf", TransformerKind::TfIdf),
];

impl TransformerKind {
    /// Looks a tag up, failing with [`PreprocessingError::UnknownTag`] for anything outside of
    /// the tag vocabulary. Tags are case sensitive.
    pub fn from_tag(tag: &str) -> Result<Self> {
        TAGS.iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| PreprocessingError::UnknownTag(tag.to_string()))
    }

    pub fn tag(&self) -> &'static str {
        TAGS.iter()
            .find(|(_, kind)| kind == self)
            .map(|(t, _)| *t)
            .unwrap_or_default()
    }

    /// Kind of value the transformer accepts
    pub fn input(&self) -> ValueKind {
        match self {
            TransformerKind::Identity
            | TransformerKind::MinMax
            | TransformerKind::MaxAbs
            | TransformerKind::Standard
            | TransformerKind::Quantile
            | TransformerKind::KBins => ValueKind::Numeric,
            TransformerKind::OneHot
            | TransformerKind::Ordinal
            | TransformerKind::CountVectorizer
            | TransformerKind::TfIdf => ValueKind::Text,
        }
    }

    /// Whether a single value expands into several output columns
    pub fn is_expanding(&self) -> bool {
        matches!(
            self,
            TransformerKind::OneHot | TransformerKind::CountVectorizer | TransformerKind::TfIdf
        )
    }

    /// Unfitted transformer of this kind, with default settings
    pub fn build(&self) -> FieldTransformer {
        match self {
            TransformerKind::Identity => FieldTransformer::Identity(Identity),
            TransformerKind::MinMax => FieldTransformer::MinMax(MinMaxScaler::default()),
            TransformerKind::MaxAbs => FieldTransformer::MaxAbs(MaxAbsScaler::default()),
            TransformerKind::Standard => FieldTransformer::Standard(StandardScaler::default()),
            TransformerKind::Quantile => FieldTransformer::Quantile(QuantileScaler::default()),
            TransformerKind::OneHot => FieldTransformer::OneHot(OneHotEncoder::default()),
            TransformerKind::Ordinal => FieldTransformer::Ordinal(OrdinalEncoder::default()),
            TransformerKind::KBins => FieldTransformer::KBins(KBinsDiscretizer::default()),
            TransformerKind::CountVectorizer => {
                FieldTransformer::CountVectorizer(CountVectorizer::default())
            }
            TransformerKind::TfIdf => FieldTransformer::TfIdf(TfIdfVectorizer::default()),
        }
    }
}

impl FromStr for TransformerKind {
    type Err = PreprocessingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s)
    }
}

impl fmt::Display for TransformerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Transformer of a single field, one variant per tag.
///
/// Serialized externally tagged, the variant names being the tags.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub enum FieldTransformer {
    #[cfg_attr(feature = "serde", serde(rename = "identity"))]
    Identity(Identity),
    #[cfg_attr(feature = "serde", serde(rename = "minmax"))]
    MinMax(MinMaxScaler),
    #[cfg_attr(feature = "serde", serde(rename = "maxabs"))]
    MaxAbs(MaxAbsScaler),
    #[cfg_attr(feature = "serde", serde(rename = "standard"))]
    Standard(StandardScaler),
    #[cfg_attr(feature = "serde", serde(rename = "quantile"))]
    Quantile(QuantileScaler),
    #[cfg_attr(feature = "serde", serde(rename = "onehot"))]
    OneHot(OneHotEncoder),
    #[cfg_attr(feature = "serde", serde(rename = "ordinal"))]
    Ordinal(OrdinalEncoder),
    #[cfg_attr(feature = "serde", serde(rename = "kbins"))]
    KBins(KBinsDiscretizer),
    #[cfg_attr(feature = "serde", serde(rename = "countvectorizer"))]
    CountVectorizer(CountVectorizer),
    #[cfg_attr(feature = "serde", serde(rename = "tfidf"))]
    TfIdf(TfIdfVectorizer),
}

macro_rules! impl_from_transformer {
    ($($variant:ident($inner:ty)),*) => {
        $(
            impl From<$inner> for FieldTransformer {
                fn from(t: $inner) -> Self {
                    FieldTransformer::$variant(t)
                }
            }
        )*
    };
}

impl_from_transformer!(
    Identity(Identity),
    MinMax(MinMaxScaler),
    MaxAbs(MaxAbsScaler),
    Standard(StandardScaler),
    Quantile(QuantileScaler),
    OneHot(OneHotEncoder),
    Ordinal(OrdinalEncoder),
    KBins(KBinsDiscretizer),
    CountVectorizer(CountVectorizer),
    TfIdf(TfIdfVectorizer)
);

impl FieldTransformer {
    pub fn kind(&self) -> TransformerKind {
        match self {
            FieldTransformer::Identity(_) => TransformerKind::Identity,
            FieldTransformer::MinMax(_) => TransformerKind::MinMax,
            FieldTransformer::MaxAbs(_) => TransformerKind::MaxAbs,
            FieldTransformer::Standard(_) => TransformerKind::Standard,
            FieldTransformer::Quantile(_) => TransformerKind::Quantile,
            FieldTransformer::OneHot(_) => TransformerKind::OneHot,
            FieldTransformer::Ordinal(_) => TransformerKind::Ordinal,
            FieldTransformer::KBins(_) => TransformerKind::KBins,
            FieldTransformer::CountVectorizer(_) => TransformerKind::CountVectorizer,
            FieldTransformer::TfIdf(_) => TransformerKind::TfIdf,
        }
    }

    /// Output width: one for scalar transformers, the number of fitted categories or
    /// vocabulary entries for expanding ones
    pub fn num_features(&self) -> usize {
        match self {
            FieldTransformer::OneHot(t) => t.num_features(),
            FieldTransformer::CountVectorizer(t) => t.num_features(),
            FieldTransformer::TfIdf(t) => t.num_features(),
            _ => 1,
        }
    }

    /// Output column names for a field called `field`. Scalar transformers produce the field
    /// name itself, expanding ones `field_category` per category.
    pub fn feature_names(&self, field: &str) -> Vec<String> {
        let categories = match self {
            FieldTransformer::OneHot(t) => t.feature_names(),
            FieldTransformer::CountVectorizer(t) => t.feature_names(),
            FieldTransformer::TfIdf(t) => t.feature_names(),
            _ => return vec![field.to_string()],
        };
        categories
            .iter()
            .map(|category| format!("{}_{}", field, category))
            .collect()
    }

    /// Fits on a numeric column. Text transformers are left untouched.
    pub fn fit_numeric(&mut self, column: &[f64]) {
        match self {
            FieldTransformer::Identity(t) => t.fit(column),
            FieldTransformer::MinMax(t) => t.fit(column),
            FieldTransformer::MaxAbs(t) => t.fit(column),
            FieldTransformer::Standard(t) => t.fit(column),
            FieldTransformer::Quantile(t) => t.fit(column),
            FieldTransformer::KBins(t) => t.fit(column),
            _ => log::warn!(
                "{} transformer cannot be fitted on numeric values, skipping",
                self.kind()
            ),
        }
    }

    /// Fits on a text column. Numeric transformers are left untouched.
    pub fn fit_text<S: AsRef<str>>(&mut self, column: &[S]) {
        match self {
            FieldTransformer::OneHot(t) => t.fit(column),
            FieldTransformer::Ordinal(t) => t.fit(column),
            FieldTransformer::CountVectorizer(t) => t.fit(column),
            FieldTransformer::TfIdf(t) => t.fit(column),
            _ => log::warn!(
                "{} transformer cannot be fitted on text values, skipping",
                self.kind()
            ),
        }
    }

    fn transform_scalar(&self, value: FieldValue<'_>) -> Option<f64> {
        match (self, value) {
            (FieldTransformer::Identity(t), FieldValue::Numeric(v)) => Some(t.transform(v)),
            (FieldTransformer::MinMax(t), FieldValue::Numeric(v)) => Some(t.transform(v)),
            (FieldTransformer::MaxAbs(t), FieldValue::Numeric(v)) => Some(t.transform(v)),
            (FieldTransformer::Standard(t), FieldValue::Numeric(v)) => Some(t.transform(v)),
            (FieldTransformer::Quantile(t), FieldValue::Numeric(v)) => Some(t.transform(v)),
            (FieldTransformer::KBins(t), FieldValue::Numeric(v)) => Some(t.transform(v)),
            (FieldTransformer::Ordinal(t), FieldValue::Text(v)) => Some(t.transform(v)),
            _ => None,
        }
    }
}

impl<'a> TransformInplace<FieldValue<'a>> for FieldTransformer {
    /// Writes the transformed value into `dest`. Does nothing when the width of `dest` differs
    /// from [`FieldTransformer::num_features`] or when the value is of the wrong kind.
    fn transform_inplace(&self, mut dest: ArrayViewMut1<'_, f64>, x: FieldValue<'a>) {
        match (self, x) {
            (FieldTransformer::OneHot(t), FieldValue::Text(v)) => t.transform_inplace(dest, v),
            (FieldTransformer::CountVectorizer(t), FieldValue::Text(v)) => {
                t.transform_inplace(dest, v)
            }
            (FieldTransformer::TfIdf(t), FieldValue::Text(v)) => t.transform_inplace(dest, v),
            _ => {
                if dest.len() != 1 {
                    return;
                }
                if let Some(v) = self.transform_scalar(x) {
                    dest[0] = v;
                }
            }
        }
    }
}
