//! Error definitions for preprocessing
use crate::field_transformer::ValueKind;
use thiserror::Error;
pub type Result<T> = std::result::Result<T, PreprocessingError>;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PreprocessingError {
    #[error("unexpected value of feature tag \"{0}\"")]
    UnknownTag(String),
    #[error("field {field} holds {found} values but tag \"{tag}\" expects {expected} values")]
    UnsupportedValueType {
        field: String,
        tag: String,
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("field {0} is declared more than once")]
    DuplicateField(String),
    #[error("state does not match pipeline: {0}")]
    StateMismatch(String),
    #[error(transparent)]
    FeaturekitError(#[from] featurekit::error::Error),
}
