//! # Preprocessing
//! `featurekit-preprocessing` provides the transformers of `featurekit` and the record level
//! pipeline that chains them.
//!
//! ## Current state
//! Right now `featurekit-preprocessing` provides the following transformers:
//! * Identity, Min-Max, MaxAbs and Standard scaling ([`linear_scaling`])
//! * Quantile scaling and k-bins discretization ([`quantile_scaling`])
//! * One-hot and ordinal encoding ([`categorical_encoding`])
//! * Count vectorization ([`count_vectorization`])
//! * Term frequency - inverse document frequency vectorization ([`tf_idf_vectorization`])
//! * L1 and L2 sample normalization ([`norm_scaling`])
//!
//! Each record field is bound to one of them by a tag ([`field_transformer`]) and a
//! [`StructTransformer`] turns whole records into feature vectors.
//!
//! ## Example
//!
//! ```rust
//! use featurekit::traits::{Fit, Transformer};
//! use featurekit::ParamGuard;
//! use featurekit_preprocessing::StructTransformer;
//!
//! struct Listing {
//!     price: f64,
//!     rooms: f64,
//!     title: String,
//! }
//!
//! fn title(l: &Listing) -> &str {
//!     &l.title
//! }
//!
//! let listings = vec![
//!     Listing { price: 1200., rooms: 2., title: "bright flat".to_string() },
//!     Listing { price: 800., rooms: 1., title: "small flat".to_string() },
//! ];
//!
//! let mut transformer = StructTransformer::params()
//!     .numeric("price", "minmax", |l: &Listing| l.price)
//!     .numeric("rooms", "identity", |l: &Listing| l.rooms)
//!     .text("title", "countvectorizer", title)
//!     .check()
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! transformer.fit(&listings);
//!
//! let features = transformer.transform(&listings[0]).unwrap();
//! assert_eq!(features.to_vec(), vec![1., 2., 1., 1., 0.]);
//! ```

pub mod categorical_encoding;
pub mod count_vectorization;
pub mod error;
pub mod field_transformer;
pub mod linear_scaling;
pub mod norm_scaling;
pub mod quantile_scaling;
pub mod struct_transformer;
pub mod tf_idf_vectorization;

pub use error::{PreprocessingError, Result};
pub use field_transformer::{FieldTransformer, TransformerKind, ValueKind};
pub use struct_transformer::{
    Accessor, StructField, StructTransformer, StructTransformerParams, StructTransformerState,
};
