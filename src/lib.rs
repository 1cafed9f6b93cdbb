//! `featurekit` turns raw record fields into fixed-width numeric feature vectors.
//!
//! This crate holds the pieces every transformer shares: the capability [traits](traits),
//! the core [error](error) type and the [`ParamGuard`] used to validate configuration before
//! anything is built. The transformers themselves (scalers, encoders, text vectorizers,
//! sample normalizers) and the record-level `StructTransformer` live in
//! `featurekit-preprocessing`.
//!
//! ## Lifecycle
//!
//! Every transformer goes through the same two phases:
//!
//! * **fit**: a batch of raw values is scanned once and summary statistics are stored
//!   (minimum and maximum, quantile boundaries, a vocabulary, ...). Fitting again replaces the
//!   previous state.
//! * **transform**: a single value is mapped to a number or to a vector using the stored
//!   statistics. Transforming never fails: unfit transformers and unseen values degrade to
//!   zeros or to `None`.
//!
//! Fitting needs `&mut self` while transforming only needs `&self`, so a fitted transformer can
//! be shared between threads for scoring.

pub mod error;
pub mod param_guard;
pub mod prelude;
pub mod traits;

pub use param_guard::ParamGuard;

#[cfg(feature = "benchmarks")]
pub mod benchmarks;
