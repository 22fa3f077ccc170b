//! Error types in autoprice
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("mismatched shapes: expected {expected} rows, found {found}")]
    MismatchedShapes { expected: usize, found: usize },
    #[error("Not enough samples to compute the mean")]
    NotEnoughSamples,
    #[error("feature column `{0}` not found in the input")]
    UnknownFeature(String),
    #[error("estimator has not been trained yet")]
    NotFitted,
}
