//! `autoprice-datasets` provides the loaders for the datasets used by the `autoprice` examples.
//!
//! ## The Big Picture
//!
//! `autoprice-datasets` is a crate in the `autoprice` workspace. It turns raw data files into
//! [`autoprice::Dataset`] structures with named features, ready to be fed to an estimator.
//!
//! ## Current State
//!
//! Currently the following datasets are provided:
//!
//! * [`imports85`] : the 1985 Auto Imports dataset of the UCI repository
//!
//! The raw files are not bundled, a copy of the dataset has to be downloaded from
//! [`imports85::URL`] first.
//!
//! ## Using a dataset
//!
//! ```ignore
//! let (train, test) = autoprice_datasets::imports85::load_data(
//!     "data/imports-85.data",
//!     &LoadOptions::default().seed(Some(42)),
//! )?;
//! ```

pub mod imports85;

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetsError>;

#[derive(Error, Debug)]
pub enum DatasetsError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("line {line}, column `{column}`: cannot parse `{value}` as a number")]
    Parse {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("unknown label column `{0}`")]
    UnknownLabel(String),
    #[error("label column `{0}` is not numeric")]
    NonNumericLabel(String),
    #[error("train fraction must be in (0, 1], got {0}")]
    TrainFraction(f32),
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}
