//! # Linear regression with Follow the regularized leader - proximal
//!
//! ## The Big Picture
//!
//! `autoprice-linear` is a crate in the `autoprice` workspace. It provides the linear model that
//! the [`Estimator`](autoprice::estimator::Estimator) trains on batches of tabular data.
//!
//! ## Current state
//! `autoprice-linear` provides a pure Rust implementation of an [algorithm](struct.Ftrl.html)
//! fitting `y = x·w + b` under squared error, and a [`LinearRegressor`] which wraps it into an
//! estimator over named feature columns.
//!
//! ## Examples
//!
//! ```ignore
//! let mut model = LinearRegressor::new(vec![numeric_column("curb-weight")]);
//! model.train(train_feed, 1000)?;
//! let evaluation = model.evaluate(test_feed)?;
//! ```
//!
mod algorithm;
mod error;
mod hyperparams;
mod regressor;

pub use algorithm::Result;
pub use error::FtrlError;
pub use hyperparams::{FtrlParams, FtrlValidParams};
pub use regressor::{FtrlEstimator, LinearRegressor};

use autoprice::Float;
use ndarray::Array1;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Ftrl<F: Float> {
    params: FtrlValidParams<F>,
    nfeatures: usize,
    z: Array1<F>,
    n: Array1<F>,
}

impl<F: Float> Ftrl<F> {
    /// Default hyperparameters of the FTRL-proximal model
    ///
    /// The update rule is described in <https://static.googleusercontent.com/media/research.google.com/en//pubs/archive/41159.pdf>.
    /// Features are used as given, scaling has to happen beforehand.
    pub fn params() -> FtrlParams<F> {
        FtrlParams::default()
    }

    /// Create a new model with given parameters and number of features
    ///
    /// All weights start at zero. When an intercept is fitted, its accumulators occupy the
    /// last slot of `z` and `n`.
    pub fn new(params: FtrlValidParams<F>, nfeatures: usize) -> Ftrl<F> {
        let ncoefficients = nfeatures + usize::from(params.fit_intercept());
        Self {
            n: Array1::from_elem(ncoefficients, params.initial_accumulator()),
            z: Array1::zeros(ncoefficients),
            nfeatures,
            params,
        }
    }
}
