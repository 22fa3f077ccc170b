//! `autoprice` is a small toolkit for fitting linear estimators on tabular data.
//!
//! It follows the layout of classical machine learning toolkits: a [`Dataset`] holds records and
//! targets, hyperparameters are validated through [`ParamGuard`] and fitted incrementally via
//! [`FitWith`](traits::FitWith), and an [`Estimator`](estimator::Estimator) drives a model
//! through training, evaluation and prediction on [input feeds](input::Feed).
//!
//! ## The Big Picture
//!
//! The workspace is split the same way:
//!
//! * `autoprice` (this crate): datasets, traits, feeds, feature columns and metrics
//! * `autoprice-datasets`: the imports-85 automobile dataset
//! * `autoprice-linear`: a linear regressor trained with FTRL-proximal
//! * `autoprice-regression`: the `linear_regression` program tying everything together
//!

pub mod dataset;
pub mod error;
pub mod estimator;
pub mod feature_column;
pub mod input;
mod metrics_regression;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, Float};
pub use error::Error;
pub use param_guard::ParamGuard;

/// Common metrics functions for regression
pub mod metrics {
    pub use crate::metrics_regression::{Mean, Regression};
}
