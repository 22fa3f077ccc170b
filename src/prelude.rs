//! autoprice prelude.
//!
//! This module contains the most used types, type aliases, traits and
//! functions that you can import easily as a group.
//!

#[doc(no_inline)]
pub use crate::error::{Error, Result};

#[doc(no_inline)]
pub use crate::traits::*;

#[doc(no_inline)]
pub use crate::dataset::{AsTargets, Dataset, DatasetBase, Float, Records};

#[doc(no_inline)]
pub use crate::estimator::{Estimator, Evaluation, Prediction, TrainSummary};

#[doc(no_inline)]
pub use crate::feature_column::{numeric_column, FeatureColumns, NumericColumn};

#[doc(no_inline)]
pub use crate::input::{Feed, FeedParams};

#[doc(no_inline)]
pub use crate::metrics_regression::Regression;

#[doc(no_inline)]
pub use crate::param_guard::ParamGuard;
