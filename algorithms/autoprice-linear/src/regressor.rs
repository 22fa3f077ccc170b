//! Linear regressor estimator
//!
//! Couples [`Ftrl`] with the generic [`Estimator`] driver of the base crate.

use autoprice::estimator::{Estimator, Evaluation, Predictions, TrainSummary};
use autoprice::feature_column::FeatureColumns;
use autoprice::input::Feed;
use autoprice::{Float, ParamGuard};

use crate::error::FtrlError;
use crate::hyperparams::{FtrlParams, FtrlValidParams};
use crate::Ftrl;

/// The estimator type behind [`LinearRegressor`]
pub type FtrlEstimator<F> = Estimator<F, FtrlValidParams<F>, Ftrl<F>, FtrlError>;

/// A linear model `y = x·w + b` over named numeric columns, trained with FTRL-proximal
pub struct LinearRegressor<F: Float> {
    estimator: FtrlEstimator<F>,
}

impl<F: Float> LinearRegressor<F> {
    /// Create an untrained regressor with default hyperparameters
    pub fn new<C: Into<FeatureColumns>>(feature_columns: C) -> Self {
        LinearRegressor {
            estimator: Estimator::new(FtrlValidParams::default(), feature_columns.into()),
        }
    }

    /// Create an untrained regressor, failing if `params` are not valid
    pub fn with_params<C: Into<FeatureColumns>>(
        feature_columns: C,
        params: FtrlParams<F>,
    ) -> Result<Self, FtrlError> {
        Ok(LinearRegressor {
            estimator: Estimator::new(params.check()?, feature_columns.into()),
        })
    }

    /// Log the training loss every `steps` steps
    pub fn with_log_step_count_steps(self, steps: u64) -> Self {
        LinearRegressor {
            estimator: self.estimator.with_log_step_count_steps(steps),
        }
    }

    pub fn train(
        &mut self,
        input: Feed<'_, F, F>,
        steps: usize,
    ) -> Result<TrainSummary<F>, FtrlError> {
        self.estimator.train(input, steps)
    }

    pub fn evaluate(&self, input: Feed<'_, F, F>) -> Result<Evaluation<F>, FtrlError> {
        self.estimator.evaluate(input)
    }

    pub fn predict<'m, 'a, T: Clone>(
        &'m self,
        input: Feed<'a, F, T>,
    ) -> Result<Predictions<'m, 'a, F, Ftrl<F>, T>, FtrlError> {
        self.estimator.predict(input)
    }

    pub fn global_step(&self) -> u64 {
        self.estimator.global_step()
    }

    /// The fitted model, `None` before the first training step
    pub fn model(&self) -> Option<&Ftrl<F>> {
        self.estimator.model()
    }

    pub fn feature_columns(&self) -> &FeatureColumns {
        self.estimator.feature_columns()
    }

    pub fn params(&self) -> &FtrlValidParams<F> {
        self.estimator.params()
    }
}
