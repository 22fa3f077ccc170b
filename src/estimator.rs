//! Estimator
//!
//! An [`Estimator`] couples hyperparameters implementing [`FitWith`] with the model they produce
//! and drives it through the three modes of a supervised regression task:
//!
//! * `train` performs one incremental update per batch of a training feed,
//! * `evaluate` runs a single pass over an evaluation feed and aggregates losses,
//! * `predict` lazily yields one prediction per input row.
//!
//! The estimator only ever hands the model the projection of a batch onto its feature columns.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use ndarray::{Array1, Array2};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::dataset::{Dataset, DatasetBase, Float};
use crate::error::Error;
use crate::feature_column::FeatureColumns;
use crate::input::Feed;
use crate::metrics_regression::{Mean, Regression};
use crate::traits::{FitWith, Predict, PredictInplace};

/// Summary of a call to [`Estimator::train`]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct TrainSummary<F> {
    /// Total number of steps the estimator has performed
    pub global_step: u64,
    /// Steps performed by this call
    pub steps: usize,
    /// Summed squared error of the last logged batch
    pub loss: Option<F>,
}

/// Aggregated metrics of a single evaluation pass
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<F> {
    average_loss: F,
    loss: F,
    label_mean: F,
    prediction_mean: F,
    global_step: u64,
}

impl<F: Float> Evaluation<F> {
    pub fn new(
        average_loss: F,
        loss: F,
        label_mean: F,
        prediction_mean: F,
        global_step: u64,
    ) -> Self {
        Evaluation {
            average_loss,
            loss,
            label_mean,
            prediction_mean,
            global_step,
        }
    }

    /// Mean squared error over every evaluated row
    pub fn average_loss(&self) -> F {
        self.average_loss
    }

    /// Mean over batches of the summed squared error per batch
    pub fn loss(&self) -> F {
        self.loss
    }

    pub fn label_mean(&self) -> F {
        self.label_mean
    }

    pub fn prediction_mean(&self) -> F {
        self.prediction_mean
    }

    /// Step the evaluated model had reached
    pub fn global_step(&self) -> u64 {
        self.global_step
    }

    /// All metrics keyed by name
    pub fn metrics(&self) -> BTreeMap<&'static str, F> {
        let mut metrics = BTreeMap::new();
        metrics.insert("average_loss", self.average_loss);
        metrics.insert("loss", self.loss);
        metrics.insert("label/mean", self.label_mean);
        metrics.insert("prediction/mean", self.prediction_mean);
        metrics
    }

    /// Look up a metric by name
    pub fn get(&self, name: &str) -> Option<F> {
        self.metrics().get(name).copied()
    }
}

/// A single predicted value
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction<F> {
    value: F,
}

impl<F: Float> Prediction<F> {
    pub fn value(&self) -> F {
        self.value
    }
}

/// Train, evaluate and predict with an incrementally fitted model
///
/// * `F`: float type of records and targets
/// * `P`: hyperparameters, fitting `M` one batch at a time
/// * `M`: the fitted model
/// * `E`: error type of the fitting step
pub struct Estimator<F, P, M, E> {
    params: P,
    feature_columns: FeatureColumns,
    model: Option<M>,
    global_step: u64,
    log_step_count_steps: u64,
    phantom: PhantomData<(F, E)>,
}

impl<F, P, M, E> Estimator<F, P, M, E>
where
    F: Float,
    P: FitWith<Array2<F>, Array1<F>, E, ObjectIn = Option<M>, ObjectOut = M>,
    M: PredictInplace<Array2<F>, Array1<F>>,
    E: std::error::Error + From<Error>,
{
    /// Create an untrained estimator over `feature_columns`
    pub fn new(params: P, feature_columns: FeatureColumns) -> Self {
        Estimator {
            params,
            feature_columns,
            model: None,
            global_step: 0,
            log_step_count_steps: 100,
            phantom: PhantomData,
        }
    }

    /// Log the training loss every `steps` steps
    ///
    /// Defaults to `100`, a value of `0` is treated as `1`.
    pub fn with_log_step_count_steps(mut self, steps: u64) -> Self {
        self.log_step_count_steps = steps.max(1);
        self
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn feature_columns(&self) -> &FeatureColumns {
        &self.feature_columns
    }

    /// The fitted model, `None` before the first training step
    pub fn model(&self) -> Option<&M> {
        self.model.as_ref()
    }

    pub fn global_step(&self) -> u64 {
        self.global_step
    }

    /// Perform one update per batch until `steps` batches were consumed or `input` ends
    ///
    /// A failing update discards the model and resets the global step, the estimator then has to
    /// be trained from scratch.
    pub fn train(&mut self, input: Feed<'_, F, F>, steps: usize) -> Result<TrainSummary<F>, E> {
        let indices = self.feature_columns.resolve(&input.feature_names())?;
        let mut summary = TrainSummary {
            global_step: self.global_step,
            steps: 0,
            loss: None,
        };

        debug!(steps, global_step = self.global_step, "training started");

        for batch in input.take(steps) {
            let records = FeatureColumns::transform(batch.records(), &indices);
            let batch = Dataset::new(records, batch.targets);

            let model = match self.params.fit_with(self.model.take(), &batch) {
                Ok(model) => model,
                Err(err) => {
                    self.global_step = 0;
                    return Err(err);
                }
            };
            self.global_step += 1;
            summary.steps += 1;

            let model = self.model.insert(model);

            if summary.steps == 1 || self.global_step % self.log_step_count_steps == 0 {
                let loss = batch_loss(model, &batch)?;
                info!("loss = {}, step = {}", loss, self.global_step);
                summary.loss = Some(loss);
            }
        }

        summary.global_step = self.global_step;
        info!(
            "Loss for last logged step: {}",
            summary
                .loss
                .map(|loss| loss.to_string())
                .unwrap_or_else(|| "none".to_string())
        );

        Ok(summary)
    }

    /// Run the model once over `input` and aggregate losses
    pub fn evaluate(&self, input: Feed<'_, F, F>) -> Result<Evaluation<F>, E> {
        let model = self.model.as_ref().ok_or(Error::NotFitted)?;
        let indices = self.feature_columns.resolve(&input.feature_names())?;

        let mut average_loss = Mean::default();
        let mut loss = Mean::default();
        let mut label_mean = Mean::default();
        let mut prediction_mean = Mean::default();

        for batch in input {
            let records = FeatureColumns::transform(batch.records(), &indices);
            let predictions: Array1<F> = model.predict(&records);
            let sse = predictions.sum_squared_error(batch.targets())?;
            let nsamples = batch.targets().len();

            average_loss.update(sse, nsamples);
            loss.update(sse, 1);
            label_mean.update(batch.targets().sum(), nsamples);
            prediction_mean.update(predictions.sum(), nsamples);
        }

        debug!(nsamples = average_loss.count(), "evaluation finished");

        let evaluation = Evaluation {
            average_loss: average_loss.result()?,
            loss: loss.result()?,
            label_mean: label_mean.result()?,
            prediction_mean: prediction_mean.result()?,
            global_step: self.global_step,
        };
        info!(
            "Evaluation for global step {}: average_loss = {}, loss = {}, label/mean = {}, prediction/mean = {}",
            evaluation.global_step,
            evaluation.average_loss,
            evaluation.loss,
            evaluation.label_mean,
            evaluation.prediction_mean
        );

        Ok(evaluation)
    }

    /// Lazily predict one value per row of `input`, in the order the feed yields them
    ///
    /// Feature columns are resolved before the first batch is drawn.
    pub fn predict<'m, 'a, T: Clone>(
        &'m self,
        input: Feed<'a, F, T>,
    ) -> Result<Predictions<'m, 'a, F, M, T>, E> {
        let model = self.model.as_ref().ok_or(Error::NotFitted)?;
        let indices = self.feature_columns.resolve(&input.feature_names())?;

        Ok(Predictions {
            model,
            input,
            indices,
            pending: Vec::new().into_iter(),
        })
    }
}

fn batch_loss<F, M>(model: &M, batch: &Dataset<F, F>) -> Result<F, Error>
where
    F: Float,
    M: PredictInplace<Array2<F>, Array1<F>>,
{
    let predictions: Array1<F> = model.predict(batch.records());
    predictions.sum_squared_error(batch.targets())
}

/// Iterator over the predictions of an [`Estimator`]
pub struct Predictions<'m, 'a, F, M, T> {
    model: &'m M,
    input: Feed<'a, F, T>,
    indices: Vec<usize>,
    pending: std::vec::IntoIter<F>,
}

impl<'m, 'a, F, M, T> Iterator for Predictions<'m, 'a, F, M, T>
where
    F: Float,
    M: PredictInplace<Array2<F>, Array1<F>>,
    T: Clone,
{
    type Item = Prediction<F>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.pending.next() {
                return Some(Prediction { value });
            }

            let batch: DatasetBase<Array2<F>, Array1<T>> = self.input.next()?;
            let records = FeatureColumns::transform(batch.records(), &self.indices);
            let predictions: Array1<F> = self.model.predict(&records);
            self.pending = predictions.to_vec().into_iter();
        }
    }
}
