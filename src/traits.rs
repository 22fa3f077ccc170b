//! Provide traits for different classes of algorithms
//!

use crate::dataset::{DatasetBase, Records};
use ndarray::{ArrayBase, Data, Ix2};

/// Incremental algorithms
///
/// An incremental algorithm takes a former model and dataset and returns a new model with updated
/// parameters. If the former model is `None`, then the function acts like `Fit::fit` and
/// initializes the model first.
pub trait FitWith<R: Records, T, E: std::error::Error + From<crate::error::Error>> {
    type ObjectIn;
    type ObjectOut;

    fn fit_with(
        &self,
        model: Self::ObjectIn,
        dataset: &DatasetBase<R, T>,
    ) -> Result<Self::ObjectOut, E>;
}

/// Predict with model into a mutable reference of targets.
pub trait PredictInplace<R: Records, T> {
    /// Predict something in place
    fn predict_inplace(&self, x: &R, y: &mut T);

    /// Create targets that `predict_inplace` works with.
    fn default_target(&self, x: &R) -> T;
}

/// Predict with model
///
/// This trait assumes the `PredictInplace` implementation and provides additional input/output
/// combinations.
///
/// # Provided implementation
///
/// * Array2 -> Targets
/// * Dataset -> Targets
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}

impl<'a, F, D, T, O> Predict<&'a ArrayBase<D, Ix2>, T> for O
where
    D: Data<Elem = F>,
    O: PredictInplace<ArrayBase<D, Ix2>, T>,
{
    fn predict(&self, records: &'a ArrayBase<D, Ix2>) -> T {
        let mut targets = self.default_target(records);
        self.predict_inplace(records, &mut targets);
        targets
    }
}

impl<'a, F, D, S, T, O> Predict<&'a DatasetBase<ArrayBase<D, Ix2>, S>, T> for O
where
    D: Data<Elem = F>,
    O: PredictInplace<ArrayBase<D, Ix2>, T>,
{
    fn predict(&self, ds: &'a DatasetBase<ArrayBase<D, Ix2>, S>) -> T {
        let mut targets = self.default_target(ds.records());
        self.predict_inplace(ds.records(), &mut targets);
        targets
    }
}
