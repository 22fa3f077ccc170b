//! Common metrics for regression
//!
//! This module implements common comparison metrices for continuous variables.

use ndarray::{ArrayBase, Data, Ix1, Zip};

use crate::{
    error::{Error, Result},
    Float,
};

/// Regression metrices trait for single targets.
///
/// It is possible to compute the listed mectrics between:
/// * One-dimensional array - One-dimensional array
///
/// To compare the predictions with the ground truth, use
/// ```ignore
/// prediction.mean_squared_error(&ground_truth)
/// ```
pub trait Regression<F: Float, D: Data<Elem = F>> {
    /// Maximal error between two continuous variables
    fn max_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F>;
    /// Mean error between two continuous variables
    fn mean_absolute_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F>;
    /// Sum of squared errors between two continuous variables
    fn sum_squared_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F>;
    /// Mean squared error between two continuous variables
    fn mean_squared_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F>;
    /// R squared coefficient, is the proportion of the variance in the dependent variable that is
    /// predictable from the independent variable.
    fn r2(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F>;
}

impl<F: Float, D: Data<Elem = F>, D2: Data<Elem = F>> Regression<F, D2> for ArrayBase<D, Ix1> {
    fn max_error(&self, compare_to: &ArrayBase<D2, Ix1>) -> Result<F> {
        check_shapes(self.len(), compare_to.len())?;

        let max = Zip::from(self)
            .and(compare_to)
            .fold(F::zero(), |acc, a, b| acc.max((*a - *b).abs()));
        Ok(max)
    }

    fn mean_absolute_error(&self, compare_to: &ArrayBase<D2, Ix1>) -> Result<F> {
        check_shapes(self.len(), compare_to.len())?;

        let sum = Zip::from(self)
            .and(compare_to)
            .fold(F::zero(), |acc, a, b| acc + (*a - *b).abs());
        Ok(sum / F::cast(self.len()))
    }

    fn sum_squared_error(&self, compare_to: &ArrayBase<D2, Ix1>) -> Result<F> {
        if self.len() != compare_to.len() {
            return Err(Error::MismatchedShapes {
                expected: self.len(),
                found: compare_to.len(),
            });
        }

        Ok(Zip::from(self)
            .and(compare_to)
            .fold(F::zero(), |acc, a, b| acc + (*a - *b) * (*a - *b)))
    }

    fn mean_squared_error(&self, compare_to: &ArrayBase<D2, Ix1>) -> Result<F> {
        check_shapes(self.len(), compare_to.len())?;

        Ok(self.sum_squared_error(compare_to)? / F::cast(self.len()))
    }

    // r2 = 1 - sum((pred_i - y_i)^2)/sum((mean_y - y_i)^2)
    // if the mean is of `compare_to`, then the denominator
    // should compare `compare_to` and the mean, and not self and the mean
    fn r2(&self, compare_to: &ArrayBase<D2, Ix1>) -> Result<F> {
        check_shapes(self.len(), compare_to.len())?;

        let mean = compare_to.sum() / F::cast(compare_to.len());
        let total = compare_to
            .iter()
            .fold(F::zero(), |acc, y| acc + (*y - mean) * (*y - mean));

        Ok(F::one() - self.sum_squared_error(compare_to)? / (total + F::cast(1e-10)))
    }
}

fn check_shapes(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        Err(Error::MismatchedShapes { expected, found })
    } else if expected == 0 {
        Err(Error::NotEnoughSamples)
    } else {
        Ok(())
    }
}

/// Streaming mean
///
/// Accumulates sums and counts over several batches, the mean is only formed on request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mean<F> {
    total: F,
    count: usize,
}

impl<F: Float> Default for Mean<F> {
    fn default() -> Self {
        Mean {
            total: F::zero(),
            count: 0,
        }
    }
}

impl<F: Float> Mean<F> {
    /// Add the sum `total` of `count` observations
    pub fn update(&mut self, total: F, count: usize) {
        self.total += total;
        self.count += count;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean of everything seen so far, `Error::NotEnoughSamples` if nothing was seen
    pub fn result(&self) -> Result<F> {
        if self.count == 0 {
            Err(Error::NotEnoughSamples)
        } else {
            Ok(self.total / F::cast(self.count))
        }
    }
}
