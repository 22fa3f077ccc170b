//! Datasets
//!
//! Records and targets aligned by row, with optional feature names. Batches drawn by an input
//! feed and the splits of a loader are all plain `Dataset`s.
use ndarray::{Array1, Array2, ArrayView1, NdFloat};
use num_traits::{FromPrimitive, NumCast};

use std::iter::Sum;

mod impl_dataset;
mod impl_records;
mod impl_targets;

/// Floating point numbers
///
/// Implemented for `f32` and `f64`, the element type of records and regression targets.
pub trait Float: NdFloat + FromPrimitive + Default + Sum {
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// A table of records with one target per row
///
/// * `records`: matrix of shape (nsamples, nfeatures)
/// * `targets`: one entry per row, `()` for unlabelled records
/// * `feature_names`: one name per column, generated on demand when not set
///
/// Targets carry no trait bound here, operations which read them ask for `AsTargets`.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,

    feature_names: Vec<String>,
}

/// Owned records in an `Array2` with targets in an `Array1`
pub type Dataset<F, T> = DatasetBase<Array2<F>, Array1<T>>;

/// Anything with rows of samples and columns of features
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

/// Borrow the targets as a one-dimensional view
pub trait AsTargets {
    type Elem;

    fn as_targets(&self) -> ArrayView1<'_, Self::Elem>;
}
