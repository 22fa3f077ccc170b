use super::{Dataset, DatasetBase, Float, Records};
use ndarray::{s, Array1, Array2, Axis};
use rand::{seq::SliceRandom, Rng};

/// Implementation without constraints on records and targets
///
/// This implementation block provides methods for the creation and mutation of datasets. This
/// includes swapping the targets and setting the feature names.
impl<R: Records, T> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    ///
    /// # Example
    ///
    /// ```ignore
    /// let dataset = Dataset::new(records, targets);
    /// ```
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase {
            records,
            targets,
            feature_names: Vec::new(),
        }
    }

    /// Returns reference to targets
    pub fn targets(&self) -> &T {
        &self.targets
    }

    /// Returns reference to records
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Returns feature names
    ///
    /// A feature name gives a human-readable string describing the purpose of a single feature.
    /// This allow the reader to understand its purpose while analysing results, for example
    /// correlation analysis or feature importance. Unnamed features are reported as
    /// `feature-<index>`.
    pub fn feature_names(&self) -> Vec<String> {
        if !self.feature_names.is_empty() {
            self.feature_names.clone()
        } else {
            (0..self.records.nfeatures())
                .map(|idx| format!("feature-{}", idx))
                .collect()
        }
    }

    /// Updates the feature names of a dataset
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> DatasetBase<R, T> {
        let feature_names = names.into_iter().map(|x| x.into()).collect();

        self.feature_names = feature_names;

        self
    }
}

impl<F: Clone, E: Clone> Dataset<F, E> {
    /// Collect the rows at `indices`, in that order, into a new dataset
    ///
    /// Feature names are carried over.
    pub fn select(&self, indices: &[usize]) -> Dataset<F, E> {
        DatasetBase {
            records: self.records.select(Axis(0), indices),
            targets: self.targets.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
        }
    }

    /// Apply a random permutation to the rows of the dataset
    pub fn shuffle<G: Rng>(self, rng: &mut G) -> Dataset<F, E> {
        let mut indices = (0..self.records.nrows()).collect::<Vec<_>>();
        indices.shuffle(rng);

        self.select(&indices)
    }

    /// Split the dataset into two disjoint datasets
    ///
    /// The first dataset holds the first `round(ratio * nsamples)` rows, the second one the
    /// remaining rows. No shuffling is performed, call `shuffle` beforehand for a random split.
    pub fn split_with_ratio(self, ratio: f32) -> (Dataset<F, E>, Dataset<F, E>) {
        let nsamples = self.records.nrows();
        let n = ((nsamples as f32 * ratio).round() as usize).min(nsamples);

        let first = DatasetBase {
            records: self.records.slice(s![..n, ..]).to_owned(),
            targets: self.targets.slice(s![..n]).to_owned(),
            feature_names: self.feature_names.clone(),
        };
        let second = DatasetBase {
            records: self.records.slice(s![n.., ..]).to_owned(),
            targets: self.targets.slice(s![n..]).to_owned(),
            feature_names: self.feature_names,
        };

        (first, second)
    }
}

/// Unlabelled records, every row carries a `()` target
impl<F: Float> From<Array2<F>> for Dataset<F, ()> {
    fn from(records: Array2<F>) -> Self {
        let targets = Array1::from_elem(records.nrows(), ());

        DatasetBase::new(records, targets)
    }
}

impl<F: Float, E> From<(Array2<F>, Array1<E>)> for Dataset<F, E> {
    fn from(rec_tar: (Array2<F>, Array1<E>)) -> Self {
        DatasetBase::new(rec_tar.0, rec_tar.1)
    }
}
