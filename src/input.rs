//! Input feeds
//!
//! A [`Feed`] hands an in-memory dataset to an estimator in batches. Two policies cover every
//! use: a feed with `num_epochs(None)` repeats forever and leaves the caller in control of how
//! many batches are consumed, a feed with `num_epochs(Some(k))` visits every row exactly `k`
//! times and then stops. Shuffling draws a fresh permutation at the start of every epoch.

use rand::{seq::SliceRandom, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::param_guard::ParamGuard;

/// A verified parameter set for an input feed
///
/// See [`FeedParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedValidParams {
    batch_size: usize,
    num_epochs: Option<usize>,
    shuffle: bool,
    seed: Option<u64>,
}

impl FeedValidParams {
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn num_epochs(&self) -> Option<usize> {
        self.num_epochs
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Wrap `dataset` into a feed
    pub fn feed<'a, F: Clone, E: Clone>(&self, dataset: &'a Dataset<F, E>) -> Feed<'a, F, E> {
        Feed::new(dataset, self.clone())
    }
}

/// Parameters of an input feed
///
/// Defaults to batches of 128 rows, a single epoch and no shuffling.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedParams(FeedValidParams);

impl Default for FeedParams {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedParams {
    pub fn new() -> Self {
        FeedParams(FeedValidParams {
            batch_size: 128,
            num_epochs: Some(1),
            shuffle: false,
            seed: None,
        })
    }

    /// Number of rows per batch
    ///
    /// The last batch of a finite feed may be smaller.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.0.batch_size = batch_size;
        self
    }

    /// Number of passes over the data, `None` repeats forever
    pub fn num_epochs(mut self, num_epochs: Option<usize>) -> Self {
        self.0.num_epochs = num_epochs;
        self
    }

    /// Whether rows are visited in a random order
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.0.shuffle = shuffle;
        self
    }

    /// Seed of the shuffling RNG, drawn from the OS if not set
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.0.seed = seed;
        self
    }

    /// Check the parameters and wrap `dataset` into a feed
    pub fn feed<'a, F: Clone, E: Clone>(
        &self,
        dataset: &'a Dataset<F, E>,
    ) -> Result<Feed<'a, F, E>> {
        Ok(self.check_ref()?.feed(dataset))
    }
}

impl ParamGuard for FeedParams {
    type Checked = FeedValidParams;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.batch_size == 0 {
            Err(Error::Parameters(
                "batch size must be bigger than 0".to_string(),
            ))
        } else if self.0.num_epochs == Some(0) {
            Err(Error::Parameters(
                "number of epochs must be bigger than 0".to_string(),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// Batches of rows drawn from a borrowed dataset
pub struct Feed<'a, F, E> {
    dataset: &'a Dataset<F, E>,
    params: FeedValidParams,
    order: Vec<usize>,
    position: usize,
    epoch: usize,
    rng: Xoshiro256Plus,
}

impl<'a, F: Clone, E: Clone> Feed<'a, F, E> {
    pub fn new(dataset: &'a Dataset<F, E>, params: FeedValidParams) -> Self {
        let mut rng = match params.seed {
            Some(seed) => Xoshiro256Plus::seed_from_u64(seed),
            None => Xoshiro256Plus::from_entropy(),
        };

        let mut order = (0..dataset.records().nrows()).collect::<Vec<_>>();
        if params.shuffle {
            order.shuffle(&mut rng);
        }

        Feed {
            dataset,
            params,
            order,
            position: 0,
            epoch: 0,
            rng,
        }
    }

    /// Feature names of the underlying dataset
    pub fn feature_names(&self) -> Vec<String> {
        self.dataset.feature_names()
    }

    /// Number of rows in one epoch
    pub fn nsamples(&self) -> usize {
        self.order.len()
    }

    /// Zero-based index of the epoch the next row is drawn from
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn params(&self) -> &FeedValidParams {
        &self.params
    }

    fn is_last_epoch(&self) -> bool {
        match self.params.num_epochs {
            Some(num_epochs) => self.epoch + 1 >= num_epochs,
            None => false,
        }
    }
}

impl<'a, F: Clone, E: Clone> Iterator for Feed<'a, F, E> {
    type Item = Dataset<F, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let nsamples = self.order.len();
        if nsamples == 0 {
            return None;
        }

        let mut batch = Vec::with_capacity(self.params.batch_size);
        while batch.len() < self.params.batch_size {
            if self.position == nsamples {
                if self.is_last_epoch() {
                    break;
                }
                self.epoch += 1;
                self.position = 0;
                if self.params.shuffle {
                    self.order.shuffle(&mut self.rng);
                }
            }

            batch.push(self.order[self.position]);
            self.position += 1;
        }

        if batch.is_empty() {
            None
        } else {
            Some(self.dataset.select(&batch))
        }
    }
}
