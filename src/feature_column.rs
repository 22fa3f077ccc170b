//! Feature columns
//!
//! A feature column names one numeric field of the input records. Estimators are built over a
//! list of columns and only ever see the projection of their input onto those columns, in the
//! order the columns were declared.

use ndarray::{Array2, ArrayBase, Axis, Data, Ix2};
use std::iter::FromIterator;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A real valued feature, looked up by `key` in the feature names of the input
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumericColumn {
    key: String,
}

impl NumericColumn {
    pub fn new<K: Into<String>>(key: K) -> Self {
        NumericColumn { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Shorthand for [`NumericColumn::new`]
pub fn numeric_column<K: Into<String>>(key: K) -> NumericColumn {
    NumericColumn::new(key)
}

/// An ordered set of feature columns
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureColumns(Vec<NumericColumn>);

impl FeatureColumns {
    pub fn new(columns: Vec<NumericColumn>) -> Self {
        FeatureColumns(columns)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NumericColumn> {
        self.0.iter()
    }

    /// Map every column to its position in `feature_names`
    ///
    /// Fails with `Error::UnknownFeature` for the first column which has no match.
    pub fn resolve(&self, feature_names: &[String]) -> Result<Vec<usize>> {
        self.0
            .iter()
            .map(|column| {
                feature_names
                    .iter()
                    .position(|name| name == column.key())
                    .ok_or_else(|| Error::UnknownFeature(column.key().to_string()))
            })
            .collect()
    }

    /// Project records onto resolved column positions
    pub fn transform<F: Clone, D: Data<Elem = F>>(
        records: &ArrayBase<D, Ix2>,
        indices: &[usize],
    ) -> Array2<F> {
        records.select(Axis(1), indices)
    }
}

impl From<Vec<NumericColumn>> for FeatureColumns {
    fn from(columns: Vec<NumericColumn>) -> Self {
        FeatureColumns::new(columns)
    }
}

impl FromIterator<NumericColumn> for FeatureColumns {
    fn from_iter<I: IntoIterator<Item = NumericColumn>>(iter: I) -> Self {
        FeatureColumns(iter.into_iter().collect())
    }
}
