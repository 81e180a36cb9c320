//! Missing value imputation with fill values learned at fit time.

use std::collections::BTreeMap;

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::dataset::is_missing;
use crate::error::TransformError;

/// Learns the median of a numeric column, producing a
/// [`FittedMedianImputer`] that replaces NaNs with it.
///
/// The median is preferred over the mean here because exam scores carry
/// outliers.
pub struct MedianImputer;

impl MedianImputer {
    /// Learns the median of the observed (non-NaN) values of `values`.
    pub fn fit(
        column: &str,
        values: ArrayView1<f64>,
    ) -> Result<FittedMedianImputer, TransformError> {
        let mut observed: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if observed.is_empty() {
            return Err(TransformError::AllValuesMissing(column.to_owned()));
        }
        observed.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mid = observed.len() / 2;
        let fill_value = if observed.len() % 2 == 0 {
            (observed[mid - 1] + observed[mid]) / 2.
        } else {
            observed[mid]
        };
        Ok(FittedMedianImputer {
            column: column.to_owned(),
            fill_value,
        })
    }
}

/// The result of fitting a [`MedianImputer`] on one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedMedianImputer {
    column: String,
    fill_value: f64,
}

impl FittedMedianImputer {
    /// Name of the column this imputer was fitted on.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn fill_value(&self) -> f64 {
        self.fill_value
    }

    /// Replaces every NaN with the learned median.
    pub fn transform(&self, mut values: Array1<f64>) -> Array1<f64> {
        let fill_value = self.fill_value;
        values.mapv_inplace(|v| if v.is_nan() { fill_value } else { v });
        values
    }
}

/// Learns the most frequent category of a column, producing a
/// [`FittedMostFrequentImputer`] that substitutes it for missing cells.
pub struct MostFrequentImputer;

impl MostFrequentImputer {
    /// Learns the most frequent observed category. Ties resolve to the
    /// lexicographically smallest category so refitting is deterministic.
    pub fn fit<T: AsRef<str>>(
        column: &str,
        values: &[T],
    ) -> Result<FittedMostFrequentImputer, TransformError> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for value in values {
            let value = value.as_ref();
            if !is_missing(value) {
                *counts.entry(value).or_insert(0) += 1;
            }
        }
        let mut best: Option<(&str, usize)> = None;
        for (value, count) in counts {
            match best {
                Some((_, top)) if count <= top => {}
                _ => best = Some((value, count)),
            }
        }
        let (fill_value, _) =
            best.ok_or_else(|| TransformError::AllValuesMissing(column.to_owned()))?;
        Ok(FittedMostFrequentImputer {
            column: column.to_owned(),
            fill_value: fill_value.to_owned(),
        })
    }
}

/// The result of fitting a [`MostFrequentImputer`] on one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedMostFrequentImputer {
    column: String,
    fill_value: String,
}

impl FittedMostFrequentImputer {
    /// Name of the column this imputer was fitted on.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn fill_value(&self) -> &str {
        &self.fill_value
    }

    /// Replaces every missing cell with the learned category.
    pub fn transform<T: AsRef<str>>(&self, values: &[T]) -> Vec<String> {
        values
            .iter()
            .map(|value| {
                let value = value.as_ref();
                if is_missing(value) {
                    self.fill_value.clone()
                } else {
                    value.to_owned()
                }
            })
            .collect()
    }
}
