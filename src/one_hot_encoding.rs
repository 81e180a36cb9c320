//! One-hot encoding with a category vocabulary learned at fit time.

use std::collections::BTreeMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// Learns the category vocabulary of one column, producing a
/// [`FittedOneHotEncoder`] that maps each value to an indicator column.
///
/// Categories not seen at fit time are ignored at transform time: the whole
/// indicator block for that cell stays zero instead of raising an error.
pub struct OneHotEncoder;

impl OneHotEncoder {
    /// Learns the sorted vocabulary of distinct values in `values`.
    pub fn fit<T: AsRef<str>>(
        column: &str,
        values: &[T],
    ) -> Result<FittedOneHotEncoder, TransformError> {
        let mut categories: Vec<String> = values.iter().map(|v| v.as_ref().to_owned()).collect();
        categories.sort();
        categories.dedup();
        if categories.is_empty() {
            return Err(TransformError::AllValuesMissing(column.to_owned()));
        }
        let index = categories
            .iter()
            .cloned()
            .enumerate()
            .map(|(position, category)| (category, position))
            .collect();
        Ok(FittedOneHotEncoder {
            column: column.to_owned(),
            categories,
            index,
        })
    }
}

/// The vocabulary and category-to-column mapping learned by a
/// [`OneHotEncoder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedOneHotEncoder {
    column: String,
    categories: Vec<String>,
    // ordered so the serialized artifact is identical across fits
    index: BTreeMap<String, usize>,
}

impl FittedOneHotEncoder {
    /// Name of the column this encoder was fitted on.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// All categories, in the indicator column order used by `transform`.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn ncategories(&self) -> usize {
        self.categories.len()
    }

    /// Produces a `(values.len(), ncategories)` indicator matrix. Rows whose
    /// value is outside the fitted vocabulary are all zeros.
    pub fn transform<T: AsRef<str>>(&self, values: &[T]) -> Array2<f64> {
        let mut indicators = Array2::zeros((values.len(), self.categories.len()));
        for (row, value) in values.iter().enumerate() {
            if let Some(&column) = self.index.get(value.as_ref()) {
                indicators[(row, column)] = 1.;
            }
        }
        indicators
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn vocabulary_is_sorted_and_deduplicated() {
        let values = ["standard", "free/reduced", "standard"];
        let encoder = OneHotEncoder::fit("lunch", &values).unwrap();
        assert_eq!(encoder.categories(), &["free/reduced", "standard"]);
        assert_eq!(encoder.ncategories(), 2);
    }

    #[test]
    fn indicator_columns_follow_the_vocabulary() {
        let values = ["standard", "free/reduced", "standard"];
        let encoder = OneHotEncoder::fit("lunch", &values).unwrap();
        let indicators = encoder.transform(&values);
        assert_eq!(indicators, array![[0., 1.], [1., 0.], [0., 1.]]);
    }

    #[test]
    fn unseen_categories_produce_zero_rows() {
        let encoder = OneHotEncoder::fit("lunch", &["standard", "free/reduced"]).unwrap();
        let indicators = encoder.transform(&["standard", "premium"]);
        assert_eq!(indicators, array![[0., 1.], [0., 0.]]);
    }

    #[test]
    fn identical_fits_serialize_to_identical_bytes() {
        let values: Vec<String> = (0..10).map(|group| format!("group {}", group)).collect();
        let first = OneHotEncoder::fit("race_ethnicity", &values).unwrap();
        let second = OneHotEncoder::fit("race_ethnicity", &values).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn empty_column_cannot_be_fitted() {
        let values: [&str; 0] = [];
        let err = OneHotEncoder::fit("lunch", &values).unwrap_err();
        assert!(matches!(err, TransformError::AllValuesMissing(_)));
    }
}
