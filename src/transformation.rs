//! Fit-transform orchestration across the train and test splits.

use std::path::{Path, PathBuf};

use ndarray::{concatenate, Array1, Array2, Axis};
use tracing::info;

use crate::dataset::Table;
use crate::error::Result;
use crate::pipeline::TransformationPlan;

/// Schema and artifact location for [`fit_and_transform`].
///
/// The column lists are explicit values rather than process-wide constants so
/// tests and callers with a different schema can substitute their own.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformationConfig {
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub target_column: String,
    pub artifact_path: PathBuf,
}

impl Default for TransformationConfig {
    /// The student exam scores schema: math score regressed on the other two
    /// scores and the five demographic attributes.
    fn default() -> Self {
        Self {
            numeric_columns: vec!["writing_score".to_string(), "reading_score".to_string()],
            categorical_columns: vec![
                "gender".to_string(),
                "race_ethnicity".to_string(),
                "parental_level_of_education".to_string(),
                "lunch".to_string(),
                "test_preparation_course".to_string(),
            ],
            target_column: "math_score".to_string(),
            artifact_path: PathBuf::from("artifacts/preprocessor.json"),
        }
    }
}

impl TransformationConfig {
    /// The unfitted plan for this schema: one numeric route, one categorical
    /// route, in that order.
    pub fn plan(&self) -> TransformationPlan {
        TransformationPlan::new()
            .numeric(self.numeric_columns.iter().cloned())
            .categorical(self.categorical_columns.iter().cloned())
    }
}

/// Matrices produced by [`fit_and_transform`]. The target is the last column
/// of both.
#[derive(Debug, Clone)]
pub struct TransformationOutput {
    pub train: Array2<f64>,
    pub test: Array2<f64>,
    pub artifact_path: PathBuf,
}

/// Loads the train and test tables, fits the transformation plan on the
/// training features only, applies it to both splits, and persists the
/// fitted plan to `config.artifact_path`.
///
/// The fitted statistics are learned exclusively from the training split;
/// the test table is transformed with those parameters and never influences
/// them. Any failure aborts the whole run, there are no partial results.
pub fn fit_and_transform<P, Q>(
    config: &TransformationConfig,
    train_path: P,
    test_path: Q,
) -> Result<TransformationOutput>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let train = Table::from_csv(train_path.as_ref())?;
    let test = Table::from_csv(test_path.as_ref())?;
    info!(
        train_rows = train.nrows(),
        test_rows = test.nrows(),
        "read train and test tables"
    );

    let (x_train, y_train) = train.split_target(&config.target_column)?;
    let (x_test, y_test) = test.split_target(&config.target_column)?;
    info!(
        target = %config.target_column,
        numeric = ?config.numeric_columns,
        categorical = ?config.categorical_columns,
        "identified feature and target columns"
    );

    let fitted = config.plan().fit(&x_train)?;
    let train_features = fitted.transform(&x_train)?;
    let test_features = fitted.transform(&x_test)?;
    info!(
        features = fitted.noutput_features(),
        "fitted preprocessing plan on the training split and applied it to both"
    );

    let train = append_target(train_features, &y_train);
    let test = append_target(test_features, &y_test);

    fitted.save(&config.artifact_path)?;
    info!(path = %config.artifact_path.display(), "saved fitted preprocessing plan");

    Ok(TransformationOutput {
        train,
        test,
        artifact_path: config.artifact_path.clone(),
    })
}

/// Appends the target vector as the last column of the feature matrix.
fn append_target(features: Array2<f64>, target: &Array1<f64>) -> Array2<f64> {
    let target = target.view().insert_axis(Axis(1));
    // both sides come from the same table, so the row counts always match
    concatenate(Axis(1), &[features.view(), target]).unwrap()
}
