//! Preprocessing pipeline for the student exam scores dataset.
//!
//! The crate builds a column-wise transformation plan for a fixed tabular
//! schema (two numeric score columns, five categorical attributes, one
//! numeric target), fits it once on a training table, applies the fitted
//! plan read-only to any other table with the same columns, and serializes
//! the fitted plan so inference-time records can be transformed later with
//! the exact statistics learned at training time.
//!
//! Numeric columns are imputed with the column median and standardized;
//! categorical columns are imputed with the most frequent category, one-hot
//! encoded against a fit-time vocabulary (unseen categories become all-zero
//! indicator rows), and scaled without centering.
//!
//! ```
//! use exam_preprocessing::dataset::Table;
//! use exam_preprocessing::pipeline::TransformationPlan;
//!
//! let table = Table::new(
//!     vec!["lunch".to_string(), "reading_score".to_string()],
//!     vec![
//!         vec!["standard".to_string(), "72".to_string()],
//!         vec!["free/reduced".to_string(), "".to_string()],
//!         vec!["standard".to_string(), "90".to_string()],
//!     ],
//! )
//! .unwrap();
//! let plan = TransformationPlan::new()
//!     .numeric(vec!["reading_score"])
//!     .categorical(vec!["lunch"]);
//! let fitted = plan.fit(&table).unwrap();
//! let matrix = fitted.transform(&table).unwrap();
//! assert_eq!(matrix.dim(), (3, 3));
//! assert!(matrix.iter().all(|v| v.is_finite()));
//! ```
//!
//! The end-to-end entry point is [`fit_and_transform`], which reads the
//! train/test CSVs, splits off the target column, fits and applies the plan,
//! and writes the artifact.

pub mod dataset;
pub mod error;
pub mod imputation;
pub mod linear_scaling;
pub mod one_hot_encoding;
pub mod pipeline;
pub mod transformation;

pub use error::{PreprocessingError, Result};
pub use pipeline::{FittedPlan, TransformationPlan};
pub use transformation::{fit_and_transform, TransformationConfig, TransformationOutput};
