//! Column-wise transformation plans and their fitted counterparts.
//!
//! A [`TransformationPlan`] is an ordered list of column routes. Each route
//! names a column subset and the sub-pipeline applied to it:
//!
//! * numeric routes impute missing values with the column median, then
//!   standardize to zero mean and unit variance;
//! * categorical routes impute with the most frequent category, one-hot
//!   encode against a fit-time vocabulary, then scale the indicator block by
//!   the inverse standard deviation without centering.
//!
//! Routes are fitted independently on the same table and their outputs are
//! concatenated in route order. Columns not named by any route are dropped.
//! Fitting produces a [`FittedPlan`], a separate value that transforms tables
//! read-only, so statistics learned from training data can never be updated
//! by a later table.

use std::fs::{self, File};
use std::path::Path;

use ndarray::{concatenate, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::dataset::Table;
use crate::error::{PersistenceError, Result, TransformError};
use crate::imputation::{
    FittedMedianImputer, FittedMostFrequentImputer, MedianImputer, MostFrequentImputer,
};
use crate::linear_scaling::{FittedStandardScaler, StandardScaler};
use crate::one_hot_encoding::{FittedOneHotEncoder, OneHotEncoder};

/// One route of a plan: a named column subset and the sub-pipeline for it.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRoute {
    /// Median imputation followed by standard scaling.
    Numeric(Vec<String>),
    /// Most-frequent imputation, one-hot encoding, then scaling without
    /// centering.
    Categorical(Vec<String>),
}

/// An unfitted, ordered collection of column routes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformationPlan {
    routes: Vec<ColumnRoute>,
}

impl TransformationPlan {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// The fixed student exam scores schema: the two score columns as one
    /// numeric route, the five demographic attributes as one categorical
    /// route.
    pub fn exam_scores() -> Self {
        Self::new()
            .numeric(vec!["writing_score", "reading_score"])
            .categorical(vec![
                "gender",
                "race_ethnicity",
                "parental_level_of_education",
                "lunch",
                "test_preparation_course",
            ])
    }

    /// Appends a numeric route over `columns`.
    pub fn numeric<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.routes
            .push(ColumnRoute::Numeric(columns.into_iter().map(Into::into).collect()));
        self
    }

    /// Appends a categorical route over `columns`.
    pub fn categorical<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.routes
            .push(ColumnRoute::Categorical(columns.into_iter().map(Into::into).collect()));
        self
    }

    pub fn routes(&self) -> &[ColumnRoute] {
        &self.routes
    }

    /// Learns every imputation, encoding and scaling statistic from `table`.
    pub fn fit(&self, table: &Table) -> Result<FittedPlan> {
        let mut routes = Vec::with_capacity(self.routes.len());
        for route in &self.routes {
            let fitted = match route {
                ColumnRoute::Numeric(columns) => FittedRoute::Numeric(fit_numeric(table, columns)?),
                ColumnRoute::Categorical(columns) => {
                    FittedRoute::Categorical(fit_categorical(table, columns)?)
                }
            };
            routes.push(fitted);
        }
        Ok(FittedPlan { routes })
    }
}

fn fit_numeric(table: &Table, columns: &[String]) -> Result<FittedNumericRoute> {
    let mut imputers = Vec::with_capacity(columns.len());
    let mut blocks = Vec::with_capacity(columns.len());
    for column in columns {
        let values = table.numeric_column(column)?;
        let imputer = MedianImputer::fit(column, values.view())?;
        blocks.push(imputer.transform(values).insert_axis(Axis(1)));
        imputers.push(imputer);
    }
    let records = hstack(&blocks)?;
    let scaler = StandardScaler::new().fit(&records)?;
    Ok(FittedNumericRoute { imputers, scaler })
}

fn fit_categorical(table: &Table, columns: &[String]) -> Result<FittedCategoricalRoute> {
    let mut imputers = Vec::with_capacity(columns.len());
    let mut encoders = Vec::with_capacity(columns.len());
    let mut blocks = Vec::with_capacity(columns.len());
    for column in columns {
        let raw = table.raw_column(column)?;
        let imputer = MostFrequentImputer::fit(column, &raw)?;
        let imputed = imputer.transform(&raw);
        let encoder = OneHotEncoder::fit(column, &imputed)?;
        blocks.push(encoder.transform(&imputed));
        imputers.push(imputer);
        encoders.push(encoder);
    }
    let indicators = hstack(&blocks)?;
    let scaler = StandardScaler::no_centering().fit(&indicators)?;
    Ok(FittedCategoricalRoute {
        imputers,
        encoders,
        scaler,
    })
}

fn hstack(blocks: &[Array2<f64>]) -> std::result::Result<Array2<f64>, TransformError> {
    let views: Vec<_> = blocks.iter().map(|block| block.view()).collect();
    concatenate(Axis(1), &views).map_err(|_| TransformError::EmptyRoute)
}

/// A [`TransformationPlan`] after fitting. Holds every learned statistic and
/// applies them without ever updating them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPlan {
    routes: Vec<FittedRoute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum FittedRoute {
    Numeric(FittedNumericRoute),
    Categorical(FittedCategoricalRoute),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FittedNumericRoute {
    imputers: Vec<FittedMedianImputer>,
    scaler: FittedStandardScaler<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FittedCategoricalRoute {
    imputers: Vec<FittedMostFrequentImputer>,
    encoders: Vec<FittedOneHotEncoder>,
    scaler: FittedStandardScaler<f64>,
}

impl FittedPlan {
    /// Width of the matrix produced by [`transform`](FittedPlan::transform).
    pub fn noutput_features(&self) -> usize {
        self.routes
            .iter()
            .map(|route| match route {
                FittedRoute::Numeric(route) => route.imputers.len(),
                FittedRoute::Categorical(route) => {
                    route.encoders.iter().map(FittedOneHotEncoder::ncategories).sum()
                }
            })
            .sum()
    }

    /// Applies every fitted route to `table` and concatenates the outputs in
    /// route order.
    pub fn transform(&self, table: &Table) -> Result<Array2<f64>> {
        let mut blocks = Vec::with_capacity(self.routes.len());
        for route in &self.routes {
            let block = match route {
                FittedRoute::Numeric(route) => transform_numeric(route, table)?,
                FittedRoute::Categorical(route) => transform_categorical(route, table)?,
            };
            blocks.push(block);
        }
        Ok(hstack(&blocks)?)
    }

    /// Writes the fitted plan to `path` as JSON, creating parent directories
    /// as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| PersistenceError::CreateDir {
                    path: parent.to_owned(),
                    source,
                })?;
            }
        }
        let file = File::create(path).map_err(|source| PersistenceError::Write {
            path: path.to_owned(),
            source,
        })?;
        serde_json::to_writer_pretty(file, self).map_err(PersistenceError::Encode)?;
        Ok(())
    }

    /// Reads a fitted plan previously written by [`save`](FittedPlan::save).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PersistenceError::Read {
            path: path.to_owned(),
            source,
        })?;
        let plan = serde_json::from_reader(file).map_err(PersistenceError::Decode)?;
        Ok(plan)
    }
}

fn transform_numeric(route: &FittedNumericRoute, table: &Table) -> Result<Array2<f64>> {
    let mut blocks = Vec::with_capacity(route.imputers.len());
    for imputer in &route.imputers {
        let values = table.numeric_column(imputer.column())?;
        blocks.push(imputer.transform(values).insert_axis(Axis(1)));
    }
    Ok(route.scaler.transform(hstack(&blocks)?)?)
}

fn transform_categorical(route: &FittedCategoricalRoute, table: &Table) -> Result<Array2<f64>> {
    let mut blocks = Vec::with_capacity(route.imputers.len());
    for (imputer, encoder) in route.imputers.iter().zip(&route.encoders) {
        let raw = table.raw_column(imputer.column())?;
        let imputed = imputer.transform(&raw);
        blocks.push(encoder.transform(&imputed));
    }
    Ok(route.scaler.transform(hstack(&blocks)?)?)
}
