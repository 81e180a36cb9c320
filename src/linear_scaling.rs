//! Standard scaling with statistics learned at fit time.

use approx::abs_diff_eq;
use linfa::Float;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2, Zip};
use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// Standard scaler: learns per-feature offsets and scales from a matrix,
/// producing a [`FittedStandardScaler`] that applies the same parameters to
/// any other matrix with the same width.
///
/// With centering enabled every feature is shifted to zero mean and divided
/// by its standard deviation. Without centering features are only divided by
/// their standard deviation, which keeps 0/1 indicator columns sparse.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    with_mean: bool,
}

impl StandardScaler {
    /// Scaler that standardizes to zero mean and unit variance.
    pub fn new() -> Self {
        Self { with_mean: true }
    }

    /// Scaler that divides by the standard deviation without subtracting the
    /// mean.
    pub fn no_centering() -> Self {
        Self { with_mean: false }
    }

    /// Learns offsets and scales from `records`. Will return an error if the
    /// matrix contains no samples.
    pub fn fit<F: Float, D: Data<Elem = F>>(
        &self,
        records: &ArrayBase<D, Ix2>,
    ) -> Result<FittedStandardScaler<F>, TransformError> {
        if records.dim().0 == 0 {
            return Err(TransformError::NotEnoughSamples);
        }
        let offsets = if self.with_mean {
            records
                .mean_axis(Axis(0))
                .ok_or(TransformError::NotEnoughSamples)?
        } else {
            Array1::zeros(records.dim().1)
        };
        let scales = records.std_axis(Axis(0), F::zero()).mapv(|s| {
            if abs_diff_eq!(s, F::zero()) {
                // constant feature, don't scale
                F::one()
            } else {
                F::one() / s
            }
        });
        Ok(FittedStandardScaler { offsets, scales })
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of fitting a [`StandardScaler`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedStandardScaler<F> {
    offsets: Array1<F>,
    scales: Array1<F>,
}

impl<F: Float> FittedStandardScaler<F> {
    /// Per-feature offset subtracted before scaling. All zeros for a
    /// no-centering scaler.
    pub fn offsets(&self) -> &Array1<F> {
        &self.offsets
    }

    /// Per-feature multiplier, the inverse of the fitted standard deviation.
    pub fn scales(&self) -> &Array1<F> {
        &self.scales
    }

    /// Scales a `(nsamples, nfeatures)` matrix with the learned parameters.
    pub fn transform(&self, x: Array2<F>) -> Result<Array2<F>, TransformError> {
        if x.ncols() != self.scales.len() {
            return Err(TransformError::DimensionMismatch {
                expected: self.scales.len(),
                found: x.ncols(),
            });
        }
        let mut x = x;
        Zip::from(x.columns_mut())
            .and(&self.offsets)
            .and(&self.scales)
            .for_each(|mut col, &offset, &scale| {
                col.mapv_inplace(|el| (el - offset) * scale);
            });
        Ok(x)
    }
}
