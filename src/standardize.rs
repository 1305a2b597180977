use log::error;

use crate::dataset::Dataset;
use crate::error::{ModelError, Result};

/// Per-feature standardization statistics, fixed at fit time.
///
/// `std` is the population standard deviation (sum of squared deviations
/// divided by N, not N−1). Invariant: `std > 0` for every fitted feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureStats {
    pub mean: f64,
    pub std: f64,
}

impl FeatureStats {
    /// Computes mean and population standard deviation over one feature
    /// column.
    ///
    /// # Returns
    /// * `Ok(FeatureStats)` - The column has positive variance
    /// * `Err(ModelError::DivisionByZero)` - The column is constant or empty;
    ///   such a feature cannot be standardized and the caller must remove it
    ///
    /// # Example
    ///
    /// ```
    /// use knn_predict::FeatureStats;
    ///
    /// let stats = FeatureStats::fit(&[2.0, 4.0, 6.0]).unwrap();
    /// assert_eq!(stats.mean, 4.0);
    /// ```
    pub fn fit(column: &[f64]) -> Result<Self> {
        if column.is_empty() {
            return Err(ModelError::division_by_zero(
                "cannot standardize an empty column",
            ));
        }
        let n = column.len() as f64;
        let mean = column.iter().sum::<f64>() / n;
        let ssq: f64 = column.iter().map(|v| (v - mean).powi(2)).sum();
        let std = (ssq / n).sqrt();
        if std == 0.0 {
            return Err(ModelError::division_by_zero("column has zero variance"));
        }
        Ok(Self { mean, std })
    }

    /// Standardizes a single value: `(x - mean) / std`.
    pub fn transform_value(&self, x: f64) -> f64 {
        (x - self.mean) / self.std
    }

    /// Produces a new standardized column. The input is never mutated; the
    /// same stored statistics apply whether the column is training data or
    /// a query.
    pub fn transform(&self, column: &[f64]) -> Vec<f64> {
        column.iter().map(|&x| self.transform_value(x)).collect()
    }
}

/// Per-feature statistics for a whole training matrix.
///
/// Fitted once from training data and applied unchanged to every later
/// row, including query vectors at predict time. Statistics are never
/// recomputed from a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardizer {
    stats: Vec<FeatureStats>,
}

impl Standardizer {
    /// Fits one [`FeatureStats`] per feature column of the dataset.
    ///
    /// Aborts on the first degenerate (zero-variance) column: the error is
    /// logged with the feature's resolved name and returned, and no partial
    /// standardizer is produced.
    pub fn fit(data: &Dataset) -> Result<Self> {
        let names = data.feature_names();
        let mut stats = Vec::with_capacity(data.feature_count());
        for (j, name) in names.iter().enumerate() {
            match FeatureStats::fit(&data.column(j)) {
                Ok(s) => stats.push(s),
                Err(err) => {
                    error!("failed to standardize feature {}: {}", name, err);
                    return Err(ModelError::division_by_zero(format!(
                        "feature {} has zero variance",
                        name
                    )));
                }
            }
        }
        Ok(Self { stats })
    }

    /// Number of features this standardizer was fitted on.
    pub fn feature_count(&self) -> usize {
        self.stats.len()
    }

    /// The fitted per-feature statistics, in feature order.
    pub fn stats(&self) -> &[FeatureStats] {
        &self.stats
    }

    /// Standardizes one observation using the stored training statistics.
    ///
    /// # Returns
    /// * `Ok(row)` - A new standardized vector; the input is untouched
    /// * `Err(ModelError::IncorrectLength)` - The row length differs from
    ///   the fitted feature count
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.stats.len() {
            return Err(ModelError::incorrect_length(format!(
                "expected {} features, got {}",
                self.stats.len(),
                row.len()
            )));
        }
        Ok(row
            .iter()
            .zip(self.stats.iter())
            .map(|(&x, s)| s.transform_value(x))
            .collect())
    }

    /// Standardizes every row of a matrix with the stored statistics.
    pub fn transform_matrix(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }
}
