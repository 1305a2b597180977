use log::debug;

use crate::aggregate::{self, Prediction};
use crate::dataset::Dataset;
use crate::distance::Euclidean;
use crate::error::{ModelError, Result};
use crate::neighbors::select_neighbors;
use crate::standardize::{FeatureStats, Standardizer};

/// Training labels, one per observation. The variant selects the
/// aggregation mode: per-label probabilities for categorical labels, the
/// neighbor mean for numeric ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Labels {
    Categorical(Vec<String>),
    Numeric(Vec<f64>),
}

impl Labels {
    /// Number of labels.
    pub fn len(&self) -> usize {
        match self {
            Labels::Categorical(labels) => labels.len(),
            Labels::Numeric(labels) => labels.len(),
        }
    }

    /// Returns true when there are no labels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The capability shared by anything that can score a query vector.
///
/// K-nearest-neighbors is the one implementation here; the trait leaves
/// room for other predictors without any shared state.
pub trait Predictor {
    /// Predicts the outcome for a single query vector.
    fn predict(&self, query: &[f64]) -> Result<Prediction>;

    /// Predicts outcomes for many query vectors, preserving input order.
    ///
    /// Each query's prediction is independent; the first error aborts the
    /// batch.
    fn predict_batch(&self, queries: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        queries.iter().map(|query| self.predict(query)).collect()
    }
}

/// A fitted K-nearest-neighbors model.
///
/// Constructed once by [`KNNModel::train`] and read-only afterwards: the
/// standardized training matrix, the labels, K, and the fitted statistics
/// never change, so concurrent [`Predictor::predict`] calls on a shared
/// model need no locking. There is no retraining; build a new model for
/// new data.
///
/// # Example
///
/// ```
/// use knn_predict::{Dataset, KNNModel, Labels, Outcome, Predictor};
///
/// let x = Dataset::new(vec![
///     vec![0.0], vec![0.0], vec![10.0], vec![10.0],
/// ]).unwrap();
/// let y = Labels::Categorical(vec![
///     "A".to_string(), "A".to_string(), "B".to_string(), "B".to_string(),
/// ]);
///
/// let model = KNNModel::train(2, &x, y).unwrap();
/// let prediction = model.predict(&[0.1]).unwrap();
///
/// match prediction.outcome {
///     Outcome::Class { label, .. } => assert_eq!(label, "A"),
///     _ => unreachable!(),
/// }
/// assert_eq!(prediction.confidence, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct KNNModel {
    k: usize,
    standardized: Vec<Vec<f64>>,
    labels: Labels,
    standardizer: Standardizer,
    feature_names: Vec<String>,
}

impl KNNModel {
    /// Fits a model: validates shapes and K, fits per-feature statistics,
    /// and stores the standardized training matrix.
    ///
    /// K is validated here rather than at predict time so a constructed
    /// model is always usable.
    ///
    /// # Arguments
    /// * `k` - Number of neighbors consulted per prediction, in `[1, x.len()]`
    /// * `x` - Training observations
    /// * `y` - One label per observation, tagging the prediction mode
    ///
    /// # Returns
    /// * `Ok(KNNModel)` - The fitted model
    /// * `Err(ModelError::IncorrectLength)` - Label and observation counts
    ///   disagree, or the observations have no features
    /// * `Err(ModelError::InvalidK)` - `k == 0` or `k > x.len()`
    /// * `Err(ModelError::DivisionByZero)` - Some feature has zero variance
    pub fn train(k: usize, x: &Dataset, y: Labels) -> Result<Self> {
        if y.len() != x.len() {
            return Err(ModelError::incorrect_length(format!(
                "expected one label per observation, got {} observations and {} labels",
                x.len(),
                y.len()
            )));
        }
        if k == 0 || k > x.len() {
            return Err(ModelError::invalid_k(format!(
                "k must be in [1, {}], got {}",
                x.len(),
                k
            )));
        }
        if x.feature_count() == 0 {
            return Err(ModelError::incorrect_length(
                "observations must have at least one feature",
            ));
        }

        let standardizer = Standardizer::fit(x)?;
        let standardized = standardizer.transform_matrix(x.rows())?;
        debug!(
            "trained knn model: {} observations, {} features, k={}",
            x.len(),
            x.feature_count(),
            k
        );

        Ok(Self {
            k,
            standardized,
            labels: y,
            standardizer,
            feature_names: x.feature_names(),
        })
    }

    /// Number of neighbors consulted per prediction.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of training observations.
    pub fn len(&self) -> usize {
        self.standardized.len()
    }

    /// Returns true when the model holds no training observations. A
    /// trained model never is; this exists for completeness of `len`.
    pub fn is_empty(&self) -> bool {
        self.standardized.is_empty()
    }

    /// Number of features per observation.
    pub fn feature_count(&self) -> usize {
        self.standardizer.feature_count()
    }

    /// Resolved feature names, positional where none were provided.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// The per-feature statistics the model standardizes with.
    pub fn stats(&self) -> &[FeatureStats] {
        self.standardizer.stats()
    }
}

impl Predictor for KNNModel {
    /// Scores one query: standardizes it with the stored training
    /// statistics, ranks every training row by Euclidean distance, and
    /// aggregates the K nearest labels.
    ///
    /// # Returns
    /// * `Ok(Prediction)` - Outcome and confidence for the query
    /// * `Err(ModelError::IncorrectLength)` - The query length differs from
    ///   the feature count
    fn predict(&self, query: &[f64]) -> Result<Prediction> {
        let standardized = self.standardizer.transform_row(query)?;
        let neighbors = select_neighbors(&standardized, &self.standardized, self.k, &Euclidean)?;
        let prediction = match &self.labels {
            Labels::Categorical(labels) => aggregate::classify(&neighbors, labels),
            Labels::Numeric(labels) => aggregate::regress(&neighbors, labels),
        };
        Ok(prediction)
    }

    #[cfg(feature = "parallel")]
    fn predict_batch(&self, queries: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        use rayon::prelude::*;
        queries.par_iter().map(|query| self.predict(query)).collect()
    }
}
