use crate::error::{ModelError, Result};

/// An ordered collection of observations, each a fixed-length feature
/// vector, with an optional parallel list of feature names.
///
/// Rows are observations; columns are features. This orientation is fixed
/// here and every consumer iterates features through [`Dataset::column`].
///
/// # Example
///
/// ```
/// use knn_predict::Dataset;
///
/// let data = Dataset::new(vec![
///     vec![1.0, 2.0],
///     vec![3.0, 4.0],
/// ]).unwrap();
///
/// assert_eq!(data.len(), 2);
/// assert_eq!(data.feature_count(), 2);
/// assert_eq!(data.feature_names(), vec!["x0", "x1"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    values: Vec<Vec<f64>>,
    names: Option<Vec<String>>,
}

impl Dataset {
    /// Creates a dataset from row-major observations.
    ///
    /// # Returns
    /// * `Ok(Dataset)` - All rows have the same length
    /// * `Err(ModelError::IncorrectLength)` - Some row differs in length from the first
    pub fn new(values: Vec<Vec<f64>>) -> Result<Self> {
        let width = values.first().map_or(0, Vec::len);
        for (i, row) in values.iter().enumerate() {
            if row.len() != width {
                return Err(ModelError::incorrect_length(format!(
                    "row {} has {} features, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
        }
        Ok(Self {
            values,
            names: None,
        })
    }

    /// Creates a dataset with named features.
    ///
    /// Names are an optional side-channel with no effect on computation.
    /// Missing trailing names fall back to positional `x{i}` labels; extra
    /// names beyond the feature count are ignored.
    pub fn with_names(values: Vec<Vec<f64>>, names: Vec<String>) -> Result<Self> {
        let mut data = Self::new(values)?;
        data.names = Some(names);
        Ok(data)
    }

    /// Number of observations (rows).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when the dataset holds no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of features per observation.
    pub fn feature_count(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    /// The observations in row-major order.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Copies feature `j` out of every observation, in row order.
    ///
    /// # Panics
    /// - If `j >= self.feature_count()`.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.values.iter().map(|row| row[j]).collect()
    }

    /// One name per feature: the provided names where present, positional
    /// `x{i}` labels otherwise.
    pub fn feature_names(&self) -> Vec<String> {
        let width = self.feature_count();
        (0..width)
            .map(|i| {
                self.names
                    .as_ref()
                    .and_then(|names| names.get(i).cloned())
                    .unwrap_or_else(|| format!("x{}", i))
            })
            .collect()
    }
}
