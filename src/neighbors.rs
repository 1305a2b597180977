use crate::distance::Metric;
use crate::error::{ModelError, Result};

/// A selected training neighbor: original row index and distance to the
/// query. Transient, produced and consumed within a single prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f64,
}

/// Returns the `k` training rows closest to `query`, ascending by distance.
///
/// Exact distance ties are broken by the lower original row index, so the
/// result is deterministic for a given query and training matrix.
///
/// # Arguments
/// * `query` - The (already standardized) query vector
/// * `rows` - The standardized training matrix, one row per observation
/// * `k` - How many neighbors to return
/// * `metric` - The distance metric to rank rows by
///
/// # Returns
/// * `Ok(neighbors)` - `k` neighbors, ascending by `(distance, index)`
/// * `Err(ModelError::InvalidK)` - `k == 0` or `k > rows.len()`
/// * `Err(ModelError::IncorrectLength)` - Some row's length differs from the query's
pub fn select_neighbors(
    query: &[f64],
    rows: &[Vec<f64>],
    k: usize,
    metric: &dyn Metric,
) -> Result<Vec<Neighbor>> {
    if k == 0 || k > rows.len() {
        return Err(ModelError::invalid_k(format!(
            "k must be in [1, {}], got {}",
            rows.len(),
            k
        )));
    }

    let mut neighbors = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let distance = metric.distance(query, row)?;
        neighbors.push(Neighbor { index, distance });
    }

    neighbors.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.index.cmp(&b.index))
    });
    neighbors.truncate(k);
    Ok(neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Euclidean;

    #[test]
    fn test_k_equals_n_returns_all_rows_ascending() {
        let rows = vec![vec![5.0], vec![1.0], vec![3.0]];
        let neighbors = select_neighbors(&[0.0], &rows, 3, &Euclidean).unwrap();
        let indices: Vec<usize> = neighbors.iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![1, 2, 0]);
        assert!(neighbors.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_ties_broken_by_lower_index() {
        // Rows 0 and 2 are equidistant from the query; row 0 must win.
        let rows = vec![vec![2.0], vec![9.0], vec![-2.0]];
        let neighbors = select_neighbors(&[0.0], &rows, 2, &Euclidean).unwrap();
        assert_eq!(neighbors[0].index, 0);
        assert_eq!(neighbors[1].index, 2);
        assert_eq!(neighbors[0].distance, neighbors[1].distance);
    }

    #[test]
    fn test_k_zero_rejected() {
        let rows = vec![vec![1.0]];
        let result = select_neighbors(&[0.0], &rows, 0, &Euclidean);
        assert!(matches!(result, Err(ModelError::InvalidK(_))));
    }

    #[test]
    fn test_k_larger_than_n_rejected() {
        let rows = vec![vec![1.0], vec![2.0]];
        let result = select_neighbors(&[0.0], &rows, 3, &Euclidean);
        assert!(matches!(result, Err(ModelError::InvalidK(_))));
    }

    #[test]
    fn test_row_length_mismatch_propagates() {
        let rows = vec![vec![1.0, 2.0]];
        let result = select_neighbors(&[0.0], &rows, 1, &Euclidean);
        assert!(matches!(result, Err(ModelError::IncorrectLength(_))));
    }
}
