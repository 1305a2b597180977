use std::collections::BTreeMap;

use crate::neighbors::Neighbor;

/// The aggregated output of a prediction.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Classification: the winning label and the probability of every label
    /// seen among the neighbors.
    Class {
        label: String,
        probabilities: BTreeMap<String, f64>,
    },
    /// Regression: the mean of the neighbor labels.
    Value(f64),
}

/// The result of a single predict call: an outcome plus a confidence score
/// in `[0, 1]`. Confidence summarizes agreement (classification) or spread
/// (regression) among the selected neighbors; it is not a statistical
/// confidence interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub outcome: Outcome,
    pub confidence: f64,
}

/// Aggregates neighbor labels by vote: each distinct label's probability is
/// its neighbor count divided by k.
///
/// The predicted label is the one with the highest probability; exact ties
/// go to the lexicographically smallest label. Confidence is the winning
/// probability.
///
/// # Panics
/// - If `neighbors` is empty.
/// - If some neighbor index does not index `labels`.
pub fn classify(neighbors: &[Neighbor], labels: &[String]) -> Prediction {
    assert!(!neighbors.is_empty(), "no neighbors to aggregate");
    let k = neighbors.len() as f64;

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for neighbor in neighbors {
        *counts.entry(labels[neighbor.index].as_str()).or_insert(0) += 1;
    }

    // Ascending key order plus a strict comparison keeps the smallest label
    // on ties.
    let mut probabilities = BTreeMap::new();
    let mut winner = ("", 0_usize);
    for (&label, &count) in &counts {
        probabilities.insert(label.to_string(), count as f64 / k);
        if count > winner.1 {
            winner = (label, count);
        }
    }

    Prediction {
        outcome: Outcome::Class {
            label: winner.0.to_string(),
            probabilities,
        },
        confidence: winner.1 as f64 / k,
    }
}

/// Aggregates neighbor labels by arithmetic mean.
///
/// Confidence is `1 / (1 + s)` where `s` is the sample standard deviation
/// of the neighbor labels (0 when k == 1), so it decreases with spread and
/// stays in `(0, 1]`.
///
/// # Panics
/// - If `neighbors` is empty.
/// - If some neighbor index does not index `labels`.
pub fn regress(neighbors: &[Neighbor], labels: &[f64]) -> Prediction {
    assert!(!neighbors.is_empty(), "no neighbors to aggregate");
    let k = neighbors.len();

    let values: Vec<f64> = neighbors.iter().map(|n| labels[n.index]).collect();
    let mean = values.iter().sum::<f64>() / k as f64;

    let spread = if k > 1 {
        let ssq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ssq / (k as f64 - 1.0)).sqrt()
    } else {
        0.0
    };

    Prediction {
        outcome: Outcome::Value(mean),
        confidence: 1.0 / (1.0 + spread),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn neighbors_of(indices: &[usize]) -> Vec<Neighbor> {
        indices
            .iter()
            .map(|&index| Neighbor {
                index,
                distance: 0.0,
            })
            .collect()
    }

    fn string_labels(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_majority() {
        let labels = string_labels(&["A", "A", "B"]);
        let prediction = classify(&neighbors_of(&[0, 1, 2]), &labels);
        match prediction.outcome {
            Outcome::Class {
                label,
                probabilities,
            } => {
                assert_eq!(label, "A");
                assert_abs_diff_eq!(probabilities["A"], 2.0 / 3.0);
                assert_abs_diff_eq!(probabilities["B"], 1.0 / 3.0);
            }
            other => panic!("expected a class outcome, got {:?}", other),
        }
        assert_abs_diff_eq!(prediction.confidence, 2.0 / 3.0);
    }

    #[test]
    fn test_classify_tie_goes_to_smallest_label() {
        let labels = string_labels(&["B", "A"]);
        let prediction = classify(&neighbors_of(&[0, 1]), &labels);
        match prediction.outcome {
            Outcome::Class { label, .. } => assert_eq!(label, "A"),
            other => panic!("expected a class outcome, got {:?}", other),
        }
        assert_abs_diff_eq!(prediction.confidence, 0.5);
    }

    #[test]
    fn test_classify_unanimous() {
        let labels = string_labels(&["A", "A"]);
        let prediction = classify(&neighbors_of(&[0, 1]), &labels);
        assert_abs_diff_eq!(prediction.confidence, 1.0);
    }

    #[test]
    fn test_regress_mean_and_spread() {
        let labels = vec![10.0, 20.0, 30.0];
        let prediction = regress(&neighbors_of(&[0, 1, 2]), &labels);
        match prediction.outcome {
            Outcome::Value(v) => assert_abs_diff_eq!(v, 20.0),
            other => panic!("expected a value outcome, got {:?}", other),
        }
        // Sample standard deviation of [10, 20, 30] is 10.
        assert_abs_diff_eq!(prediction.confidence, 1.0 / 11.0);
    }

    #[test]
    fn test_regress_single_neighbor_is_fully_confident() {
        let labels = vec![42.0];
        let prediction = regress(&neighbors_of(&[0]), &labels);
        assert_eq!(prediction.outcome, Outcome::Value(42.0));
        assert_abs_diff_eq!(prediction.confidence, 1.0);
    }

    #[test]
    fn test_regress_agreeing_neighbors_are_fully_confident() {
        let labels = vec![7.0, 7.0, 7.0];
        let prediction = regress(&neighbors_of(&[0, 1, 2]), &labels);
        assert_abs_diff_eq!(prediction.confidence, 1.0);
    }
}
