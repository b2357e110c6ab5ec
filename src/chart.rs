//! Accuracy chart model
//!
//! Holds what the plot draws: one "Accuracy" dataset over positional
//! "Query N" labels. The chart is created once and then updated in place, so
//! its `id` (and the plot state keyed on it) survives every refresh.

use crate::constants::{ACCURACY_MAX, ACCURACY_MIN};
use std::sync::Arc;

pub const DATASET_NAME: &str = "Accuracy";

#[derive(Debug, Clone)]
pub struct AccuracyChart {
    id: u64,
    labels: Arc<[String]>,
    scores: Vec<f64>,
    revision: u64,
}

impl AccuracyChart {
    pub fn new(id: u64, scores: Vec<f64>) -> Self {
        Self {
            id,
            labels: query_labels(scores.len()).into(),
            scores,
            revision: 0,
        }
    }

    /// Replace labels and data, keeping the chart's identity.
    pub fn update(&mut self, scores: Vec<f64>) {
        self.labels = query_labels(scores.len()).into();
        self.scores = scores;
        self.revision += 1;
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Shared handle to the labels for plot formatters that outlive the borrow.
    pub fn shared_labels(&self) -> Arc<[String]> {
        Arc::clone(&self.labels)
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Plot points; x is the 1-based query number.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.scores
            .iter()
            .enumerate()
            .map(|(i, &score)| [(i + 1) as f64, score])
            .collect()
    }

    pub fn y_bounds() -> (f64, f64) {
        (ACCURACY_MIN, ACCURACY_MAX)
    }
}

/// Label for an x value in a label list, if it lands exactly on a query.
pub fn label_at(labels: &[String], x: f64) -> Option<&str> {
    if x.fract() != 0.0 || x < 1.0 {
        return None;
    }
    labels.get(x as usize - 1).map(String::as_str)
}

/// "Query 1".."Query n"
pub fn query_labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Query {}", i + 1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_positional_and_one_based() {
        let chart = AccuracyChart::new(1, vec![0.8, 0.82, 0.85]);
        assert_eq!(chart.labels(), &["Query 1", "Query 2", "Query 3"]);
        assert_eq!(chart.points(), vec![[1.0, 0.8], [2.0, 0.82], [3.0, 0.85]]);
    }

    #[test]
    fn update_replaces_data_and_keeps_identity() {
        let mut chart = AccuracyChart::new(7, vec![0.5]);
        chart.update(vec![0.5, 0.6, 0.7, 0.9]);
        assert_eq!(chart.id(), 7);
        assert_eq!(chart.revision(), 1);
        assert_eq!(chart.labels().len(), 4);
        assert_eq!(chart.labels()[3], "Query 4");
        assert_eq!(chart.scores(), &[0.5, 0.6, 0.7, 0.9]);
    }

    #[test]
    fn update_can_shrink_the_series() {
        let mut chart = AccuracyChart::new(1, vec![0.1, 0.2, 0.3]);
        chart.update(vec![]);
        assert!(chart.labels().is_empty());
        assert!(chart.points().is_empty());
    }

    #[test]
    fn label_lookup_only_hits_query_positions() {
        let chart = AccuracyChart::new(1, vec![0.4, 0.6]);
        assert_eq!(label_at(chart.labels(), 2.0), Some("Query 2"));
        assert_eq!(label_at(chart.labels(), 1.5), None);
        assert_eq!(label_at(chart.labels(), 0.0), None);
        assert_eq!(label_at(chart.labels(), 3.0), None);
    }

    #[test]
    fn shared_labels_follow_updates_without_copying() {
        let mut chart = AccuracyChart::new(1, vec![0.4, 0.6]);
        let before = chart.shared_labels();
        assert!(Arc::ptr_eq(&before, &chart.shared_labels()));

        chart.update(vec![0.4, 0.6, 0.7]);
        let after = chart.shared_labels();
        assert_eq!(before.len(), 2);
        assert_eq!(label_at(&after, 3.0), Some("Query 3"));
    }
}
