//! Accuracy chart loading

use super::controller::{Controller, Event};
use crate::api::{ApiError, Backend};
use crate::chart::AccuracyChart;
use crate::constants::*;
use crate::types::*;
use std::sync::Arc;
use tracing::{debug, error};

impl<B: Backend> Controller<B> {
    pub fn load_accuracy_chart(&mut self) {
        let backend = Arc::clone(&self.backend);
        self.spawn(async move { Event::AccuracyScores(backend.accuracy_scores().await) });
    }

    /// First success creates the chart; later ones update it in place.
    pub(crate) fn apply_accuracy_scores(&mut self, result: Result<Vec<f64>, ApiError>) {
        let scores = match result {
            Ok(scores) => scores,
            Err(e) => {
                error!(endpoint = ACCURACY_SCORES_PATH, error = %e, "Failed to load accuracy scores");
                self.notify(Notice::error(MSG_CHART_FAILED));
                return;
            }
        };

        if let Some(chart) = self.chart.as_mut() {
            chart.update(scores);
            debug!(id = chart.id(), revision = chart.revision(), points = chart.scores().len(), "Chart updated");
        } else {
            let id = self.next_chart_id;
            self.next_chart_id += 1;
            debug!(id, points = scores.len(), "Chart created");
            self.chart = Some(AccuracyChart::new(id, scores));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::controller::fake::*;
    use super::*;

    #[test]
    fn first_load_creates_chart_with_query_labels() {
        let backend = FakeBackend::default();
        *backend.scores.lock().unwrap() = Ok(vec![0.81, 0.84, 0.86]);
        let mut h = Harness::new(backend);
        h.controller.load_accuracy_chart();
        h.settle();

        let chart = h.controller.chart.as_ref().unwrap();
        assert_eq!(chart.labels(), &["Query 1", "Query 2", "Query 3"]);
        assert_eq!(chart.scores(), &[0.81, 0.84, 0.86]);
    }

    #[test]
    fn reload_updates_the_same_chart() {
        let backend = FakeBackend::default();
        *backend.scores.lock().unwrap() = Ok(vec![0.5, 0.6]);
        let mut h = Harness::new(backend);
        h.controller.load_accuracy_chart();
        h.settle();
        let first_id = h.controller.chart.as_ref().unwrap().id();

        *h.backend.scores.lock().unwrap() = Ok(vec![0.5, 0.6, 0.65, 0.7, 0.72]);
        h.controller.load_accuracy_chart();
        h.settle();

        let chart = h.controller.chart.as_ref().unwrap();
        assert_eq!(chart.id(), first_id);
        assert_eq!(chart.revision(), 1);
        assert_eq!(chart.labels().len(), 5);
        assert_eq!(chart.labels()[4], "Query 5");
        // Only one chart was ever created
        assert_eq!(h.controller.next_chart_id, first_id + 1);
    }

    #[test]
    fn failure_keeps_prior_chart() {
        let backend = FakeBackend::default();
        *backend.scores.lock().unwrap() = Ok(vec![0.9]);
        let mut h = Harness::new(backend);
        h.controller.load_accuracy_chart();
        h.settle();

        *h.backend.scores.lock().unwrap() = Err(404);
        h.controller.load_accuracy_chart();
        h.settle();

        let chart = h.controller.chart.as_ref().unwrap();
        assert_eq!(chart.scores(), &[0.9]);
        assert_eq!(chart.revision(), 0);
        assert_eq!(h.notice_messages(), vec![MSG_CHART_FAILED]);
    }

    #[test]
    fn failure_before_any_chart_leaves_none() {
        let backend = FakeBackend::default();
        *backend.scores.lock().unwrap() = Err(404);
        let mut h = Harness::new(backend);
        h.controller.load_accuracy_chart();
        h.settle();
        assert!(h.controller.chart.is_none());
    }
}
