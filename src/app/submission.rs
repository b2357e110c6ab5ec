//! Label submission flow

use super::controller::{Controller, Event};
use crate::api::{ApiError, Backend};
use crate::constants::*;
use crate::label::Label;
use crate::types::*;
use std::sync::Arc;
use tracing::{debug, error, info};

impl<B: Backend> Controller<B> {
    /// Validate the input and send it. Invalid input never reaches the backend.
    pub fn submit_label(&mut self) {
        let label = match Label::parse(&self.label_input) {
            Ok(label) => label,
            Err(e) => {
                debug!(error = %e, "Label rejected");
                self.notify(Notice::error(MSG_INVALID_LABEL));
                return;
            }
        };

        info!(label = %label, "Submitting label");
        let backend = Arc::clone(&self.backend);
        self.spawn(async move { Event::LabelSubmitted(backend.submit_label(label).await) });
    }

    /// Success clears the input and refreshes every region; failure leaves
    /// the input as typed so the user can retry.
    pub(crate) fn apply_submission(&mut self, result: Result<SubmitLabelResponse, ApiError>) {
        match result {
            Ok(resp) => {
                info!(message = %resp.message, "Label accepted");
                self.notify(Notice::info(resp.message));
                self.label_input.clear();
                self.refresh_all();
            }
            Err(e) => {
                error!(endpoint = SUBMIT_LABEL_PATH, error = %e, "Failed to submit label");
                self.notify(Notice::error(MSG_SUBMIT_FAILED));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::controller::fake::*;
    use super::*;

    fn submit(h: &mut Harness, input: &str) {
        h.controller.label_input = input.to_string();
        h.controller.submit_label();
        h.settle();
    }

    #[test]
    fn valid_label_posts_and_refreshes_everything() {
        let backend = FakeBackend::default();
        *backend.submit.lock().unwrap() = Ok("ok".into());
        let mut h = Harness::new(backend);

        submit(&mut h, "7");

        assert_eq!(*h.backend.submitted.lock().unwrap(), vec!["7"]);
        assert_eq!(h.controller.notices.front(), Some(&Notice::info("ok")));
        assert!(h.controller.label_input.is_empty());

        let calls = h.backend.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], "submit_label");
        assert_eq!(h.backend.count("current_image"), 1);
        assert_eq!(h.backend.count("history"), 1);
        assert_eq!(h.backend.count("accuracy_scores"), 1);
    }

    #[test]
    fn refreshes_fire_even_when_they_fail() {
        let backend = FakeBackend::default();
        *backend.submit.lock().unwrap() = Ok("ok".into());
        *backend.image.lock().unwrap() = Err(400);
        *backend.history.lock().unwrap() = Err(500);
        *backend.scores.lock().unwrap() = Err(404);
        let mut h = Harness::new(backend);

        submit(&mut h, "3");

        assert_eq!(h.backend.calls().len(), 4);
        let messages = h.notice_messages();
        assert_eq!(messages[0], "ok");
        assert_eq!(messages.len(), 4);
        assert!(messages.contains(&MSG_IMAGE_FAILED.to_string()));
        assert!(messages.contains(&MSG_HISTORY_FAILED.to_string()));
        assert!(messages.contains(&MSG_CHART_FAILED.to_string()));
    }

    #[test]
    fn out_of_range_label_never_hits_the_network() {
        let mut h = Harness::new(FakeBackend::default());
        submit(&mut h, "15");

        assert!(h.backend.calls().is_empty());
        assert_eq!(h.notice_messages(), vec![MSG_INVALID_LABEL]);
        assert_eq!(h.controller.label_input, "15");
    }

    #[test]
    fn empty_and_non_numeric_labels_are_rejected_locally() {
        let mut h = Harness::new(FakeBackend::default());
        for input in ["", "   ", "x", "4,5", "-2"] {
            submit(&mut h, input);
        }
        assert!(h.backend.calls().is_empty());
        assert_eq!(h.notice_messages(), vec![MSG_INVALID_LABEL; 5]);
    }

    #[test]
    fn whitespace_is_trimmed_before_sending() {
        let mut h = Harness::new(FakeBackend::default());
        submit(&mut h, "  0\t");
        assert_eq!(*h.backend.submitted.lock().unwrap(), vec!["0"]);
    }

    #[test]
    fn fractional_label_is_left_to_the_backend() {
        let backend = FakeBackend::default();
        *backend.submit.lock().unwrap() = Err(500);
        let mut h = Harness::new(backend);

        submit(&mut h, "3.5");

        assert_eq!(*h.backend.submitted.lock().unwrap(), vec!["3.5"]);
        assert_eq!(h.notice_messages(), vec![MSG_SUBMIT_FAILED]);
        assert_eq!(h.controller.label_input, "3.5");
    }

    #[test]
    fn failed_submission_keeps_input_and_skips_refresh() {
        let backend = FakeBackend::default();
        *backend.submit.lock().unwrap() = Err(500);
        let mut h = Harness::new(backend);

        submit(&mut h, "7");

        assert_eq!(h.backend.calls(), vec!["submit_label"]);
        assert_eq!(h.controller.label_input, "7");
        assert_eq!(h.notice_messages(), vec![MSG_SUBMIT_FAILED]);
    }

    #[test]
    fn double_submit_is_not_deduplicated() {
        let mut h = Harness::new(FakeBackend::default());
        h.controller.label_input = "5".into();
        h.controller.submit_label();
        h.controller.submit_label();
        h.settle();

        assert_eq!(h.backend.count("submit_label"), 2);
        assert_eq!(h.backend.count("current_image"), 2);
    }
}
