//! Labeling session controller
//!
//! Owns every piece of session UI state. Network calls run as tasks on the
//! tokio runtime and report back through a channel; `poll` applies the results
//! on the UI thread in arrival order, so all mutation happens in one place.

use crate::api::{ApiError, Backend};
use crate::chart::AccuracyChart;
use crate::types::*;
use eframe::egui;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{mpsc, Arc};
use tracing::{debug, error, info};

/// Completed backend call, delivered to the UI thread.
pub(crate) enum Event {
    CurrentImage(Result<DecodedImage, ApiError>),
    LabelSubmitted(Result<SubmitLabelResponse, ApiError>),
    History(Result<Vec<HistoryItem>, ApiError>),
    AccuracyScores(Result<Vec<f64>, ApiError>),
    /// The task panicked or was aborted before producing its event
    TaskFailed(String),
}

pub struct Controller<B: Backend> {
    pub(crate) backend: Arc<B>,
    runtime: tokio::runtime::Handle,
    events_tx: mpsc::Sender<Event>,
    events_rx: mpsc::Receiver<Event>,
    repaint: Option<egui::Context>,
    in_flight: usize,
    // Session state
    pub(crate) label_input: String,
    pub(crate) current_image: Option<LoadedImage>,
    pub(crate) image_generation: u64,
    pub(crate) history: Vec<HistoryItem>,
    pub(crate) history_generation: u64,
    pub(crate) chart: Option<AccuracyChart>,
    pub(crate) next_chart_id: u64,
    pub(crate) notices: VecDeque<Notice>,
}

impl<B: Backend> Controller<B> {
    pub fn new(backend: Arc<B>, runtime: tokio::runtime::Handle) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            backend,
            runtime,
            events_tx,
            events_rx,
            repaint: None,
            in_flight: 0,
            label_input: String::new(),
            current_image: None,
            image_generation: 0,
            history: Vec::new(),
            history_generation: 0,
            chart: None,
            next_chart_id: 1,
            notices: VecDeque::new(),
        }
    }

    /// Wake the UI whenever a response lands.
    pub fn set_repaint(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    /// Page-ready wiring: the three loads race with no ordering between them.
    pub fn bootstrap(&mut self) {
        info!("Loading session state");
        self.refresh_all();
    }

    pub(crate) fn refresh_all(&mut self) {
        self.load_current_image();
        self.load_history();
        self.load_accuracy_chart();
    }

    /// Requests issued but not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub(crate) fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Event> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.events_tx.clone();
        let repaint = self.repaint.clone();
        // Every spawn must report back once, or in_flight never drains
        let worker = self.runtime.spawn(task);
        self.runtime.spawn(async move {
            let event = match worker.await {
                Ok(event) => event,
                Err(e) => Event::TaskFailed(e.to_string()),
            };
            // Receiver only goes away with the controller
            let _ = tx.send(event);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    /// Apply every response that has arrived since the last frame.
    pub fn poll(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            match event {
                Event::CurrentImage(result) => self.apply_current_image(result),
                Event::LabelSubmitted(result) => self.apply_submission(result),
                Event::History(result) => self.apply_history(result),
                Event::AccuracyScores(result) => self.apply_accuracy_scores(result),
                Event::TaskFailed(reason) => {
                    error!(error = %reason, "Background request failed");
                }
            }
        }
    }

    pub(crate) fn notify(&mut self, notice: Notice) {
        debug!(kind = ?notice.kind, message = %notice.message, "Notice queued");
        self.notices.push_back(notice);
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }
}
