//! Recently labeled items

use super::controller::{Controller, Event};
use crate::api::{ApiError, Backend};
use crate::constants::*;
use crate::types::*;
use crate::utils::decode_base64_png;
use std::sync::Arc;
use tracing::{debug, error, warn};

impl<B: Backend> Controller<B> {
    pub fn load_history(&mut self) {
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            let result = backend.history().await.map(|entries| {
                entries
                    .into_iter()
                    .map(|entry| HistoryItem {
                        image: decode_base64_png(&entry.image)
                            .inspect_err(|e| warn!(label = entry.label, error = %e, "Undecodable history image"))
                            .ok(),
                        label: entry.label,
                    })
                    .collect()
            });
            Event::History(result)
        });
    }

    /// Wholesale replacement, no diffing. A failed fetch leaves the old list.
    pub(crate) fn apply_history(&mut self, result: Result<Vec<HistoryItem>, ApiError>) {
        match result {
            Ok(items) => {
                debug!(count = items.len(), "History loaded");
                self.history = items;
                self.history_generation += 1;
            }
            Err(e) => {
                error!(endpoint = HISTORY_PATH, error = %e, "Failed to load history");
                self.notify(Notice::error(MSG_HISTORY_FAILED));
            }
        }
    }
}
