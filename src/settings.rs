//! User settings stored as settings.json in the app data directory

use crate::constants::{BACKEND_URL_ENV, DEFAULT_BACKEND_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Labeling backend
    pub backend_url: String,

    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Backend URL for this run. The environment wins over the file and is
    /// never written back.
    pub fn effective_backend_url(&self) -> String {
        self.backend_url_with_override(std::env::var(BACKEND_URL_ENV).ok())
    }

    fn backend_url_with_override(&self, env_value: Option<String>) -> String {
        match env_value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(url) => {
                info!(url = %url, "Backend URL overridden from environment");
                url
            }
            None if self.backend_url.trim().is_empty() => DEFAULT_BACKEND_URL.to_string(),
            None => self.backend_url.clone(),
        }
    }
}
