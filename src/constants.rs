//! Application constants and configuration

pub const APP_NAME: &str = "Digit Labeler";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Flask development server default
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const BACKEND_URL_ENV: &str = "DIGIT_LABELER_BACKEND";

// Backend endpoints
pub const CURRENT_IMAGE_PATH: &str = "/api/current-image";
pub const SUBMIT_LABEL_PATH: &str = "/api/submit-label";
pub const HISTORY_PATH: &str = "/api/history";
pub const ACCURACY_SCORES_PATH: &str = "/api/accuracy-scores";

// User-facing notices
pub const MSG_INVALID_LABEL: &str = "Please enter a valid label (0-9).";
pub const MSG_IMAGE_FAILED: &str = "Error loading the current image.";
pub const MSG_SUBMIT_FAILED: &str = "Error submitting the label.";
pub const MSG_HISTORY_FAILED: &str = "Error loading history.";
pub const MSG_CHART_FAILED: &str = "Error loading performance chart.";

/// Accuracy plot y-axis bounds
pub const ACCURACY_MIN: f64 = 0.0;
pub const ACCURACY_MAX: f64 = 1.0;
