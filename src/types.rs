//! Wire types for the labeling backend and shared UI data

use serde::{Deserialize, Serialize};

/// `GET /api/current-image`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentImageResponse {
    pub image: String,
}

/// `POST /api/submit-label` body. The label stays a string on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitLabelRequest<'a> {
    pub label: &'a str,
}

/// `POST /api/submit-label` response
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitLabelResponse {
    pub message: String,
}

/// Entry of `GET /api/history`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub image: String,
    #[serde(deserialize_with = "deserialize_whole_number")]
    pub label: i64,
}

/// Accept `3` or `3.0`; a fractional label is a malformed entry.
fn deserialize_whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireNumber {
        Int(i64),
        Float(f64),
    }

    match WireNumber::deserialize(deserializer)? {
        WireNumber::Int(n) => Ok(n),
        WireNumber::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        WireNumber::Float(f) => Err(serde::de::Error::custom(format!(
            "label {f} is not a whole number"
        ))),
    }
}

/// Error body the backend attaches to 4xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Decoded RGBA pixels ready for texture upload
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
}

/// The item currently awaiting a label
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Bumped on every successful load so views know to re-upload
    pub generation: u64,
    pub image: DecodedImage,
}

/// A previously labeled sample. `image` is `None` when the payload didn't decode.
#[derive(Debug, Clone)]
pub struct HistoryItem {
    pub image: Option<DecodedImage>,
    pub label: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Blocking notification shown until the user dismisses it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}
