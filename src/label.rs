//! Client-side label validation

use std::fmt;

/// A label that passed validation.
///
/// Keeps the trimmed text exactly as the user typed it, since that is what
/// goes over the wire. Anything numeric in 0-9 passes, fractions included;
/// the backend decides whether it can use the value.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    text: String,
    value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("label is empty")]
    Empty,
    #[error("label {0:?} is not a number")]
    NotANumber(String),
    #[error("label {0:?} is outside 0-9")]
    OutOfRange(String),
}

impl Label {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 9;

    /// Trim and validate raw input. Never touches the network.
    pub fn parse(raw: &str) -> Result<Self, LabelError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(LabelError::Empty);
        }

        let value = parse_number(text).ok_or_else(|| LabelError::NotANumber(text.to_string()))?;
        if !(f64::from(Self::MIN)..=f64::from(Self::MAX)).contains(&value) {
            return Err(LabelError::OutOfRange(text.to_string()));
        }

        Ok(Self {
            text: text.to_string(),
            value,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Numeric value of the label, e.g. 3.5 for "3.5"
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Decimal or scientific notation, plus the unsigned `0x`/`0b`/`0o` integer
/// literals a browser number field would take. NaN is not a number here.
fn parse_number(text: &str) -> Option<f64> {
    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0b" | "0B") => Some(2),
        Some("0o" | "0O") => Some(8),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&text[2..], radix).ok().map(|v| v as f64);
    }

    text.parse::<f64>().ok().filter(|v| !v.is_nan())
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
