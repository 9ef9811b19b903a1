use serde::{Deserialize, Serialize};
use std::fmt;

/// A submitted answer exactly as the client provided it.
///
/// The wire contract accepts either a JSON number or a JSON string for
/// `user_answer`; the untagged encoding preserves that distinction through
/// storage and back out in responses. Grading always goes through
/// [`RawAnswer::as_number`] so the raw value itself is never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAnswer {
    Number(f64),
    Text(String),
}

impl RawAnswer {
    /// Coerces the raw value to a finite number, if it is one.
    ///
    /// Strings are trimmed and parsed as `f64`, so `"15"`, `"15.0"` and
    /// `"015"` all coerce to 15. Whitespace-only strings, unparseable
    /// strings, and non-finite values yield `None`; a value that cannot be
    /// coerced is graded incorrect, never rejected.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n).filter(|v| v.is_finite()),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
            }
        }
    }

    /// True when the value coerces to a number.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }
}

impl fmt::Display for RawAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for RawAnswer {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawAnswer {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawAnswer {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
