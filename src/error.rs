//! Errors raised while compiling patterns or building match records.
//!
//! Not matching is **not** an error: evaluators return `Ok(None)` for that.
//! A [`MatchError`] always means the caller handed over something broken:
//!
//! - [`MatchError::PatternSyntax`] — the pattern itself is malformed and can
//!   never be compiled (e.g. `/users/:` has a parameter marker with no name).
//! - [`MatchError::Decode`] — a captured value carries malformed
//!   percent-encoding, such as `%E0%A4%A` or `%zz`.
//! - [`MatchError::Engine`] — the regex engine gave up while running a
//!   recognizer (backtrack limit).
//!
//! # Examples
//!
//! ```
//! use route_match::{match_path, MatchError};
//!
//! let err = match_path("/users/1", "/users/:", None).unwrap_err();
//! assert!(matches!(err, MatchError::PatternSyntax { .. }));
//! assert!(err.is_syntax());
//! ```

use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T, E = MatchError> = std::result::Result<T, E>;

/// Detailed error variants.
///
/// Implements [`std::error::Error`] and [`Display`](std::fmt::Display).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Malformed pattern, detected at compile time
    PatternSyntax {
        pattern: String,
        /// Byte offset into `pattern` where the problem was found
        index: usize,
        message: String,
    },

    /// Captured parameter value is not valid percent-encoded UTF-8
    Decode {
        name: String,
        value: String,
        message: String,
    },

    /// Regex engine failure while executing a compiled recognizer
    Engine { message: String },
}

impl MatchError {
    pub(crate) fn syntax(pattern: &str, index: usize, message: impl Into<String>) -> Self {
        MatchError::PatternSyntax {
            pattern: pattern.to_string(),
            index,
            message: message.into(),
        }
    }

    pub(crate) fn decode(name: &str, value: &str, message: impl Into<String>) -> Self {
        MatchError::Decode {
            name: name.to_string(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Check if this is a pattern syntax error
    pub fn is_syntax(&self) -> bool {
        matches!(self, MatchError::PatternSyntax { .. })
    }

    /// Check if this is a percent-decoding error
    pub fn is_decode(&self) -> bool {
        matches!(self, MatchError::Decode { .. })
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::PatternSyntax {
                pattern,
                index,
                message,
            } => {
                write!(f, "Invalid pattern '{}' at {}: {}", pattern, index, message)
            }
            MatchError::Decode {
                name,
                value,
                message,
            } => {
                write!(
                    f,
                    "Cannot decode parameter '{}' ('{}'): {}",
                    name, value, message
                )
            }
            MatchError::Engine { message } => {
                write!(f, "Matcher failed: {}", message)
            }
        }
    }
}

impl std::error::Error for MatchError {}

impl From<fancy_regex::Error> for MatchError {
    fn from(err: fancy_regex::Error) -> Self {
        MatchError::Engine {
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
