//! Header validation errors.
//!
//! The lenient parser never surfaces these: it degrades every malformed value
//! to "absent". They exist for outer layers that prefer to reject a
//! malformed request outright, via
//! [`ConditionalsParser::parse_strict`](crate::ConditionalsParser::parse_strict).

use http::HeaderName;
use thiserror::Error;

/// A recognized conditional header carried a value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderValidationError {
    /// The value is valid UTF-8 but not a value this parser accepts.
    #[error("invalid {name} header value {value:?}: {reason}")]
    InvalidValue {
        /// Header name.
        name: HeaderName,
        /// Offending value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// The value contains bytes outside visible ASCII.
    #[error("{name} header value contains non-ASCII bytes")]
    NonAscii {
        /// Header name.
        name: HeaderName,
    },
}

impl HeaderValidationError {
    /// Name of the offending header.
    pub fn name(&self) -> &HeaderName {
        match self {
            HeaderValidationError::InvalidValue { name, .. } => name,
            HeaderValidationError::NonAscii { name } => name,
        }
    }

    /// Offending value, when it could be decoded.
    pub fn value(&self) -> Option<&str> {
        match self {
            HeaderValidationError::InvalidValue { value, .. } => Some(value),
            HeaderValidationError::NonAscii { .. } => None,
        }
    }

    pub(crate) fn invalid(name: HeaderName, value: &str, reason: &'static str) -> Self {
        HeaderValidationError::InvalidValue {
            name,
            value: value.to_owned(),
            reason,
        }
    }
}
