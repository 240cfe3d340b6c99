//! Validation outcome.

use std::fmt;

use http::StatusCode;

/// Outcome of validating a request against a resource.
///
/// These are the only three results a validation can produce. Callers map
/// them directly to the response status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationStatus {
    /// `200 OK` - produce a full response.
    #[default]
    Ok,
    /// `304 Not Modified` - the representation held by the client is still valid.
    NotModified,
    /// `412 Precondition Failed` - a precondition required by the request was not met.
    PreconditionFailed,
}

impl ValidationStatus {
    /// Returns the numeric HTTP status code.
    #[inline]
    pub const fn code(&self) -> u16 {
        match self {
            ValidationStatus::Ok => 200,
            ValidationStatus::NotModified => 304,
            ValidationStatus::PreconditionFailed => 412,
        }
    }

    /// Returns the status as a string slice.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Ok => "ok",
            ValidationStatus::NotModified => "not_modified",
            ValidationStatus::PreconditionFailed => "precondition_failed",
        }
    }

    /// Returns the canonical reason phrase.
    pub const fn reason(&self) -> &'static str {
        match self {
            ValidationStatus::Ok => "OK",
            ValidationStatus::NotModified => "Not Modified",
            ValidationStatus::PreconditionFailed => "Precondition Failed",
        }
    }

    /// Returns `true` when a response body must be produced.
    pub const fn is_full_response(&self) -> bool {
        matches!(self, ValidationStatus::Ok)
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

impl From<ValidationStatus> for u16 {
    fn from(status: ValidationStatus) -> Self {
        status.code()
    }
}

/// Converts a [`ValidationStatus`] into the matching [`StatusCode`].
///
/// ```
/// use http::StatusCode;
/// use revalidate_core::ValidationStatus;
///
/// let status: StatusCode = ValidationStatus::NotModified.into();
/// assert_eq!(status, StatusCode::NOT_MODIFIED);
/// ```
impl From<ValidationStatus> for StatusCode {
    fn from(status: ValidationStatus) -> Self {
        match status {
            ValidationStatus::Ok => StatusCode::OK,
            ValidationStatus::NotModified => StatusCode::NOT_MODIFIED,
            ValidationStatus::PreconditionFailed => StatusCode::PRECONDITION_FAILED,
        }
    }
}
