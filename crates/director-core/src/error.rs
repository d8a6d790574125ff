//! Error types for Director operations.
//!
//! This module provides the error type shared by every Director crate. Domain
//! failures (unknown object types, malformed names, ambiguous identities,
//! rejected requests) are kept apart from transport and configuration failures
//! so callers can tell a local mistake from a server answer.

use thiserror::Error;

/// Main error type for Director operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Object type token is not part of the supported taxonomy
    #[error("Icinga Director object type \"{0}\" does not exist")]
    UnsupportedObjectType(String),

    /// Operation mode token is not recognized
    #[error("API request mode \"{0}\" does not exist")]
    UnsupportedMode(String),

    /// Composite `host!service` name without exactly one separator
    #[error("Service object must have form \"hostname!servicename\", got \"{0}\"")]
    MalformedCompositeName(String),

    /// Indirect identity lookup did not yield exactly one object
    #[error("Expected exactly one {object_type} named \"{name}\", found {matches}")]
    AmbiguousOrMissingIdentity {
        /// Object type that was looked up
        object_type: String,
        /// Name that was searched for
        name: String,
        /// Number of objects carrying that name
        matches: usize,
    },

    /// Director answered with a status outside 200-299
    #[error("Request \"{url}\" failed with status {status}: {body}")]
    RequestFailed {
        /// Request URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Attribute would overwrite a payload key under the reject merge policy
    #[error("Attribute \"{0}\" collides with an existing payload key")]
    AttributeCollision(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Operation timed out
    #[error("Timeout waiting for Director: {0}")]
    Timeout(String),

    /// Director could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Invalid endpoint URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Response body is not valid JSON
    #[error("Failed to parse Director response: {0}")]
    ParseError(String),

    /// Response JSON does not have the expected shape
    #[error("Unexpected Director response: {0}")]
    UnexpectedResponse(String),
}

/// Specialized result type for Director operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedObjectType(_) => "UNSUPPORTED_OBJECT_TYPE",
            Self::UnsupportedMode(_) => "UNSUPPORTED_MODE",
            Self::MalformedCompositeName(_) => "MALFORMED_COMPOSITE_NAME",
            Self::AmbiguousOrMissingIdentity { .. } => "AMBIGUOUS_OR_MISSING_IDENTITY",
            Self::RequestFailed { .. } => "REQUEST_FAILED",
            Self::AttributeCollision(_) => "ATTRIBUTE_COLLISION",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::UnexpectedResponse(_) => "UNEXPECTED_RESPONSE",
        }
    }

    /// HTTP status carried by a [`Error::RequestFailed`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the error was raised before any request left the process.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedObjectType(_)
                | Self::UnsupportedMode(_)
                | Self::MalformedCompositeName(_)
                | Self::AttributeCollision(_)
                | Self::ConfigError(_)
                | Self::ValidationError(_)
                | Self::InvalidEndpoint(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}
