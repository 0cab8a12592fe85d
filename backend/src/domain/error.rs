//! Domain-level error type.
//!
//! Transport agnostic: inbound adapters map [`ErrorCode`]s to HTTP statuses.
//! Constructors capture the request-scoped trace identifier when one is in
//! scope so error payloads correlate with logs automatically.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::middleware::trace::TraceId;

use super::richtext::RichTextError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// No user matches the supplied email and password.
    InvalidCredentials,
    /// The operation requires an authenticated session.
    NotAuthenticated,
    /// Signup email already present in the directory.
    DuplicateEmail,
    /// A style outside the closed bold/italic/strike/underline universe.
    InvalidStyleSet,
    /// Comment ordinal outside the current thread bounds.
    IndexOutOfRange,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// API error response payload.
///
/// ## Invariants
/// - `message` is non-empty; constructors take it verbatim from the caller.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::duplicate_email("email already registered");
/// assert_eq!(err.code(), ErrorCode::DuplicateEmail);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "duplicate_email")]
    code: ErrorCode,
    #[schema(example = "email already registered")]
    message: String,
    /// Correlation identifier copied from the request's `trace-id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    /// Supplementary structured context, e.g. `{ "field": "email" }`.
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error, capturing the current trace identifier if one is
    /// in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier, if captured.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier, replacing any captured one.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "email" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidCredentials`].
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredentials, message)
    }

    /// Convenience constructor for [`ErrorCode::NotAuthenticated`].
    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotAuthenticated, message)
    }

    /// Convenience constructor for [`ErrorCode::DuplicateEmail`].
    pub fn duplicate_email(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateEmail, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidStyleSet`].
    pub fn invalid_style_set(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidStyleSet, message)
    }

    /// Convenience constructor for [`ErrorCode::IndexOutOfRange`].
    pub fn index_out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IndexOutOfRange, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<RichTextError> for Error {
    fn from(err: RichTextError) -> Self {
        match &err {
            RichTextError::UnknownStyle { style } => Self::invalid_style_set(err.to_string())
                .with_details(json!({ "style": style })),
            RichTextError::EmptyRunText | RichTextError::EmptyRunSequence => {
                Self::invalid_request(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests;
