//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map the
//! [`ErrorCode`] to a status code; the payload itself is serialised as the
//! response body.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::TraceId;
use super::ids::{IdValidationError, ResourceKind};

/// Header carrying the request correlation identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// The request collides with existing state, such as a duplicate username.
    Conflict,
    /// A backing service (usually the database) is unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// Constructors capture the trace identifier in scope, if any, so adapters can
/// correlate the failure with request logs.
///
/// # Examples
/// ```
/// use gym_buddy::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "missing");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create an error with the supplied code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Not-found error for a missing entity.
    ///
    /// # Examples
    /// ```
    /// use gym_buddy::domain::{Error, ResourceKind};
    ///
    /// let err = Error::resource_not_found(ResourceKind::User, 999);
    /// assert_eq!(err.message(), "User not found with ID: 999");
    /// ```
    pub fn resource_not_found(kind: ResourceKind, id: impl Into<i64>) -> Self {
        let id = id.into();
        Self::not_found(format!("{kind} not found with ID: {id}"))
            .with_details(json!({ "resource": kind, "id": id }))
    }

    /// Attach structured details to the error.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach a trace identifier, replacing any captured from scope.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Correlation identifier, when one was in scope.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl From<IdValidationError> for Error {
    fn from(err: IdValidationError) -> Self {
        Self::invalid_request(err.to_string()).with_details(json!({
            "resource": err.kind,
            "value": err.value,
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Constructor and serialisation behaviour.
    use super::*;
    use rstest::rstest;

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    #[rstest]
    #[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
    #[case(Error::not_found("gone"), ErrorCode::NotFound)]
    #[case(Error::conflict("taken"), ErrorCode::Conflict)]
    #[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
    #[case(Error::internal("boom"), ErrorCode::InternalError)]
    fn constructors_set_code(#[case] err: Error, #[case] expected: ErrorCode) {
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    fn resource_not_found_carries_kind_and_id() {
        let err = Error::resource_not_found(ResourceKind::Workout, 42);
        assert_eq!(err.message(), "Workout not found with ID: 42");
        assert_eq!(
            err.details(),
            Some(&json!({ "resource": "workout", "id": 42 }))
        );
    }

    #[rstest]
    fn id_validation_errors_become_invalid_requests() {
        let err: Error = crate::domain::UserId::new(-5)
            .expect_err("negative id")
            .into();
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "User ID must be a positive number");
    }

    #[rstest]
    fn trace_id_is_none_out_of_scope() {
        assert!(Error::internal("boom").trace_id().is_none());
    }

    #[tokio::test]
    async fn trace_id_is_captured_in_scope() {
        let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
        let err = TraceId::scope(trace_id, async { Error::conflict("taken") }).await;
        assert_eq!(err.trace_id(), Some(TRACE_ID));
    }

    #[rstest]
    fn serialises_camel_case_and_skips_empty_fields() {
        let body = serde_json::to_value(Error::invalid_request("bad").with_trace_id("abc"))
            .expect("serialise error");
        assert_eq!(
            body,
            json!({ "code": "invalid_request", "message": "bad", "traceId": "abc" })
        );
    }
}
