//! Extractor configuration for inbound HTTP adapters.
//!
//! Actix rejects malformed bodies and path segments before a handler runs.
//! These handlers turn those rejections into the standard error body with a
//! 400 status instead of actix's plain-text default.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Validation error codes for extractor failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCode {
    MalformedBody,
    UnsupportedContentType,
    InvalidPathSegment,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MalformedBody => "malformed_body",
            ErrorCode::UnsupportedContentType => "unsupported_content_type",
            ErrorCode::InvalidPathSegment => "invalid_path_segment",
        }
    }
}

fn json_rejection(err: &JsonPayloadError) -> Error {
    let (message, code) = match err {
        JsonPayloadError::ContentType => (
            "Request body must be application/json".to_owned(),
            ErrorCode::UnsupportedContentType,
        ),
        other => (
            format!("Malformed request body: {other}"),
            ErrorCode::MalformedBody,
        ),
    };
    Error::invalid_request(message).with_details(json!({ "code": code.as_str() }))
}

fn path_rejection(err: &PathError, req: &HttpRequest) -> Error {
    Error::invalid_request(format!("Invalid path parameter: {err}")).with_details(json!({
        "code": ErrorCode::InvalidPathSegment.as_str(),
        "path": req.path(),
    }))
}

/// JSON extractor settings mapping body failures to 400 responses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        debug!(error = %err, path = req.path(), "rejected request body");
        json_rejection(&err).into()
    })
}

/// Path extractor settings mapping unparsable segments to 400 responses.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        debug!(error = %err, path = req.path(), "rejected path parameter");
        path_rejection(&err, req).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    fn content_type_rejection_is_reported_separately() {
        let err = json_rejection(&JsonPayloadError::ContentType);

        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({ "code": "unsupported_content_type" }))
        );
    }

    #[rstest]
    fn path_rejection_carries_the_request_path() {
        let req = TestRequest::get()
            .uri("/api/v1/users/abc")
            .to_http_request();
        let parse_error = "abc".parse::<i64>().expect_err("not a number");
        let err = path_rejection(
            &PathError::Deserialize(serde::de::Error::custom(parse_error)),
            &req,
        );

        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|details| details.get("path")),
            Some(&json!("/api/v1/users/abc"))
        );
    }
}
