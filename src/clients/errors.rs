//! HTTP-specific error types.
//!
//! This module contains error types for the HTTP transport layer underneath
//! the GraphQL client.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_graphql::clients::HttpError;
//!
//! match client.post_json("graphql.json", &body).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(HttpError::Network(e)) => {
//!         println!("Network error: {}", e);
//!     }
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// The message field carries the raw response body; the `error_reference`
/// carries the `X-Request-Id` header when Shopify supplied one, to support
/// error reporting.
///
/// # Example
///
/// ```rust
/// use shopify_graphql::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"errors":"Not found"}"#.to_string(),
///     error_reference: Some("abc-123".to_string()),
/// };
///
/// println!("Status {}: {}", error.code, error.message);
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body, verbatim.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Unified error type for all HTTP-related errors.
///
/// This enum provides a single error type for HTTP operations. Use pattern
/// matching to handle specific error types.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_message_is_body() {
        let error = HttpResponseError {
            code: 404,
            message: r#"{"errors":"Not Found"}"#.to_string(),
            error_reference: None,
        };
        assert_eq!(error.to_string(), r#"{"errors":"Not Found"}"#);
    }

    #[test]
    fn test_http_response_error_keeps_request_id() {
        let error = HttpResponseError {
            code: 500,
            message: "Internal Server Error".to_string(),
            error_reference: Some("abc-123".to_string()),
        };
        assert_eq!(error.error_reference.as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let http_error: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            message: "test".to_string(),
            error_reference: None,
        };
        let _ = http_error;
    }
}
