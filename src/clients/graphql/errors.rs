//! GraphQL-specific error types.
//!
//! - [`GraphqlError::Http`]: Wraps underlying HTTP errors
//! - [`GraphqlError::Errors`]: An `errors` array returned with HTTP 200
//! - [`GraphqlError::MissingData`]: A response without a `data` object
//! - [`GraphqlError::Decode`]: `data` did not match the expected shape

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for GraphQL operations.
///
/// # Example
///
/// ```rust
/// use checkout_shipping::clients::graphql::GraphqlError;
/// use checkout_shipping::clients::{HttpError, HttpResponseError};
///
/// let http_error = HttpError::Response(HttpResponseError {
///     code: 401,
///     message: r#"{"error":"Unauthorized"}"#.to_string(),
///     debug_id: None,
/// });
/// let graphql_error: GraphqlError = http_error.into();
/// assert!(graphql_error.to_string().contains("Unauthorized"));
/// ```
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred.
    ///
    /// Includes network errors, non-2xx responses, and retry exhaustion.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server answered with a GraphQL `errors` array.
    #[error("GraphQL request failed: {}", messages.join("; "))]
    Errors {
        /// The `message` of each reported error.
        messages: Vec<String>,
    },

    /// The response carried neither `errors` nor `data`.
    #[error("GraphQL response did not contain data")]
    MissingData,

    /// The `data` object could not be decoded.
    #[error("Failed to decode GraphQL data: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GraphqlError {
    /// The correlation ID of the failing HTTP response, if any.
    #[must_use]
    pub fn debug_id(&self) -> Option<&str> {
        match self {
            Self::Http(e) => e.debug_id(),
            Self::Errors { .. } | Self::MissingData | Self::Decode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpResponseError, MaxHttpRetriesExceededError};

    #[test]
    fn test_graphql_error_http_variant_wraps_http_error() {
        let http_error = HttpError::Response(HttpResponseError {
            code: 404,
            message: r#"{"error":"Not Found"}"#.to_string(),
            debug_id: Some("abc-123".to_string()),
        });

        let graphql_error = GraphqlError::Http(http_error);
        assert!(graphql_error.to_string().contains("Not Found"));
        assert_eq!(graphql_error.debug_id(), Some("abc-123"));
    }

    #[test]
    fn test_errors_variant_joins_messages() {
        let error = GraphqlError::Errors {
            messages: vec!["ORDER_NOT_FOUND".to_string(), "try again".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "GraphQL request failed: ORDER_NOT_FOUND; try again"
        );
        assert_eq!(error.debug_id(), None);
    }

    #[test]
    fn test_http_error_wraps_max_retries_exceeded() {
        let http_error = HttpError::MaxRetries(MaxHttpRetriesExceededError {
            code: 429,
            tries: 3,
            message: r#"{"error":"Rate limited"}"#.to_string(),
            debug_id: None,
        });

        let message = GraphqlError::from(http_error).to_string();
        assert!(message.contains("Exceeded maximum retry count"));
        assert!(message.contains('3'));
    }
}
