//! GraphQL client types for the Shopify Admin API.
//!
//! This module provides the higher-level GraphQL client used by the bulk
//! engine and the resource services:
//!
//! - [`GraphqlClient`]: Executes queries/mutations and decodes `data`
//! - [`GraphqlError`]: GraphQL-specific error types
//! - [`UserError`]: The mutation-level `userErrors` convention

mod client;
mod errors;

pub use client::GraphqlClient;
pub use errors::GraphqlError;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user-level error reported inside a mutation payload.
///
/// Shopify mutations return validation failures with HTTP 200 inside the
/// payload's `userErrors` field rather than as GraphQL errors. Resource
/// services unwrap these and surface them as typed errors.
///
/// # Example
///
/// ```rust
/// use shopify_graphql::clients::graphql::UserError;
///
/// let error: UserError = serde_json::from_str(
///     r#"{"field":["input","title"],"message":"Title can't be blank"}"#,
/// ).unwrap();
/// assert_eq!(error.message, "Title can't be blank");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserError {
    /// The input path the error applies to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Vec<String>>,

    /// The human-readable error message.
    pub message: String,
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) if !field.is_empty() => {
                write!(f, "{}: {}", field.join("."), self.message)
            }
            _ => f.write_str(&self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_display_includes_field_path() {
        let error = UserError {
            field: Some(vec!["input".to_string(), "title".to_string()]),
            message: "can't be blank".to_string(),
        };
        assert_eq!(error.to_string(), "input.title: can't be blank");
    }

    #[test]
    fn test_user_error_display_without_field() {
        let error = UserError {
            field: None,
            message: "Something went wrong".to_string(),
        };
        assert_eq!(error.to_string(), "Something went wrong");
    }

    #[test]
    fn test_user_error_deserializes_null_field() {
        let error: UserError =
            serde_json::from_str(r#"{"field":null,"message":"oops"}"#).unwrap();
        assert!(error.field.is_none());
    }
}
