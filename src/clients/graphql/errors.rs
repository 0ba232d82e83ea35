//! GraphQL-specific error types.
//!
//! This module contains error types for GraphQL API operations: wrapped HTTP
//! errors, top-level GraphQL response errors, and typed-decode failures.
//!
//! Mutation-level `userErrors` are not represented here; they are part of
//! each mutation's payload and are unwrapped by the resource services.

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for GraphQL API operations.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_graphql::clients::graphql::GraphqlError;
///
/// match client.query::<ShopQuery>(QUERY, serde_json::json!({})).await {
///     Ok(data) => println!("Shop: {}", data.shop.name),
///     Err(GraphqlError::Response { errors }) => {
///         println!("GraphQL errors: {errors:?}");
///     }
///     Err(e) => println!("Transport error: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred.
    ///
    /// This variant wraps [`HttpError`] for unified error handling.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response carried top-level GraphQL errors.
    ///
    /// Shopify returns these with HTTP 200 in the body's `errors` field,
    /// e.g. for syntax errors, unknown fields, or throttling.
    #[error("GraphQL errors: {}", errors.join("; "))]
    Response {
        /// The error messages, in response order.
        errors: Vec<String>,
    },

    /// The `data` payload could not be decoded into the requested type.
    #[error("Failed to decode GraphQL response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response carried neither `data` nor `errors`.
    #[error("GraphQL response is missing the 'data' field")]
    MissingData,
}
