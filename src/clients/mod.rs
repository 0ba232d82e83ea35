//! HTTP and GraphQL client types for Admin API communication.
//!
//! This module provides the transport layer for the crate:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpError`] / [`HttpResponseError`]: HTTP-level error types
//! - [`graphql::GraphqlClient`]: The GraphQL client used by every service
//! - [`graphql::GraphqlError`]: GraphQL-specific error types
//! - [`graphql::UserError`]: The mutation `userErrors` convention

mod errors;
pub mod graphql;
mod http_client;

pub use errors::{HttpError, HttpResponseError};
pub use http_client::{HttpClient, JsonResponse, CLIENT_VERSION};

// Re-export GraphQL client types at the clients module level
pub use graphql::{GraphqlClient, GraphqlError, UserError};
