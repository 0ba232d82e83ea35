//! Error types for the resource services.

use crate::bulk::BulkError;
use crate::clients::graphql::{GraphqlError, UserError};
use crate::pagination::PaginationError;
use thiserror::Error;

/// Error type for resource service operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The GraphQL operation itself failed.
    #[error(transparent)]
    Graphql(#[from] GraphqlError),

    /// A bulk-backed listing failed.
    #[error(transparent)]
    Bulk(#[from] BulkError),

    /// The page request was invalid.
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    /// The mutation succeeded at the transport level but the payload carried
    /// user-level validation errors.
    #[error("{operation} returned user errors: {}", errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    UserErrors {
        /// The mutation that reported the errors.
        operation: &'static str,
        /// The reported errors, in payload order.
        errors: Vec<UserError>,
    },
}

/// Fails with [`ResourceError::UserErrors`] when a mutation payload carries
/// any user errors.
pub(super) fn check_user_errors(
    operation: &'static str,
    errors: Vec<UserError>,
) -> Result<(), ResourceError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ResourceError::UserErrors { operation, errors })
    }
}
