//! Fulfillment operations.

use std::sync::Arc;

use serde::Deserialize;

use crate::clients::graphql::GraphqlClient;

use super::errors::{check_user_errors, ResourceError};
use super::types::FulfillmentInput;
use super::MutationPayload;

const FULFILLMENT_CREATE_MUTATION: &str = "\
mutation fulfillmentCreateV2($fulfillment: FulfillmentV2Input!) {
    fulfillmentCreateV2(fulfillment: $fulfillment) {
        fulfillment {
            id
            status
        }
        userErrors {
            field
            message
        }
    }
}";

/// Service for fulfillment operations.
#[derive(Debug, Clone)]
pub struct FulfillmentService {
    client: Arc<GraphqlClient>,
}

impl FulfillmentService {
    pub(crate) fn new(client: Arc<GraphqlClient>) -> Self {
        Self { client }
    }

    /// Creates a fulfillment for one or more fulfillment orders.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UserErrors`] when the API rejects the input,
    /// and [`ResourceError::Graphql`] when the mutation fails.
    pub async fn create(&self, input: FulfillmentInput) -> Result<(), ResourceError> {
        #[derive(Deserialize)]
        struct CreateData {
            #[serde(rename = "fulfillmentCreateV2")]
            payload: MutationPayload,
        }

        let data: CreateData = self
            .client
            .mutate(
                FULFILLMENT_CREATE_MUTATION,
                serde_json::json!({ "fulfillment": input }),
            )
            .await?;
        check_user_errors("fulfillmentCreateV2", data.payload.user_errors)
    }
}
