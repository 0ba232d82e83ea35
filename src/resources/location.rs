//! Location operations.

use std::sync::Arc;

use serde::Deserialize;

use crate::clients::graphql::GraphqlClient;

use super::errors::ResourceError;
use super::types::Location;

const LOCATION_GET_QUERY: &str = "\
query location($id: ID!) {
    location(id: $id) {
        id
        name
    }
}";

/// Service for location operations.
#[derive(Debug, Clone)]
pub struct LocationService {
    client: Arc<GraphqlClient>,
}

impl LocationService {
    pub(crate) fn new(client: Arc<GraphqlClient>) -> Self {
        Self { client }
    }

    /// Fetches a location by id.
    ///
    /// Returns `Ok(None)` when no location exists with that id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Graphql`] when the query fails.
    pub async fn get(&self, id: &str) -> Result<Option<Location>, ResourceError> {
        #[derive(Deserialize)]
        struct LocationData {
            location: Option<Location>,
        }

        let data: LocationData = self
            .client
            .query(LOCATION_GET_QUERY, serde_json::json!({ "id": id }))
            .await?;
        Ok(data.location)
    }
}
