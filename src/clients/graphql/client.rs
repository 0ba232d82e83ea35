//! GraphQL client implementation for the Shopify Admin API.
//!
//! This module provides the [`GraphqlClient`] type for executing GraphQL
//! queries and mutations against the Shopify Admin API and decoding the
//! `data` payload into caller-supplied types.

use serde::de::DeserializeOwned;

use crate::clients::graphql::GraphqlError;
use crate::clients::HttpClient;
use crate::config::{ApiVersion, ClientConfig};

/// GraphQL API client for the Shopify Admin API.
///
/// Provides [`query`](Self::query) and [`mutate`](Self::mutate) for executing
/// operations with variable support and typed decoding of the `data` payload.
/// This is the only network surface the rest of the crate depends on: the
/// bulk engine and the resource services both call through it.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async
/// tasks behind an `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_graphql::{ClientConfig, ShopDomain, AccessToken};
/// use shopify_graphql::clients::graphql::GraphqlClient;
/// use serde_json::json;
///
/// let config = ClientConfig::builder()
///     .shop(ShopDomain::new("my-store").unwrap())
///     .access_token(AccessToken::new("token").unwrap())
///     .build()
///     .unwrap();
///
/// let client = GraphqlClient::new(&config);
///
/// #[derive(serde::Deserialize)]
/// struct ShopData {
///     shop: Shop,
/// }
///
/// let data: ShopData = client
///     .query("query { shop { name } }", json!({}))
///     .await?;
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    /// The API version being used.
    api_version: ApiVersion,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a new GraphQL client for the given configuration.
    ///
    /// The base path is `/admin/api/{version}` using the configured API
    /// version. This constructor is infallible.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let api_version = config.api_version().clone();
        let base_path = format!("/admin/api/{api_version}");
        let http_client = HttpClient::new(base_path, config);

        Self {
            http_client,
            api_version,
        }
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the underlying reqwest client.
    ///
    /// The bulk result fetcher reuses it for downloads from pre-signed
    /// result URLs, which live outside the Admin API base path.
    #[must_use]
    pub(crate) const fn http(&self) -> &reqwest::Client {
        self.http_client.inner()
    }

    /// Executes a GraphQL query and decodes the `data` payload.
    ///
    /// # Arguments
    ///
    /// * `query` - The GraphQL query string
    /// * `variables` - Variables for the query (`serde_json::json!({})` for none)
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] for transport failures,
    /// [`GraphqlError::Response`] when the body carries top-level GraphQL
    /// errors, and [`GraphqlError::Decode`] when `data` does not match `T`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, GraphqlError> {
        self.execute(query, variables).await
    }

    /// Executes a GraphQL mutation and decodes the `data` payload.
    ///
    /// Mechanically identical to [`query`](Self::query); callers still need
    /// to unwrap the mutation payload's `userErrors` themselves.
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query).
    pub async fn mutate<T: DeserializeOwned>(
        &self,
        mutation: &str,
        variables: serde_json::Value,
    ) -> Result<T, GraphqlError> {
        self.execute(mutation, variables).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, GraphqlError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self.http_client.post_json("graphql.json", &body).await?;

        if let Some(errors) = response.body.get("errors").and_then(|e| e.as_array()) {
            if !errors.is_empty() {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.get("message")
                            .and_then(|m| m.as_str())
                            .map_or_else(|| e.to_string(), String::from)
                    })
                    .collect();
                return Err(GraphqlError::Response { errors: messages });
            }
        }

        let data = response
            .body
            .get("data")
            .filter(|d| !d.is_null())
            .ok_or(GraphqlError::MissingData)?;

        tracing::debug!(api_version = %self.api_version, "GraphQL operation succeeded");

        Ok(serde_json::from_value(data.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, ShopDomain};

    fn test_config() -> ClientConfig {
        ClientConfig::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .access_token(AccessToken::new("test-access-token").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_graphql_client_uses_config_version() {
        let config = ClientConfig::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .access_token(AccessToken::new("test-access-token").unwrap())
            .api_version(ApiVersion::V2025_07)
            .build()
            .unwrap();

        let client = GraphqlClient::new(&config);
        assert_eq!(client.api_version(), &ApiVersion::V2025_07);
    }

    #[test]
    fn test_graphql_client_defaults_to_latest_version() {
        let client = GraphqlClient::new(&test_config());
        assert_eq!(client.api_version(), &ApiVersion::latest());
    }

    #[test]
    fn test_graphql_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GraphqlClient>();
    }

    #[test]
    fn test_graphql_client_constructor_is_infallible() {
        let _client: GraphqlClient = GraphqlClient::new(&test_config());
    }
}
