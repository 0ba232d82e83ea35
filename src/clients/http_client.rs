//! HTTP client for Admin API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Shopify Admin API.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::config::ClientConfig;

/// Library version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Shopify Admin API.
///
/// The client handles:
/// - Base URI construction from the shop domain or a configured host override
/// - Default headers including User-Agent and access token
/// - Response classification into [`HttpError`] variants
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://my-store.myshopify.com`).
    base_uri: String,
    /// Base path (e.g., "/admin/api/2025-10").
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

/// A parsed JSON response with its status code.
#[derive(Debug)]
pub struct JsonResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The response body parsed as JSON.
    pub body: serde_json::Value,
}

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Arguments
    ///
    /// * `base_path` - The base path for API requests (e.g., "/admin/api/2025-10")
    /// * `config` - The configuration providing shop domain, token, and host override
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(base_path: impl Into<String>, config: &ClientConfig) -> Self {
        let base_path = base_path.into();

        // Use the host override if configured, otherwise the shop domain
        let base_uri = config.host().map_or_else(
            || format!("https://{}", config.shop().as_ref()),
            |host| host.as_ref().trim_end_matches('/').to_string(),
        );

        let user_agent = format!(
            "Shopify GraphQL Client v{CLIENT_VERSION} | Rust {}",
            env!("CARGO_PKG_RUST_VERSION")
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "X-Shopify-Access-Token".to_string(),
            config.access_token().as_ref().to_string(),
        );

        // Preserve the shop identity when routing through a host override
        if config.host().is_some() {
            default_headers.insert("Host".to_string(), config.shop().as_ref().to_string());
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_uri,
            base_path,
            default_headers,
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the inner reqwest client.
    ///
    /// Used by the bulk result fetcher, which downloads from pre-signed
    /// absolute URLs outside the Admin API base path.
    #[must_use]
    pub const fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// Sends a JSON POST request to the Admin API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] on connection failures and
    /// [`HttpError::Response`] for non-2xx responses; the response body and
    /// the `X-Request-Id` header are preserved for caller-side reporting.
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<JsonResponse, HttpError> {
        let url = format!("{}{}/{}", self.base_uri, self.base_path, path);

        let mut req_builder = self.client.post(&url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        req_builder = req_builder.header("Content-Type", "application/json");

        let res = req_builder.json(body).send().await?;

        let code = res.status().as_u16();
        let request_id = res
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body_text = res.text().await.unwrap_or_default();

        if !(200..300).contains(&code) {
            return Err(HttpError::Response(HttpResponseError {
                code,
                message: body_text,
                error_reference: request_id,
            }));
        }

        let body = if body_text.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text).unwrap_or_else(|_| serde_json::json!({}))
        };

        Ok(JsonResponse { code, body })
    }
}
