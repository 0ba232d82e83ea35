//! Configuration types for the Shopify GraphQL client.
//!
//! This module provides the core configuration types used to initialize
//! the client for Admin API communication.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: The main configuration struct holding all client settings
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`ShopDomain`]: A validated Shopify shop domain
//! - [`AccessToken`]: A validated Admin API access token with masked debug output
//! - [`HostUrl`]: A validated API host override URL
//! - [`ApiVersion`]: The Admin API version to use
//!
//! # Example
//!
//! ```rust
//! use shopify_graphql::{ClientConfig, ShopDomain, AccessToken, ApiVersion};
//!
//! let config = ClientConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_abc123").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, HostUrl, ShopDomain};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Configuration for the Shopify GraphQL client.
///
/// This struct holds everything needed to reach a shop's Admin GraphQL API:
/// the shop domain, an Admin API access token, the API version, and an
/// optional host override for proxies or test servers.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    shop: ShopDomain,
    access_token: AccessToken,
    host: Option<HostUrl>,
    api_version: ApiVersion,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shopify_graphql::{ClientConfig, ShopDomain, AccessToken};
    ///
    /// let config = ClientConfig::builder()
    ///     .shop(ShopDomain::new("my-store").unwrap())
    ///     .access_token(AccessToken::new("token").unwrap())
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the host override, if configured.
    #[must_use]
    pub const fn host(&self) -> Option<&HostUrl> {
        self.host.as_ref()
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// Required fields are `shop` and `access_token`. All other fields have
/// sensible defaults.
///
/// # Defaults
///
/// - `api_version`: Latest stable version
/// - `host`: `None` (requests go to `https://{shop}.myshopify.com`)
///
/// # Example
///
/// ```rust
/// use shopify_graphql::{ClientConfig, ShopDomain, AccessToken, ApiVersion, HostUrl};
///
/// let config = ClientConfig::builder()
///     .shop(ShopDomain::new("my-store").unwrap())
///     .access_token(AccessToken::new("token").unwrap())
///     .api_version(ApiVersion::V2025_07)
///     .host(HostUrl::new("https://proxy.example.com").unwrap())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    shop: Option<ShopDomain>,
    access_token: Option<AccessToken>,
    host: Option<HostUrl>,
    api_version: Option<ApiVersion>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop domain (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets a host override.
    ///
    /// When set, requests go to this host instead of the shop domain. The
    /// `Host` header still carries the shop domain so proxies can route.
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop` or
    /// `access_token` are not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;
        let access_token = self.access_token.ok_or(ConfigError::MissingRequiredField {
            field: "access_token",
        })?;

        Ok(ClientConfig {
            shop,
            access_token,
            host: self.host,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
        })
    }
}
