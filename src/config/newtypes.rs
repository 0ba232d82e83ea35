//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Admin API access token.
///
/// This newtype ensures the token is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the token value, displaying only
/// `AccessToken(*****)` instead of the actual token.
///
/// # Example
///
/// ```rust
/// use shopify_graphql::AccessToken;
///
/// let token = AccessToken::new("shpat_abc123").unwrap();
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated Shopify shop domain.
///
/// This newtype validates and normalizes shop domains to the full
/// `shop.myshopify.com` format.
///
/// # Accepted Formats
///
/// - `shop-name` - normalized to `shop-name.myshopify.com`
/// - `shop-name.myshopify.com` - used as-is
///
/// # Serialization
///
/// `ShopDomain` serializes to and deserializes from the full domain string:
///
/// ```rust
/// use shopify_graphql::ShopDomain;
///
/// let domain = ShopDomain::new("my-store").unwrap();
/// let json = serde_json::to_string(&domain).unwrap();
/// assert_eq!(json, r#""my-store.myshopify.com""#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopDomain {
    full_domain: String,
    shop_name_end: usize,
}

impl ShopDomain {
    const SUFFIX: &'static str = ".myshopify.com";

    /// Creates a new validated shop domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] if the domain is invalid.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.into();
        let domain = domain.trim().to_lowercase();

        if domain.is_empty() {
            return Err(ConfigError::InvalidShopDomain { domain });
        }

        let (shop_name, full_domain) = if let Some(shop_name) = domain.strip_suffix(Self::SUFFIX) {
            (shop_name.to_string(), domain)
        } else if domain.contains('.') {
            // Contains a dot but not the myshopify.com suffix - invalid
            return Err(ConfigError::InvalidShopDomain { domain });
        } else {
            (domain.clone(), format!("{}{}", domain, Self::SUFFIX))
        };

        if !Self::is_valid_shop_name(&shop_name) {
            return Err(ConfigError::InvalidShopDomain {
                domain: full_domain,
            });
        }

        Ok(Self {
            shop_name_end: shop_name.len(),
            full_domain,
        })
    }

    /// Returns the shop name portion of the domain.
    ///
    /// For `my-store.myshopify.com`, this returns `my-store`.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.full_domain[..self.shop_name_end]
    }

    fn is_valid_shop_name(name: &str) -> bool {
        if name.is_empty() {
            return false;
        }

        // Shop names contain lowercase letters, numbers, and hyphens, and
        // cannot start or end with a hyphen
        if name.starts_with('-') || name.ends_with('-') {
            return false;
        }

        name.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.full_domain
    }
}

impl Serialize for ShopDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.full_domain)
    }
}

impl<'de> Deserialize<'de> for ShopDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated API host URL.
///
/// Overrides the default `https://{shop}.myshopify.com` base when the client
/// should talk to a proxy or a local test server instead of the shop domain.
///
/// # Example
///
/// ```rust
/// use shopify_graphql::HostUrl;
///
/// let url = HostUrl::new("https://proxy.example.com").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("proxy.example.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidHostUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3; // Skip "://"
        if host_start >= url.len() {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        let host = &url[host_start..host_end];
        if host.is_empty() {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_rejects_empty_string() {
        let result = AccessToken::new("");
        assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
    }

    #[test]
    fn test_access_token_masks_value_in_debug() {
        let token = AccessToken::new("shpat_super_secret").unwrap();
        let debug_output = format!("{:?}", token);
        assert_eq!(debug_output, "AccessToken(*****)");
        assert!(!debug_output.contains("shpat_super_secret"));
    }

    #[test]
    fn test_shop_domain_normalizes_short_format() {
        let domain = ShopDomain::new("my-store").unwrap();
        assert_eq!(domain.as_ref(), "my-store.myshopify.com");
        assert_eq!(domain.shop_name(), "my-store");
    }

    #[test]
    fn test_shop_domain_accepts_full_format() {
        let domain = ShopDomain::new("my-store.myshopify.com").unwrap();
        assert_eq!(domain.as_ref(), "my-store.myshopify.com");
        assert_eq!(domain.shop_name(), "my-store");
    }

    #[test]
    fn test_shop_domain_rejects_invalid_domains() {
        assert!(ShopDomain::new("").is_err());
        assert!(ShopDomain::new("my store").is_err());
        assert!(ShopDomain::new("my_store").is_err());
        assert!(ShopDomain::new("MY-STORE").is_ok()); // normalized to lowercase
        assert!(ShopDomain::new("-my-store").is_err());
        assert!(ShopDomain::new("my-store-").is_err());
        assert!(ShopDomain::new("my-store.otherdomain.com").is_err());
    }

    #[test]
    fn test_host_url_validates_format() {
        let url = HostUrl::new("https://proxy.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), Some("proxy.example.com"));

        // With port - as produced by a local test server
        let url = HostUrl::new("http://127.0.0.1:3000").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), Some("127.0.0.1"));
    }

    #[test]
    fn test_host_url_rejects_invalid_urls() {
        assert!(HostUrl::new("").is_err());
        assert!(HostUrl::new("not-a-url").is_err());
        assert!(HostUrl::new("://missing-scheme.com").is_err());
        assert!(HostUrl::new("https://").is_err());
    }
}
