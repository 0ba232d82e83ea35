//! Shopify API version definitions.
//!
//! This module provides the [`ApiVersion`] enum for specifying which version
//! of the Admin GraphQL API to use.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Shopify API version.
///
/// Shopify releases new API versions quarterly (January, April, July, October).
/// This enum provides variants for known stable versions, plus an `Unstable`
/// variant for development and a `Custom` variant for future versions.
///
/// # Example
///
/// ```rust
/// use shopify_graphql::ApiVersion;
///
/// // Use the latest stable version
/// let version = ApiVersion::latest();
/// assert!(version.is_stable());
///
/// // Parse from string
/// let version: ApiVersion = "2025-01".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2025_01);
///
/// // Display as string
/// assert_eq!(format!("{}", ApiVersion::V2025_01), "2025-01");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2025-01 (January 2025)
    V2025_01,
    /// API version 2025-04 (April 2025)
    V2025_04,
    /// API version 2025-07 (July 2025)
    V2025_07,
    /// API version 2025-10 (October 2025)
    V2025_10,
    /// Unstable API version for development and testing.
    Unstable,
    /// Custom version string for future or unrecognized versions.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest stable API version.
    ///
    /// This should be updated when new stable versions are released.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2025_10
    }

    /// Returns `true` if this is a known stable API version.
    ///
    /// Returns `false` for `Unstable` and `Custom` variants.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        !matches!(self, Self::Unstable | Self::Custom(_))
    }

    /// Returns the version string as used in API URLs.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::V2025_01 => "2025-01",
            Self::V2025_04 => "2025-04",
            Self::V2025_07 => "2025-07",
            Self::V2025_10 => "2025-10",
            Self::Unstable => "unstable",
            Self::Custom(s) => s,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2025-01" => Ok(Self::V2025_01),
            "2025-04" => Ok(Self::V2025_04),
            "2025-07" => Ok(Self::V2025_07),
            "2025-10" => Ok(Self::V2025_10),
            "unstable" => Ok(Self::Unstable),
            other => {
                // Accept well-formed YYYY-MM strings as custom future versions
                let is_custom = other.len() == 7
                    && other.as_bytes()[4] == b'-'
                    && other[..4].chars().all(|c| c.is_ascii_digit())
                    && other[5..].chars().all(|c| c.is_ascii_digit());

                if is_custom {
                    Ok(Self::Custom(other.to_string()))
                } else {
                    Err(ConfigError::InvalidApiVersion {
                        version: other.to_string(),
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_is_stable() {
        assert!(ApiVersion::latest().is_stable());
    }

    #[test]
    fn test_display_matches_url_format() {
        assert_eq!(ApiVersion::V2025_01.to_string(), "2025-01");
        assert_eq!(ApiVersion::Unstable.to_string(), "unstable");
        assert_eq!(ApiVersion::Custom("2026-01".to_string()).to_string(), "2026-01");
    }

    #[test]
    fn test_parse_known_versions() {
        let version: ApiVersion = "2025-07".parse().unwrap();
        assert_eq!(version, ApiVersion::V2025_07);

        let version: ApiVersion = "unstable".parse().unwrap();
        assert_eq!(version, ApiVersion::Unstable);
    }

    #[test]
    fn test_parse_future_version_as_custom() {
        let version: ApiVersion = "2026-04".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("2026-04".to_string()));
        assert!(!version.is_stable());
    }

    #[test]
    fn test_parse_rejects_malformed_versions() {
        assert!("garbage".parse::<ApiVersion>().is_err());
        assert!("2025-1".parse::<ApiVersion>().is_err());
        assert!("25-01".parse::<ApiVersion>().is_err());
        assert!("".parse::<ApiVersion>().is_err());
    }
}
