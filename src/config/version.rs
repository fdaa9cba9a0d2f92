//! Shoply API version definitions.
//!
//! This module provides the [`ApiVersion`] enum for specifying which version
//! of the Shoply SDK API to target.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Shoply SDK API version.
///
/// The version becomes the last segment of the API root
/// (`{base_url}/sdk/{version}`).
///
/// # Example
///
/// ```rust
/// use shoply_sdk::ApiVersion;
///
/// let version: ApiVersion = "v1".parse().unwrap();
/// assert_eq!(version, ApiVersion::V1);
/// assert_eq!(ApiVersion::default().to_string(), "v1");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version v1.
    #[default]
    V1,
    /// Custom version string for versions not yet known to this SDK.
    Custom(String),
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("v1"),
            Self::Custom(version) => f.write_str(version),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = s.trim();
        let is_valid = version
            .strip_prefix('v')
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()));

        if !is_valid {
            return Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            });
        }

        match version {
            "v1" => Ok(Self::V1),
            other => Ok(Self::Custom(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_and_custom_versions() {
        assert_eq!("v1".parse::<ApiVersion>().unwrap(), ApiVersion::V1);
        assert_eq!(
            "v2".parse::<ApiVersion>().unwrap(),
            ApiVersion::Custom("v2".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_malformed_versions() {
        assert!("".parse::<ApiVersion>().is_err());
        assert!("1".parse::<ApiVersion>().is_err());
        assert!("v".parse::<ApiVersion>().is_err());
        assert!("v1beta".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_default_is_v1() {
        assert_eq!(ApiVersion::default(), ApiVersion::V1);
        assert_eq!(format!("{}", ApiVersion::Custom("v3".into())), "v3");
    }
}
