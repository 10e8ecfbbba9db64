//! Validated newtype wrappers for configuration values.
//!
//! Invalid values are rejected on construction with clear error messages.

use std::fmt;

use reqwest::Url;

use crate::error::ConfigError;

/// Base URL used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// A validated service endpoint.
///
/// The endpoint must be an absolute `http` or `https` URL. Any trailing
/// slash is removed so service paths can be appended with `/`.
///
/// # Example
///
/// ```rust
/// use chatai_sdk::Endpoint;
///
/// let endpoint = Endpoint::new("https://region2.aiservice.com/").unwrap();
/// assert_eq!(endpoint.as_ref(), "https://region2.aiservice.com");
/// assert_eq!(endpoint.join("chatai"), "https://region2.aiservice.com/chatai");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint(String);

impl Endpoint {
    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyEndpoint`] if the value is blank, or
    /// [`ConfigError::InvalidEndpoint`] if it is not an absolute HTTP(S) URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }

        let parsed = Url::parse(trimmed).map_err(|_| ConfigError::InvalidEndpoint { url: url.clone() })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidEndpoint { url });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the URL of `path` under this endpoint.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self(DEFAULT_ENDPOINT.to_string())
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_rejects_empty_string() {
        assert!(matches!(Endpoint::new(""), Err(ConfigError::EmptyEndpoint)));
        assert!(matches!(Endpoint::new("   "), Err(ConfigError::EmptyEndpoint)));
    }

    #[test]
    fn test_endpoint_rejects_invalid_urls() {
        assert!(matches!(
            Endpoint::new("region2.aiservice.com"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            Endpoint::new("ftp://files.aiservice.com"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let endpoint = Endpoint::new("http://localhost:8000/").unwrap();
        assert_eq!(endpoint.as_ref(), "http://localhost:8000");
    }

    #[test]
    fn test_endpoint_join() {
        let endpoint = Endpoint::new("https://api.example.com/v1").unwrap();
        assert_eq!(endpoint.join("chatai"), "https://api.example.com/v1/chatai");
        assert_eq!(endpoint.join("/chatai"), "https://api.example.com/v1/chatai");
    }

    #[test]
    fn test_default_endpoint() {
        assert_eq!(Endpoint::default().as_ref(), DEFAULT_ENDPOINT);
    }
}
