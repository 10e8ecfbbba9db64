//! Prepared HTTP requests.
//!
//! An [`HttpRequest`] is the fully-built message handed to an
//! [`HttpTransport`](crate::clients::HttpTransport): method, parsed URL,
//! headers and the already-serialized payload.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use reqwest::Url;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods supported by the SDK.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method.
    Get,
    /// HTTP POST method.
    Post,
    /// HTTP PUT method.
    Put,
    /// HTTP PATCH method.
    Patch,
    /// HTTP DELETE method.
    Delete,
}

impl HttpMethod {
    /// Returns the method as it appears on the request line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = InvalidHttpRequestError;

    /// Parses a method name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(InvalidHttpRequestError::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A request ready to be sent by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute request URL.
    pub url: Url,
    /// Headers to send, keyed by header name.
    pub headers: BTreeMap<String, String>,
    /// The serialized payload, if any.
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Builds a request from a method name and URL string.
    ///
    /// When `body` is present, `Content-Type: application/json` is set.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the method is unknown or the
    /// URL cannot be parsed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatai_sdk::clients::{HttpMethod, HttpRequest};
    ///
    /// let request = HttpRequest::new("post", "http://localhost:8000/chatai", None).unwrap();
    /// assert_eq!(request.method, HttpMethod::Post);
    /// assert_eq!(request.url.path(), "/chatai");
    /// ```
    pub fn new(method: &str, url: &str, body: Option<Bytes>) -> Result<Self, InvalidHttpRequestError> {
        let method = method.parse::<HttpMethod>()?;
        let url = Url::parse(url).map_err(|e| InvalidHttpRequestError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let mut headers = BTreeMap::new();
        if body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }

    /// Sets a header, replacing any existing value.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_http_method_parse_ignores_case() {
        assert_eq!("post".parse::<HttpMethod>(), Ok(HttpMethod::Post));
        assert_eq!("Delete".parse::<HttpMethod>(), Ok(HttpMethod::Delete));
    }

    #[test]
    fn test_http_method_parse_rejects_unknown() {
        assert!(matches!(
            "FETCH".parse::<HttpMethod>(),
            Err(InvalidHttpRequestError::InvalidMethod { method }) if method == "FETCH"
        ));
        assert!("".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_new_rejects_malformed_url() {
        let result = HttpRequest::new("GET", "not a url", None);
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidUrl { url, .. }) if url == "not a url"
        ));
    }

    #[test]
    fn test_new_sets_content_type_only_with_body() {
        let without = HttpRequest::new("GET", "http://localhost/chatai", None).unwrap();
        assert!(without.headers.get("Content-Type").is_none());

        let with = HttpRequest::new(
            "POST",
            "http://localhost/chatai",
            Some(Bytes::from_static(br#"{"query":"x"}"#)),
        )
        .unwrap();
        assert_eq!(
            with.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_header_replaces_existing_value() {
        let request = HttpRequest::new("GET", "http://localhost/", None)
            .unwrap()
            .header("Accept", "text/plain")
            .header("Accept", "application/json");
        assert_eq!(
            request.headers.get("Accept"),
            Some(&"application/json".to_string())
        );
    }
}
