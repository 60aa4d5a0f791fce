//! Backend base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::Error;

/// A validated base URL for the real licensing backend.
///
/// Must be `https` (or `http`, to allow local development servers). The path
/// is normalized so that [`BaseUrl::endpoint`] can join operation paths
/// without double slashes.
///
/// # Example
///
/// ```
/// use izin_core::BaseUrl;
///
/// let base = BaseUrl::new("https://api.saasumkm.com").unwrap();
/// assert_eq!(base.endpoint("/auth/login"), "https://api.saasumkm.com/auth/login");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Create a new base URL from a string, validating the scheme.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s)
            .map_err(|e| Error::Validation(format!("invalid base URL '{s}': {e}")))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::Validation(format!(
                    "invalid base URL '{s}': unsupported scheme '{other}'"
                )));
            }
        }

        if url.host_str().is_none() {
            return Err(Error::Validation(format!(
                "invalid base URL '{s}': missing host"
            )));
        }

        Ok(Self(url))
    }

    /// Build the full URL for an operation path (e.g. `/auth/login`).
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Returns the URL as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(BaseUrl::new("https://api.saasumkm.com").is_ok());
        assert!(BaseUrl::new("http://127.0.0.1:8080").is_ok());
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(BaseUrl::new("ftp://api.saasumkm.com").is_err());
        assert!(BaseUrl::new("file:///tmp/api").is_err());
        assert!(BaseUrl::new("not a url").is_err());
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let base = BaseUrl::new("https://api.saasumkm.com/").unwrap();
        assert_eq!(
            base.endpoint("/auth/refresh"),
            "https://api.saasumkm.com/auth/refresh"
        );
        assert_eq!(base.endpoint("me"), "https://api.saasumkm.com/me");
    }
}
