//! Configuration structures for Director clients.
//!
//! This module provides the connection settings a Director client needs: the
//! web root URL, HTTP Basic credentials, an optional timeout and the TLS
//! verification switch.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Default path of the Director module below the Icinga Web 2 root.
pub const DEFAULT_BASE_PATH: &str = "icingaweb2/director";

/// Configuration for a Director client instance.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct DirectorConfig {
    /// Base URL of the Icinga Web 2 host (e.g. `https://icinga.example.com`)
    #[validate(url)]
    pub url: String,

    /// HTTP Basic username
    #[validate(length(min = 1))]
    pub username: String,

    /// HTTP Basic password
    #[serde(skip_serializing)]
    #[validate(length(min = 1))]
    pub password: String,

    /// Request timeout in seconds, handed to the HTTP client unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 3600))]
    pub timeout_secs: Option<u64>,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Path of the Director module below `url`
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

const fn default_tls_verify() -> bool {
    true
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

impl DirectorConfig {
    /// Create a new client configuration with required parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the URL or a credential is missing, or
    /// if validation fails.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, Error> {
        let config = Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            timeout_secs: None,
            tls_verify: default_tls_verify(),
            base_path: default_base_path(),
        };

        config.check()?;
        Ok(config)
    }

    /// Validate a configuration, e.g. one obtained through deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first problem found.
    pub fn check(&self) -> Result<(), Error> {
        if self.url.trim().is_empty() {
            return Err(Error::ConfigError("No \"url\" defined.".to_string()));
        }
        if self.username.is_empty() || self.password.is_empty() {
            return Err(Error::ConfigError(
                "username and/or password not defined.".to_string(),
            ));
        }

        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = Some(seconds);
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Override the Director module path below the base URL.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Get the request timeout as a Duration, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Resolve the Director API root, always ending in `/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or joined.
    pub fn director_url(&self) -> Result<Url, Error> {
        let mut base = self.url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let mut path = self.base_path.trim_matches('/').to_string();
        if !path.is_empty() {
            path.push('/');
        }

        Url::parse(&base)
            .and_then(|root| root.join(&path))
            .map_err(|e| Error::ConfigError(format!("Invalid Director URL: {e}")))
    }
}

impl fmt::Debug for DirectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectorConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("tls_verify", &self.tls_verify)
            .field("base_path", &self.base_path)
            .finish()
    }
}
