//! Request execution.
//!
//! Every Director call is sent as an HTTP `POST`; the verb the Director should
//! act on travels in the `X-HTTP-Method-Override` header. Responses inside
//! 200-299 are parsed as JSON, anything else becomes
//! [`Error::RequestFailed`] with the raw body preserved.

use crate::Result;
use async_trait::async_trait;
use director_core::client::ClientConfig;
use director_core::config::DirectorConfig;
use director_core::query::QueryParams;
use director_core::Error;
use reqwest::header::ACCEPT;
use reqwest::{Client, ClientBuilder, Method};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("director-api/", env!("CARGO_PKG_VERSION"));

/// Header carrying the logical HTTP verb.
pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// A single Director request, built fresh for every call.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectorRequest {
    /// Logical method announced through the override header.
    pub method: Method,
    /// Path below the Director root, e.g. `hosts/templates`.
    pub path: String,
    /// Selector or filter pairs.
    pub query: QueryParams,
    /// Optional JSON body.
    pub payload: Option<Value>,
}

impl DirectorRequest {
    /// Create a request without query or payload.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            payload: None,
        }
    }

    /// Logical `GET`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Logical `POST` with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, payload: Value) -> Self {
        Self::new(Method::POST, path).with_payload(payload)
    }

    /// Logical `DELETE`.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach selector or filter pairs.
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Performs one Director round trip.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Send `request` and return the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestFailed`] for statuses outside 200-299 and a
    /// transport error if the Director cannot be reached.
    async fn execute(&self, request: DirectorRequest) -> Result<Value>;
}

/// [`RequestExecutor`] backed by `reqwest`.
#[derive(Debug)]
pub struct HttpExecutor {
    http: Client,
    base_url: Url,
    username: String,
    password: SecretString,
}

impl HttpExecutor {
    /// Build an executor from connection and HTTP settings.
    ///
    /// A timeout on `config` takes precedence over one on `http_config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration is incomplete or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &DirectorConfig, http_config: &ClientConfig) -> Result<Self> {
        config.check()?;
        let base_url = config.director_url()?;

        let mut builder = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .connect_timeout(http_config.connect_timeout)
            .pool_idle_timeout(http_config.pool_idle_timeout)
            .pool_max_idle_per_host(http_config.pool_max_idle_per_host);

        if let Some(timeout) = config.timeout().or(http_config.timeout) {
            builder = builder.timeout(timeout);
        }

        if !config.tls_verify {
            warn!(url = %base_url, "TLS verification disabled for Director client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build().map_err(|err| {
            Error::ConfigError(format!("Failed to build Director HTTP client: {err}"))
        })?;

        Ok(Self {
            http,
            base_url,
            username: config.username.clone(),
            password: SecretString::from(config.password.clone()),
        })
    }

    /// Return the Director root URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_url(&self, path: &str, query: &QueryParams) -> Result<Url> {
        let mut url = self.base_url.join(path).map_err(|err| {
            Error::InvalidEndpoint(format!("Invalid Director path `{path}`: {err}"))
        })?;
        if !query.is_empty() {
            url.set_query(Some(&query.encode()));
        }
        Ok(url)
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, request: DirectorRequest) -> Result<Value> {
        let url = self.build_url(&request.path, &request.query)?;
        debug!(method = %request.method, url = %url, "Sending Director request");

        let mut builder = self
            .http
            .post(url.clone())
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(METHOD_OVERRIDE_HEADER, request.method.as_str())
            .header(ACCEPT, "application/json");

        if let Some(payload) = &request.payload {
            builder = builder.json(payload);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::RequestFailed {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        parse_body(&body)
    }
}

fn parse_body(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body)
        .map_err(|err| Error::ParseError(format!("Director returned invalid JSON: {err}")))
}
