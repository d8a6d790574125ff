//! Asynchronous Director client implementation.

use crate::endpoint::resolve;
use crate::executor::{DirectorRequest, HttpExecutor, RequestExecutor};
use crate::models::{attributes, into_objects, retain_variant, MergePolicy, ObjectPayload};
use crate::selector::build_selector;
use crate::Result;
use director_core::client::ClientConfig;
use director_core::config::DirectorConfig;
use director_core::query::QueryParams;
use director_core::types::{IntoObjectType, ObjectType, OperationMode};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Builder for [`DirectorClient`].
#[derive(Clone)]
pub struct DirectorClientBuilder {
    config: DirectorConfig,
    http_config: ClientConfig,
    merge_policy: MergePolicy,
    executor: Option<Arc<dyn RequestExecutor>>,
}

impl DirectorClientBuilder {
    /// Create a builder from a [`DirectorConfig`].
    #[must_use]
    pub fn new(config: DirectorConfig) -> Self {
        Self {
            config,
            http_config: ClientConfig::new(),
            merge_policy: MergePolicy::default(),
            executor: None,
        }
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, http_config: ClientConfig) -> Self {
        self.http_config = http_config;
        self
    }

    /// Choose how `create` handles attributes that name existing payload keys.
    #[must_use]
    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    /// Send requests through a custom executor instead of the HTTP one.
    #[must_use]
    pub fn with_executor(mut self, executor: Arc<dyn RequestExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`director_core::Error::ConfigError`] if the configuration is
    /// incomplete or the HTTP client cannot be built.
    pub fn build(self) -> Result<DirectorClient> {
        self.config.check()?;
        let base_url = self.config.director_url()?;

        let executor = match self.executor {
            Some(executor) => executor,
            None => Arc::new(HttpExecutor::new(&self.config, &self.http_config)?),
        };

        Ok(DirectorClient {
            executor,
            base_url,
            merge_policy: self.merge_policy,
        })
    }
}

/// Asynchronous Director client.
///
/// Every operation validates the object type before doing anything else, so an
/// unknown type never reaches the network.
#[derive(Clone)]
pub struct DirectorClient {
    executor: Arc<dyn RequestExecutor>,
    base_url: Url,
    merge_policy: MergePolicy,
}

impl DirectorClient {
    /// Construct a client directly from the configuration.
    ///
    /// # Errors
    ///
    /// See [`DirectorClientBuilder::build`].
    pub fn new(config: DirectorConfig) -> Result<Self> {
        DirectorClientBuilder::new(config).build()
    }

    /// Start a builder pre-populated with the provided configuration.
    #[must_use]
    pub fn builder(config: DirectorConfig) -> DirectorClientBuilder {
        DirectorClientBuilder::new(config)
    }

    /// Version of this client library.
    #[must_use]
    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Return the Director root URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Merge policy applied by [`DirectorClient::create`].
    #[must_use]
    pub const fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    /// List all objects of a type, optionally filtered by a name substring.
    ///
    /// Commands and command templates share one listing; the result only holds
    /// items of the requested variant.
    ///
    /// ```rust,ignore
    /// let hosts = client.list("Host", Some("webserver")).await?;
    /// let templates = client.list(ObjectType::NotificationTemplate, None).await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`director_core::Error::UnsupportedObjectType`] for unknown types,
    /// request errors, and [`director_core::Error::UnexpectedResponse`] when the
    /// body has no `objects` array.
    pub async fn list(
        &self,
        object_type: impl IntoObjectType,
        query: Option<&str>,
    ) -> Result<Vec<Value>> {
        let object_type = object_type.into_object_type()?;
        let path = resolve(object_type, OperationMode::List);

        let mut params = QueryParams::new();
        params.push_opt("q", query.filter(|q| !q.is_empty()));

        let body = self
            .executor
            .execute(DirectorRequest::get(path).with_query(params))
            .await?;
        let objects = into_objects(body)?;

        let info = object_type.info();
        if info.shared_listing {
            let total = objects.len();
            let objects = retain_variant(objects, info.variant);
            debug!(
                object_type = %object_type,
                total,
                kept = objects.len(),
                "Filtered shared listing"
            );
            return Ok(objects);
        }

        Ok(objects)
    }

    /// Fetch one object. The response body is returned as-is.
    ///
    /// ```rust,ignore
    /// client.get("Host", "webserver01.domain").await?;
    /// client.get("Service", "webserver01.domain!ping4").await?;
    /// client.get("ServiceApplyRule", "ping4").await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns validation errors for the type or name, lookup errors for apply
    /// rules, and request errors.
    pub async fn get(&self, object_type: impl IntoObjectType, name: &str) -> Result<Value> {
        let object_type = object_type.into_object_type()?;
        self.send_selected(object_type, OperationMode::Get, name, Method::GET, None)
            .await
    }

    /// Create an object, importing `templates` and carrying `attrs`.
    ///
    /// The payload always holds `object_name` and `object_type` (`template`
    /// for template types, `object` otherwise). Attributes are merged according
    /// to the client's [`MergePolicy`] and `imports` is set last.
    ///
    /// ```rust,ignore
    /// client
    ///     .create("Host", "localhost", &["generic-host"], Some(json!({"address": "127.0.0.1"})))
    ///     .await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`director_core::Error::UnsupportedObjectType`],
    /// [`director_core::Error::ValidationError`] when `attrs` is not an object,
    /// [`director_core::Error::AttributeCollision`] under the reject policy, and
    /// request errors.
    pub async fn create(
        &self,
        object_type: impl IntoObjectType,
        name: &str,
        templates: &[&str],
        attrs: Option<Value>,
    ) -> Result<Value> {
        let object_type = object_type.into_object_type()?;
        let path = resolve(object_type, OperationMode::Create);

        let mut payload = ObjectPayload::new(object_type, name);
        if let Some(attrs) = attrs {
            payload.merge_attrs(attrs, self.merge_policy)?;
        }
        payload.set_imports(templates, self.merge_policy)?;

        self.executor
            .execute(DirectorRequest::post(path, payload.into_value()))
            .await
    }

    /// Change attributes of an existing object.
    ///
    /// ```rust,ignore
    /// client.modify("Service", "testhost3!dummy", json!({"check_interval": "10m"})).await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns validation errors for the type, name or `attrs`, lookup errors
    /// for apply rules, and request errors.
    pub async fn modify(
        &self,
        object_type: impl IntoObjectType,
        name: &str,
        attrs: Value,
    ) -> Result<Value> {
        let object_type = object_type.into_object_type()?;
        let attrs = Value::Object(attributes(attrs)?);
        self.send_selected(
            object_type,
            OperationMode::Modify,
            name,
            Method::POST,
            Some(attrs),
        )
        .await
    }

    /// Delete an object.
    ///
    /// # Errors
    ///
    /// Returns validation errors for the type or name, lookup errors for apply
    /// rules, and request errors.
    pub async fn delete(&self, object_type: impl IntoObjectType, name: &str) -> Result<Value> {
        let object_type = object_type.into_object_type()?;
        self.send_selected(object_type, OperationMode::Delete, name, Method::DELETE, None)
            .await
    }

    async fn send_selected(
        &self,
        object_type: ObjectType,
        mode: OperationMode,
        name: &str,
        method: Method,
        payload: Option<Value>,
    ) -> Result<Value> {
        let path = resolve(object_type, mode);
        let selector = build_selector(self.executor.as_ref(), object_type, name).await?;

        let mut request = DirectorRequest::new(method, path).with_query(selector);
        if let Some(payload) = payload {
            request = request.with_payload(payload);
        }

        self.executor.execute(request).await
    }
}
