//! Icinga Director REST API client.
//!
//! Resolves object types to Director endpoints, builds selectors (including
//! `host!service` names and apply rules addressed by id), and sends requests
//! through the Director's method-override convention.

#![deny(missing_docs)]

pub mod client;
pub mod endpoint;
pub mod executor;
pub mod models;
pub mod selector;

pub use client::{DirectorClient, DirectorClientBuilder};
pub use director_core::config::DirectorConfig;
pub use director_core::{Error, IntoObjectType, ObjectType, OperationMode};
pub use endpoint::{resolve, resolve_token};
pub use executor::{DirectorRequest, HttpExecutor, RequestExecutor, METHOD_OVERRIDE_HEADER};
pub use models::{MergePolicy, ObjectPayload};
pub use selector::build_selector;

/// Convenient result alias that reuses the shared Director error type.
pub type Result<T> = director_core::Result<T>;
