//! # director-core
//!
//! Core types and utilities for working with the Icinga Director REST API.
//!
//! This crate provides the object-type taxonomy, error handling, configuration
//! and query helpers shared by Director client crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status mapping
//! - [`types`] - Object types, their endpoint metadata and operation modes
//! - [`config`] - Connection configuration for Director clients
//! - [`client`] - HTTP client tuning
//! - [`query`] - Query/selector pair builder

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::{IntoObjectType, ObjectType, OperationMode};
