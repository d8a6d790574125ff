//! Endpoint resolution.
//!
//! Maps an object type and an operation mode onto the path segment below the
//! Director root. Listings use the plural collection, optionally narrowed to
//! `templates` or `applyrules`; every other mode uses the type's single-object
//! root. The Director's naming is irregular (the command family shares
//! `commands` for everything) and is reproduced as-is.

use crate::Result;
use director_core::types::{Listing, ObjectType, OperationMode};

/// Resolve the path segment for `object_type` in `mode`.
#[must_use]
pub fn resolve(object_type: ObjectType, mode: OperationMode) -> String {
    let info = object_type.info();
    match mode {
        OperationMode::List => match info.listing {
            Listing::Collection => info.collection.to_string(),
            Listing::Templates => format!("{}/templates", info.collection),
            Listing::ApplyRules => format!("{}/applyrules", info.collection),
        },
        OperationMode::Get | OperationMode::Create | OperationMode::Modify | OperationMode::Delete => {
            info.single.to_string()
        }
    }
}

/// Resolve from raw tokens, validating both.
///
/// # Errors
///
/// Returns [`director_core::Error::UnsupportedObjectType`] or
/// [`director_core::Error::UnsupportedMode`] for unknown tokens.
pub fn resolve_token(object_type: &str, mode: &str) -> Result<String> {
    let object_type: ObjectType = object_type.parse()?;
    let mode: OperationMode = mode.parse()?;
    Ok(resolve(object_type, mode))
}
