//! Selector construction for get/modify/delete.
//!
//! Most objects are addressed by `name=<name>`. Services are addressed by
//! their host and service name, written `host!service`. Service apply rules
//! can only be addressed by their numeric id, which is looked up by listing
//! all apply rules on every call.

use crate::endpoint::resolve;
use crate::executor::{DirectorRequest, RequestExecutor};
use crate::models::{into_objects, object_name};
use crate::Result;
use director_core::query::QueryParams;
use director_core::types::{Identity, ObjectType, OperationMode, COMPOSITE_NAME_SEPARATOR};
use director_core::Error;
use serde_json::Value;
use tracing::debug;

/// Build the selector addressing `name` of `object_type`.
///
/// Only [`ObjectType::ServiceApplyRule`] touches the network.
///
/// # Errors
///
/// Returns [`Error::MalformedCompositeName`] for service names without exactly
/// one `!`, [`Error::AmbiguousOrMissingIdentity`] when the id lookup does not
/// find exactly one object, and any error of the lookup request itself.
pub async fn build_selector(
    executor: &dyn RequestExecutor,
    object_type: ObjectType,
    name: &str,
) -> Result<QueryParams> {
    match object_type.info().identity {
        Identity::Name => Ok(QueryParams::new().with("name", name)),
        Identity::HostAndName => {
            let (host, service) = split_composite_name(name)?;
            Ok(QueryParams::new().with("host", host).with("name", service))
        }
        Identity::LookupId => {
            let id = lookup_id(executor, object_type, name).await?;
            Ok(QueryParams::new().with("id", id))
        }
    }
}

/// Split `host!service` into its two parts.
///
/// # Errors
///
/// Returns [`Error::MalformedCompositeName`] unless `name` contains exactly one
/// separator.
pub fn split_composite_name(name: &str) -> Result<(&str, &str)> {
    match name.split_once(COMPOSITE_NAME_SEPARATOR) {
        Some((host, service)) if !service.contains(COMPOSITE_NAME_SEPARATOR) => {
            Ok((host, service))
        }
        _ => Err(Error::MalformedCompositeName(name.to_string())),
    }
}

async fn lookup_id(
    executor: &dyn RequestExecutor,
    object_type: ObjectType,
    name: &str,
) -> Result<String> {
    let path = resolve(object_type, OperationMode::List);
    debug!(object_type = %object_type, object_name = name, path = %path, "Resolving object id");

    let objects = into_objects(executor.execute(DirectorRequest::get(path)).await?)?;
    let matches: Vec<&Value> = objects
        .iter()
        .filter(|item| object_name(item) == Some(name))
        .collect();

    match matches.as_slice() {
        [item] => id_of(item),
        _ => Err(Error::AmbiguousOrMissingIdentity {
            object_type: object_type.name().to_string(),
            name: name.to_string(),
            matches: matches.len(),
        }),
    }
}

fn id_of(item: &Value) -> Result<String> {
    match item.get("id") {
        Some(Value::Number(id)) => Ok(id.to_string()),
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        _ => Err(Error::UnexpectedResponse(format!(
            "object `{}` has no usable `id`",
            object_name(item).unwrap_or_default()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::MockRequestExecutor;
    use mockall::predicate::eq;
    use reqwest::Method;
    use serde_json::json;

    fn no_network() -> MockRequestExecutor {
        let mut executor = MockRequestExecutor::new();
        executor.expect_execute().never();
        executor
    }

    fn listing(body: Value) -> MockRequestExecutor {
        let mut executor = MockRequestExecutor::new();
        executor
            .expect_execute()
            .with(eq(DirectorRequest::new(Method::GET, "services/applyrules")))
            .times(1)
            .return_once(move |_| Ok(body));
        executor
    }

    #[tokio::test]
    async fn plain_types_select_by_name() {
        let executor = no_network();
        let selector = build_selector(&executor, ObjectType::Host, "webserver01")
            .await
            .unwrap();
        assert_eq!(selector.to_string(), "name=webserver01");

        let selector = build_selector(&executor, ObjectType::ServiceTemplate, "generic-service")
            .await
            .unwrap();
        assert_eq!(selector.to_string(), "name=generic-service");
    }

    #[tokio::test]
    async fn service_selects_by_host_and_name() {
        let executor = no_network();
        let selector = build_selector(&executor, ObjectType::Service, "webserver01!ping4")
            .await
            .unwrap();
        assert_eq!(selector.to_string(), "host=webserver01&name=ping4");
    }

    #[tokio::test]
    async fn malformed_service_names_fail_without_request() {
        let executor = no_network();
        for name in ["noexclamation", "a!b!c"] {
            let err = build_selector(&executor, ObjectType::Service, name)
                .await
                .unwrap_err();
            assert_eq!(err, Error::MalformedCompositeName(name.to_string()));
        }
    }

    #[tokio::test]
    async fn apply_rule_resolves_single_match() {
        let executor = listing(json!({
            "objects": [
                {"object_name": "ping4", "id": 42},
                {"object_name": "ping6", "id": 43},
                {"object_name": "PING4", "id": 44}
            ]
        }));

        let selector = build_selector(&executor, ObjectType::ServiceApplyRule, "ping4")
            .await
            .unwrap();
        assert_eq!(selector.to_string(), "id=42");
    }

    #[tokio::test]
    async fn apply_rule_accepts_string_ids() {
        let executor = listing(json!({"objects": [{"object_name": "ping4", "id": "42"}]}));
        let selector = build_selector(&executor, ObjectType::ServiceApplyRule, "ping4")
            .await
            .unwrap();
        assert_eq!(selector.to_string(), "id=42");
    }

    #[tokio::test]
    async fn apply_rule_without_match_fails() {
        let executor = listing(json!({"objects": [{"object_name": "ping6", "id": 43}]}));
        let err = build_selector(&executor, ObjectType::ServiceApplyRule, "ping4")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::AmbiguousOrMissingIdentity {
                object_type: "ServiceApplyRule".to_string(),
                name: "ping4".to_string(),
                matches: 0,
            }
        );
    }

    #[tokio::test]
    async fn apply_rule_with_duplicates_fails() {
        let executor = listing(json!({
            "objects": [
                {"object_name": "ping4", "id": 42},
                {"object_name": "ping4", "id": 99}
            ]
        }));
        let err = build_selector(&executor, ObjectType::ServiceApplyRule, "ping4")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::AmbiguousOrMissingIdentity { matches: 2, .. }
        ));
    }

    #[tokio::test]
    async fn apply_rule_lookup_failure_propagates() {
        let mut executor = MockRequestExecutor::new();
        executor.expect_execute().times(1).return_once(|_| {
            Err(Error::RequestFailed {
                url: "http://director/icingaweb2/director/services/applyrules".to_string(),
                status: 500,
                body: "oops".to_string(),
            })
        });

        let err = build_selector(&executor, ObjectType::ServiceApplyRule, "ping4")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn split_composite_name_parts() {
        assert_eq!(
            split_composite_name("webserver01!ping4").unwrap(),
            ("webserver01", "ping4")
        );
        assert!(split_composite_name("").is_err());
        assert!(split_composite_name("!!").is_err());
    }
}
