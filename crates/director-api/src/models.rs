//! Director payloads and response envelopes.

use crate::Result;
use director_core::types::{ObjectType, ObjectVariant};
use director_core::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field naming an object.
pub const OBJECT_NAME_FIELD: &str = "object_name";
/// Field discriminating objects from templates.
pub const OBJECT_TYPE_FIELD: &str = "object_type";
/// Field listing imported templates.
pub const IMPORTS_FIELD: &str = "imports";
/// Listing envelope key.
pub const OBJECTS_FIELD: &str = "objects";

/// What happens when caller attributes name a key the payload already has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// The attribute value replaces the existing one.
    #[default]
    Overwrite,
    /// The merge fails with [`Error::AttributeCollision`].
    Reject,
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPayload {
    fields: Map<String, Value>,
}

impl ObjectPayload {
    /// Start a payload carrying the object's name and `object_type` discriminator.
    #[must_use]
    pub fn new(object_type: ObjectType, name: &str) -> Self {
        let mut fields = Map::new();
        fields.insert(OBJECT_NAME_FIELD.to_string(), Value::from(name));
        fields.insert(
            OBJECT_TYPE_FIELD.to_string(),
            Value::from(object_type.info().variant.as_str()),
        );
        Self { fields }
    }

    /// Merge caller attributes into the payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if `attrs` is not a JSON object, and
    /// [`Error::AttributeCollision`] under [`MergePolicy::Reject`] when a key
    /// is already present.
    pub fn merge_attrs(&mut self, attrs: Value, policy: MergePolicy) -> Result<()> {
        for (key, value) in attributes(attrs)? {
            self.insert(key, value, policy)?;
        }
        Ok(())
    }

    /// Set the templates this object imports. An empty list leaves the payload untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttributeCollision`] under [`MergePolicy::Reject`] when
    /// the attributes already carried `imports`.
    pub fn set_imports(&mut self, templates: &[&str], policy: MergePolicy) -> Result<()> {
        if templates.is_empty() {
            return Ok(());
        }
        let imports = templates.iter().map(|t| Value::from(*t)).collect();
        self.insert(IMPORTS_FIELD.to_string(), Value::Array(imports), policy)
    }

    fn insert(&mut self, key: String, value: Value, policy: MergePolicy) -> Result<()> {
        if policy == MergePolicy::Reject && self.fields.contains_key(&key) {
            return Err(Error::AttributeCollision(key));
        }
        self.fields.insert(key, value);
        Ok(())
    }

    /// Borrow the payload fields.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Convert into the JSON body.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Require `attrs` to be a JSON object and return its entries.
///
/// # Errors
///
/// Returns [`Error::ValidationError`] for any other JSON value.
pub fn attributes(attrs: Value) -> Result<Map<String, Value>> {
    match attrs {
        Value::Object(map) => Ok(map),
        other => Err(Error::ValidationError(format!(
            "attributes must be a JSON object, got `{other}`"
        ))),
    }
}

/// Unwrap the `objects` array of a listing response.
///
/// # Errors
///
/// Returns [`Error::UnexpectedResponse`] if the array is missing.
pub fn into_objects(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Object(mut map) => match map.remove(OBJECTS_FIELD) {
            Some(Value::Array(objects)) => Ok(objects),
            _ => Err(Error::UnexpectedResponse(
                "listing response has no `objects` array".to_string(),
            )),
        },
        _ => Err(Error::UnexpectedResponse(
            "listing response is not a JSON object".to_string(),
        )),
    }
}

/// Read the `object_name` of a listed item.
#[must_use]
pub fn object_name(item: &Value) -> Option<&str> {
    item.get(OBJECT_NAME_FIELD).and_then(Value::as_str)
}

/// Read the `object_type` discriminator of a listed item.
#[must_use]
pub fn object_type(item: &Value) -> Option<&str> {
    item.get(OBJECT_TYPE_FIELD).and_then(Value::as_str)
}

/// Keep the items of a shared listing that belong to `variant`.
///
/// Templates are items whose discriminator is `template`; everything else
/// (including `external_object` commands) counts as an object.
#[must_use]
pub fn retain_variant(items: Vec<Value>, variant: ObjectVariant) -> Vec<Value> {
    let template = ObjectVariant::Template.as_str();
    items
        .into_iter()
        .filter(|item| {
            let is_template = object_type(item) == Some(template);
            match variant {
                ObjectVariant::Template => is_template,
                ObjectVariant::Object => !is_template,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_for_host_with_imports() {
        let mut payload = ObjectPayload::new(ObjectType::Host, "localhost");
        payload
            .merge_attrs(json!({"address": "127.0.0.1"}), MergePolicy::Overwrite)
            .unwrap();
        payload
            .set_imports(&["generic-host"], MergePolicy::Overwrite)
            .unwrap();

        assert_eq!(
            payload.into_value(),
            json!({
                "object_name": "localhost",
                "object_type": "object",
                "address": "127.0.0.1",
                "imports": ["generic-host"]
            })
        );
    }

    #[test]
    fn template_types_are_discriminated() {
        let payload = ObjectPayload::new(ObjectType::ServiceTemplate, "generic-service");
        assert_eq!(payload.fields()["object_type"], "template");

        let payload = ObjectPayload::new(ObjectType::ServiceApplyRule, "ping4");
        assert_eq!(payload.fields()["object_type"], "object");
    }

    #[test]
    fn overwrite_policy_is_last_write_wins() {
        let mut payload = ObjectPayload::new(ObjectType::Host, "localhost");
        payload
            .merge_attrs(
                json!({"object_type": "template", "imports": ["a"]}),
                MergePolicy::Overwrite,
            )
            .unwrap();
        payload.set_imports(&["b"], MergePolicy::Overwrite).unwrap();

        assert_eq!(payload.fields()["object_type"], "template");
        assert_eq!(payload.fields()["imports"], json!(["b"]));
    }

    #[test]
    fn reject_policy_reports_collision() {
        let mut payload = ObjectPayload::new(ObjectType::Host, "localhost");
        let err = payload
            .merge_attrs(json!({"object_name": "other"}), MergePolicy::Reject)
            .unwrap_err();
        assert_eq!(err, Error::AttributeCollision("object_name".to_string()));

        let mut payload = ObjectPayload::new(ObjectType::Host, "localhost");
        payload
            .merge_attrs(json!({"imports": ["a"]}), MergePolicy::Reject)
            .unwrap();
        assert!(payload.set_imports(&["b"], MergePolicy::Reject).is_err());
    }

    #[test]
    fn empty_imports_are_skipped() {
        let mut payload = ObjectPayload::new(ObjectType::Zone, "master");
        payload.set_imports(&[], MergePolicy::Reject).unwrap();
        assert!(!payload.fields().contains_key("imports"));
    }

    #[test]
    fn attrs_must_be_an_object() {
        let mut payload = ObjectPayload::new(ObjectType::Host, "localhost");
        let err = payload
            .merge_attrs(json!(["address"]), MergePolicy::Overwrite)
            .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }

    #[test]
    fn into_objects_unwraps_envelope() {
        let objects = into_objects(json!({"objects": [{"object_name": "a"}]})).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(object_name(&objects[0]), Some("a"));

        assert!(matches!(
            into_objects(json!({"items": []})),
            Err(Error::UnexpectedResponse(_))
        ));
        assert!(matches!(
            into_objects(Value::Null),
            Err(Error::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn retain_variant_splits_shared_listing() {
        let items = vec![
            json!({"object_name": "ping4", "object_type": "object"}),
            json!({"object_name": "plugin-check-command", "object_type": "template"}),
            json!({"object_name": "icinga", "object_type": "external_object"}),
        ];

        let objects = retain_variant(items.clone(), ObjectVariant::Object);
        let names: Vec<_> = objects.iter().filter_map(object_name).collect();
        assert_eq!(names, vec!["ping4", "icinga"]);

        let templates = retain_variant(items, ObjectVariant::Template);
        let names: Vec<_> = templates.iter().filter_map(object_name).collect();
        assert_eq!(names, vec!["plugin-check-command"]);
    }
}
