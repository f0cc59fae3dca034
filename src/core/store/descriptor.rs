//! Resource descriptors.
//!
//! A descriptor says where a resource lives and how its raw JSON is
//! reshaped into the value consumers work with. The registry is built
//! once at startup and never mutated.

use std::collections::HashMap;

use serde_json::Value;

use crate::core::error::StoreError;

/// Reshapes a raw document into its hydrated form.
///
/// Must accept any JSON value, including the empty object used for
/// degraded entries, and return a well-typed (possibly empty) result.
pub type Unwrap = fn(&Value) -> Value;

/// Static configuration for one named resource.
#[derive(Clone, Debug)]
pub struct ResourceDescriptor {
    /// Resource name used by callers (e.g. "detections").
    pub name: &'static str,
    /// Path or URL of the JSON document.
    pub path: String,
    /// Raw to hydrated transform.
    pub unwrap: Unwrap,
    /// Field that identifies an item for `get`.
    pub id_key: &'static str,
}

impl ResourceDescriptor {
    /// Descriptor with `id` as the identifying field.
    pub fn new(name: &'static str, path: impl Into<String>, unwrap: Unwrap) -> Self {
        Self {
            name,
            path: path.into(),
            unwrap,
            id_key: "id",
        }
    }

    pub fn with_id_key(mut self, id_key: &'static str) -> Self {
        self.id_key = id_key;
        self
    }

    /// Apply the unwrap transform.
    pub fn hydrate(&self, raw: &Value) -> Value {
        (self.unwrap)(raw)
    }
}

/// Unwrap that passes the document through unchanged.
pub fn identity(raw: &Value) -> Value {
    raw.clone()
}

/// Unwrap helper: `raw[key]` if it is an array, else `[]`.
pub fn array_field(raw: &Value, key: &str) -> Value {
    match raw.get(key) {
        Some(Value::Array(items)) => Value::Array(items.clone()),
        _ => Value::Array(Vec::new()),
    }
}

/// Fixed set of descriptors keyed by resource name.
#[derive(Clone, Debug, Default)]
pub struct DescriptorRegistry {
    descriptors: HashMap<&'static str, ResourceDescriptor>,
}

impl DescriptorRegistry {
    pub fn new(descriptors: impl IntoIterator<Item = ResourceDescriptor>) -> Self {
        Self {
            descriptors: descriptors.into_iter().map(|d| (d.name, d)).collect(),
        }
    }

    /// Look up a descriptor, failing fast for unknown names.
    pub fn get(&self, name: &str) -> Result<&ResourceDescriptor, StoreError> {
        self.descriptors
            .get(name)
            .ok_or_else(|| StoreError::UnknownResource(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn days(raw: &Value) -> Value {
        array_field(raw, "days")
    }

    #[test]
    fn test_array_field_unwrap() {
        let raw = json!({ "days": [{ "date": "2024-05-01" }] });
        assert_eq!(days(&raw), json!([{ "date": "2024-05-01" }]));
        assert_eq!(days(&json!({})), json!([]));
        assert_eq!(days(&json!({ "days": "oops" })), json!([]));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = DescriptorRegistry::new([
            ResourceDescriptor::new("clips", "data/clips.json", days),
            ResourceDescriptor::new("rail", "data/rail.json", identity).with_id_key("slug"),
        ]);

        assert_eq!(registry.get("clips").unwrap().path, "data/clips.json");
        assert_eq!(registry.get("rail").unwrap().id_key, "slug");
        assert_eq!(
            registry.get("nope").unwrap_err(),
            StoreError::UnknownResource("nope".to_string())
        );
        assert_eq!(registry.names().count(), 2);
    }
}
