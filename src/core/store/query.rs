//! Selectors and predicates for façade queries.
//!
//! A [`Selector`] narrows a hydrated value to a sub-view without a separate
//! cache entry. A [`Predicate`] decides which items of a collection match.

use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value};

/// Extracts a sub-view of a hydrated value.
#[derive(Clone)]
pub enum Selector {
    /// Walk object keys (or array indices) segment by segment.
    Path(Vec<String>),
    /// Arbitrary transform of the hydrated value.
    Func(Rc<dyn Fn(&Value) -> Value>),
}

impl Selector {
    /// Parse a dotted path such as `"summary.zones"`. `""` selects the
    /// whole value.
    pub fn path(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::Path(Vec::new());
        }
        Self::Path(dotted.split('.').map(String::from).collect())
    }

    pub fn func(f: impl Fn(&Value) -> Value + 'static) -> Self {
        Self::Func(Rc::new(f))
    }

    /// Apply the selector. Missing path segments yield `Value::Null`.
    pub fn select(&self, data: &Value) -> Value {
        match self {
            Self::Path(segments) => {
                let mut cursor = data;
                for segment in segments {
                    let next = match cursor {
                        Value::Object(map) => map.get(segment),
                        Value::Array(items) => {
                            segment.parse::<usize>().ok().and_then(|i| items.get(i))
                        }
                        _ => None,
                    };
                    match next {
                        Some(value) => cursor = value,
                        None => return Value::Null,
                    }
                }
                cursor.clone()
            }
            Self::Func(f) => f(data),
        }
    }
}

impl From<&str> for Selector {
    fn from(dotted: &str) -> Self {
        Self::path(dotted)
    }
}

impl From<Vec<String>> for Selector {
    fn from(segments: Vec<String>) -> Self {
        Self::Path(segments)
    }
}

impl From<&[&str]> for Selector {
    fn from(segments: &[&str]) -> Self {
        Self::Path(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(segments) => f.debug_tuple("Path").field(segments).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Decides whether an item belongs in a filter result.
#[derive(Clone)]
pub enum Predicate {
    /// Every key/value pair must be strictly equal on the item.
    Fields(Map<String, Value>),
    Func(Rc<dyn Fn(&Value) -> bool>),
}

impl Predicate {
    pub fn func(f: impl Fn(&Value) -> bool + 'static) -> Self {
        Self::Func(Rc::new(f))
    }

    /// Build a field-equality predicate from a JSON object.
    ///
    /// A non-object value produces an empty field set, which matches
    /// every item.
    pub fn fields(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Fields(map),
            _ => Self::Fields(Map::new()),
        }
    }

    pub fn matches(&self, item: &Value) -> bool {
        match self {
            Self::Fields(fields) => fields
                .iter()
                .all(|(key, expected)| item.get(key) == Some(expected)),
            Self::Func(f) => f(item),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Resolve the collection `get`/`filter` operate on.
///
/// Array-valued hydrated data is scanned directly and the selector is
/// ignored; otherwise the selector picks the collection.
pub(crate) fn collection<'a>(
    hydrated: &'a Value,
    selector: Option<&Selector>,
) -> std::borrow::Cow<'a, Value> {
    use std::borrow::Cow;

    if hydrated.is_array() {
        return Cow::Borrowed(hydrated);
    }
    match selector {
        Some(selector) => Cow::Owned(selector.select(hydrated)),
        None => Cow::Borrowed(hydrated),
    }
}

/// Linear scan for the item whose `id_key` (or `id`) equals `id`.
pub(crate) fn find_by_id(source: &Value, id_key: &str, id: &Value) -> Option<Value> {
    let Value::Array(items) = source else {
        return None;
    };
    items
        .iter()
        .find(|item| {
            let key = item
                .get(id_key)
                .filter(|v| !v.is_null())
                .or_else(|| item.get("id"));
            key == Some(id)
        })
        .cloned()
}

/// Cloned items of `source` matching `predicate`; `[]` for non-arrays.
pub(crate) fn filter_items(source: &Value, predicate: &Predicate) -> Vec<Value> {
    let Value::Array(items) = source else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| predicate.matches(item))
        .cloned()
        .collect()
}
