//! Record identifiers and book relation shapes.
//!
//! The backend is inconsistent about how it names and embeds identifiers:
//! records carry `_id` (document store) or `id`, and a book's relation fields
//! come back either as embedded objects or as bare identifier strings. The
//! types here accept every observed shape so the rest of the crate only ever
//! sees identifiers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier of a backend record, accepting both `_id` and `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordKey {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub object_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
}

impl RecordKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            object_id: Some(id.into()),
            id: None,
        }
    }

    /// The identifier, preferring `_id`. Blank identifiers count as missing.
    pub fn get(&self) -> Option<&str> {
        self.object_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.id.as_deref().filter(|s| !s.trim().is_empty()))
    }
}

/// Accepts a string or a number where an identifier is expected.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_id))
}

pub(crate) fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Referenced entity embedded in a book
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedEntity {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(default)]
    pub name: Option<String>,
}

/// One element of a relation field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(String),
    Embedded(EmbeddedEntity),
    Other(Value),
}

impl EntityRef {
    /// Identifier of the referenced entity, if one can be extracted
    pub fn id(&self) -> Option<String> {
        let id = match self {
            EntityRef::Id(id) => Some(id.clone()),
            EntityRef::Embedded(entity) => entity.key.get().map(str::to_string),
            EntityRef::Other(value) => scalar_id(value),
        };
        id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty())
    }

    /// Display label: the embedded name when present, else the identifier
    pub fn label(&self) -> Option<String> {
        match self {
            EntityRef::Embedded(EmbeddedEntity {
                name: Some(name), ..
            }) if !name.trim().is_empty() => Some(name.clone()),
            _ => self.id(),
        }
    }
}

/// A relation field: a list of references or a single one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Relation {
    Many(Vec<EntityRef>),
    One(EntityRef),
}

impl Relation {
    pub fn refs(&self) -> &[EntityRef] {
        match self {
            Relation::Many(refs) => refs,
            Relation::One(one) => std::slice::from_ref(one),
        }
    }

    pub fn labels(&self) -> Vec<String> {
        self.refs().iter().filter_map(EntityRef::label).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_key_prefers_object_id() {
        let key: RecordKey = serde_json::from_value(json!({"_id": "abc", "id": "def"})).unwrap();
        assert_eq!(key.get(), Some("abc"));

        let key: RecordKey = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(key.get(), Some("42"));

        let key: RecordKey = serde_json::from_value(json!({"_id": "  ", "id": "x"})).unwrap();
        assert_eq!(key.get(), Some("x"));
    }

    #[test]
    fn test_relation_shapes() {
        let many: Relation =
            serde_json::from_value(json!([{"_id": "a1", "name": "Tô Hoài"}, "a2", 7, null])).unwrap();
        let ids: Vec<_> = many.refs().iter().filter_map(EntityRef::id).collect();
        assert_eq!(ids, vec!["a1", "a2", "7"]);
        assert_eq!(many.labels(), vec!["Tô Hoài", "a2", "7"]);

        let one: Relation = serde_json::from_value(json!({"id": "p1", "name": "Kim Đồng"})).unwrap();
        assert_eq!(one.refs().len(), 1);
        assert_eq!(one.refs()[0].id().as_deref(), Some("p1"));

        let bare: Relation = serde_json::from_value(json!("p2")).unwrap();
        assert_eq!(bare, Relation::One(EntityRef::Id("p2".into())));
    }
}
