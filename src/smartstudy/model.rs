//! # Data Model
//!
//! A [`Document`] is an open-ended JSON object with three system fields lifted
//! into typed struct members:
//!
//! | JSON key    | Rust field   | Set when                        |
//! |-------------|--------------|---------------------------------|
//! | `id`        | `id`         | creation, never changes         |
//! | `createdAt` | `created_at` | creation                        |
//! | `updatedAt` | `updated_at` | every successful update         |
//!
//! Every other key lives in [`Document::fields`]. On disk a document is the
//! flat JSON object. Loading is lenient: a non-string `id` is kept as its JSON
//! text, and a timestamp that does not parse stays in `fields` untouched.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub type Fields = Map<String, Value>;

pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

pub const USERS: &str = "users";
pub const COURSES: &str = "courses";
pub const ENROLLMENTS: &str = "enrollments";
pub const NOTEBOOKS: &str = "notebooks";
pub const QUIZ_RESULTS: &str = "quizResults";
pub const COURSE_PROGRESS: &str = "courseProgress";
pub const SETTINGS: &str = "settings";

/// Collections created on first startup and covered by export and clear.
pub const KNOWN_COLLECTIONS: [&str; 7] = [
    USERS,
    COURSES,
    ENROLLMENTS,
    NOTEBOOKS,
    QUIZ_RESULTS,
    COURSE_PROGRESS,
    SETTINGS,
];

pub fn is_system_field(name: &str) -> bool {
    matches!(name, ID_FIELD | CREATED_AT_FIELD | UPDATED_AT_FIELD)
}

/// Drops the system keys from caller-supplied fields.
pub fn strip_system_fields(mut fields: Fields) -> Fields {
    fields.retain(|key, _| !is_system_field(key));
    fields
}

pub fn timestamp_value(ts: DateTime<Utc>) -> Value {
    Value::String(ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Removes `key` from `map` if it holds a parseable timestamp.
fn take_timestamp(map: &mut Fields, key: &str) -> Option<DateTime<Utc>> {
    let parsed = map.get(key)?.as_str()?.parse::<DateTime<Utc>>().ok()?;
    map.remove(key);
    Some(parsed)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: String,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            created_at: None,
            updated_at: None,
            fields: strip_system_fields(fields),
        }
    }

    /// Builds a document from a stored JSON object.
    ///
    /// A missing or `null` id becomes `""`. Timestamps that are not RFC 3339
    /// strings are left in `fields` as they were.
    pub fn from_object(mut map: Fields) -> Self {
        let id = match map.remove(ID_FIELD) {
            Some(Value::String(id)) => id,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let created_at = take_timestamp(&mut map, CREATED_AT_FIELD);
        let updated_at = take_timestamp(&mut map, UPDATED_AT_FIELD);
        Self {
            id,
            created_at,
            updated_at,
            fields: map,
        }
    }

    /// Looks up a field by its JSON name, system fields included.
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            ID_FIELD => Some(Value::String(self.id.clone())),
            CREATED_AT_FIELD => self
                .created_at
                .map(timestamp_value)
                .or_else(|| self.fields.get(name).cloned()),
            UPDATED_AT_FIELD => self
                .updated_at
                .map(timestamp_value)
                .or_else(|| self.fields.get(name).cloned()),
            _ => self.fields.get(name).cloned(),
        }
    }

    /// Stamps `updatedAt`, replacing any unparsed value kept in `fields`.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.fields.remove(UPDATED_AT_FIELD);
        self.updated_at = Some(at);
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Shallow merge: named fields are overwritten, the rest are kept.
    /// System fields in `partial` are ignored.
    pub fn merge(&mut self, partial: Fields) {
        for (key, value) in strip_system_fields(partial) {
            self.fields.insert(key, value);
        }
    }

    /// A copy of this document with `name` removed from its fields.
    pub fn without_field(&self, name: &str) -> Document {
        let mut doc = self.clone();
        doc.fields.remove(name);
        doc
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Fields::deserialize(deserializer).map(Document::from_object)
    }
}

/// Every known collection's documents, keyed by collection name.
///
/// Serializes as a plain JSON object, which is also the export file format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    pub data: BTreeMap<String, Vec<Document>>,
}

impl Snapshot {
    pub fn document_count(&self) -> usize {
        self.data.values().map(Vec::len).sum()
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for (name, docs) in &self.data {
            let items = docs
                .iter()
                .filter_map(|doc| serde_json::to_value(doc).ok())
                .collect();
            map.insert(name.clone(), Value::Array(items));
        }
        Value::Object(map)
    }
}
