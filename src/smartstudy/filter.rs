//! Equality filters for [`DocumentStore::query_collection`](crate::store::document_store::DocumentStore::query_collection).
//!
//! A filter is a list of `field == value` clauses that must all hold. A clause
//! whose value is absent or JSON `null` places no constraint on its field,
//! so callers can pass optional search terms straight through.

use crate::error::{Result, StudyError};
use crate::model::Document;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Option<Value>)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`. Replaces an earlier clause on the same field.
    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_clause(field.into(), Some(value.into()))
    }

    /// Like [`Filter::eq`], but `None` leaves the field unconstrained.
    pub fn maybe<V: Into<Value>>(self, field: impl Into<String>, value: Option<V>) -> Self {
        self.with_clause(field.into(), value.map(Into::into))
    }

    fn with_clause(mut self, field: String, value: Option<Value>) -> Self {
        if let Some(existing) = self.clauses.iter_mut().find(|(name, _)| *name == field) {
            existing.1 = value;
        } else {
            self.clauses.push((field, value));
        }
        self
    }

    /// Clauses that actually constrain something.
    pub fn active(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.clauses.iter().filter_map(|(field, value)| match value {
            Some(Value::Null) | None => None,
            Some(v) => Some((field.as_str(), v)),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.active().all(|(field, expected)| {
            doc.get(field)
                .is_some_and(|actual| values_equal(&actual, expected))
        })
    }

    /// Parses a `field=value` clause. The value is read as JSON when it parses
    /// (`level=3`, `active=true`), otherwise as a plain string.
    pub fn parse_clause(input: &str) -> Result<(String, Value)> {
        let (field, raw) = input.split_once('=').ok_or_else(|| {
            StudyError::Api(format!("Invalid filter '{}', expected field=value", input))
        })?;
        let field = field.trim();
        if field.is_empty() {
            return Err(StudyError::Api(format!(
                "Invalid filter '{}', field name is empty",
                input
            )));
        }
        let value =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        Ok((field.to_string(), value))
    }
}

/// JSON equality, except that numbers compare by value, so `5` equals `5.0`.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fields;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        match value {
            Value::Object(map) => Document::new(id, map),
            _ => Document::new(id, Fields::new()),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = Filter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&doc("a", json!({}))));
    }

    #[test]
    fn test_eq_requires_exact_value() {
        let filter = Filter::new().eq("level", "Beginner");
        assert!(filter.matches(&doc("a", json!({"level": "Beginner"}))));
        assert!(!filter.matches(&doc("b", json!({"level": "beginner"}))));
        assert!(!filter.matches(&doc("c", json!({}))));
    }

    #[test]
    fn test_all_clauses_must_hold() {
        let filter = Filter::new().eq("level", "Beginner").eq("rating", 4.8);
        assert!(filter.matches(&doc("a", json!({"level": "Beginner", "rating": 4.8}))));
        assert!(!filter.matches(&doc("b", json!({"level": "Beginner", "rating": 4.5}))));
    }

    #[test]
    fn test_numbers_compare_by_value() {
        let filter = Filter::new().eq("rating", 5);
        assert!(filter.matches(&doc("a", json!({"rating": 5.0}))));
        assert!(filter.matches(&doc("b", json!({"rating": 5}))));
        assert!(!filter.matches(&doc("c", json!({"rating": 5.5}))));
        assert!(!filter.matches(&doc("d", json!({"rating": "5"}))));

        let (field, value) = Filter::parse_clause("rating=4.0").unwrap();
        let parsed = Filter::new().eq(field, value);
        assert!(parsed.matches(&doc("e", json!({"rating": 4}))));
    }

    #[test]
    fn test_absent_and_null_values_are_ignored() {
        let filter = Filter::new()
            .maybe("email", None::<String>)
            .eq("category", Value::Null);
        assert!(filter.is_empty());
        assert!(filter.matches(&doc("a", json!({"email": "x@y.z"}))));
    }

    #[test]
    fn test_filter_on_id() {
        let filter = Filter::new().eq("id", "a");
        assert!(filter.matches(&doc("a", json!({}))));
        assert!(!filter.matches(&doc("b", json!({}))));
    }

    #[test]
    fn test_later_clause_replaces_earlier() {
        let filter = Filter::new().eq("level", "A").eq("level", "B");
        assert_eq!(filter.active().count(), 1);
        assert!(filter.matches(&doc("a", json!({"level": "B"}))));
    }

    #[test]
    fn test_parse_clause() {
        assert_eq!(
            Filter::parse_clause("level=3").unwrap(),
            ("level".to_string(), json!(3))
        );
        assert_eq!(
            Filter::parse_clause("email=a@b.c").unwrap(),
            ("email".to_string(), json!("a@b.c"))
        );
        assert_eq!(
            Filter::parse_clause("title=a=b").unwrap(),
            ("title".to_string(), json!("a=b"))
        );
        assert!(Filter::parse_clause("nothing").is_err());
        assert!(Filter::parse_clause("=x").is_err());
    }
}
