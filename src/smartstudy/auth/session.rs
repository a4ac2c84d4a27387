//! Persistence of the signed-in user under the session key.
//!
//! The record is a single JSON object, stored next to the collections but
//! outside them, and never carries a password.

use super::PASSWORD_FIELD;
use crate::error::Result;
use crate::model::Document;
use crate::store::backend::StorageBackend;
use crate::store::document_store::DocumentStore;

/// The user document as it may be kept in a session: password removed.
pub fn session_record(user: &Document) -> Document {
    user.without_field(PASSWORD_FIELD)
}

pub fn load<B: StorageBackend>(db: &DocumentStore<B>) -> Result<Option<Document>> {
    db.ensure_available()?;
    match db.backend().get_item(&db.keys().session_key)? {
        Some(raw) => {
            let record: Document = serde_json::from_str(&raw)?;
            Ok(Some(session_record(&record)))
        }
        None => Ok(None),
    }
}

pub fn save<B: StorageBackend>(db: &DocumentStore<B>, record: &Document) -> Result<()> {
    db.ensure_available()?;
    let raw = serde_json::to_string(&session_record(record))?;
    db.backend().set_item(&db.keys().session_key, &raw)
}

pub fn clear<B: StorageBackend>(db: &DocumentStore<B>) -> Result<()> {
    db.ensure_available()?;
    db.backend().remove_item(&db.keys().session_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fields;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;

    fn user() -> Document {
        let mut fields = Fields::new();
        fields.insert("email".to_string(), json!("a@x.io"));
        fields.insert("password".to_string(), json!("$argon2id$..."));
        Document::new("u1", fields)
    }

    #[test]
    fn test_save_strips_password() {
        let db = InMemoryStore::in_memory();
        save(&db, &user()).unwrap();

        let raw = db
            .backend
            .get_item("smartstudy_current_user")
            .unwrap()
            .unwrap();
        assert!(!raw.contains("password"));
        assert_eq!(load(&db).unwrap().unwrap().id, "u1");
    }

    #[test]
    fn test_load_strips_password_from_tampered_record() {
        let db = InMemoryStore::in_memory();
        db.backend
            .put_raw("smartstudy_current_user", r#"{"id":"u1","password":"x"}"#);
        let record = load(&db).unwrap().unwrap();
        assert!(record.fields.get("password").is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let db = InMemoryStore::in_memory();
        clear(&db).unwrap();
        save(&db, &user()).unwrap();
        clear(&db).unwrap();
        clear(&db).unwrap();
        assert!(load(&db).unwrap().is_none());
    }
}
