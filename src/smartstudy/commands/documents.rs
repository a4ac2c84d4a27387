use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StudyError};
use crate::filter::Filter;
use crate::model::Fields;
use crate::store::backend::StorageBackend;
use crate::store::document_store::DocumentStore;
use serde_json::Value;

/// Parses a JSON object given on the command line.
pub fn parse_fields(raw: &str) -> Result<Fields> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(StudyError::Api(format!(
            "Expected a JSON object, got: {}",
            other
        ))),
    }
}

pub fn list<B: StorageBackend>(
    db: &DocumentStore<B>,
    collection: &str,
    filter: &Filter,
) -> Result<CmdResult> {
    let docs = db.query_collection(collection, filter);
    let mut result = CmdResult::default();
    if docs.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No documents in {}",
            collection
        )));
    }
    Ok(result.with_documents(docs))
}

pub fn get<B: StorageBackend>(db: &DocumentStore<B>, collection: &str, id: &str) -> Result<CmdResult> {
    let doc = db
        .get_document(collection, id)
        .ok_or_else(|| StudyError::not_found(collection, id))?;
    Ok(CmdResult::default().with_documents(vec![doc]))
}

pub fn add<B: StorageBackend>(
    db: &mut DocumentStore<B>,
    collection: &str,
    fields: Fields,
) -> Result<CmdResult> {
    let doc = db.add_document(collection, fields)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added {} to {}",
        doc.id, collection
    )));
    Ok(result.with_documents(vec![doc]))
}

pub fn update<B: StorageBackend>(
    db: &mut DocumentStore<B>,
    collection: &str,
    id: &str,
    fields: Fields,
) -> Result<CmdResult> {
    let doc = db.update_document(collection, id, fields)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Updated {}", doc.id)));
    Ok(result.with_documents(vec![doc]))
}

pub fn delete<B: StorageBackend>(
    db: &mut DocumentStore<B>,
    collection: &str,
    id: &str,
) -> Result<CmdResult> {
    db.delete_document(collection, id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted {} from {}",
        id, collection
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::COURSES;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_parse_fields() {
        let fields = parse_fields(r#"{"title": "T", "rating": 4}"#).unwrap();
        assert_eq!(fields.len(), 2);
        assert!(matches!(parse_fields("[1]"), Err(StudyError::Api(_))));
        assert!(matches!(
            parse_fields("{"),
            Err(StudyError::Serialization(_))
        ));
    }

    #[test]
    fn test_list_with_filter() {
        let mut db = InMemoryStore::in_memory();
        add(&mut db, COURSES, parse_fields(r#"{"level": "Beginner"}"#).unwrap()).unwrap();
        add(&mut db, COURSES, parse_fields(r#"{"level": "Advanced"}"#).unwrap()).unwrap();

        let result = list(&db, COURSES, &Filter::new().eq("level", "Advanced")).unwrap();
        assert_eq!(result.documents.len(), 1);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_list_empty_collection_says_so() {
        let db = InMemoryStore::in_memory();
        let result = list(&db, COURSES, &Filter::new()).unwrap();
        assert!(result.documents.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn test_get_update_delete() {
        let mut db = StoreFixture::new().with_courses(1).store;
        let id = db.get_collection(COURSES)[0].id.clone();

        assert_eq!(get(&db, COURSES, &id).unwrap().documents[0].id, id);

        let updated =
            update(&mut db, COURSES, &id, parse_fields(r#"{"rating": 5}"#).unwrap()).unwrap();
        assert_eq!(updated.documents[0].get("rating"), Some(serde_json::json!(5)));

        delete(&mut db, COURSES, &id).unwrap();
        assert!(matches!(
            get(&db, COURSES, &id),
            Err(StudyError::NotFound { .. })
        ));
        assert!(matches!(
            delete(&mut db, COURSES, &id),
            Err(StudyError::NotFound { .. })
        ));
    }
}
