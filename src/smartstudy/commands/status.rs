use crate::commands::{CmdMessage, CmdResult};
use crate::config::DB_VERSION;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::document_store::DocumentStore;

pub fn run<B: StorageBackend>(db: &DocumentStore<B>) -> Result<CmdResult> {
    db.ensure_available()?;

    let mut result = CmdResult::default();
    let status = db.status();
    result.add_message(CmdMessage::info(format!(
        "Database {} (v{}): {} collections, {} documents",
        db.keys().db_name,
        DB_VERSION,
        status.collection_count(),
        status.total_documents()
    )));
    Ok(result.with_status(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StudyError;
    use crate::model::{Fields, COURSES};
    use crate::store::mem_backend::MemBackend;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_status_reports_counts() {
        let mut db = InMemoryStore::in_memory();
        db.add_document(COURSES, Fields::new()).unwrap();

        let result = run(&db).unwrap();
        let status = result.status.unwrap();
        assert_eq!(status.collection_count(), 7);
        assert_eq!(status.total_documents(), 2);
        assert!(result.messages[0].content.contains("7 collections, 2 documents"));
    }

    #[test]
    fn test_status_on_unavailable_store() {
        let backend = MemBackend::new();
        backend.set_simulate_unavailable(true);
        let db = DocumentStore::with_backend(backend);

        assert!(matches!(run(&db), Err(StudyError::StorageUnavailable)));
    }
}
