//! Destructive maintenance: clear, seed and reset-to-demo.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::seed::{seed_demo_data, SeedOutcome};
use crate::store::backend::StorageBackend;
use crate::store::document_store::DocumentStore;

pub fn clear<B: StorageBackend>(db: &mut DocumentStore<B>) -> Result<CmdResult> {
    db.clear_database()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Database cleared"));
    Ok(result)
}

pub fn seed<B: StorageBackend>(db: &mut DocumentStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match seed_demo_data(db)? {
        SeedOutcome::Seeded { courses } => {
            result.add_message(CmdMessage::success(format!(
                "Added {} sample courses and demo settings",
                courses
            )));
        }
        SeedOutcome::Skipped { existing_courses } => {
            result.add_message(CmdMessage::info(format!(
                "Demo data not added: {} courses already exist",
                existing_courses
            )));
        }
    }
    Ok(result)
}

pub fn reset_demo<B: StorageBackend>(db: &mut DocumentStore<B>) -> Result<CmdResult> {
    let mut result = clear(db)?;
    result.messages.extend(seed(db)?.messages);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::{Fields, COURSES, SETTINGS, USERS};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_clear_empties_collections() {
        let mut db = InMemoryStore::in_memory();
        db.add_document(USERS, Fields::new()).unwrap();

        let result = clear(&mut db).unwrap();
        assert!(result.has_level(MessageLevel::Success));
        assert!(db.get_collection(USERS).is_empty());
        assert_eq!(db.get_collection(SETTINGS).len(), 1);
    }

    #[test]
    fn test_seed_reports_skip() {
        let mut db = InMemoryStore::in_memory();
        seed(&mut db).unwrap();
        let result = seed(&mut db).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert!(result.messages[0].content.contains("5 courses"));
    }

    #[test]
    fn test_reset_demo_replaces_user_data() {
        let mut db = InMemoryStore::in_memory();
        db.add_document(COURSES, Fields::new()).unwrap();
        db.add_document(USERS, Fields::new()).unwrap();

        let result = reset_demo(&mut db).unwrap();
        assert_eq!(result.messages.len(), 2);
        assert_eq!(db.get_collection(COURSES).len(), 5);
        assert!(db.get_collection(USERS).is_empty());
    }
}
