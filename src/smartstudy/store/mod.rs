//! # Storage Layer
//!
//! Two layers, split the same way as everywhere else in the crate:
//!
//! - [`backend::StorageBackend`]: a dumb string key-value medium. It knows
//!   nothing about documents.
//!   - [`fs_backend::FsBackend`]: one file per key in a data directory.
//!   - [`mem_backend::MemBackend`]: a `HashMap`, for tests and throwaway stores.
//! - [`document_store::DocumentStore`]: collections of JSON documents on top of
//!   any backend. CRUD, equality queries, export/import and clear.
//!
//! ## Key Layout
//!
//! Each collection is one JSON array under `<db_name>_<collection>`. The
//! signed-in user lives under a separate session key. See [`KeyLayout`].
//!
//! ## Failure Policy
//!
//! Read paths never fail: an absent, unreadable or corrupt collection reads
//! as empty and the problem is logged. Write paths return `Err` and leave the
//! previously stored value untouched. Nothing in this layer panics on bad data.
//!
//! ## Type Aliases
//!
//! - [`fs::FileStore`] = `DocumentStore<FsBackend>`
//! - [`memory::InMemoryStore`] = `DocumentStore<MemBackend>`

use crate::config::{StudyConfig, DEFAULT_DB_NAME, DEFAULT_SESSION_KEY};

pub mod backend;
pub mod document_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

/// Maps collection names and the session record to backend keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    pub db_name: String,
    pub session_key: String,
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self {
            db_name: DEFAULT_DB_NAME.to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }
}

impl KeyLayout {
    pub fn from_config(config: &StudyConfig) -> Self {
        Self {
            db_name: config.db_name.clone(),
            session_key: config.session_key.clone(),
        }
    }

    pub fn collection_key(&self, collection: &str) -> String {
        format!("{}_{}", self.db_name, collection)
    }
}

/// Document counts per known collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    pub collections: Vec<(String, usize)>,
}

impl StoreStatus {
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    pub fn total_documents(&self) -> usize {
        self.collections.iter().map(|(_, count)| count).sum()
    }
}

/// Outcome of [`document_store::DocumentStore::import_database`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Collections overwritten, with their new document counts.
    pub imported: Vec<(String, usize)>,
    /// Keys whose value was not an array of documents.
    pub skipped: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_key() {
        let keys = KeyLayout::default();
        assert_eq!(keys.collection_key("users"), "smartstudy_db_users");
        assert_eq!(keys.session_key, "smartstudy_current_user");
    }

    #[test]
    fn test_layout_from_config() {
        let config = StudyConfig {
            db_name: "campus".to_string(),
            ..Default::default()
        };
        let keys = KeyLayout::from_config(&config);
        assert_eq!(keys.collection_key("quizResults"), "campus_quizResults");
    }

    #[test]
    fn test_status_totals() {
        let status = StoreStatus {
            collections: vec![("users".to_string(), 2), ("courses".to_string(), 5)],
        };
        assert_eq!(status.collection_count(), 2);
        assert_eq!(status.total_documents(), 7);
    }
}
