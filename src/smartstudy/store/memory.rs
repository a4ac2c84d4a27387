use super::document_store::DocumentStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = DocumentStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl InMemoryStore {
    pub fn in_memory() -> Self {
        DocumentStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Fields, COURSES, ENROLLMENTS};
    use serde_json::json;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::in_memory(),
            }
        }

        pub fn with_courses(mut self, count: usize) -> Self {
            for i in 0..count {
                let mut fields = Fields::new();
                fields.insert("title".to_string(), json!(format!("Course {}", i + 1)));
                fields.insert("level".to_string(), json!("Beginner"));
                self.store.add_document(COURSES, fields).unwrap();
            }
            self
        }

        pub fn with_enrollment(mut self, user_id: &str, course_id: &str) -> Self {
            let mut fields = Fields::new();
            fields.insert("userId".to_string(), json!(user_id));
            fields.insert("courseId".to_string(), json!(course_id));
            fields.insert("progress".to_string(), json!(0));
            self.store.add_document(ENROLLMENTS, fields).unwrap();
            self
        }
    }
}
