//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UI
//! clients. It turns raw inputs (JSON text, `field=value` clauses) into typed
//! arguments and dispatches to `commands::*`. No business logic lives here.
//!
//! `StudyApi<B>` is generic over the storage backend:
//! - Production: `StudyApi<FsBackend>`
//! - Testing: `StudyApi<MemBackend>`
//!
//! Tests here only check dispatch and input normalization.

use crate::auth::password::Passwords;
use crate::auth::AuthService;
use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::filter::Filter;
use crate::model::Fields;
use crate::store::backend::StorageBackend;
use crate::store::document_store::DocumentStore;
use std::path::Path;

pub struct StudyApi<B: StorageBackend> {
    auth: AuthService<B>,
}

impl<B: StorageBackend> StudyApi<B> {
    pub fn new(db: DocumentStore<B>, passwords: Passwords) -> Self {
        Self {
            auth: AuthService::new(db, passwords),
        }
    }

    pub fn auth(&self) -> &AuthService<B> {
        &self.auth
    }

    pub fn db(&self) -> &DocumentStore<B> {
        self.auth.db()
    }

    // --- Maintenance ---

    pub fn status(&self) -> Result<CmdResult> {
        commands::status::run(self.auth.db())
    }

    pub fn export(&self, output: Option<&Path>) -> Result<CmdResult> {
        commands::export::run(self.auth.db(), output)
    }

    pub fn import(&mut self, path: &Path) -> Result<CmdResult> {
        commands::import::run(self.auth.db_mut(), path)
    }

    pub fn clear(&mut self) -> Result<CmdResult> {
        commands::reset::clear(self.auth.db_mut())
    }

    pub fn seed(&mut self) -> Result<CmdResult> {
        commands::reset::seed(self.auth.db_mut())
    }

    pub fn reset_demo(&mut self) -> Result<CmdResult> {
        commands::reset::reset_demo(self.auth.db_mut())
    }

    // --- Documents ---

    pub fn list_documents<W: AsRef<str>>(&self, collection: &str, clauses: &[W]) -> Result<CmdResult> {
        let filter = parse_filter(clauses)?;
        commands::documents::list(self.auth.db(), collection, &filter)
    }

    pub fn get_document(&self, collection: &str, id: &str) -> Result<CmdResult> {
        commands::documents::get(self.auth.db(), collection, id)
    }

    pub fn add_document(&mut self, collection: &str, json: &str) -> Result<CmdResult> {
        let fields = commands::documents::parse_fields(json)?;
        commands::documents::add(self.auth.db_mut(), collection, fields)
    }

    pub fn update_document(&mut self, collection: &str, id: &str, json: &str) -> Result<CmdResult> {
        let fields = commands::documents::parse_fields(json)?;
        commands::documents::update(self.auth.db_mut(), collection, id, fields)
    }

    pub fn delete_document(&mut self, collection: &str, id: &str) -> Result<CmdResult> {
        commands::documents::delete(self.auth.db_mut(), collection, id)
    }

    // --- Accounts ---

    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        profile_json: Option<&str>,
    ) -> Result<CmdResult> {
        let profile = match profile_json {
            Some(json) => commands::documents::parse_fields(json)?,
            None => Fields::new(),
        };
        commands::account::register(&mut self.auth, email, password, profile)
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<CmdResult> {
        commands::account::login(&mut self.auth, email, password)
    }

    pub fn logout(&mut self) -> Result<CmdResult> {
        commands::account::logout(&mut self.auth)
    }

    pub fn whoami(&self) -> Result<CmdResult> {
        commands::account::whoami(&self.auth)
    }

    pub fn change_password(&mut self, user_id: &str, current: &str, new: &str) -> Result<CmdResult> {
        commands::account::change_password(&mut self.auth, user_id, current, new)
    }
}

fn parse_filter<W: AsRef<str>>(clauses: &[W]) -> Result<Filter> {
    let mut filter = Filter::new();
    for clause in clauses {
        let (field, value) = Filter::parse_clause(clause.as_ref())?;
        filter = filter.eq(field, value);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HashingConfig;
    use crate::error::StudyError;
    use crate::model::COURSES;
    use crate::store::mem_backend::MemBackend;
    use crate::store::memory::InMemoryStore;

    fn make_api() -> StudyApi<MemBackend> {
        let passwords = Passwords::new(&HashingConfig::fast()).unwrap();
        StudyApi::new(InMemoryStore::in_memory(), passwords)
    }

    #[test]
    fn test_parse_filter_clauses() {
        let filter = parse_filter(&["level=Beginner", "rating=4.5"]).unwrap();
        assert_eq!(filter.active().count(), 2);
        assert!(parse_filter(&["nonsense"]).is_err());
    }

    #[test]
    fn test_add_and_list_dispatch() {
        let mut api = make_api();
        api.add_document(COURSES, r#"{"level": "Beginner"}"#).unwrap();
        api.add_document(COURSES, r#"{"level": "Advanced"}"#).unwrap();

        let result = api.list_documents(COURSES, &["level=Beginner"]).unwrap();
        assert_eq!(result.documents.len(), 1);
        let result = api.list_documents::<&str>(COURSES, &[]).unwrap();
        assert_eq!(result.documents.len(), 2);
    }

    #[test]
    fn test_add_rejects_non_object_json() {
        let mut api = make_api();
        assert!(matches!(
            api.add_document(COURSES, "42"),
            Err(StudyError::Api(_))
        ));
    }

    #[test]
    fn test_register_with_profile_json() {
        let mut api = make_api();
        api.register("ada@example.com", "pw", Some(r#"{"name": "Ada"}"#))
            .unwrap();
        let me = api.whoami().unwrap();
        assert_eq!(me.documents[0].str_field("name"), Some("Ada"));
    }

    #[test]
    fn test_reset_demo_dispatch() {
        let mut api = make_api();
        api.reset_demo().unwrap();
        assert_eq!(api.db().get_collection(COURSES).len(), 5);
        assert!(api.status().unwrap().status.is_some());
    }
}
