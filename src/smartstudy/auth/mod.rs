//! # Authentication
//!
//! [`AuthService`] keeps one logical session on top of the `users`
//! collection of a [`DocumentStore`]. It owns the store; callers that need
//! the documents go through [`AuthService::db`] / [`AuthService::db_mut`].
//!
//! ## States
//!
//! ```text
//!              register / login
//!  Anonymous ─────────────────────▶ Authenticated(record)
//!      ▲                                   │
//!      └──────────── logout ◀──────────────┘
//! ```
//!
//! `change_password` keeps the current state. A failed operation never changes
//! the state: the session only moves once its record has been persisted.
//!
//! ## Passwords
//!
//! Stored as Argon2id PHC strings (see [`password::Passwords`]). The session
//! record is the user document with the `password` field removed.

use crate::error::{Result, StudyError};
use crate::filter::Filter;
use crate::model::{timestamp_value, Document, Fields, USERS};
use crate::store::backend::StorageBackend;
use crate::store::document_store::DocumentStore;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

pub mod password;
pub mod session;

use password::Passwords;
use session::session_record;

pub const EMAIL_FIELD: &str = "email";
pub const PASSWORD_FIELD: &str = "password";
pub const LAST_LOGIN_FIELD: &str = "lastLogin";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    Authenticated(Document),
}

pub struct AuthService<B: StorageBackend> {
    db: DocumentStore<B>,
    passwords: Passwords,
    session: SessionState,
}

impl<B: StorageBackend> AuthService<B> {
    /// Wraps `db` and restores the persisted session, if any.
    ///
    /// An unreadable session record counts as a logout: it is removed and
    /// the service starts anonymous.
    pub fn new(db: DocumentStore<B>, passwords: Passwords) -> Self {
        let session = match session::load(&db) {
            Ok(Some(record)) => {
                debug!(user = %record.id, "Restored session");
                SessionState::Authenticated(record)
            }
            Ok(None) | Err(StudyError::StorageUnavailable) => SessionState::Anonymous,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session record");
                if let Err(e) = session::clear(&db) {
                    warn!(error = %e, "Failed to remove session record");
                }
                SessionState::Anonymous
            }
        };

        Self {
            db,
            passwords,
            session,
        }
    }

    pub fn db(&self) -> &DocumentStore<B> {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut DocumentStore<B> {
        &mut self.db
    }

    pub fn into_db(self) -> DocumentStore<B> {
        self.db
    }

    pub fn state(&self) -> &SessionState {
        &self.session
    }

    pub fn current_user(&self) -> Option<&Document> {
        match &self.session {
            SessionState::Authenticated(record) => Some(record),
            SessionState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.session, SessionState::Authenticated(_))
    }

    fn find_user_by_email(&self, email: &str) -> Option<Document> {
        self.db
            .query_collection(USERS, &Filter::new().eq(EMAIL_FIELD, email))
            .into_iter()
            .next()
    }

    fn start_session(&mut self, user: &Document) -> Result<Document> {
        let record = session_record(user);
        session::save(&self.db, &record)?;
        self.session = SessionState::Authenticated(record.clone());
        Ok(record)
    }

    /// Creates a user and signs them in. Returns the session record.
    ///
    /// `profile` may carry any extra fields (name, role, ...); `email` and
    /// `password` entries in it are ignored.
    pub fn register(&mut self, email: &str, password: &str, profile: Fields) -> Result<Document> {
        if self.find_user_by_email(email).is_some() {
            return Err(StudyError::DuplicateEmail(email.to_string()));
        }

        let mut fields = Fields::new();
        for (key, value) in profile {
            if key != EMAIL_FIELD && key != PASSWORD_FIELD {
                fields.insert(key, value);
            }
        }
        fields.insert(EMAIL_FIELD.to_string(), Value::String(email.to_string()));
        fields.insert(
            PASSWORD_FIELD.to_string(),
            Value::String(self.passwords.hash(password)?),
        );
        fields.insert(LAST_LOGIN_FIELD.to_string(), timestamp_value(Utc::now()));

        let user = self.db.add_document(USERS, fields)?;
        let record = self.start_session(&user)?;
        info!(user = %record.id, "Registered new user");
        Ok(record)
    }

    /// Signs in with email and password. Returns the session record.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Document> {
        let user = self
            .find_user_by_email(email)
            .ok_or(StudyError::UserNotFound)?;

        let stored = user.str_field(PASSWORD_FIELD).unwrap_or_default();
        if !self.passwords.verify(password, stored) {
            return Err(StudyError::InvalidPassword);
        }

        let mut patch = Fields::new();
        patch.insert(LAST_LOGIN_FIELD.to_string(), timestamp_value(Utc::now()));
        let user = self.db.update_document(USERS, &user.id, patch)?;

        let record = self.start_session(&user)?;
        info!(user = %record.id, "Logged in");
        Ok(record)
    }

    /// Ends the session. Safe to call when nobody is signed in, and with no
    /// storage there is no record to remove.
    pub fn logout(&mut self) -> Result<()> {
        self.session = SessionState::Anonymous;
        match session::clear(&self.db) {
            Err(StudyError::StorageUnavailable) => Ok(()),
            other => other,
        }
    }

    /// Replaces a user's password after checking the current one.
    /// The session record is left as it is.
    pub fn change_password(
        &mut self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let user = self
            .db
            .get_document(USERS, user_id)
            .ok_or(StudyError::UserNotFound)?;

        let stored = user.str_field(PASSWORD_FIELD).unwrap_or_default();
        if !self.passwords.verify(current_password, stored) {
            return Err(StudyError::InvalidPassword);
        }

        let mut patch = Fields::new();
        patch.insert(
            PASSWORD_FIELD.to_string(),
            Value::String(self.passwords.hash(new_password)?),
        );
        self.db.update_document(USERS, user_id, patch)?;
        info!(user = %user_id, "Password changed");
        Ok(())
    }
}
