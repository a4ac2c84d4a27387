//! # Command Layer
//!
//! The operations behind every CLI subcommand. Each command takes the store
//! (or the auth service), does its work and returns a [`CmdResult`].
//!
//! Commands do not print, prompt or pick exit codes. The CLI renders the
//! result; tests inspect it directly.
//!
//! ## Command Modules
//!
//! - [`status`]: Collection and document counts
//! - [`export`]: Write a snapshot of the store to a JSON file
//! - [`import`]: Load a snapshot file back into the store
//! - [`reset`]: Clear the store, seed demo data, or both
//! - [`documents`]: List, get, add, update and delete documents
//! - [`account`]: Register, log in and out, change passwords
//!
//! Most tests run against `InMemoryStore`; file-based commands use a temp dir.

use crate::model::Document;
use crate::store::StoreStatus;
use serde::Serialize;
use std::path::PathBuf;

pub mod account;
pub mod documents;
pub mod export;
pub mod import;
pub mod reset;
pub mod status;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Documents to show, in order.
    pub documents: Vec<Document>,
    pub status: Option<StoreStatus>,
    /// File written by the command, if any.
    pub export_path: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = documents;
        self
    }

    pub fn with_status(mut self, status: StoreStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_export_path(mut self, path: PathBuf) -> Self {
        self.export_path = Some(path);
        self
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
