use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StudyError};
use crate::store::backend::StorageBackend;
use crate::store::document_store::DocumentStore;
use chrono::{NaiveDate, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// `<db_name>_<YYYY-MM-DD>.json`
pub fn export_file_name(db_name: &str, date: NaiveDate) -> String {
    format!("{}_{}.json", db_name, date.format("%Y-%m-%d"))
}

/// Writes every known collection as pretty JSON.
///
/// Without `output` the file goes into the current directory under the
/// dated default name.
pub fn run<B: StorageBackend>(db: &DocumentStore<B>, output: Option<&Path>) -> Result<CmdResult> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(export_file_name(
            &db.keys().db_name,
            Utc::now().date_naive(),
        )),
    };

    let snapshot = db.export_database();
    let content = serde_json::to_string_pretty(&snapshot).map_err(StudyError::Serialization)?;
    fs::write(&path, content).map_err(StudyError::Io)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} documents to {}",
        snapshot.document_count(),
        path.display()
    )));
    Ok(result.with_export_path(path))
}
