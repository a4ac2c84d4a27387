use super::backend::StorageBackend;
use super::{ImportReport, KeyLayout, StoreStatus};
use crate::error::{Result, StudyError};
use crate::filter::Filter;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::model::{Document, Fields, Snapshot, KNOWN_COLLECTIONS, SETTINGS};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

/// Attempts at drawing an id that is not already used in the collection.
const MAX_ID_ATTEMPTS: usize = 8;

pub const DEFAULT_SETTINGS_ID: &str = "default";

/// The settings document every fresh or cleared store starts with.
pub fn default_settings() -> Document {
    let fields = match json!({
        "theme": "light",
        "notifications": true,
        "emailUpdates": true,
        "studyReminders": true,
    }) {
        Value::Object(map) => map,
        _ => Fields::new(),
    };
    Document::new(DEFAULT_SETTINGS_ID, fields)
}

/// Named collections of JSON documents persisted through a [`StorageBackend`].
///
/// Construction initializes the store: every known collection whose key is
/// absent is written as `[]`, then the default settings document is added if
/// `settings` is empty. When the backend reports itself unavailable the store
/// degrades to one that reads empty and refuses every write with
/// [`StudyError::StorageUnavailable`].
pub struct DocumentStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for the session record and tests.
    pub(crate) backend: B,
    keys: KeyLayout,
    ids: Box<dyn IdGenerator>,
    available: bool,
    freshly_created: bool,
}

impl<B: StorageBackend> DocumentStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self::new(backend, KeyLayout::default())
    }

    pub fn new(backend: B, keys: KeyLayout) -> Self {
        Self::with_id_generator(backend, keys, Box::new(UuidGenerator))
    }

    pub fn with_id_generator(backend: B, keys: KeyLayout, ids: Box<dyn IdGenerator>) -> Self {
        let available = backend.is_available();
        let mut store = Self {
            backend,
            keys,
            ids,
            available,
            freshly_created: false,
        };

        if !available {
            error!("Storage backend is not available; documents will not be persisted");
            return store;
        }

        match store.initialize() {
            Ok(created) => store.freshly_created = created == KNOWN_COLLECTIONS.len(),
            Err(e) => error!(error = %e, "Failed to initialize document store"),
        }
        store
    }

    /// Writes `[]` for absent known collections and seeds default settings.
    /// Returns how many collection keys had to be created.
    fn initialize(&mut self) -> Result<usize> {
        let mut created = 0;
        for name in KNOWN_COLLECTIONS {
            let key = self.keys.collection_key(name);
            if self.backend.get_item(&key)?.is_none() {
                self.backend.set_item(&key, "[]")?;
                created += 1;
            }
        }

        if self.get_collection(SETTINGS).is_empty() {
            self.set_collection(SETTINGS, &[default_settings()])?;
        }
        Ok(created)
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// True when this store found none of its collections on construction.
    pub fn freshly_created(&self) -> bool {
        self.freshly_created
    }

    pub fn keys(&self) -> &KeyLayout {
        &self.keys
    }

    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    pub(crate) fn ensure_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(StudyError::StorageUnavailable)
        }
    }

    /// Parses the stored array one element at a time, so a single odd
    /// document never hides the rest. Elements that are not objects are dropped.
    fn read_collection(&self, name: &str) -> Result<Vec<Document>> {
        self.ensure_available()?;
        let raw = match self.backend.get_item(&self.keys.collection_key(name))? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        let items: Vec<Value> = serde_json::from_str(&raw)?;
        let total = items.len();
        let docs: Vec<Document> = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(Document::from_object(map)),
                _ => None,
            })
            .collect();
        if docs.len() < total {
            warn!(
                collection = name,
                dropped = total - docs.len(),
                "Ignoring collection entries that are not objects"
            );
        }
        Ok(docs)
    }

    /// All documents of `name` in stored order. Absent, unreadable and corrupt
    /// collections read as empty.
    pub fn get_collection(&self, name: &str) -> Vec<Document> {
        match self.read_collection(name) {
            Ok(docs) => docs,
            Err(StudyError::StorageUnavailable) => Vec::new(),
            Err(e) => {
                warn!(collection = name, error = %e, "Unreadable collection treated as empty");
                Vec::new()
            }
        }
    }

    /// Replaces the whole contents of `name`.
    pub fn set_collection(&mut self, name: &str, docs: &[Document]) -> Result<()> {
        self.ensure_available()?;
        let raw = serde_json::to_string(docs)?;
        if let Err(e) = self.backend.set_item(&self.keys.collection_key(name), &raw) {
            warn!(collection = name, error = %e, "Failed to write collection");
            return Err(e);
        }
        debug!(collection = name, documents = docs.len(), "Collection written");
        Ok(())
    }

    fn fresh_id(&self, existing: &[Document]) -> Result<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.generate();
            if !id.is_empty() && !existing.iter().any(|doc| doc.id == id) {
                return Ok(id);
            }
        }
        Err(StudyError::Store(
            "Could not generate a unique document id".to_string(),
        ))
    }

    /// Appends a new document built from `fields` and returns it.
    ///
    /// The id and `createdAt` are assigned here; any system fields in
    /// `fields` are dropped.
    pub fn add_document(&mut self, name: &str, fields: Fields) -> Result<Document> {
        self.ensure_available()?;
        let mut docs = self.get_collection(name);
        let id = self.fresh_id(&docs)?;

        let mut doc = Document::new(id, fields);
        doc.created_at = Some(Utc::now());
        docs.push(doc.clone());

        self.set_collection(name, &docs)?;
        Ok(doc)
    }

    pub fn get_document(&self, name: &str, id: &str) -> Option<Document> {
        self.get_collection(name)
            .into_iter()
            .find(|doc| doc.id == id)
    }

    /// Shallow-merges `partial` into the document and stamps `updatedAt`.
    ///
    /// `updatedAt` never moves backwards, even if the clock does.
    pub fn update_document(&mut self, name: &str, id: &str, partial: Fields) -> Result<Document> {
        self.ensure_available()?;
        let mut docs = self.get_collection(name);
        let doc = docs
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or_else(|| StudyError::not_found(name, id))?;

        doc.merge(partial);
        let now = Utc::now();
        doc.touch(match doc.updated_at {
            Some(previous) if previous > now => previous,
            _ => now,
        });
        let updated = doc.clone();

        self.set_collection(name, &docs)?;
        Ok(updated)
    }

    pub fn delete_document(&mut self, name: &str, id: &str) -> Result<()> {
        self.ensure_available()?;
        let docs = self.get_collection(name);
        let before = docs.len();
        let remaining: Vec<Document> = docs.into_iter().filter(|doc| doc.id != id).collect();

        if remaining.len() == before {
            return Err(StudyError::not_found(name, id));
        }
        self.set_collection(name, &remaining)
    }

    /// Documents matching every active clause of `filter`, in stored order.
    pub fn query_collection(&self, name: &str, filter: &Filter) -> Vec<Document> {
        let docs = self.get_collection(name);
        if filter.is_empty() {
            return docs;
        }
        docs.into_iter().filter(|doc| filter.matches(doc)).collect()
    }

    /// Removes every known collection and re-initializes the store.
    ///
    /// The session record and collections outside the known set are kept.
    pub fn clear_database(&mut self) -> Result<()> {
        self.ensure_available()?;
        for name in KNOWN_COLLECTIONS {
            self.backend.remove_item(&self.keys.collection_key(name))?;
        }
        self.initialize()?;
        debug!("Database cleared");
        Ok(())
    }

    pub fn export_database(&self) -> Snapshot {
        Snapshot {
            data: KNOWN_COLLECTIONS
                .iter()
                .map(|name| (name.to_string(), self.get_collection(name)))
                .collect(),
        }
    }

    /// Overwrites every collection named in `data` whose value is an array of
    /// documents. Other keys are reported as skipped and left alone.
    pub fn import_database(&mut self, data: &Value) -> Result<ImportReport> {
        self.ensure_available()?;
        let map = data.as_object().ok_or_else(|| {
            StudyError::Api("Import data must be a JSON object keyed by collection".to_string())
        })?;

        let mut report = ImportReport::default();
        for (name, value) in map {
            if !value.is_array() {
                report.skipped.push(name.clone());
                continue;
            }
            match Vec::<Document>::deserialize(value) {
                Ok(docs) => {
                    self.set_collection(name, &docs)?;
                    report.imported.push((name.clone(), docs.len()));
                }
                Err(e) => {
                    warn!(collection = %name, error = %e, "Skipping collection with malformed documents");
                    report.skipped.push(name.clone());
                }
            }
        }
        Ok(report)
    }

    pub fn status(&self) -> StoreStatus {
        StoreStatus {
            collections: KNOWN_COLLECTIONS
                .iter()
                .map(|name| (name.to_string(), self.get_collection(name).len()))
                .collect(),
        }
    }
}
