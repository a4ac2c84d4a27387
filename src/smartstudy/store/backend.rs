use crate::error::Result;

/// Abstract interface for the raw key-value medium.
///
/// This trait handles the "how" of storage (directory vs memory), while
/// [`DocumentStore`](super::document_store::DocumentStore) handles the "what"
/// (collections, documents, system fields). Keys and values are opaque
/// strings; the store decides the key layout and the JSON encoding.
pub trait StorageBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) if the key was never written or has been removed.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    /// MUST be atomic: readers see either the old or the new value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Whether the medium can be used at all in this environment.
    fn is_available(&self) -> bool;
}
