use super::backend::StorageBackend;
use crate::error::{Result, StudyError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` for all methods.
///
/// An optional quota (in bytes, counting keys and values) mimics the size
/// limit of browser storage.
#[derive(Default)]
pub struct MemBackend {
    items: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    simulate_write_error: Cell<bool>,
    simulate_unavailable: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Make the backend report itself as unusable.
    pub fn set_simulate_unavailable(&self, simulate: bool) {
        self.simulate_unavailable.set(simulate);
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.items
            .borrow()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.items.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Test helper to write raw bytes, bypassing the quota and error switches.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(StudyError::Store("Simulated write error".to_string()));
        }

        if let Some(quota) = self.quota_bytes {
            let previous = self
                .items
                .borrow()
                .get(key)
                .map(|v| key.len() + v.len())
                .unwrap_or(0);
            let projected = self.used_bytes() - previous + key.len() + value.len();
            if projected > quota {
                return Err(StudyError::QuotaExceeded(key.to_string()));
            }
        }

        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn is_available(&self) -> bool {
        !self.simulate_unavailable.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let backend = MemBackend::new();
        assert_eq!(backend.get_item("k").unwrap(), None);

        backend.set_item("k", "v1").unwrap();
        backend.set_item("k", "v2").unwrap();
        assert_eq!(backend.get_item("k").unwrap(), Some("v2".to_string()));

        backend.remove_item("k").unwrap();
        backend.remove_item("k").unwrap();
        assert_eq!(backend.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let backend = MemBackend::new().with_quota(10);
        backend.set_item("ab", "1234").unwrap();

        let err = backend.set_item("cd", "12345").unwrap_err();
        assert!(matches!(err, StudyError::QuotaExceeded(ref k) if k == "cd"));
        assert_eq!(backend.get_item("cd").unwrap(), None);
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let backend = MemBackend::new().with_quota(10);
        backend.set_item("ab", "12345678").unwrap();
        // Replacing the value frees the old bytes first.
        backend.set_item("ab", "87654321").unwrap();
        assert_eq!(backend.used_bytes(), 10);
    }

    #[test]
    fn test_simulated_write_error() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        assert!(backend.set_item("k", "v").is_err());
        backend.set_simulate_write_error(false);
        assert!(backend.set_item("k", "v").is_ok());
    }

    #[test]
    fn test_simulated_unavailable() {
        let backend = MemBackend::new();
        assert!(backend.is_available());
        backend.set_simulate_unavailable(true);
        assert!(!backend.is_available());
    }
}
