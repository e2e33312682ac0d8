use super::backend::KvBackend;
use crate::error::{Result, StashError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory storage backend for testing.
///
/// One string value per key, lost when dropped.
#[derive(Default)]
pub struct MemBackend {
    values: Mutex<HashMap<String, String>>,
    simulate_write_error: AtomicBool,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation (a full quota, say) for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Test helper to plant arbitrary (possibly corrupt) data under a key.
    pub fn put_raw(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }
}

impl KvBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| StashError::Store("memory backend poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(StashError::Store("Simulated write error".to_string()));
        }
        let mut values = self
            .values
            .lock()
            .map_err(|_| StashError::Store("memory backend poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_reads_values() {
        let backend = MemBackend::new();
        assert_eq!(backend.get("k").unwrap(), None);
        backend.set("k", "v").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn simulated_write_error_leaves_value_untouched() {
        let backend = MemBackend::new();
        backend.set("k", "v").unwrap();
        backend.set_simulate_write_error(true);
        assert!(backend.set("k", "w").is_err());
        assert_eq!(backend.raw("k").as_deref(), Some("v"));
    }
}
