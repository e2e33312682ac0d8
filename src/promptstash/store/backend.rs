use crate::error::Result;

/// Abstract key-value persistence used by the record store.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::RecordStore`] handles the "what": the prompt document, seeding,
/// and merge rules. Every value is an opaque serialized string.
pub trait KvBackend: Send + Sync {
    /// Read the raw value stored under `key`.
    /// Returns Ok(None) if nothing has been stored yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
