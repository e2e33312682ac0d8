//! # Storage Layer
//!
//! The record store keeps every prompt in a single serialized document
//! under one key of a [`KvBackend`]:
//!
//! ```text
//! promptstash_db  →  { "prompts": [ { id, title, content, tags, createdAt, updatedAt }, ... ] }
//! ```
//!
//! Every operation reads the whole document, changes it in memory and
//! writes the whole document back. There is no partial-write protocol and
//! no locking: two writers in the same process would race, which is fine
//! for a single-user tool.
//!
//! ## Read Fallbacks
//!
//! - **Missing key**: the demo dataset from [`seed`] is written and returned.
//! - **Unparsable document**: the demo dataset is returned but *not* written
//!   back, so the damaged data is still there to inspect.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file per key, atomic writes.
//! - [`mem_backend::MemBackend`]: in-memory map for tests.

use crate::error::{Result, StashError};
use crate::model::{Database, Prompt, PromptDraft};
use chrono::Utc;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod seed;

pub use backend::KvBackend;

pub struct RecordStore<B: KvBackend> {
    backend: B,
    key: String,
}

impl<B: KvBackend> RecordStore<B> {
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Seed the demo dataset if nothing is stored yet.
    pub fn init(&self) -> Result<()> {
        if self.backend.get(&self.key)?.is_none() {
            let db = seed::default_database();
            if !self.write(&db) {
                return Err(StashError::Store("Failed to seed prompt database".to_string()));
            }
        }
        Ok(())
    }

    fn read(&self) -> Result<Database> {
        let Some(raw) = self.backend.get(&self.key)? else {
            let db = seed::default_database();
            self.write(&db);
            return Ok(db);
        };

        match serde_json::from_str::<Database>(&raw) {
            Ok(db) => Ok(db),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Stored prompts are unreadable, using defaults");
                Ok(seed::default_database())
            }
        }
    }

    /// Persist the whole document. Failures are logged and reported as `false`.
    fn write(&self, db: &Database) -> bool {
        let serialized = match serde_json::to_string(db) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize prompts");
                return false;
            }
        };
        match self.backend.set(&self.key, &serialized) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to write prompts");
                false
            }
        }
    }

    pub fn get_all(&self) -> Result<Vec<Prompt>> {
        Ok(self.read()?.prompts)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<Prompt>> {
        Ok(self.read()?.prompts.into_iter().find(|p| p.id == id))
    }

    /// Update the record matching `draft.id`, or create a new one.
    pub fn upsert(&self, draft: PromptDraft) -> Result<Prompt> {
        let mut db = self.read()?;
        let now = Utc::now();

        let existing = draft
            .id
            .as_deref()
            .and_then(|id| db.prompts.iter().position(|p| p.id == id));

        let prompt = match existing {
            Some(index) => {
                let merged = draft.apply_to(&db.prompts[index], now);
                db.prompts[index] = merged.clone();
                merged
            }
            None => {
                let created = draft.into_new(now);
                tracing::info!(id = %created.id, title = %created.title, "Created prompt");
                db.prompts.push(created.clone());
                created
            }
        };

        if !self.write(&db) {
            return Err(StashError::Store("Failed to persist prompt".to_string()));
        }
        Ok(prompt)
    }

    /// Remove a record. Returns `Ok(false)` when no record had that id.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut db = self.read()?;
        let before = db.prompts.len();
        db.prompts.retain(|p| p.id != id);

        if db.prompts.len() == before {
            return Ok(false);
        }
        if !self.write(&db) {
            return Err(StashError::Store("Failed to persist deletion".to_string()));
        }
        tracing::info!(id = %id, "Deleted prompt");
        Ok(true)
    }
}
