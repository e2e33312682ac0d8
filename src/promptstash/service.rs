//! # Record Service
//!
//! Asynchronous facade over the [`RecordStore`]. Each call waits out a
//! simulated round-trip delay and then answers with an [`ApiResponse`]
//! envelope. No error ever escapes: store failures become
//! `success: false` with a human-readable message.

use crate::config::LatencySettings;
use crate::error::{Result, StashError};
use crate::model::{Prompt, PromptDraft};
use crate::store::{KvBackend, RecordStore};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Uniform response envelope. `success` is the only reliable failure signal;
/// `message` is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<Prompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts: Option<Vec<Prompt>>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_prompt(mut self, prompt: Prompt) -> Self {
        self.prompt = Some(prompt);
        self
    }

    pub fn with_prompts(mut self, prompts: Vec<Prompt>) -> Self {
        self.prompts = Some(prompts);
        self
    }

    /// Project the envelope into a `Result`, for callers that prefer `?`.
    pub fn into_result(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(StashError::Api(
                self.message
                    .unwrap_or_else(|| "Request failed".to_string()),
            ))
        }
    }
}

pub struct PromptService<B: KvBackend> {
    store: RecordStore<B>,
    latency: LatencySettings,
}

impl<B: KvBackend> PromptService<B> {
    pub fn new(store: RecordStore<B>, latency: LatencySettings) -> Self {
        Self { store, latency }
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    async fn delay(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    pub async fn get_prompts(&self) -> ApiResponse {
        self.delay(self.latency.list()).await;

        match self.store.get_all() {
            Ok(prompts) => ApiResponse::ok().with_prompts(prompts),
            Err(e) => {
                tracing::warn!(error = %e, "Error getting prompts");
                ApiResponse::failure("Failed to retrieve prompts")
            }
        }
    }

    pub async fn get_prompt(&self, id: &str) -> ApiResponse {
        self.delay(self.latency.get()).await;

        match self.store.get_by_id(id) {
            Ok(Some(prompt)) => ApiResponse::ok().with_prompt(prompt),
            Ok(None) => ApiResponse::failure(StashError::PromptNotFound(id.to_string()).to_string()),
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "Error getting prompt");
                ApiResponse::failure(format!("Failed to retrieve prompt with ID {}", id))
            }
        }
    }

    pub async fn save_prompt(&self, draft: PromptDraft) -> ApiResponse {
        self.delay(self.latency.save()).await;

        match self.validate(&draft) {
            Ok(()) => {}
            Err(StashError::Validation(message)) => return ApiResponse::failure(message),
            Err(e) => {
                tracing::warn!(error = %e, "Error saving prompt");
                return ApiResponse::failure("Failed to save prompt");
            }
        }

        match self.store.upsert(draft) {
            Ok(prompt) => ApiResponse::ok().with_prompt(prompt),
            Err(e) => {
                tracing::warn!(error = %e, "Error saving prompt");
                ApiResponse::failure("Failed to save prompt")
            }
        }
    }

    pub async fn delete_prompt(&self, id: &str) -> ApiResponse {
        self.delay(self.latency.delete()).await;

        match self.store.delete(id) {
            Ok(true) => {
                ApiResponse::ok().with_message(format!("Prompt with ID {} deleted successfully", id))
            }
            Ok(false) => ApiResponse::failure(StashError::PromptNotFound(id.to_string()).to_string()),
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "Error deleting prompt");
                ApiResponse::failure(format!("Failed to delete prompt with ID {}", id))
            }
        }
    }

    /// Reject drafts that would persist an empty title or empty content.
    fn validate(&self, draft: &PromptDraft) -> Result<()> {
        let exists = match draft.id.as_deref() {
            Some(id) => self.store.get_by_id(id)?.is_some(),
            None => false,
        };

        if draft.title.as_deref().is_some_and(str::is_empty) {
            return Err(StashError::Validation("Title is required".to_string()));
        }
        let content_missing = match draft.content.as_deref() {
            Some(content) => content.is_empty(),
            None => !exists,
        };
        if content_missing {
            return Err(StashError::Validation("Content is required".to_string()));
        }
        Ok(())
    }
}
