use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to prompts created without one.
pub const PLACEHOLDER_TITLE: &str = "Untitled Prompt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Prompt {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tags: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            title: title.into(),
            content: content.into(),
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A partial prompt, as submitted by a create or edit.
///
/// Only the listed fields can be supplied; anything else in a serialized
/// draft is rejected rather than silently carried into the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PromptDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl PromptDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Merge the supplied fields into an existing record, bumping `updated_at`.
    /// `id` and `created_at` of the existing record are never overwritten.
    pub fn apply_to(&self, existing: &Prompt, now: DateTime<Utc>) -> Prompt {
        let mut merged = existing.clone();
        if let Some(title) = &self.title {
            merged.title = title.clone();
        }
        if let Some(content) = &self.content {
            merged.content = content.clone();
        }
        if let Some(tags) = &self.tags {
            merged.tags = tags.clone();
        }
        merged.updated_at = now;
        merged
    }

    /// Build a brand-new record from the draft, filling defaults for absent fields.
    pub fn into_new(self, now: DateTime<Utc>) -> Prompt {
        Prompt {
            id: self.id.filter(|id| !id.is_empty()).unwrap_or_else(new_id),
            title: self
                .title
                .unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
            content: self.content.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            created_at: self.created_at.unwrap_or(now),
            updated_at: now,
        }
    }
}

impl From<&Prompt> for PromptDraft {
    fn from(prompt: &Prompt) -> Self {
        Self {
            id: Some(prompt.id.clone()),
            title: Some(prompt.title.clone()),
            content: Some(prompt.content.clone()),
            tags: Some(prompt.tags.clone()),
            created_at: Some(prompt.created_at),
        }
    }
}

/// Persisted document layout: `{ "prompts": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub prompts: Vec<Prompt>,
}
