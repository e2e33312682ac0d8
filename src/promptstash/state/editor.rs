use super::actions::EditorAction;
use crate::config::EditorSettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub current_content: String,
    /// True since the last save or reset.
    pub is_dirty: bool,
    pub is_saving: bool,
    pub last_saved: Option<DateTime<Utc>>,
    /// Validation or save error for the current content.
    pub error: Option<String>,
    pub max_length: usize,
    pub read_only: bool,
    /// Autosave debounce, in milliseconds.
    pub auto_save_interval: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::from_settings(&EditorSettings::default())
    }
}

impl EditorState {
    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            current_content: String::new(),
            is_dirty: false,
            is_saving: false,
            last_saved: None,
            error: None,
            max_length: settings.max_length,
            read_only: settings.read_only,
            auto_save_interval: settings.auto_save_interval_ms,
        }
    }

    /// Dirty, valid and writable: the conditions under which autosave may run.
    pub fn wants_autosave(&self) -> bool {
        self.is_dirty && self.error.is_none() && !self.read_only
    }
}

/// Partial editor configuration; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EditorConfigPatch {
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub read_only: Option<bool>,
    #[serde(default)]
    pub auto_save_interval: Option<u64>,
}

/// Content must be non-empty and at most `max_length` characters.
pub fn validate_content(content: &str, max_length: usize) -> Option<String> {
    if content.is_empty() {
        return Some("Prompt is required".to_string());
    }
    if content.chars().count() > max_length {
        return Some(format!("Prompt max length is {}", max_length));
    }
    None
}

pub(crate) fn reduce_editor(state: &mut EditorState, action: &EditorAction) {
    match action {
        EditorAction::ContentChange(text) => {
            state.current_content = text.clone();
            state.is_dirty = true;
            state.error = validate_content(text, state.max_length);
        }
        EditorAction::SaveRequest(_) => {
            state.is_saving = true;
        }
        EditorAction::SaveSuccess { timestamp, .. } => {
            state.is_saving = false;
            state.is_dirty = false;
            state.last_saved = Some(*timestamp);
            state.error = None;
        }
        EditorAction::SaveFailure(message) => {
            state.is_saving = false;
            state.error = Some(message.clone());
        }
        EditorAction::Submit { at, .. } => {
            state.is_dirty = false;
            state.last_saved = Some(*at);
            state.error = None;
        }
        EditorAction::ConfigChange(patch) => {
            if let Some(max_length) = patch.max_length {
                state.max_length = max_length;
            }
            if let Some(read_only) = patch.read_only {
                state.read_only = read_only;
            }
            if let Some(interval) = patch.auto_save_interval {
                state.auto_save_interval = interval;
            }
        }
        EditorAction::Reset(content) => {
            state.current_content = content.clone();
            state.is_dirty = false;
            state.error = None;
        }
    }
}
