use super::editor::EditorConfigPatch;
use crate::model::{Prompt, PromptDraft};
use chrono::{DateTime, Utc};

/// Everything that can change [`super::AppState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Prompt(PromptAction),
    Editor(EditorAction),
}

/// Prompt-list transitions. Async operations come in REQUEST/SUCCESS/FAILURE triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    LoadPromptsRequest,
    LoadPromptsSuccess(Vec<Prompt>),
    LoadPromptsFailure(String),
    SelectPrompt(String),
    SavePromptRequest(PromptDraft),
    SavePromptSuccess(Prompt),
    SavePromptFailure(String),
    DeletePromptRequest(String),
    DeletePromptSuccess(String),
    DeletePromptFailure(String),
}

/// Editor transitions. These only ever touch `AppState::editor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    ContentChange(String),
    SaveRequest(String),
    SaveSuccess {
        content: String,
        timestamp: DateTime<Utc>,
    },
    SaveFailure(String),
    /// Marks the content as saved at `at`. The time travels with the
    /// action so reducing stays deterministic.
    Submit {
        content: String,
        at: DateTime<Utc>,
    },
    ConfigChange(EditorConfigPatch),
    Reset(String),
}

impl From<PromptAction> for AppAction {
    fn from(action: PromptAction) -> Self {
        AppAction::Prompt(action)
    }
}

impl From<EditorAction> for AppAction {
    fn from(action: EditorAction) -> Self {
        AppAction::Editor(action)
    }
}

impl AppAction {
    /// Stable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            AppAction::Prompt(action) => match action {
                PromptAction::LoadPromptsRequest => "LOAD_PROMPTS_REQUEST",
                PromptAction::LoadPromptsSuccess(_) => "LOAD_PROMPTS_SUCCESS",
                PromptAction::LoadPromptsFailure(_) => "LOAD_PROMPTS_FAILURE",
                PromptAction::SelectPrompt(_) => "SELECT_PROMPT",
                PromptAction::SavePromptRequest(_) => "SAVE_PROMPT_REQUEST",
                PromptAction::SavePromptSuccess(_) => "SAVE_PROMPT_SUCCESS",
                PromptAction::SavePromptFailure(_) => "SAVE_PROMPT_FAILURE",
                PromptAction::DeletePromptRequest(_) => "DELETE_PROMPT_REQUEST",
                PromptAction::DeletePromptSuccess(_) => "DELETE_PROMPT_SUCCESS",
                PromptAction::DeletePromptFailure(_) => "DELETE_PROMPT_FAILURE",
            },
            AppAction::Editor(action) => match action {
                EditorAction::ContentChange(_) => "EDITOR_CONTENT_CHANGE",
                EditorAction::SaveRequest(_) => "EDITOR_SAVE_REQUEST",
                EditorAction::SaveSuccess { .. } => "EDITOR_SAVE_SUCCESS",
                EditorAction::SaveFailure(_) => "EDITOR_SAVE_FAILURE",
                EditorAction::Submit { .. } => "EDITOR_SUBMIT",
                EditorAction::ConfigChange(_) => "EDITOR_CONFIG_CHANGE",
                EditorAction::Reset(_) => "EDITOR_RESET",
            },
        }
    }
}
