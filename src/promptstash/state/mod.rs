//! # Application State
//!
//! A single [`AppState`] value holds everything the UI renders from. It is
//! only ever advanced by [`reduce`], one [`AppAction`] at a time.
//!
//! The state is split in two independent halves:
//!
//! - the prompt list (`prompts`, `loading`, `error`, `selected_prompt_id`),
//!   driven by [`PromptAction`]s;
//! - the editor ([`EditorState`]), driven by [`EditorAction`]s.
//!
//! An action of one kind never touches the other half.

use crate::config::EditorSettings;
use crate::model::Prompt;
use serde::{Deserialize, Serialize};

pub mod actions;
pub mod editor;
pub mod reducer;

pub use actions::{AppAction, EditorAction, PromptAction};
pub use editor::{EditorConfigPatch, EditorState};
pub use reducer::reduce;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Storage order, not display order.
    pub prompts: Vec<Prompt>,
    pub loading: bool,
    pub error: Option<String>,
    /// Weak reference: may name a prompt that no longer exists.
    pub selected_prompt_id: Option<String>,
    pub editor: EditorState,
}

impl AppState {
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            editor: EditorState::from_settings(settings),
            ..Self::default()
        }
    }

    pub fn find(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    /// The selected prompt, if the selection still resolves.
    pub fn selected_prompt(&self) -> Option<&Prompt> {
        self.selected_prompt_id.as_deref().and_then(|id| self.find(id))
    }
}
