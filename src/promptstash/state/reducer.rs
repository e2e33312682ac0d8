use super::AppState;
use super::actions::{AppAction, PromptAction};
use super::editor::reduce_editor;

/// Compute the next state. The input is left untouched, so the same
/// `(state, action)` pair always yields an equal result.
pub fn reduce(state: &AppState, action: &AppAction) -> AppState {
    let mut next = state.clone();
    match action {
        AppAction::Editor(editor_action) => reduce_editor(&mut next.editor, editor_action),
        AppAction::Prompt(prompt_action) => reduce_prompts(&mut next, prompt_action),
    }
    next
}

fn reduce_prompts(state: &mut AppState, action: &PromptAction) {
    match action {
        PromptAction::LoadPromptsRequest => {
            state.loading = true;
            state.error = None;
        }
        PromptAction::LoadPromptsSuccess(prompts) => {
            state.loading = false;
            state.prompts = prompts.clone();
        }
        PromptAction::SelectPrompt(id) => {
            state.selected_prompt_id = Some(id.clone());
        }
        PromptAction::SavePromptRequest(_) | PromptAction::DeletePromptRequest(_) => {
            state.loading = true;
        }
        PromptAction::SavePromptSuccess(prompt) => {
            match state.prompts.iter_mut().find(|p| p.id == prompt.id) {
                Some(existing) => *existing = prompt.clone(),
                None => state.prompts.push(prompt.clone()),
            }
            state.selected_prompt_id = Some(prompt.id.clone());
            state.loading = false;
        }
        PromptAction::DeletePromptSuccess(id) => {
            state.loading = false;
            state.prompts.retain(|p| &p.id != id);
            if state.selected_prompt_id.as_ref() == Some(id) {
                state.selected_prompt_id = None;
            }
        }
        PromptAction::LoadPromptsFailure(message)
        | PromptAction::SavePromptFailure(message)
        | PromptAction::DeletePromptFailure(message) => {
            state.loading = false;
            state.error = Some(message.clone());
        }
    }
}

#[cfg(test)]
mod tests;
