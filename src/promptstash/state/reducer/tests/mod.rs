use pretty_assertions::assert_eq;

pub(super) use super::reduce;
pub(super) use crate::model::Prompt;
pub(super) use crate::state::AppState;
pub(super) use crate::state::EditorConfigPatch;
pub(super) use crate::state::actions::AppAction;
pub(super) use crate::state::actions::EditorAction;
pub(super) use crate::state::actions::PromptAction;


fn state() -> AppState {
    AppState::default()
}

fn prompt(id: &str, title: &str) -> Prompt {
    let mut p = Prompt::new(title, format!("{} content", title), Vec::new());
    p.id = id.to_string();
    p
}

fn run(state: &AppState, actions: Vec<AppAction>) -> AppState {
    actions
        .into_iter()
        .fold(state.clone(), |acc, action| reduce(&acc, &action))
}

fn ids(state: &AppState) -> Vec<&str> {
    state.prompts.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn reduce_is_deterministic_and_leaves_input_alone() {
    let before = run(
        &state(),
        vec![PromptAction::LoadPromptsSuccess(vec![prompt("1", "a")]).into()],
    );
    let snapshot = before.clone();
    let action: AppAction = PromptAction::DeletePromptSuccess("1".to_string()).into();

    let first = reduce(&before, &action);
    let second = reduce(&before, &action);

    assert_eq!(first, second);
    assert_eq!(before, snapshot);
}
