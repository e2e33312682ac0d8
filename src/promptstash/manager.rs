//! # Prompt Manager
//!
//! The manager is the one object a UI talks to. It owns:
//!
//! - the [`PromptService`] that does the (slow) persistence work,
//! - the current [`AppState`], kept in a `watch` channel so any number of
//!   views can [`subscribe`](PromptManager::subscribe) and re-render on change,
//! - the autosave timer for the editor.
//!
//! State only ever moves through [`PromptManager::dispatch`], which runs the
//! pure reducer. The async action creators (`load_prompts`, `save_prompt`,
//! `delete_prompt`) dispatch a REQUEST action, await the service and then
//! dispatch exactly one SUCCESS or FAILURE action.
//!
//! ## Stale Completions
//!
//! Requests can overlap: a delete and a save for the same prompt, or two
//! loads. Every request takes a ticket from a counter, and the manager
//! remembers the newest ticket per target (the prompt list for loads, the
//! prompt id otherwise). A completion holding an older ticket than the
//! newest one for its target is stale: it is logged and dropped without
//! dispatching anything, and the caller gets an error. The newer request
//! for the same target is still in flight and its terminal action settles
//! `loading` and `error`.
//!
//! Handles are cheap to clone and share everything. Dropping the last one
//! cancels a pending autosave; the autosave task only holds a weak handle
//! while it waits.

use crate::autosave::AutoSaveTimer;
use crate::catalog::{self, BrowseState};
use crate::config::EditorSettings;
use crate::error::{Result, StashError};
use crate::model::{Prompt, PromptDraft};
use crate::service::PromptService;
use crate::state::{
    AppAction, AppState, EditorAction, EditorConfigPatch, PromptAction, reduce,
};
use crate::store::KvBackend;
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Target {
    List,
    Prompt(String),
}

impl Target {
    fn for_draft(draft: &PromptDraft) -> Option<Self> {
        draft
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| Target::Prompt(id.to_string()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::List => write!(f, "prompt list"),
            Target::Prompt(id) => write!(f, "prompt {}", id),
        }
    }
}

#[derive(Debug, Default)]
struct Pending {
    latest: u64,
    in_flight: usize,
}

#[derive(Debug, Default)]
struct Tickets {
    issued: u64,
    latest: HashMap<Target, Pending>,
}

impl Tickets {
    /// Requests without a target (creating a new prompt) can never go stale.
    fn issue(&mut self, target: Option<&Target>) -> u64 {
        self.issued += 1;
        if let Some(target) = target {
            let pending = self.latest.entry(target.clone()).or_default();
            pending.latest = self.issued;
            pending.in_flight += 1;
        }
        self.issued
    }

    /// Close out `ticket`. Returns false when a newer request for the same
    /// target was issued meanwhile. A target is forgotten once nothing is
    /// in flight for it.
    fn complete(&mut self, target: Option<&Target>, ticket: u64) -> bool {
        let Some(target) = target else {
            return true;
        };
        let Some(pending) = self.latest.get_mut(target) else {
            return true;
        };
        let current = pending.latest <= ticket;
        pending.in_flight = pending.in_flight.saturating_sub(1);
        if pending.in_flight == 0 {
            self.latest.remove(target);
        }
        current
    }
}

struct Inner<B: KvBackend> {
    service: PromptService<B>,
    state: watch::Sender<AppState>,
    tickets: Mutex<Tickets>,
    autosave: AutoSaveTimer,
}

impl<B: KvBackend> Drop for Inner<B> {
    fn drop(&mut self) {
        if self.autosave.cancel() {
            tracing::debug!("pending autosave dropped with the manager");
        }
    }
}

pub struct PromptManager<B: KvBackend> {
    inner: Arc<Inner<B>>,
}

impl<B: KvBackend> Clone for PromptManager<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: KvBackend + 'static> PromptManager<B> {
    pub fn new(service: PromptService<B>, settings: &EditorSettings) -> Self {
        let (state, _) = watch::channel(AppState::new(settings));
        Self {
            inner: Arc::new(Inner {
                service,
                state,
                tickets: Mutex::new(Tickets::default()),
                autosave: AutoSaveTimer::new(),
            }),
        }
    }

    fn downgrade(&self) -> Weak<Inner<B>> {
        Arc::downgrade(&self.inner)
    }

    pub fn service(&self) -> &PromptService<B> {
        &self.inner.service
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that is notified after every dispatched action.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.inner.state.subscribe()
    }

    pub fn dispatch(&self, action: impl Into<AppAction>) {
        let action = action.into();
        tracing::debug!(action = action.name(), "dispatch");
        self.inner.state.send_modify(|state| *state = reduce(state, &action));
    }

    /// The prompt list as the catalog currently shows it.
    pub fn view(&self, browse: &BrowseState) -> Vec<Prompt> {
        browse.apply(&self.inner.state.borrow().prompts)
    }

    pub fn all_tags(&self) -> Vec<String> {
        catalog::all_tags(&self.inner.state.borrow().prompts)
    }

    fn tickets(&self) -> MutexGuard<'_, Tickets> {
        self.inner.tickets.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn issue(&self, target: Option<&Target>) -> u64 {
        self.tickets().issue(target)
    }

    fn complete(&self, target: Option<&Target>, ticket: u64) -> bool {
        self.tickets().complete(target, ticket)
    }

    /// A superseded completion leaves the state alone. The newer request
    /// for the same target settles `loading` and `error`.
    fn stale(&self, target: &Target) -> StashError {
        tracing::warn!(request = %target, "Ignoring superseded completion");
        StashError::Api(format!("stale response for {} ignored", target))
    }

    pub async fn load_prompts(&self) -> Result<Vec<Prompt>> {
        let target = Target::List;
        let ticket = self.issue(Some(&target));
        self.dispatch(PromptAction::LoadPromptsRequest);

        let response = self.inner.service.get_prompts().await;
        tracing::debug!(ticket, success = response.success, "load completed");

        if !self.complete(Some(&target), ticket) {
            return Err(self.stale(&target));
        }
        match response.into_result() {
            Ok(response) => {
                let prompts = response.prompts.unwrap_or_default();
                self.dispatch(PromptAction::LoadPromptsSuccess(prompts.clone()));
                Ok(prompts)
            }
            Err(e) => {
                self.dispatch(PromptAction::LoadPromptsFailure(e.to_string()));
                Err(e)
            }
        }
    }

    pub async fn save_prompt(&self, draft: PromptDraft) -> Result<Prompt> {
        let target = Target::for_draft(&draft);
        let ticket = self.issue(target.as_ref());
        self.dispatch(PromptAction::SavePromptRequest(draft.clone()));

        let response = self.inner.service.save_prompt(draft).await;
        tracing::debug!(ticket, success = response.success, "save completed");

        if let Some(target) = &target
            && !self.complete(Some(target), ticket)
        {
            return Err(self.stale(target));
        }
        let saved = response.into_result().and_then(|r| {
            r.prompt
                .ok_or_else(|| StashError::Api("Failed to save prompt".to_string()))
        });
        match saved {
            Ok(prompt) => {
                self.dispatch(PromptAction::SavePromptSuccess(prompt.clone()));
                Ok(prompt)
            }
            Err(e) => {
                self.dispatch(PromptAction::SavePromptFailure(e.to_string()));
                Err(e)
            }
        }
    }

    pub async fn delete_prompt(&self, id: &str) -> Result<()> {
        let target = Target::Prompt(id.to_string());
        let ticket = self.issue(Some(&target));
        self.dispatch(PromptAction::DeletePromptRequest(id.to_string()));

        let response = self.inner.service.delete_prompt(id).await;
        tracing::debug!(ticket, success = response.success, "delete completed");

        if !self.complete(Some(&target), ticket) {
            return Err(self.stale(&target));
        }
        match response.into_result() {
            Ok(_) => {
                self.dispatch(PromptAction::DeletePromptSuccess(id.to_string()));
                Ok(())
            }
            Err(e) => {
                self.dispatch(PromptAction::DeletePromptFailure(e.to_string()));
                Err(e)
            }
        }
    }

    /// Fetch a single prompt straight from the service. Does not touch state.
    pub async fn get_prompt(&self, id: &str) -> Result<Prompt> {
        self.inner.service
            .get_prompt(id)
            .await
            .into_result()?
            .prompt
            .ok_or_else(|| StashError::PromptNotFound(id.to_string()))
    }

    pub fn select_prompt(&self, id: &str) {
        self.dispatch(PromptAction::SelectPrompt(id.to_string()));
    }

    /// Select a prompt and load its content into the editor.
    /// Returns false, changing nothing, when the id is not in the list.
    pub fn edit_prompt(&self, id: &str) -> bool {
        let Some(content) = self.inner.state.borrow().find(id).map(|p| p.content.clone()) else {
            return false;
        };
        self.inner.autosave.cancel();
        self.select_prompt(id);
        self.dispatch(EditorAction::Reset(content));
        true
    }

    /// Change the editor text. Autosave is (re)armed while the content is
    /// dirty, valid and writable, and dropped otherwise.
    pub fn update_editor_content(&self, text: impl Into<String>) {
        self.dispatch(EditorAction::ContentChange(text.into()));

        let editor = self.inner.state.borrow().editor.clone();
        if editor.wants_autosave() {
            let weak = self.downgrade();
            self.inner.autosave.arm(
                Duration::from_millis(editor.auto_save_interval),
                async move {
                    if let Some(inner) = weak.upgrade() {
                        PromptManager { inner }.autosave_tick().await;
                    }
                },
            );
        } else {
            self.inner.autosave.cancel();
        }
    }

    async fn autosave_tick(&self) {
        if !self.inner.state.borrow().editor.wants_autosave() {
            return;
        }
        tracing::debug!("autosave");
        if let Err(e) = self.save_editor_content().await {
            tracing::warn!(error = %e, "Autosave failed");
        }
    }

    pub fn reset_editor(&self) {
        self.inner.autosave.cancel();
        self.dispatch(EditorAction::Reset(String::new()));
    }

    /// Mark the editor content as submitted. Refused while it is invalid.
    pub fn submit_editor(&self) -> Result<String> {
        let editor = self.inner.state.borrow().editor.clone();
        if let Some(error) = editor.error {
            return Err(StashError::Validation(error));
        }
        self.inner.autosave.cancel();
        self.dispatch(EditorAction::Submit {
            content: editor.current_content.clone(),
            at: Utc::now(),
        });
        Ok(editor.current_content)
    }

    pub fn change_editor_config(&self, patch: EditorConfigPatch) {
        self.dispatch(EditorAction::ConfigChange(patch));
    }

    /// Save a copy of `id` under a new id with "(Copy)" appended to the title.
    pub async fn duplicate_prompt(&self, id: &str) -> Result<Prompt> {
        let cached = self.inner.state.borrow().find(id).cloned();
        let source = match cached {
            Some(prompt) => prompt,
            None => self.get_prompt(id).await?,
        };
        let draft = PromptDraft::new()
            .with_title(format!("{} (Copy)", source.title))
            .with_content(source.content)
            .with_tags(source.tags);
        self.save_prompt(draft).await
    }

    /// Persist the editor content into the selected prompt, or into a new
    /// prompt when nothing (existing) is selected.
    pub async fn save_editor_content(&self) -> Result<Prompt> {
        let (editor, selected) = {
            let state = self.inner.state.borrow();
            (state.editor.clone(), state.selected_prompt().map(|p| p.id.clone()))
        };
        if let Some(error) = editor.error {
            return Err(StashError::Validation(error));
        }

        let content = editor.current_content;
        self.dispatch(EditorAction::SaveRequest(content.clone()));

        let draft = match selected {
            Some(id) => PromptDraft::new().with_id(id).with_content(content.clone()),
            None => PromptDraft::new().with_content(content.clone()),
        };
        match self.save_prompt(draft).await {
            Ok(prompt) => {
                self.dispatch(EditorAction::SaveSuccess {
                    content: content.clone(),
                    timestamp: Utc::now(),
                });
                // Typing during the save must not be marked as saved.
                let latest = self.inner.state.borrow().editor.current_content.clone();
                if latest != content {
                    self.update_editor_content(latest);
                }
                Ok(prompt)
            }
            Err(e) => {
                self.dispatch(EditorAction::SaveFailure(e.to_string()));
                Err(e)
            }
        }
    }

    /// Drop any pending autosave. Saves already running still finish.
    pub fn shutdown(&self) {
        if self.inner.autosave.cancel() {
            tracing::debug!("pending autosave cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_STORAGE_KEY, LatencySettings};
    use crate::store::RecordStore;
    use crate::store::fs_backend::FsBackend;
    use crate::store::mem_backend::MemBackend;
    use pretty_assertions::assert_eq;

    fn manager_with(latency: LatencySettings, settings: EditorSettings) -> PromptManager<MemBackend> {
        let store = RecordStore::new(MemBackend::new(), DEFAULT_STORAGE_KEY);
        PromptManager::new(PromptService::new(store, latency), &settings)
    }

    fn manager() -> PromptManager<MemBackend> {
        manager_with(LatencySettings::default(), EditorSettings::default())
    }

    fn stored_content(manager: &PromptManager<MemBackend>, id: &str) -> String {
        manager
            .service()
            .store()
            .get_by_id(id)
            .unwrap()
            .map(|p| p.content)
            .unwrap_or_default()
    }

    struct BrokenBackend;

    impl KvBackend for BrokenBackend {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(StashError::Store("disk on fire".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(StashError::Store("disk on fire".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn load_sets_loading_until_completion() {
        let manager = manager();
        let task = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.load_prompts().await })
        };
        tokio::task::yield_now().await;
        assert!(manager.state().loading);

        let prompts = task.await.unwrap().unwrap();
        let state = manager.state();
        assert_eq!(prompts.len(), 3);
        assert_eq!(state.prompts, prompts);
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn load_failure_becomes_failure_action() {
        let store = RecordStore::new(BrokenBackend, DEFAULT_STORAGE_KEY);
        let manager = PromptManager::new(
            PromptService::new(store, LatencySettings::uniform(0)),
            &EditorSettings::default(),
        );

        assert!(manager.load_prompts().await.is_err());
        let state = manager.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Failed to retrieve prompts"));
        assert!(state.prompts.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn save_new_prompt_appends_and_selects() {
        let manager = manager();
        manager.load_prompts().await.unwrap();

        let saved = manager
            .save_prompt(PromptDraft::new().with_title("New").with_content("body"))
            .await
            .unwrap();

        let state = manager.state();
        assert_eq!(state.prompts.len(), 4);
        assert_eq!(state.prompts.last(), Some(&saved));
        assert_eq!(state.selected_prompt_id.as_deref(), Some(saved.id.as_str()));
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn save_validation_failure_is_reported_in_state() {
        let manager = manager();
        manager.load_prompts().await.unwrap();

        let err = manager
            .save_prompt(PromptDraft::new().with_title("").with_content("body"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Title is required");
        assert_eq!(manager.state().error.as_deref(), Some("Title is required"));
        assert_eq!(manager.state().prompts.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn delete_clears_selection_and_reports_missing() {
        let manager = manager();
        manager.load_prompts().await.unwrap();
        manager.select_prompt("2");

        manager.delete_prompt("2").await.unwrap();
        let state = manager.state();
        assert_eq!(state.selected_prompt_id, None);
        assert!(state.find("2").is_none());

        assert!(manager.delete_prompt("2").await.is_err());
        assert_eq!(
            manager.state().error.as_deref(),
            Some("Prompt with ID 2 not found")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn earlier_delete_completing_first_is_stale_after_newer_save() {
        let manager = manager();
        manager.load_prompts().await.unwrap();

        // Delete (400ms) is issued first but a save (700ms) for the same id
        // follows it, so the delete completion is superseded.
        let (deleted, saved) = tokio::join!(
            manager.delete_prompt("1"),
            manager.save_prompt(PromptDraft::new().with_id("1").with_content("kept"))
        );

        assert!(deleted.unwrap_err().to_string().contains("stale response"));
        let saved = saved.unwrap();
        let state = manager.state();
        assert_eq!(state.find("1"), Some(&saved));
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_save_does_not_resurrect_a_deleted_prompt() {
        let manager = manager();
        manager.load_prompts().await.unwrap();

        let (saved, deleted) = tokio::join!(
            manager.save_prompt(PromptDraft::new().with_id("1").with_content("late")),
            manager.delete_prompt("1")
        );

        deleted.unwrap();
        assert!(saved.is_err());
        assert!(manager.state().find("1").is_none());
        assert_eq!(manager.state().error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_latest_load_lands() {
        let manager = manager();
        let (first, second) = tokio::join!(manager.load_prompts(), manager.load_prompts());
        assert!(first.is_err());
        assert_eq!(second.unwrap().len(), 3);
        assert_eq!(manager.state().prompts.len(), 3);
        assert!(!manager.state().loading);
        assert_eq!(manager.state().error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_load_keeps_newer_request_loading() {
        let manager = manager();
        let first = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.load_prompts().await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.load_prompts().await })
        };

        // The first load completes at 500ms, the second at 600ms.
        tokio::time::sleep(Duration::from_millis(450)).await;
        assert!(first.await.unwrap().is_err());
        let state = manager.state();
        assert!(state.loading);
        assert_eq!(state.error, None);
        assert!(state.prompts.is_empty());

        assert_eq!(second.await.unwrap().unwrap().len(), 3);
        let state = manager.state();
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.prompts.len(), 3);
    }

    #[test]
    fn completed_tickets_are_forgotten() {
        let mut tickets = Tickets::default();
        let list = Target::List;
        let prompt = Target::Prompt("1".to_string());

        let older = tickets.issue(Some(&prompt));
        let newer = tickets.issue(Some(&prompt));
        let load = tickets.issue(Some(&list));
        assert!(tickets.complete(Some(&list), load));
        assert!(!tickets.complete(Some(&prompt), older));
        assert_eq!(tickets.latest.len(), 1);
        assert!(tickets.complete(Some(&prompt), newer));
        assert!(tickets.latest.is_empty());

        // The newer request finishing first must not clear the way for the older one.
        let older = tickets.issue(Some(&prompt));
        let newer = tickets.issue(Some(&prompt));
        assert!(tickets.complete(Some(&prompt), newer));
        assert!(!tickets.complete(Some(&prompt), older));
        assert!(tickets.latest.is_empty());

        let untracked = tickets.issue(None);
        assert!(tickets.complete(None, untracked));
        assert!(tickets.latest.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn new_prompt_saves_never_go_stale() {
        let manager = manager();
        let (a, b) = tokio::join!(
            manager.save_prompt(PromptDraft::new().with_content("a")),
            manager.save_prompt(PromptDraft::new().with_content("b"))
        );
        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(manager.state().prompts.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn edit_prompt_selects_and_resets_editor() {
        let manager = manager();
        manager.load_prompts().await.unwrap();

        assert!(!manager.edit_prompt("missing"));
        assert_eq!(manager.state().selected_prompt_id, None);

        assert!(manager.edit_prompt("3"));
        let state = manager.state();
        assert_eq!(state.selected_prompt_id.as_deref(), Some("3"));
        assert_eq!(
            state.editor.current_content,
            state.find("3").unwrap().content
        );
        assert!(!state.editor.is_dirty);
    }

    #[tokio::test(start_paused = true)]
    async fn autosave_debounces_edits() {
        let manager = manager();
        manager.load_prompts().await.unwrap();
        manager.edit_prompt("1");
        let original = stored_content(&manager, "1");

        manager.update_editor_content("a");
        tokio::time::sleep(Duration::from_millis(2000)).await;
        manager.update_editor_content("ab");
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(stored_content(&manager, "1"), original);
        assert!(manager.state().editor.is_dirty);

        // Debounce ends at 5000ms, the save takes another 700ms.
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(stored_content(&manager, "1"), "ab");
        let editor = manager.state().editor;
        assert!(!editor.is_dirty);
        assert!(!editor.is_saving);
        assert!(editor.last_saved.is_some());
        assert_eq!(manager.state().find("1").unwrap().content, "ab");
    }

    #[tokio::test(start_paused = true)]
    async fn autosave_skips_invalid_and_read_only_content() {
        let manager = manager();
        manager.load_prompts().await.unwrap();
        manager.edit_prompt("1");
        let original = stored_content(&manager, "1");

        manager.update_editor_content("");
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(stored_content(&manager, "1"), original);
        assert_eq!(
            manager.state().editor.error.as_deref(),
            Some("Prompt is required")
        );

        manager.change_editor_config(EditorConfigPatch {
            read_only: Some(true),
            ..EditorConfigPatch::default()
        });
        manager.update_editor_content("valid");
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(stored_content(&manager, "1"), original);
        assert_eq!(manager.state().editor.last_saved, None);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_manager_cancels_pending_autosave() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(FsBackend::new(dir.path().to_path_buf()), DEFAULT_STORAGE_KEY);
        let manager = PromptManager::new(
            PromptService::new(store, LatencySettings::default()),
            &EditorSettings::default(),
        );
        manager.load_prompts().await.unwrap();
        manager.edit_prompt("1");
        let original = manager.state().find("1").unwrap().content.clone();

        manager.update_editor_content("written after teardown");
        drop(manager);
        tokio::time::sleep(Duration::from_secs(10)).await;

        let reopened = RecordStore::new(FsBackend::new(dir.path().to_path_buf()), DEFAULT_STORAGE_KEY);
        let stored = reopened.get_by_id("1").unwrap().unwrap();
        assert_eq!(stored.content, original);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_and_reset_cancel_pending_autosave() {
        let manager = manager();
        manager.load_prompts().await.unwrap();
        manager.edit_prompt("1");
        let original = stored_content(&manager, "1");

        manager.update_editor_content("draft");
        manager.shutdown();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(stored_content(&manager, "1"), original);

        manager.update_editor_content("draft again");
        manager.reset_editor();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(stored_content(&manager, "1"), original);
        assert_eq!(manager.state().editor.current_content, "");
    }

    #[tokio::test(start_paused = true)]
    async fn submit_is_refused_while_invalid() {
        let manager = manager_with(
            LatencySettings::uniform(0),
            EditorSettings {
                max_length: 5,
                ..EditorSettings::default()
            },
        );

        manager.update_editor_content("too long");
        assert_eq!(
            manager.submit_editor().unwrap_err().to_string(),
            "Prompt max length is 5"
        );
        assert!(manager.state().editor.is_dirty);

        manager.update_editor_content("ok");
        assert_eq!(manager.submit_editor().unwrap(), "ok");
        let editor = manager.state().editor;
        assert!(!editor.is_dirty);
        assert!(editor.last_saved.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_copies_with_new_identity() {
        let manager = manager();
        manager.load_prompts().await.unwrap();
        let source = manager.state().find("2").cloned().unwrap();

        let copy = manager.duplicate_prompt("2").await.unwrap();
        assert_ne!(copy.id, source.id);
        assert_eq!(copy.title, format!("{} (Copy)", source.title));
        assert_eq!(copy.content, source.content);
        assert_eq!(copy.tags, source.tags);
        assert!(copy.created_at > source.created_at);
        assert_eq!(manager.state().prompts.len(), 4);

        assert!(manager.duplicate_prompt("missing").await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn save_editor_content_without_selection_creates_a_prompt() {
        let manager = manager_with(LatencySettings::uniform(0), EditorSettings::default());
        manager.load_prompts().await.unwrap();

        manager.update_editor_content("fresh words");
        let saved = manager.save_editor_content().await.unwrap();
        manager.shutdown();

        let state = manager.state();
        assert_eq!(saved.title, crate::model::PLACEHOLDER_TITLE);
        assert_eq!(saved.content, "fresh words");
        assert_eq!(state.selected_prompt_id.as_deref(), Some(saved.id.as_str()));
        assert!(!state.editor.is_dirty);
    }

    #[tokio::test(start_paused = true)]
    async fn save_editor_content_failure_lands_in_editor_error() {
        let manager = manager_with(LatencySettings::uniform(0), EditorSettings::default());
        manager.load_prompts().await.unwrap();
        manager.edit_prompt("1");
        manager.update_editor_content("changed");
        manager.shutdown();
        manager.service().store().backend().set_simulate_write_error(true);

        assert!(manager.save_editor_content().await.is_err());
        let state = manager.state();
        assert_eq!(state.editor.error.as_deref(), Some("Failed to save prompt"));
        assert!(!state.editor.is_saving);
        assert_eq!(state.error.as_deref(), Some("Failed to save prompt"));
    }

    #[tokio::test]
    async fn subscribers_see_every_change() {
        let manager = manager_with(LatencySettings::uniform(0), EditorSettings::default());
        let mut rx = manager.subscribe();
        rx.mark_unchanged();

        manager.select_prompt("1");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().selected_prompt_id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn view_and_tags_follow_loaded_list() {
        let manager = manager_with(LatencySettings::uniform(0), EditorSettings::default());
        manager.load_prompts().await.unwrap();

        let mut browse = BrowseState::default();
        browse.toggle_tag("technical");
        let view = manager.view(&browse);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "2");
        assert_eq!(
            manager.all_tags(),
            vec!["creative", "documentation", "general", "introduction", "story", "technical"]
        );
    }
}
