//! # Catalog
//!
//! Derived views over the prompt list. Everything here is a pure function
//! of its inputs: the stored list is never reordered or mutated, and a
//! view is recomputed from scratch whenever the list or the browse state
//! changes.
//!
//! The pipeline always filters first and sorts second, so sorting only
//! pays for the surviving subset and flipping the sort direction never
//! re-runs the filter.

use crate::model::Prompt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub mod search;
pub mod sort;

pub use search::{SearchBy, SearchQuery};
pub use sort::{SortBy, SortDirection, SortSpec};

/// Search then sort.
pub fn pipeline(prompts: &[Prompt], query: &SearchQuery, spec: SortSpec) -> Vec<Prompt> {
    let filtered = search::search(prompts, query);
    sort::sort(&filtered, spec)
}

/// Every tag used by any prompt, sorted and de-duplicated.
pub fn all_tags(prompts: &[Prompt]) -> Vec<String> {
    prompts
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// What the user is currently looking at in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseState {
    pub search: String,
    pub selected_tags: Vec<String>,
    pub sort_by: SortBy,
    pub sort_dir: SortDirection,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            search: String::new(),
            selected_tags: Vec::new(),
            sort_by: SortBy::UpdatedAt,
            sort_dir: SortDirection::Desc,
        }
    }
}

impl BrowseState {
    /// Same field flips the direction; a new field starts ascending.
    pub fn toggle_sort(&mut self, field: SortBy) {
        self.sort_dir = if self.sort_by == field {
            self.sort_dir.flipped()
        } else {
            SortDirection::Asc
        };
        self.sort_by = field;
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
        } else {
            self.selected_tags.push(tag.to_string());
        }
    }

    pub fn update_search(&mut self, value: impl Into<String>) {
        self.search = value.into();
    }

    pub fn query(&self) -> SearchQuery {
        SearchQuery {
            search: self.search.clone(),
            selected_tags: self.selected_tags.clone(),
            search_by: SearchBy::All,
        }
    }

    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::new(self.sort_by, self.sort_dir)
    }

    /// The filtered, sorted view of `prompts`.
    pub fn apply(&self, prompts: &[Prompt]) -> Vec<Prompt> {
        pipeline(prompts, &self.query(), self.sort_spec())
    }
}
