use crate::model::Prompt;
use serde::{Deserialize, Serialize};

/// Which fields the free-text search looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchBy {
    /// Title or content, plus the tag filter.
    #[default]
    All,
    /// Title only; the tag filter is not applied.
    Title,
    /// Accepted for compatibility but not implemented: no filtering.
    Description,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub search: String,
    pub selected_tags: Vec<String>,
    pub search_by: SearchBy,
}

impl SearchQuery {
    pub fn text(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..Self::default()
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.selected_tags = tags;
        self
    }

    pub fn by(mut self, search_by: SearchBy) -> Self {
        self.search_by = search_by;
        self
    }

    /// Whether a single prompt passes this query.
    pub fn matches(&self, prompt: &Prompt) -> bool {
        let needle = self.search.to_lowercase();
        let title_hit = || prompt.title.to_lowercase().contains(&needle);

        match self.search_by {
            SearchBy::All => {
                let text_hit = needle.is_empty()
                    || title_hit()
                    || prompt.content.to_lowercase().contains(&needle);
                let tags_hit = self.selected_tags.iter().all(|t| prompt.has_tag(t));
                text_hit && tags_hit
            }
            SearchBy::Title => title_hit(),
            SearchBy::Description => true,
        }
    }
}

/// Keep the prompts matching `query`, in their original order.
pub fn search(prompts: &[Prompt], query: &SearchQuery) -> Vec<Prompt> {
    prompts
        .iter()
        .filter(|p| query.matches(p))
        .cloned()
        .collect()
}
