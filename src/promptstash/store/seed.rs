use crate::model::{Database, Prompt};
use chrono::{Duration, Utc};

/// Demo prompts written the first time a store is opened, and served as a
/// read-only fallback when the stored document cannot be parsed.
pub fn default_database() -> Database {
    let now = Utc::now();
    let days = Duration::days;
    let prompt = |id: &str, title: &str, content: &str, tags: &[&str], created: i64, updated: i64| {
        Prompt {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: now - days(created),
            updated_at: now - days(updated),
        }
    };

    Database {
        prompts: vec![
            prompt(
                "1",
                "Basic Introduction",
                "You are a helpful AI assistant. Your task is to provide concise, accurate information to user queries in a friendly tone.",
                &["introduction", "general"],
                7,
                5,
            ),
            prompt(
                "2",
                "Technical Documentation",
                "Create detailed technical documentation for the following API endpoints. Include request/response formats, error codes, and examples for each endpoint.",
                &["technical", "documentation"],
                10,
                2,
            ),
            prompt(
                "3",
                "Creative Story",
                "Write a short story in the style of [AUTHOR] about [THEME]. The story should have a clear beginning, middle, and end, with a surprising twist.",
                &["creative", "story"],
                3,
                1,
            ),
        ],
    }
}
