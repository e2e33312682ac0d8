use crate::model::Prompt;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Title,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub sort_by: SortBy,
    pub sort_direction: SortDirection,
}

impl SortSpec {
    pub fn new(sort_by: SortBy, sort_direction: SortDirection) -> Self {
        Self {
            sort_by,
            sort_direction,
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortBy::UpdatedAt, SortDirection::Desc)
    }
}

/// Base letter for accented Latin-1 lowercase letters. Other scripts and
/// combining marks are left as they are.
fn base_letter(c: char) -> char {
    match c {
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => c,
    }
}

fn lowered(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Human-friendly string ordering. Strings compare case-folded with Latin-1
/// accents stripped, so "éclair" sorts among the e's. Ties go to the
/// unaccented form, then to lowercase before uppercase.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    lowered(a)
        .map(base_letter)
        .cmp(lowered(b).map(base_letter))
        .then_with(|| lowered(a).cmp(lowered(b)))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
}

fn compare(a: &Prompt, b: &Prompt, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Title => locale_cmp(&a.title, &b.title),
        SortBy::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

/// Return a sorted copy. The sort is stable in both directions: prompts with
/// equal keys keep their relative order.
pub fn sort(prompts: &[Prompt], spec: SortSpec) -> Vec<Prompt> {
    let mut sorted = prompts.to_vec();
    match spec.sort_direction {
        SortDirection::Asc => sorted.sort_by(|a, b| compare(a, b, spec.sort_by)),
        SortDirection::Desc => sorted.sort_by(|a, b| compare(b, a, spec.sort_by)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn titled(titles: &[&str]) -> Vec<Prompt> {
        titles.iter().map(|t| Prompt::new(*t, "c", vec![])).collect()
    }

    fn titles(prompts: &[Prompt]) -> Vec<&str> {
        prompts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn title_sort_ignores_case() {
        let prompts = titled(&["banana", "Apple", "cherry"]);
        let sorted = sort(&prompts, SortSpec::new(SortBy::Title, SortDirection::Asc));
        assert_eq!(titles(&sorted), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn lowercase_precedes_uppercase_on_ties() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("B", "a"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn accented_titles_sort_with_their_base_letter() {
        let prompts = titled(&["zeta", "fig", "Éclair", "eclair"]);
        let sorted = sort(&prompts, SortSpec::new(SortBy::Title, SortDirection::Asc));
        assert_eq!(titles(&sorted), vec!["eclair", "Éclair", "fig", "zeta"]);

        assert_eq!(locale_cmp("e", "é"), Ordering::Less);
        assert_eq!(locale_cmp("é", "f"), Ordering::Less);
        assert_eq!(locale_cmp("über", "unter"), Ordering::Less);
    }

    #[test]
    fn updated_at_sort_descending() {
        let now = Utc::now();
        let mut prompts = titled(&["old", "new", "mid"]);
        prompts[0].updated_at = now - Duration::days(3);
        prompts[1].updated_at = now;
        prompts[2].updated_at = now - Duration::days(1);

        let sorted = sort(&prompts, SortSpec::default());
        assert_eq!(titles(&sorted), vec!["new", "mid", "old"]);
    }

    #[test]
    fn sort_does_not_touch_input() {
        let prompts = titled(&["b", "a"]);
        let _ = sort(&prompts, SortSpec::new(SortBy::Title, SortDirection::Asc));
        assert_eq!(titles(&prompts), vec!["b", "a"]);
    }

    #[test]
    fn sort_is_idempotent_and_length_preserving() {
        let prompts = titled(&["d", "B", "a", "c", "b"]);
        for spec in [
            SortSpec::new(SortBy::Title, SortDirection::Asc),
            SortSpec::new(SortBy::Title, SortDirection::Desc),
            SortSpec::default(),
        ] {
            let once = sort(&prompts, spec);
            assert_eq!(once.len(), prompts.len());
            assert_eq!(sort(&once, spec), once);
        }
    }

    #[test]
    fn flipping_direction_reverses_distinct_keys() {
        let prompts = titled(&["delta", "alpha", "charlie", "bravo"]);
        let asc = sort(&prompts, SortSpec::new(SortBy::Title, SortDirection::Asc));
        let mut desc = sort(&prompts, SortSpec::new(SortBy::Title, SortDirection::Desc));
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn equal_keys_keep_relative_order_in_both_directions() {
        let mut prompts = titled(&["same", "same", "other"]);
        prompts[0].content = "first".into();
        prompts[1].content = "second".into();

        for dir in [SortDirection::Asc, SortDirection::Desc] {
            let sorted = sort(&prompts, SortSpec::new(SortBy::Title, dir));
            let contents: Vec<_> = sorted
                .iter()
                .filter(|p| p.title == "same")
                .map(|p| p.content.as_str())
                .collect();
            assert_eq!(contents, vec!["first", "second"]);
        }
    }
}
