//! Mention suggestions
//!
//! Filters the candidate directory for a query (or defers to an external
//! search function when one is supplied) and keeps the highlighted entry of
//! the resulting list.

use crate::models::MentionCandidate;

/// Caller-supplied lookup, used instead of the static directory
pub trait MentionSearch {
    fn search(&self, query: &str) -> Vec<MentionCandidate>;
}

impl<F> MentionSearch for F
where
    F: Fn(&str) -> Vec<MentionCandidate>,
{
    fn search(&self, query: &str) -> Vec<MentionCandidate> {
        self(query)
    }
}

/// Candidates whose name or email contains `query`, case-insensitively,
/// in directory order. An empty query returns the whole directory.
pub fn filter_candidates(directory: &[MentionCandidate], query: &str) -> Vec<MentionCandidate> {
    if query.is_empty() {
        return directory.to_vec();
    }

    let query_lower = query.to_lowercase();
    directory
        .iter()
        .filter(|candidate| candidate.matches(&query_lower))
        .cloned()
        .collect()
}

/// Where candidates come from
pub struct SuggestionEngine {
    directory: Vec<MentionCandidate>,
    search: Option<Box<dyn MentionSearch>>,
}

impl SuggestionEngine {
    pub fn new(directory: Vec<MentionCandidate>) -> Self {
        Self {
            directory,
            search: None,
        }
    }

    /// Install an external search; it takes precedence over the directory
    pub fn set_search(&mut self, search: Option<Box<dyn MentionSearch>>) {
        self.search = search;
    }

    pub fn has_external_search(&self) -> bool {
        self.search.is_some()
    }

    pub fn directory(&self) -> &[MentionCandidate] {
        &self.directory
    }

    pub fn candidates_for(&self, query: &str) -> Vec<MentionCandidate> {
        match &self.search {
            Some(search) => search.search(query),
            None => filter_candidates(&self.directory, query),
        }
    }
}

/// Filtered candidates plus the highlighted index
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuggestionList {
    items: Vec<MentionCandidate>,
    highlighted: usize,
}

impl SuggestionList {
    /// Replace the items; the highlight returns to the top if they changed
    pub fn update(&mut self, items: Vec<MentionCandidate>) {
        if items != self.items {
            self.highlighted = 0;
        }
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.highlighted = 0;
    }

    pub fn items(&self) -> &[MentionCandidate] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn highlighted(&self) -> Option<&MentionCandidate> {
        self.items.get(self.highlighted)
    }

    pub fn get(&self, index: usize) -> Option<&MentionCandidate> {
        self.items.get(index)
    }

    /// Arrow-down: next item, wrapping from last to first
    pub fn move_next(&mut self) {
        if !self.items.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.items.len();
        }
    }

    /// Arrow-up: previous item, wrapping from first to last
    pub fn move_previous(&mut self) {
        if !self.items.is_empty() {
            self.highlighted = if self.highlighted == 0 {
                self.items.len() - 1
            } else {
                self.highlighted - 1
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_DIRECTORY;

    fn names(items: &[MentionCandidate]) -> Vec<&str> {
        items.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_filter_jo() {
        let directory = vec![
            MentionCandidate::new("1", "John Doe"),
            MentionCandidate::new("2", "Jane Smith"),
        ];
        assert_eq!(names(&filter_candidates(&directory, "jo")), vec!["John Doe"]);
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let all = filter_candidates(&DEFAULT_DIRECTORY, "");
        assert_eq!(all, DEFAULT_DIRECTORY.to_vec());
    }

    #[test]
    fn test_filter_matches_email() {
        let hits = filter_candidates(&DEFAULT_DIRECTORY, "CHARLIE@");
        assert_eq!(names(&hits), vec!["Charlie Wilson"]);
    }

    #[test]
    fn test_external_search_takes_precedence() {
        let mut engine = SuggestionEngine::new(DEFAULT_DIRECTORY.to_vec());
        engine.set_search(Some(Box::new(|query: &str| {
            vec![MentionCandidate::new("x", format!("Remote {}", query))]
        })));

        let hits = engine.candidates_for("jo");
        assert_eq!(names(&hits), vec!["Remote jo"]);
    }

    #[test]
    fn test_circular_navigation() {
        let mut list = SuggestionList::default();
        list.update(DEFAULT_DIRECTORY[..3].to_vec());

        list.move_previous();
        assert_eq!(list.highlighted_index(), 2);
        list.move_next();
        assert_eq!(list.highlighted_index(), 0);
        list.move_next();
        list.move_next();
        list.move_next();
        assert_eq!(list.highlighted_index(), 0);
    }

    #[test]
    fn test_highlight_resets_when_items_change() {
        let mut list = SuggestionList::default();
        list.update(DEFAULT_DIRECTORY.to_vec());
        list.move_next();
        list.move_next();

        list.update(DEFAULT_DIRECTORY.to_vec());
        assert_eq!(list.highlighted_index(), 2);

        list.update(DEFAULT_DIRECTORY[..2].to_vec());
        assert_eq!(list.highlighted_index(), 0);
    }

    #[test]
    fn test_navigation_on_empty_list() {
        let mut list = SuggestionList::default();
        list.move_next();
        list.move_previous();
        assert_eq!(list.highlighted(), None);
    }
}
