use std::collections::HashMap;

use crate::models::{HackerNewsItem, ResultPage, SearchTerm};

/// Results accumulated for one search term across every page fetched so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPageAccum {
    pub hits: Vec<HackerNewsItem>,
    /// Last page fetched for the term
    pub page: u32,
    pub nb_pages: Option<u32>,
}

impl ResultPageAccum {
    /// Page to request next, `None` once the page number can't advance.
    pub fn next_page(&self) -> Option<u32> {
        self.page.checked_add(1)
    }

    // An unknown page count means there may be more
    pub fn has_more(&self) -> bool {
        match (self.next_page(), self.nb_pages) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(next), Some(total)) => next < total,
        }
    }
}

/// Per-term result cache. Entries live for the whole session.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<SearchTerm, ResultPageAccum>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, term: &str) -> Option<&ResultPageAccum> {
        self.entries.get(term)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends the page's hits after any already stored for `term` and records
    /// its page number. Duplicate ids are kept.
    pub fn merge(&mut self, term: &str, new_page: ResultPage) -> &ResultPageAccum {
        let entry = self.entries.entry(term.to_string()).or_default();
        entry.hits.extend(new_page.hits);
        entry.page = new_page.page;
        entry.nb_pages = new_page.nb_pages;
        entry
    }

    /// Removes every hit with `item_id` from the term's results. Returns `None`
    /// when nothing is cached for `term`.
    pub fn dismiss(&mut self, term: &str, item_id: &str) -> Option<&ResultPageAccum> {
        let entry = self.entries.get_mut(term)?;
        entry.hits.retain(|item| item.id != item_id);
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_item;

    fn page(n: u32, items: &[(&str, &str)]) -> ResultPage {
        ResultPage {
            page: n,
            hits: items.iter().map(|(id, title)| test_item(id, title)).collect(),
            nb_pages: Some(5),
        }
    }

    fn ids(accum: &ResultPageAccum) -> Vec<&str> {
        accum.hits.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn get_on_unknown_term_is_absent() {
        let cache = ResultCache::new();
        assert!(cache.get("rust").is_none());
        assert!(!cache.contains("rust"));
        assert!(cache.is_empty());
    }

    #[test]
    fn merge_starts_fresh_then_appends_in_order() {
        let mut cache = ResultCache::new();
        cache.merge("rust", page(0, &[("1", "A"), ("2", "B")]));
        let accum = cache.merge("rust", page(1, &[("3", "C")]));

        assert_eq!(ids(accum), vec!["1", "2", "3"]);
        assert_eq!(accum.page, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn merge_keeps_duplicate_ids() {
        let mut cache = ResultCache::new();
        cache.merge("rust", page(0, &[("1", "A")]));
        let accum = cache.merge("rust", page(1, &[("1", "A again")]));
        assert_eq!(ids(accum), vec!["1", "1"]);
    }

    #[test]
    fn terms_are_independent_and_exact() {
        let mut cache = ResultCache::new();
        cache.merge("rust", page(0, &[("1", "A")]));
        cache.merge("Rust", page(0, &[("2", "B")]));

        assert_eq!(ids(cache.get("rust").unwrap()), vec!["1"]);
        assert_eq!(ids(cache.get("Rust").unwrap()), vec!["2"]);
        assert!(cache.get("rust ").is_none());
    }

    #[test]
    fn dismiss_removes_all_matches_and_keeps_page() {
        let mut cache = ResultCache::new();
        cache.merge("rust", page(0, &[("1", "A"), ("2", "B")]));
        cache.merge("rust", page(1, &[("1", "A dup"), ("3", "C")]));

        let accum = cache.dismiss("rust", "1").unwrap();
        assert_eq!(ids(accum), vec!["2", "3"]);
        assert_eq!(accum.page, 1);
    }

    #[test]
    fn dismiss_is_idempotent() {
        let mut cache = ResultCache::new();
        cache.merge("rust", page(0, &[("1", "A"), ("2", "B")]));
        cache.dismiss("rust", "1");
        let accum = cache.dismiss("rust", "1").unwrap();
        assert_eq!(ids(accum), vec!["2"]);
    }

    #[test]
    fn dismiss_on_unknown_term_is_noop() {
        let mut cache = ResultCache::new();
        assert!(cache.dismiss("rust", "1").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn has_more_tracks_page_count() {
        let mut cache = ResultCache::new();
        assert!(cache.merge("rust", page(3, &[])).has_more());
        assert!(!cache.merge("rust", page(4, &[("9", "Z")])).has_more());
    }

    #[test]
    fn unknown_page_count_allows_more() {
        let body = r#"{"hits": [{"objectID": "1", "title": "A"}], "page": 0}"#;
        let result: ResultPage = serde_json::from_str(body).unwrap();

        let mut cache = ResultCache::new();
        let accum = cache.merge("react", result);
        assert_eq!(accum.nb_pages, None);
        assert!(accum.has_more());
        assert_eq!(accum.next_page(), Some(1));
    }

    #[test]
    fn last_possible_page_has_no_more() {
        let mut cache = ResultCache::new();
        let mut last = page(u32::MAX, &[("1", "A")]);
        last.nb_pages = Some(3);
        assert!(!cache.merge("rust", last).has_more());

        let mut unbounded = page(u32::MAX, &[("2", "B")]);
        unbounded.nb_pages = None;
        let accum = cache.merge("go", unbounded);
        assert!(!accum.has_more());
        assert_eq!(accum.next_page(), None);
    }
}
