use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::cache::ResultCache;
use crate::error::SearchError;
use crate::hn_client::SearchApi;
use crate::models::{HackerNewsItem, ResultPage, SearchTerm};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Loading { term: SearchTerm, page: u32 },
    Ready(SearchTerm),
    Failed { term: SearchTerm, page: u32, reason: String },
}

struct PendingFetch {
    term: SearchTerm,
    page: u32,
    receiver: Receiver<Result<ResultPage, SearchError>>,
}

/// Owns the current search term, the result cache and the single tracked fetch.
///
/// Fetches run on a worker thread; the UI calls [`SearchController::poll`] once
/// per frame to pick up the response.
pub struct SearchController<A: SearchApi> {
    api: A,
    cache: ResultCache,
    current_term: SearchTerm,
    state: SearchState,
    pending: Option<PendingFetch>,
}

impl<A: SearchApi> SearchController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: ResultCache::new(),
            current_term: String::new(),
            state: SearchState::Idle,
            pending: None,
        }
    }

    /// Initial search, run once when the window first opens.
    pub fn start(&mut self, default_term: &str) {
        tracing::info!(term = default_term, "starting with default search");
        self.submit(default_term);
    }

    pub fn submit(&mut self, term: &str) {
        self.current_term = term.to_string();

        if let Some(stale) = self.pending.take() {
            tracing::debug!(term = %stale.term, page = stale.page, "superseding in-flight fetch");
        }

        if self.cache.contains(term) {
            tracing::debug!(term, "using cached results");
            self.state = SearchState::Ready(term.to_string());
        } else {
            self.fetch(term.to_string(), 0);
        }
    }

    pub fn load_more(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let SearchState::Ready(term) = &self.state else {
            return;
        };

        let term = term.clone();
        let next_page = match self.cache.get(&term) {
            Some(accum) => accum.next_page(),
            None => Some(0),
        };
        match next_page {
            Some(page) => self.fetch(term, page),
            None => tracing::warn!(term = %term, "no page after the last one fetched"),
        }
    }

    /// Re-issues the request that last failed.
    pub fn retry(&mut self) {
        if self.pending.is_some() {
            return;
        }
        if let SearchState::Failed { term, page, .. } = &self.state {
            tracing::info!(term = %term, page, "retrying search");
            let (term, page) = (term.clone(), *page);
            self.fetch(term, page);
        }
    }

    pub fn dismiss(&mut self, item_id: &str) {
        match self.cache.dismiss(&self.current_term, item_id) {
            Some(accum) => tracing::debug!(
                term = %self.current_term,
                item_id,
                remaining = accum.hits.len(),
                "dismissed item"
            ),
            None => tracing::debug!(term = %self.current_term, item_id, "nothing cached to dismiss from"),
        }
    }

    /// Applies the tracked fetch's response if it has arrived. Returns true when
    /// the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };

        let result = match pending.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => {
                self.pending = Some(pending);
                return false;
            }
            Err(TryRecvError::Disconnected) => Err(SearchError::WorkerGone),
        };

        self.complete(pending.term, pending.page, result);
        true
    }

    fn fetch(&mut self, term: SearchTerm, page: u32) {
        tracing::info!(term = %term, page, "fetching search results");

        let api = self.api.clone();
        let (tx, rx) = mpsc::channel();
        let worker_term = term.clone();

        thread::spawn(move || {
            // The receiver is gone if this fetch was superseded
            let _ = tx.send(api.search(&worker_term, page));
        });

        self.state = SearchState::Loading {
            term: term.clone(),
            page,
        };
        self.pending = Some(PendingFetch {
            term,
            page,
            receiver: rx,
        });
    }

    fn complete(&mut self, term: SearchTerm, page: u32, result: Result<ResultPage, SearchError>) {
        match result {
            Ok(result_page) => {
                let accum = self.cache.merge(&term, result_page);
                let (merged_page, total_hits) = (accum.page, accum.hits.len());
                tracing::info!(
                    term = %term,
                    page = merged_page,
                    total_hits,
                    cached_terms = self.cache.len(),
                    "search results merged"
                );
                self.state = SearchState::Ready(term);
            }
            Err(e) => {
                tracing::warn!(term = %term, page, error = %e, "search failed");
                self.state = SearchState::Failed {
                    term,
                    page,
                    reason: e.to_string(),
                };
            }
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn current_term(&self) -> &str {
        &self.current_term
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Hits accumulated for the current term, empty when nothing is cached.
    pub fn hits(&self) -> &[HackerNewsItem] {
        self.cache
            .get(&self.current_term)
            .map(|accum| accum.hits.as_slice())
            .unwrap_or_default()
    }

    pub fn page(&self) -> u32 {
        self.cache.get(&self.current_term).map_or(0, |accum| accum.page)
    }

    pub fn has_more(&self) -> bool {
        self.cache
            .get(&self.current_term)
            .is_some_and(|accum| accum.has_more())
    }

    pub fn last_error(&self) -> Option<&str> {
        match &self.state {
            SearchState::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Blocks until the tracked fetch finishes and applies it.
    #[cfg(test)]
    fn wait(&mut self) {
        if let Some(pending) = self.pending.take() {
            let result = pending
                .receiver
                .recv()
                .unwrap_or(Err(SearchError::WorkerGone));
            self.complete(pending.term, pending.page, result);
        }
    }
}
