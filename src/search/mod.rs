//! Search submission and presentation.
//!
//! [`SearchPresenter::search`] is the single entry point for the search box.
//! It decides whether the registry is contacted at all, updates the session
//! state, and reports one of four outcomes for the caller to render.

pub mod highlight;

use crate::api::DocumentService;
use crate::notice::{Locale, Notice};
use crate::state::AppState;
use crate::view::{search_results_view, SearchResultsView};

/// A non-empty, trimmed search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trim `raw`. Blank input is not a query.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(SearchQuery(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// What one search submission produced.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Blank input. The session went back to the full document list without
    /// contacting the registry.
    Reset,
    /// The registry matched nothing. The empty results view is shown.
    Empty { query: String },
    /// Ranked results, ready to render.
    Results(SearchResultsView),
    /// A newer submission finished first; nothing was changed.
    Superseded,
    /// The request failed. The previous view stays in place and the notice
    /// carries the message to surface.
    Failed(Notice),
}

/// Drives the search flow against a [`DocumentService`].
pub struct SearchPresenter<'a, S: ?Sized> {
    service: &'a S,
    locale: Locale,
}

impl<'a, S: DocumentService + ?Sized> SearchPresenter<'a, S> {
    pub fn new(service: &'a S, locale: Locale) -> Self {
        SearchPresenter { service, locale }
    }

    /// Submit `raw_query` and transition `state` according to the outcome.
    pub async fn search(&self, state: &mut AppState, raw_query: &str) -> SearchOutcome {
        let Some(query) = SearchQuery::parse(raw_query) else {
            state.reset_to_list();
            return SearchOutcome::Reset;
        };

        let ticket = state.begin_search();
        match self.service.search(query.as_str()).await {
            Ok(results) => {
                if !state.search_completed(ticket, query.as_str(), results) {
                    return SearchOutcome::Superseded;
                }
                if state.results().is_empty() {
                    SearchOutcome::Empty {
                        query: query.into_string(),
                    }
                } else {
                    SearchOutcome::Results(search_results_view(query.as_str(), state.results()))
                }
            }
            Err(err) => {
                tracing::warn!(query = query.as_str(), "search failed: {err}");
                SearchOutcome::Failed(Notice::error(self.locale.search_failed()))
            }
        }
    }
}
