//! Client-side session state.
//!
//! The UI is always in exactly one view, and every change goes through a
//! transition method here. Renderers read the state; they never mutate it.

use crate::models::{DocumentStats, DocumentSummary, SearchResult};
use chrono::NaiveDateTime;

/// What the session is currently displaying.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    /// The full document list.
    #[default]
    DocumentList,
    /// Results for the given query.
    SearchResults { query: String },
}

/// Handle for one search attempt. A response may only be installed while its
/// ticket is still the newest one issued, which keeps a slow response for an
/// old query from clobbering a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Session state backing both the terminal and the web views.
#[derive(Debug, Default)]
pub struct AppState {
    documents: Vec<DocumentSummary>,
    results: Vec<SearchResult>,
    view: View,
    search_seq: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached full document list.
    pub fn documents(&self) -> &[DocumentSummary] {
        &self.documents
    }

    /// Results backing the current search view. Empty outside of one.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Dashboard counters over the cached list.
    pub fn stats(&self, now: NaiveDateTime) -> DocumentStats {
        DocumentStats::collect(&self.documents, now)
    }

    /// Replace the cached document list after a load or refresh. The current
    /// view is left alone.
    pub fn documents_loaded(&mut self, documents: Vec<DocumentSummary>) {
        self.documents = documents;
    }

    /// Record a new search attempt and get the ticket for its response.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.search_seq += 1;
        SearchTicket(self.search_seq)
    }

    /// Install results for `query`, provided `ticket` is still the newest
    /// attempt. Returns `false` when a newer submission superseded this one;
    /// the state is untouched in that case.
    ///
    /// An empty result set still switches to the search view; rendering the
    /// empty state is the presenter's job, not an error.
    pub fn search_completed(
        &mut self,
        ticket: SearchTicket,
        query: &str,
        results: Vec<SearchResult>,
    ) -> bool {
        if ticket.0 != self.search_seq {
            return false;
        }
        self.results = results;
        self.view = View::SearchResults {
            query: query.to_string(),
        };
        true
    }

    /// Leave any search context and show the full list again. Outstanding
    /// tickets become stale.
    pub fn reset_to_list(&mut self) {
        self.search_seq += 1;
        self.results.clear();
        self.view = View::DocumentList;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str) -> DocumentSummary {
        DocumentSummary {
            id: id.to_string(),
            title: format!("Văn bản {id}"),
            content: None,
            document_type: None,
            document_number: None,
            sender: None,
            receiver: None,
            date_received: None,
            date_issued: None,
            file_name: None,
            file_size: None,
            metadata: None,
            created_at: None,
            updated_at: None,
            attachments: Vec::new(),
        }
    }

    fn hit(id: &str) -> SearchResult {
        SearchResult {
            document: doc(id),
            score: 1.0,
            matches: Vec::new(),
        }
    }

    #[test]
    fn starts_on_the_document_list() {
        let state = AppState::new();
        assert_eq!(state.view(), &View::DocumentList);
        assert!(state.documents().is_empty());
        assert!(state.results().is_empty());
    }

    #[test]
    fn loading_documents_keeps_the_current_view() {
        let mut state = AppState::new();
        let ticket = state.begin_search();
        assert!(state.search_completed(ticket, "khẩn", vec![hit("1")]));

        state.documents_loaded(vec![doc("1"), doc("2")]);
        assert_eq!(state.documents().len(), 2);
        assert_eq!(
            state.view(),
            &View::SearchResults {
                query: "khẩn".to_string()
            }
        );
    }

    #[test]
    fn completing_a_search_switches_the_view() {
        let mut state = AppState::new();
        let ticket = state.begin_search();
        assert!(state.search_completed(ticket, "kế hoạch", vec![hit("9")]));
        assert_eq!(state.results().len(), 1);
        assert_eq!(
            state.view(),
            &View::SearchResults {
                query: "kế hoạch".to_string()
            }
        );
    }

    #[test]
    fn an_empty_result_set_still_switches_views() {
        let mut state = AppState::new();
        let ticket = state.begin_search();
        assert!(state.search_completed(ticket, "zzz", Vec::new()));
        assert!(state.results().is_empty());
        assert_eq!(
            state.view(),
            &View::SearchResults {
                query: "zzz".to_string()
            }
        );
    }

    #[test]
    fn a_newer_search_supersedes_an_older_ticket() {
        let mut state = AppState::new();
        let first = state.begin_search();
        let second = state.begin_search();

        // The slow first response arrives after the second was issued.
        assert!(!state.search_completed(first, "cũ", vec![hit("old")]));
        assert_eq!(state.view(), &View::DocumentList);
        assert!(state.results().is_empty());

        assert!(state.search_completed(second, "mới", vec![hit("new")]));
        assert_eq!(
            state.view(),
            &View::SearchResults {
                query: "mới".to_string()
            }
        );
        assert_eq!(state.results()[0].document.id, "new");
    }

    #[test]
    fn reset_invalidates_outstanding_tickets() {
        let mut state = AppState::new();
        state.documents_loaded(vec![doc("1")]);

        let ticket = state.begin_search();
        state.reset_to_list();
        assert!(!state.search_completed(ticket, "trễ", vec![hit("late")]));

        assert_eq!(state.view(), &View::DocumentList);
        assert!(state.results().is_empty());
        assert_eq!(state.documents().len(), 1);
    }
}
