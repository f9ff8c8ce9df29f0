//! View models.
//!
//! Pure builders that turn wire models into exactly what the renderers need.
//! Nothing here touches the network or escapes text; the HTML layer escapes
//! when it flattens these into markup, and the terminal layer styles them.

use crate::models::{
    DocumentStats, DocumentSummary, PriorityLevel, RegistryStatistics, SearchResult,
};
use crate::notice::Locale;
use crate::search::highlight::{highlight, HighlightedSnippet};

/// Matching passages shown per search result. Further matches are counted
/// but not rendered.
pub const MAX_RENDERED_MATCHES: usize = 2;

/// Urgency badge on a document card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityBadge {
    /// The registry's own label, e.g. "Rất khẩn".
    pub label: String,
    pub level: PriorityLevel,
}

/// One document card on the list view.
#[derive(Debug, Clone)]
pub struct DocumentCardView {
    pub id: String,
    pub title: String,
    pub priority: Option<PriorityBadge>,
    /// Document type, or a placeholder when the registry has none recorded.
    pub doc_type: String,
    pub number: Option<String>,
    pub sender: Option<String>,
    /// Date received, already formatted for the locale.
    pub received: Option<String>,
    pub tags: Vec<String>,
    pub attachment_count: usize,
}

/// One entry on the search results view.
#[derive(Debug, Clone)]
pub struct ResultEntryView {
    pub id: String,
    pub title: String,
    pub number: Option<String>,
    pub doc_type: Option<String>,
    pub sender: Option<String>,
    /// Total matching passages reported by the registry.
    pub match_count: usize,
    /// Highlighted passages, capped at [`MAX_RENDERED_MATCHES`].
    pub snippets: Vec<HighlightedSnippet>,
}

impl ResultEntryView {
    /// Matches that were counted but not rendered.
    pub fn hidden_matches(&self) -> usize {
        self.match_count - self.snippets.len()
    }
}

/// The whole search results view.
#[derive(Debug, Clone)]
pub struct SearchResultsView {
    pub query: String,
    pub total: usize,
    pub entries: Vec<ResultEntryView>,
}

/// An attachment row on the detail view.
#[derive(Debug, Clone)]
pub struct AttachmentView {
    pub id: String,
    pub filename: String,
    pub size: Option<String>,
}

/// The document detail view.
#[derive(Debug, Clone)]
pub struct DocumentPageView {
    pub id: String,
    pub title: String,
    /// Labelled general-information rows, in display order.
    pub rows: Vec<(String, String)>,
    pub content: Option<String>,
    pub attachments: Vec<AttachmentView>,
}

/// Build list cards for the loaded documents.
pub fn document_cards(documents: &[DocumentSummary], locale: Locale) -> Vec<DocumentCardView> {
    documents
        .iter()
        .map(|doc| DocumentCardView {
            id: doc.id.clone(),
            title: doc.title.clone(),
            priority: doc.priority().map(|label| PriorityBadge {
                label: label.to_string(),
                level: PriorityLevel::from_label(label),
            }),
            doc_type: doc
                .document_type
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            number: doc.document_number.clone(),
            sender: doc.sender.clone(),
            received: doc.date_received.map(|ts| locale.format_date(ts)),
            tags: doc.tags().to_vec(),
            attachment_count: doc.attachments.len(),
        })
        .collect()
}

/// Build the results view for `query`.
///
/// Every result keeps its full match count, but only the first
/// [`MAX_RENDERED_MATCHES`] passages are highlighted for display.
pub fn search_results_view(query: &str, results: &[SearchResult]) -> SearchResultsView {
    let entries = results
        .iter()
        .map(|result| ResultEntryView {
            id: result.document.id.clone(),
            title: result.document.title.clone(),
            number: result.document.document_number.clone(),
            doc_type: result.document.document_type.clone(),
            sender: result.document.sender.clone(),
            match_count: result.matches.len(),
            snippets: result
                .matches
                .iter()
                .take(MAX_RENDERED_MATCHES)
                .map(|m| highlight(&m.snippet, query))
                .collect(),
        })
        .collect();

    SearchResultsView {
        query: query.to_string(),
        total: results.len(),
        entries,
    }
}

/// Build the detail view for one document.
pub fn document_page(doc: &DocumentSummary, locale: Locale) -> DocumentPageView {
    let mut rows = vec![(locale.title_label().to_string(), doc.title.clone())];
    if let Some(ref doc_type) = doc.document_type {
        rows.push((locale.type_label().to_string(), doc_type.clone()));
    }
    if let Some(ref number) = doc.document_number {
        rows.push((locale.document_number_label().to_string(), number.clone()));
    }
    if let Some(ref sender) = doc.sender {
        rows.push((locale.sender_label().to_string(), sender.clone()));
    }
    if let Some(ref receiver) = doc.receiver {
        rows.push((locale.receiver_label().to_string(), receiver.clone()));
    }
    if let Some(received) = doc.date_received {
        rows.push((
            locale.date_received_label().to_string(),
            locale.format_datetime(received),
        ));
    }
    if let Some(issued) = doc.date_issued {
        rows.push((
            locale.date_issued_label().to_string(),
            locale.format_datetime(issued),
        ));
    }

    DocumentPageView {
        id: doc.id.clone(),
        title: doc.title.clone(),
        rows,
        content: doc.content.clone(),
        attachments: doc
            .attachments
            .iter()
            .map(|att| AttachmentView {
                id: att.id.clone(),
                filename: att.filename.clone(),
                size: att.file_size.map(format_file_size),
            })
            .collect(),
    }
}

/// Dashboard counter rows derived from the loaded list.
pub fn stats_rows(stats: &DocumentStats, locale: Locale) -> Vec<(String, String)> {
    vec![
        (locale.stats_total().to_string(), stats.total.to_string()),
        (
            locale.stats_dispatches().to_string(),
            stats.dispatches.to_string(),
        ),
        (
            locale.stats_decisions().to_string(),
            stats.decisions.to_string(),
        ),
        (
            locale.stats_this_month().to_string(),
            stats.this_month.to_string(),
        ),
    ]
}

/// Counter rows for the registry-wide statistics endpoint.
pub fn registry_stats_rows(stats: &RegistryStatistics, locale: Locale) -> Vec<(String, String)> {
    let mut rows = vec![
        (
            locale.stats_total().to_string(),
            stats.total_documents.to_string(),
        ),
        (
            locale.stats_storage().to_string(),
            format_file_size(stats.total_file_size),
        ),
    ];
    for (doc_type, count) in &stats.document_types {
        rows.push((doc_type.clone(), count.to_string()));
    }
    rows
}

/// Human-readable file size with 1024-based units, rounded to two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttachmentInfo, DocumentMeta, SearchMatch};
    use pretty_assertions::assert_eq;

    fn doc(id: &str, title: &str) -> DocumentSummary {
        DocumentSummary {
            id: id.to_string(),
            title: title.to_string(),
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

    #[test]
    fn file_sizes_use_binary_units() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(500), "500 B");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(248_101), "242.29 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_file_size(3_221_225_472), "3 GB");
        // beyond the largest unit the number just grows
        assert_eq!(format_file_size(2_199_023_255_552), "2048 GB");
    }

    #[test]
    fn cards_fall_back_to_na_for_a_missing_type() {
        let mut d = doc("1", "Văn bản không loại");
        d.metadata = Some(DocumentMeta {
            tags: vec!["nội bộ".to_string()],
            priority: Some("Rất khẩn".to_string()),
        });
        d.attachments.push(AttachmentInfo {
            id: "a1".to_string(),
            filename: "x.pdf".to_string(),
            file_size: None,
            file_type: None,
            created_at: None,
        });

        let cards = document_cards(&[d], Locale::Vi);
        assert_eq!(cards[0].doc_type, "N/A");
        assert_eq!(cards[0].attachment_count, 1);
        assert_eq!(cards[0].tags, vec!["nội bộ".to_string()]);
        let badge = cards[0].priority.as_ref().unwrap();
        assert_eq!(badge.label, "Rất khẩn");
        assert_eq!(badge.level, PriorityLevel::High);
    }

    #[test]
    fn results_render_at_most_two_passages() {
        let mut result = SearchResult {
            document: doc("d1", "Báo cáo quý"),
            score: 9.0,
            matches: Vec::new(),
        };
        for i in 0..3 {
            result.matches.push(SearchMatch {
                snippet: format!("đoạn báo cáo thứ {i}"),
                chunk_index: Some(i),
            });
        }

        let results = vec![result; 5];
        let view = search_results_view("báo cáo", &results);

        assert_eq!(view.total, 5);
        for entry in &view.entries {
            assert_eq!(entry.match_count, 3);
            assert_eq!(entry.snippets.len(), MAX_RENDERED_MATCHES);
            assert_eq!(entry.hidden_matches(), 1);
            for snippet in &entry.snippets {
                assert_eq!(snippet.hit_count(), 1);
            }
        }
        // the source results keep all their matches
        assert_eq!(results[0].matches.len(), 3);
    }

    #[test]
    fn detail_rows_skip_absent_fields() {
        let mut d = doc("d2", "Quyết định 15");
        d.document_type = Some("Quyết định".to_string());
        d.sender = Some("UBND Tỉnh".to_string());

        let page = document_page(&d, Locale::Vi);
        let labels: Vec<&str> = page.rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["Tiêu Đề", "Loại", "Từ"]);
        assert!(page.content.is_none());
        assert!(page.attachments.is_empty());
    }

    #[test]
    fn dashboard_rows_follow_the_locale() {
        let stats = DocumentStats {
            total: 7,
            dispatches: 4,
            decisions: 2,
            this_month: 3,
        };
        let rows = stats_rows(&stats, Locale::Vi);
        assert_eq!(rows[0], ("Tổng số văn bản".to_string(), "7".to_string()));
        assert_eq!(rows[1].0, "Công văn");
        assert_eq!(rows[2].0, "Quyết định");
    }
}
