//! Terminal rendering.
//!
//! Every function builds a complete string for one view so output can be
//! asserted in tests. Styling comes from `console`, which drops the ANSI
//! codes on its own when stdout is not a terminal.

use console::style;

use crate::chat::{ChatEntry, ChatRole};
use crate::models::PriorityLevel;
use crate::notice::{Locale, Notice, Severity};
use crate::search::highlight::{HighlightedSnippet, SnippetSpan};
use crate::view::{DocumentCardView, DocumentPageView, SearchResultsView};

/// The full document list, one card per document.
pub fn document_list(cards: &[DocumentCardView], locale: Locale) -> String {
    if cards.is_empty() {
        return empty_registry(locale);
    }

    let mut out = String::new();
    for card in cards {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("{}", style(&card.title).bold()));
        if let Some(ref badge) = card.priority {
            let label = format!("[{}]", badge.label);
            let styled = match badge.level {
                PriorityLevel::High => style(label).red().bold(),
                PriorityLevel::Medium => style(label).yellow(),
                PriorityLevel::Low => style(label).dim(),
            };
            out.push_str(&format!(" {styled}"));
        }
        out.push('\n');

        let mut meta = vec![format!("📄 {}", card.doc_type)];
        if let Some(ref number) = card.number {
            meta.push(format!("{}: {}", locale.number_label(), number));
        }
        if let Some(ref sender) = card.sender {
            meta.push(format!("{}: {}", locale.sender_label(), sender));
        }
        if let Some(ref received) = card.received {
            meta.push(format!("📅 {received}"));
        }
        out.push_str(&format!("  {}\n", meta.join(" · ")));

        if !card.tags.is_empty() {
            let tags: Vec<String> = card.tags.iter().map(|t| format!("#{t}")).collect();
            out.push_str(&format!("  {}\n", style(tags.join(" ")).cyan()));
        }
        if card.attachment_count > 0 {
            out.push_str(&format!(
                "  📎 {}\n",
                locale.attachment_count(card.attachment_count)
            ));
        }
        out.push_str(&format!("  {}\n", style(format!("id: {}", card.id)).dim()));
    }
    out
}

/// Placeholder shown when the registry holds nothing yet.
pub fn empty_registry(locale: Locale) -> String {
    format!(
        "{}\n{}\n",
        locale.empty_registry(),
        style(locale.empty_registry_hint()).dim()
    )
}

/// The search results view, snippets highlighted.
pub fn search_results(view: &SearchResultsView, locale: Locale) -> String {
    let mut out = format!("{}\n", style(locale.results_heading(view.total)).bold());

    if view.entries.is_empty() {
        out.push_str(&format!("{}\n", locale.no_results()));
        out.push_str(&format!(
            "{}\n",
            style(locale.no_results_hint(&view.query)).dim()
        ));
        return out;
    }

    for entry in &view.entries {
        out.push('\n');
        out.push_str(&format!("{}", style(&entry.title).bold()));
        out.push_str(&format!(" {}\n", style(format!("(id: {})", entry.id)).dim()));

        let mut meta = Vec::new();
        if let Some(ref number) = entry.number {
            meta.push(format!("{}: {}", locale.number_label(), number));
        }
        if let Some(ref doc_type) = entry.doc_type {
            meta.push(doc_type.clone());
        }
        if let Some(ref sender) = entry.sender {
            meta.push(format!("{}: {}", locale.sender_label(), sender));
        }
        if !meta.is_empty() {
            out.push_str(&format!("  {}\n", meta.join(" · ")));
        }

        if entry.match_count > 0 {
            out.push_str(&format!("  {}\n", locale.matches_found(entry.match_count)));
            for snippet in &entry.snippets {
                out.push_str(&format!("    {}\n", snippet_line(snippet)));
            }
            if entry.hidden_matches() > 0 {
                out.push_str(&format!(
                    "    {}\n",
                    style(locale.more_matches(entry.hidden_matches())).dim()
                ));
            }
        }
    }
    out
}

/// One snippet with its hits emphasized.
fn snippet_line(snippet: &HighlightedSnippet) -> String {
    snippet
        .spans()
        .iter()
        .map(|span| match span {
            SnippetSpan::Text(text) => text.clone(),
            SnippetSpan::Hit(text) => style(text).yellow().bold().to_string(),
        })
        .collect()
}

/// The document detail view.
pub fn document_page(page: &DocumentPageView, locale: Locale) -> String {
    let mut out = format!("{}\n\n", style(&page.title).bold());

    out.push_str(&format!("{}\n", style(locale.general_heading()).underlined()));
    out.push_str(&labelled_rows(&page.rows));

    if let Some(ref content) = page.content {
        out.push_str(&format!(
            "\n{}\n{}\n",
            style(locale.content_heading()).underlined(),
            content
        ));
    }

    if !page.attachments.is_empty() {
        out.push_str(&format!(
            "\n{} ({})\n",
            style(locale.attachments_heading()).underlined(),
            page.attachments.len()
        ));
        for att in &page.attachments {
            let size = att.size.as_deref().unwrap_or("-");
            out.push_str(&format!(
                "  {} ({size}) {}\n",
                att.filename,
                style(format!("id: {}", att.id)).dim()
            ));
        }
    }
    out
}

/// Aligned `label: value` rows.
pub fn labelled_rows(rows: &[(String, String)]) -> String {
    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (label, value) in rows {
        let pad = " ".repeat(width - label.chars().count());
        out.push_str(&format!("  {label}{pad}  {value}\n"));
    }
    out
}

/// One transcript entry, continuation lines indented under the marker.
pub fn chat_entry(entry: &ChatEntry) -> String {
    let marker = match entry.role {
        ChatRole::User => style("👤".to_string()).cyan(),
        ChatRole::Assistant => style("🤖".to_string()).green(),
    };
    let mut lines = entry.body.lines();
    let mut out = format!("{} {}\n", marker, lines.next().unwrap_or_default());
    for line in lines {
        out.push_str(&format!("   {line}\n"));
    }
    out
}

/// One notification line, colored by severity.
pub fn notice_line(notice: &Notice) -> String {
    let (symbol, styled) = match notice.severity {
        Severity::Success => ("✔", style(notice.message.clone()).green()),
        Severity::Error => ("✖", style(notice.message.clone()).red()),
        Severity::Info => ("•", style(notice.message.clone()).cyan()),
    };
    format!("{symbol} {styled}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SearchMatch, SearchResult};
    use crate::view::{document_cards, search_results_view};

    fn plain() {
        console::set_colors_enabled(false);
    }

    fn doc(title: &str) -> crate::models::DocumentSummary {
        crate::models::DocumentSummary {
            id: "id-1".to_string(),
            title: title.to_string(),
            content: None,
            document_type: Some("Công văn".to_string()),
            document_number: Some("15/CV".to_string()),
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
    fn lists_render_cards_with_meta() {
        plain();
        let cards = document_cards(&[doc("Công văn 15")], Locale::Vi);
        let out = document_list(&cards, Locale::Vi);
        assert!(out.contains("Công văn 15"));
        assert!(out.contains("📄 Công văn · Số: 15/CV"));
        assert!(out.contains("id: id-1"));
    }

    #[test]
    fn an_empty_list_renders_the_placeholder() {
        plain();
        let out = document_list(&[], Locale::Vi);
        assert!(out.contains("Chưa có văn bản nào trong hệ thống"));
        assert!(out.contains("Nhấn \"Tải Văn Bản\" để bắt đầu"));
    }

    #[test]
    fn results_show_counts_and_capped_snippets() {
        plain();
        let result = SearchResult {
            document: doc("Báo cáo"),
            score: 3.0,
            matches: (0..3)
                .map(|i| SearchMatch {
                    snippet: format!("đoạn {i} nói về báo cáo"),
                    chunk_index: None,
                })
                .collect(),
        };
        let view = search_results_view("báo cáo", &[result]);
        let out = search_results(&view, Locale::Vi);

        assert!(out.contains("Kết quả tìm kiếm (1)"));
        assert!(out.contains("Tìm thấy 3 đoạn khớp:"));
        assert!(out.contains("đoạn 0 nói về báo cáo"));
        assert!(out.contains("đoạn 1 nói về báo cáo"));
        assert!(!out.contains("đoạn 2 nói về báo cáo"));
        assert!(out.contains("... và 1 đoạn khớp khác"));
    }

    #[test]
    fn empty_results_state_names_the_query() {
        plain();
        let view = search_results_view("zzz", &[]);
        let out = search_results(&view, Locale::Vi);
        assert!(out.contains("Không tìm thấy kết quả"));
        assert!(out.contains("\"zzz\""));
    }

    #[test]
    fn labelled_rows_line_up() {
        plain();
        let rows = vec![
            ("Loại".to_string(), "Công văn".to_string()),
            ("Số Văn Bản".to_string(), "15/CV".to_string()),
        ];
        let out = labelled_rows(&rows);
        assert_eq!(out, "  Loại        Công văn\n  Số Văn Bản  15/CV\n");
    }

    #[test]
    fn chat_entries_indent_continuation_lines() {
        plain();
        let entry = ChatEntry {
            role: ChatRole::Assistant,
            body: "dòng một\ndòng hai".to_string(),
        };
        let out = chat_entry(&entry);
        assert!(out.starts_with("🤖 dòng một\n"));
        assert!(out.contains("\n   dòng hai\n"));
    }
}
