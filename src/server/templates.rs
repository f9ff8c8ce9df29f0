//! HTML templates for the registry web UI.
//!
//! Plain string templates, one function per page section. Every piece of
//! dynamic text goes through [`html_escape`] on its way into markup; the
//! only tags that ever wrap user-derived text are the `<mark>` elements
//! emitted by [`snippet_html`].

use crate::chat::{ChatRole, ChatTranscript};
use crate::models::DocumentStats;
use crate::notice::{Locale, Notice};
use crate::search::highlight::{HighlightedSnippet, SnippetSpan};
use crate::view::{stats_rows, DocumentCardView, DocumentPageView, SearchResultsView};

/// Base HTML page with header navigation and an optional notice banner.
pub fn base_template(title: &str, content: &str, notice: Option<&Notice>, locale: Locale) -> String {
    let banner = notice
        .map(|n| {
            format!(
                r#"<div class="notice notice-{}">{}</div>"#,
                n.severity.css_class(),
                html_escape(&n.message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {app}</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <header id="main-header">
        <nav>
            <a href="/" class="logo">{app}</a>
            <a href="/upload">{upload}</a>
            <a href="/chat">{chat}</a>
        </nav>
    </header>
    {banner}
    <main>
        <h1>{title}</h1>
        {content}
    </main>
</body>
</html>"#,
        lang = locale,
        title = html_escape(title),
        app = html_escape(locale.app_title()),
        upload = html_escape(locale.upload_heading()),
        chat = html_escape(locale.chat_heading()),
        banner = banner,
        content = content,
    )
}

/// The search box. Submits as a GET so the query lands in the URL.
pub fn search_form(query: &str, locale: Locale) -> String {
    format!(
        r#"
    <form class="search-form" method="get" action="/">
        <input type="search" name="q" value="{}" placeholder="{}">
        <button type="submit">🔍</button>
    </form>
    "#,
        html_escape(query),
        html_escape(locale.search_placeholder()),
    )
}

/// A link back to the document list, used under error notices.
pub fn back_link(locale: Locale) -> String {
    format!(
        r#"<p><a href="/">&larr; {}</a></p>"#,
        html_escape(locale.documents_heading())
    )
}

/// The document list page: counters, search box, one card per document.
pub fn document_list_page(
    cards: &[DocumentCardView],
    stats: &DocumentStats,
    locale: Locale,
) -> String {
    let mut boxes = String::new();
    for (label, value) in stats_rows(stats, locale) {
        boxes.push_str(&format!(
            r#"
        <div class="stat-box">
            <div class="stat-value">{}</div>
            <div class="stat-label">{}</div>
        </div>
        "#,
            html_escape(&value),
            html_escape(&label)
        ));
    }

    let body = if cards.is_empty() {
        format!(
            r#"
    <div class="empty-state">
        <p>{}</p>
        <p class="hint">{}</p>
    </div>
    "#,
            html_escape(locale.empty_registry()),
            html_escape(locale.empty_registry_hint()),
        )
    } else {
        let mut items = String::new();
        for card in cards {
            items.push_str(&document_card(card, locale));
        }
        items
    };

    format!(
        r#"
    <div class="stats-strip">{boxes}</div>
    {search}
    <div class="documents-list">{body}</div>
    "#,
        boxes = boxes,
        search = search_form("", locale),
        body = body,
    )
}

fn document_card(card: &DocumentCardView, locale: Locale) -> String {
    let badge = card
        .priority
        .as_ref()
        .map(|p| {
            format!(
                r#"<span class="priority-badge priority-{}">{}</span>"#,
                p.level.css_class(),
                html_escape(&p.label)
            )
        })
        .unwrap_or_default();

    let mut meta = vec![format!("<span>📄 {}</span>", html_escape(&card.doc_type))];
    if let Some(ref number) = card.number {
        meta.push(format!(
            "<span>{}: <strong>{}</strong></span>",
            html_escape(locale.number_label()),
            html_escape(number)
        ));
    }
    if let Some(ref sender) = card.sender {
        meta.push(format!(
            "<span>{}: {}</span>",
            html_escape(locale.sender_label()),
            html_escape(sender)
        ));
    }
    if let Some(ref received) = card.received {
        meta.push(format!("<span>📅 {}</span>", html_escape(received)));
    }

    let tags = if card.tags.is_empty() {
        String::new()
    } else {
        let chips: Vec<String> = card
            .tags
            .iter()
            .map(|t| format!(r#"<span class="tag">#{}</span>"#, html_escape(t)))
            .collect();
        format!(r#"<div class="doc-tags">{}</div>"#, chips.join(""))
    };

    let attachments = if card.attachment_count == 0 {
        String::new()
    } else {
        format!(
            r#"<div class="doc-attachments">📎 {}</div>"#,
            html_escape(&locale.attachment_count(card.attachment_count))
        )
    };

    let id = urlencoding::encode(&card.id);
    format!(
        r#"
    <div class="document-card">
        <div class="doc-title">{title} {badge}</div>
        <div class="doc-meta">{meta}</div>
        {tags}
        {attachments}
        <div class="doc-actions">
            <a class="btn btn-primary" href="/documents/{id}">{view}</a>
            <a class="btn btn-secondary" href="/download/{id}">{download}</a>
        </div>
    </div>
    "#,
        title = html_escape(&card.title),
        badge = badge,
        meta = meta.join(" "),
        tags = tags,
        attachments = attachments,
        id = id,
        view = html_escape(locale.view_detail_label()),
        download = html_escape(locale.download_label()),
    )
}

/// The search results page. Zero entries render the empty state, never an
/// error.
pub fn search_results_page(view: &SearchResultsView, locale: Locale) -> String {
    let mut out = search_form(&view.query, locale);

    if view.entries.is_empty() {
        out.push_str(&format!(
            r#"<p class="no-results">{}</p>"#,
            html_escape(locale.no_results())
        ));
        return out;
    }

    out.push_str(&format!(
        "<h2>{}</h2>",
        html_escape(&locale.results_heading(view.total))
    ));

    for entry in &view.entries {
        let mut meta = Vec::new();
        if let Some(ref number) = entry.number {
            meta.push(format!(
                "<span>{}: {}</span>",
                html_escape(locale.number_label()),
                html_escape(number)
            ));
        }
        if let Some(ref doc_type) = entry.doc_type {
            meta.push(format!("<span>{}</span>", html_escape(doc_type)));
        }
        if let Some(ref sender) = entry.sender {
            meta.push(format!(
                "<span>{}: {}</span>",
                html_escape(locale.sender_label()),
                html_escape(sender)
            ));
        }

        let matches = if entry.match_count == 0 {
            String::new()
        } else {
            let mut snippets = String::new();
            for snippet in &entry.snippets {
                snippets.push_str(&format!(
                    r#"<div class="match-snippet">{}</div>"#,
                    snippet_html(snippet)
                ));
            }
            format!(
                r#"
            <div class="result-matches">
                <p><strong>{}</strong></p>
                {}
            </div>
            "#,
                html_escape(&locale.matches_found(entry.match_count)),
                snippets
            )
        };

        out.push_str(&format!(
            r#"
    <div class="search-result-item">
        <h3>{title}</h3>
        <div class="result-meta">{meta}</div>
        {matches}
        <a class="btn btn-primary" href="/documents/{id}">{view_label}</a>
    </div>
    "#,
            title = html_escape(&entry.title),
            meta = meta.join(" "),
            matches = matches,
            id = urlencoding::encode(&entry.id),
            view_label = html_escape(locale.view_detail_label()),
        ));
    }
    out
}

/// The document detail page.
pub fn document_detail_page(page: &DocumentPageView, locale: Locale) -> String {
    let mut rows = String::new();
    for (label, value) in &page.rows {
        rows.push_str(&format!(
            r#"
        <div class="detail-row">
            <span class="detail-label">{}:</span>
            <span class="detail-value">{}</span>
        </div>
        "#,
            html_escape(label),
            html_escape(value)
        ));
    }

    let content = page
        .content
        .as_deref()
        .map(|text| {
            format!(
                r#"
    <div class="detail-section">
        <h3>{}</h3>
        <div class="detail-content-text">{}</div>
    </div>
    "#,
                html_escape(locale.content_heading()),
                html_escape(text)
            )
        })
        .unwrap_or_default();

    let attachments = if page.attachments.is_empty() {
        String::new()
    } else {
        let mut items = String::new();
        for att in &page.attachments {
            let size = att
                .size
                .as_deref()
                .map(html_escape)
                .unwrap_or_default();
            items.push_str(&format!(
                r#"
        <div class="attachment-item">
            <div>
                <div class="attachment-name">{name}</div>
                <div class="attachment-size">{size}</div>
            </div>
            <a class="btn btn-secondary" href="/download/attachment/{id}">{download}</a>
        </div>
        "#,
                name = html_escape(&att.filename),
                size = size,
                id = urlencoding::encode(&att.id),
                download = html_escape(locale.download_label()),
            ));
        }
        format!(
            r#"
    <div class="detail-section">
        <h3>{} ({})</h3>
        <div class="attachment-list">{}</div>
    </div>
    "#,
            html_escape(locale.attachments_heading()),
            page.attachments.len(),
            items
        )
    };

    format!(
        r#"
    <div class="detail-section">
        <h3>{general}</h3>
        <div class="detail-info">{rows}</div>
    </div>
    {content}
    {attachments}
    <a class="btn btn-primary" href="/download/{id}">{download_original}</a>
    "#,
        general = html_escape(locale.general_heading()),
        rows = rows,
        content = content,
        attachments = attachments,
        id = urlencoding::encode(&page.id),
        download_original = html_escape(locale.download_original_label()),
    )
}

/// The upload form page.
pub fn upload_page(locale: Locale) -> String {
    let priorities = ["Thường", "Khẩn", "Rất khẩn"];
    let doc_types = ["Công văn", "Quyết định", "Thông báo", "Báo cáo"];

    let type_options: String = doc_types
        .iter()
        .map(|t| format!(r#"<option value="{t}">{t}</option>"#))
        .collect();
    let priority_options: String = priorities
        .iter()
        .map(|p| format!(r#"<option value="{p}">{p}</option>"#))
        .collect();

    format!(
        r#"
    <form class="upload-form" method="post" action="/upload" enctype="multipart/form-data">
        <label>{file_label}
            <input type="file" name="file" required>
        </label>
        <label>{title_label}
            <input type="text" name="title">
        </label>
        <label>{type_label}
            <select name="document_type">{type_options}</select>
        </label>
        <label>{number_label}
            <input type="text" name="document_number">
        </label>
        <label>{sender_label}
            <input type="text" name="sender">
        </label>
        <label>{tags_label}
            <input type="text" name="tags">
        </label>
        <label>{priority_label}
            <select name="priority">{priority_options}</select>
        </label>
        <label>{attachments_label}
            <input type="file" name="attachments" multiple>
        </label>
        <button class="btn btn-primary" type="submit">{submit}</button>
    </form>
    "#,
        file_label = html_escape(locale.upload_file_label()),
        title_label = html_escape(locale.title_label()),
        type_label = html_escape(locale.type_label()),
        type_options = type_options,
        number_label = html_escape(locale.document_number_label()),
        sender_label = html_escape(locale.sender_label()),
        tags_label = html_escape(locale.tags_label()),
        priority_label = html_escape(locale.priority_label()),
        attachments_label = html_escape(locale.attachments_heading()),
        submit = html_escape(locale.upload_heading()),
    )
}

/// The chat page: transcript plus the message form.
pub fn chat_page(transcript: &ChatTranscript, locale: Locale) -> String {
    let mut messages = String::new();
    for entry in transcript.entries() {
        let class = match entry.role {
            ChatRole::User => "user",
            ChatRole::Assistant => "ai",
        };
        messages.push_str(&format!(
            r#"
        <div class="message {class}">
            <div class="message-content">{body}</div>
        </div>
        "#,
            class = class,
            body = html_escape(&entry.body),
        ));
    }

    format!(
        r#"
    <div class="chat-messages">{messages}</div>
    <form class="chat-form" method="post" action="/chat">
        <input type="hidden" name="session_id" value="{session}">
        <input type="text" name="message" autocomplete="off" autofocus>
        <button class="btn btn-primary" type="submit">{send}</button>
    </form>
    "#,
        messages = messages,
        session = transcript.session_id(),
        send = html_escape(locale.send_label()),
    )
}

/// Flatten a highlighted snippet into markup: every run HTML-escaped, hits
/// wrapped in `<mark>`.
pub fn snippet_html(snippet: &HighlightedSnippet) -> String {
    snippet
        .spans()
        .iter()
        .map(|span| match span {
            SnippetSpan::Text(text) => html_escape(text),
            SnippetSpan::Hit(text) => format!("<mark>{}</mark>", html_escape(text)),
        })
        .collect()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// CSS styles for the web interface - minimal text-based design.
pub const CSS: &str = r#"
:root {
    --bg: #fff;
    --text: #222;
    --text-muted: #666;
    --link: #0066cc;
    --link-hover: #004499;
    --border: #ccc;
    --panel: #f5f5f5;
    --highlight: #fffbcc;
    --danger: #b3261e;
    --ok: #1e7d32;
}

@media (prefers-color-scheme: dark) {
    :root {
        --bg: #1a1a1a;
        --text: #e0e0e0;
        --text-muted: #888;
        --link: #6ab0ff;
        --link-hover: #8dc4ff;
        --border: #444;
        --panel: #252525;
        --highlight: #3a3520;
        --danger: #ff6b61;
        --ok: #6fd08a;
    }
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: 'Lucida Console', 'Courier New', monospace;
    font-size: 14px;
    background: var(--bg);
    color: var(--text);
    line-height: 1.5;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

#main-header {
    border-bottom: 1px solid var(--border);
    padding: 0.5rem 1rem;
    font-size: 13px;
}

#main-header nav {
    display: flex;
    gap: 1.5rem;
    align-items: center;
}

#main-header .logo {
    font-weight: bold;
    letter-spacing: 1px;
}

main {
    max-width: 860px;
    margin: 0 auto;
    padding: 1rem;
}

h1 { font-size: 18px; margin-bottom: 1rem; }
h2 { font-size: 16px; margin: 1rem 0 0.5rem; }
h3 { font-size: 14px; margin-bottom: 0.5rem; }

.notice {
    max-width: 860px;
    margin: 0.75rem auto 0;
    padding: 0.5rem 1rem;
    border: 1px solid var(--border);
}

.notice-success { border-color: var(--ok); color: var(--ok); }
.notice-error { border-color: var(--danger); color: var(--danger); }
.notice-info { color: var(--text-muted); }

.stats-strip {
    display: flex;
    gap: 0.75rem;
    flex-wrap: wrap;
    margin-bottom: 1rem;
}

.stat-box {
    border: 1px solid var(--border);
    padding: 0.5rem 1rem;
    min-width: 120px;
    text-align: center;
}

.stat-value { font-size: 20px; font-weight: bold; }
.stat-label { font-size: 12px; color: var(--text-muted); }

.search-form {
    display: flex;
    gap: 0.5rem;
    margin-bottom: 1rem;
}

.search-form input[type="search"] {
    flex: 1;
    padding: 0.4rem 0.6rem;
    font: inherit;
    background: var(--bg);
    color: var(--text);
    border: 1px solid var(--border);
}

button, .btn {
    font: inherit;
    padding: 0.3rem 0.8rem;
    border: 1px solid var(--border);
    background: var(--panel);
    color: var(--text);
    cursor: pointer;
    display: inline-block;
}

.btn-primary { border-color: var(--link); color: var(--link); }

.document-card, .search-result-item {
    border: 1px solid var(--border);
    padding: 0.75rem 1rem;
    margin-bottom: 0.75rem;
}

.doc-title { font-weight: bold; }

.doc-meta, .result-meta {
    color: var(--text-muted);
    font-size: 12px;
    display: flex;
    gap: 1rem;
    flex-wrap: wrap;
    margin: 0.25rem 0;
}

.doc-tags { margin: 0.25rem 0; }

.tag {
    font-size: 12px;
    color: var(--link);
    margin-right: 0.5rem;
}

.doc-attachments {
    font-size: 12px;
    color: var(--text-muted);
    margin: 0.25rem 0;
}

.doc-actions { margin-top: 0.5rem; display: flex; gap: 0.5rem; }

.priority-badge {
    font-size: 11px;
    padding: 0 0.4rem;
    border: 1px solid var(--border);
    margin-left: 0.5rem;
}

.priority-high { border-color: var(--danger); color: var(--danger); }
.priority-medium { border-color: #b58900; color: #b58900; }
.priority-low { color: var(--text-muted); }

.no-results {
    text-align: center;
    color: var(--text-muted);
    margin: 2rem 0;
}

.empty-state {
    text-align: center;
    color: var(--text-muted);
    padding: 2rem 0;
}

.empty-state .hint { font-size: 12px; }

.result-matches { margin: 0.5rem 0; }

.match-snippet {
    background: var(--panel);
    border-left: 3px solid var(--border);
    padding: 0.4rem 0.6rem;
    margin: 0.4rem 0;
    font-size: 13px;
}

mark {
    background: var(--highlight);
    color: inherit;
    font-weight: bold;
}

.detail-section { margin-bottom: 1.25rem; }

.detail-row { display: flex; gap: 0.75rem; padding: 0.15rem 0; }
.detail-label { color: var(--text-muted); min-width: 140px; }

.detail-content-text {
    white-space: pre-wrap;
    background: var(--panel);
    padding: 0.75rem;
    border: 1px solid var(--border);
}

.attachment-item {
    display: flex;
    justify-content: space-between;
    align-items: center;
    border: 1px solid var(--border);
    padding: 0.4rem 0.6rem;
    margin-bottom: 0.4rem;
}

.attachment-size { font-size: 12px; color: var(--text-muted); }

.upload-form label {
    display: block;
    margin-bottom: 0.75rem;
    color: var(--text-muted);
}

.upload-form input, .upload-form select {
    display: block;
    width: 100%;
    margin-top: 0.25rem;
    padding: 0.4rem 0.6rem;
    font: inherit;
    background: var(--bg);
    color: var(--text);
    border: 1px solid var(--border);
}

.chat-messages { margin-bottom: 1rem; }

.message { margin-bottom: 0.75rem; display: flex; }
.message.user { justify-content: flex-end; }

.message-content {
    white-space: pre-wrap;
    max-width: 80%;
    border: 1px solid var(--border);
    padding: 0.5rem 0.75rem;
}

.message.user .message-content { background: var(--panel); }

.chat-form { display: flex; gap: 0.5rem; }

.chat-form input[type="text"] {
    flex: 1;
    padding: 0.4rem 0.6rem;
    font: inherit;
    background: var(--bg);
    color: var(--text);
    border: 1px solid var(--border);
}
"#;
