//! Query term highlighting for search snippets.
//!
//! A snippet is split into alternating runs of plain text and query hits.
//! The runs carry raw, unescaped text; each rendering layer applies its own
//! escaping or styling when it flattens the runs back out.

use regex::RegexBuilder;

/// One run of snippet text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetSpan {
    /// Text outside any query hit.
    Text(String),
    /// A run that matched the query, in its original casing.
    Hit(String),
}

impl SnippetSpan {
    pub fn text(&self) -> &str {
        match self {
            SnippetSpan::Text(t) | SnippetSpan::Hit(t) => t,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, SnippetSpan::Hit(_))
    }
}

/// A snippet split into plain and matching runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightedSnippet {
    spans: Vec<SnippetSpan>,
    hits: usize,
}

impl HighlightedSnippet {
    /// A snippet with no hits at all.
    fn plain(text: &str) -> Self {
        let spans = if text.is_empty() {
            Vec::new()
        } else {
            vec![SnippetSpan::Text(text.to_string())]
        };
        HighlightedSnippet { spans, hits: 0 }
    }

    pub fn spans(&self) -> &[SnippetSpan] {
        &self.spans
    }

    /// Number of query hits in the snippet.
    pub fn hit_count(&self) -> usize {
        self.hits
    }
}

/// Split `snippet` into plain and hit runs for `query`.
///
/// Matching is a case-insensitive substring comparison. The query is taken
/// literally; characters that have a meaning in regular expressions match
/// only themselves. A blank query produces a single plain run.
pub fn highlight(snippet: &str, query: &str) -> HighlightedSnippet {
    let term = query.trim();
    if term.is_empty() || snippet.is_empty() {
        return HighlightedSnippet::plain(snippet);
    }

    // An escaped literal only fails to compile at pathological sizes.
    let pattern = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(_) => return HighlightedSnippet::plain(snippet),
    };

    let mut spans = Vec::new();
    let mut hits = 0;
    let mut last = 0;
    for m in pattern.find_iter(snippet) {
        if m.start() > last {
            spans.push(SnippetSpan::Text(snippet[last..m.start()].to_string()));
        }
        spans.push(SnippetSpan::Hit(m.as_str().to_string()));
        hits += 1;
        last = m.end();
    }
    if last < snippet.len() {
        spans.push(SnippetSpan::Text(snippet[last..].to_string()));
    }

    HighlightedSnippet { spans, hits }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flatten(snippet: &HighlightedSnippet) -> String {
        snippet.spans().iter().map(SnippetSpan::text).collect()
    }

    #[test]
    fn marks_a_single_case_insensitive_hit() {
        let result = highlight("approved by Committee chair", "committee");
        assert_eq!(
            result.spans(),
            [
                SnippetSpan::Text("approved by ".to_string()),
                SnippetSpan::Hit("Committee".to_string()),
                SnippetSpan::Text(" chair".to_string()),
            ]
        );
        assert_eq!(result.hit_count(), 1);
    }

    #[test]
    fn counts_every_hit() {
        let result = highlight("khẩn, rồi lại khẩn, và KHẨN", "khẩn");
        assert_eq!(result.hit_count(), 3);
    }

    #[test]
    fn query_metacharacters_match_themselves() {
        // A dot must not act as a wildcard.
        assert_eq!(highlight("phiên bản 2x5", "2.5").hit_count(), 0);
        assert_eq!(highlight("phiên bản 2.5", "2.5").hit_count(), 1);

        let result = highlight("kế hoạch (dự thảo) 2024", "(dự thảo)");
        assert_eq!(result.hit_count(), 1);
        assert!(result.spans().contains(&SnippetSpan::Hit("(dự thảo)".to_string())));
    }

    #[test]
    fn blank_query_yields_a_plain_run() {
        for query in ["", "   "] {
            let result = highlight("văn bản", query);
            assert_eq!(result.spans(), [SnippetSpan::Text("văn bản".to_string())]);
            assert_eq!(result.hit_count(), 0);
        }
    }

    #[test]
    fn empty_snippet_yields_no_runs() {
        let result = highlight("", "anything");
        assert!(result.spans().is_empty());
        assert_eq!(result.hit_count(), 0);
    }

    #[test]
    fn adjacent_hits_stay_separate_runs() {
        let result = highlight("aaaa", "aa");
        assert_eq!(
            result.spans(),
            [
                SnippetSpan::Hit("aa".to_string()),
                SnippetSpan::Hit("aa".to_string()),
            ]
        );
        assert_eq!(result.hit_count(), 2);
    }

    #[test]
    fn runs_reassemble_the_original_snippet() {
        let cases = [
            ("Quyết định số 125/QĐ-UBND về kế hoạch", "quyết định"),
            ("a & b < c > d", "&"),
            ("no match here", "zzz"),
        ];
        for (snippet, query) in cases {
            assert_eq!(flatten(&highlight(snippet, query)), snippet);
        }
    }
}
