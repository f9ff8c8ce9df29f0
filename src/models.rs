//! Wire types for the dispatch-registry API.
//!
//! Field names follow the registry's JSON payloads exactly. Timestamps are
//! emitted by the registry in ISO 8601 without a timezone, hence
//! [`NaiveDateTime`] throughout. Almost every field is optional on the wire,
//! so defaults are applied liberally; the one thing a document always has is
//! an id and a title.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Document type label the registry uses for official dispatches.
pub const DOC_TYPE_DISPATCH: &str = "Công văn";
/// Document type label the registry uses for decisions.
pub const DOC_TYPE_DECISION: &str = "Quyết định";

/// Free-form metadata block attached to a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

/// A stored attachment, as listed under a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentInfo {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// A registry document.
///
/// List responses carry a truncated `content` preview; the single-document
/// endpoint returns the same shape with the full text. Search responses send
/// a reduced projection of the same fields, which the defaults absorb.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(default)]
    pub date_received: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_issued: Option<NaiveDateTime>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub metadata: Option<DocumentMeta>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub attachments: Vec<AttachmentInfo>,
}

impl DocumentSummary {
    /// Tags from the metadata block, empty when none were recorded.
    pub fn tags(&self) -> &[String] {
        self.metadata.as_ref().map(|m| m.tags.as_slice()).unwrap_or(&[])
    }

    /// Priority label from the metadata block, if any.
    pub fn priority(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.priority.as_deref())
    }
}

/// Urgency bucket derived from a document's priority label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    /// Map the registry's Vietnamese priority labels onto display buckets.
    /// Unknown labels fall back to [`PriorityLevel::Low`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "Rất khẩn" => PriorityLevel::High,
            "Khẩn" => PriorityLevel::Medium,
            _ => PriorityLevel::Low,
        }
    }

    /// CSS class suffix used by the web templates.
    pub fn css_class(self) -> &'static str {
        match self {
            PriorityLevel::High => "high",
            PriorityLevel::Medium => "medium",
            PriorityLevel::Low => "low",
        }
    }
}

/// One matching passage inside a search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMatch {
    pub snippet: String,
    #[serde(default)]
    pub chunk_index: Option<u32>,
}

/// A scored search hit with its matching passages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub document: DocumentSummary,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub matches: Vec<SearchMatch>,
}

/// A document reference embedded in an assistant reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub snippet: Option<String>,
}

/// Assistant answer to one chat message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub results: Vec<RelatedDocument>,
}

/// Aggregate counters reported by the registry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryStatistics {
    #[serde(default)]
    pub total_documents: u64,
    #[serde(default)]
    pub total_file_size: u64,
    #[serde(default)]
    pub document_types: BTreeMap<String, u64>,
}

/// Registry liveness report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryHealth {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

// Response envelopes. The registry wraps every payload in an object with a
// `success` flag; the flag is redundant with the HTTP status, so the
// envelopes only pick out the payload field and ignore the rest.

#[derive(Debug, Default, Deserialize)]
pub struct DocumentListEnvelope {
    #[serde(default)]
    pub documents: Vec<DocumentSummary>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentEnvelope {
    pub document: DocumentSummary,
}

#[derive(Debug, Default, Deserialize)]
pub struct UploadEnvelope {
    #[serde(default)]
    pub document: Option<DocumentSummary>,
}

#[derive(Debug, Deserialize)]
pub struct StatisticsEnvelope {
    pub statistics: RegistryStatistics,
}

/// Error body the registry sends alongside non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Client-side counters shown on the dashboard, derived from the loaded
/// document list rather than fetched from the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    pub total: usize,
    pub dispatches: usize,
    pub decisions: usize,
    pub this_month: usize,
}

impl DocumentStats {
    /// Count documents per dashboard bucket. `now` anchors the
    /// current-month counter.
    pub fn collect(documents: &[DocumentSummary], now: NaiveDateTime) -> Self {
        let mut stats = DocumentStats {
            total: documents.len(),
            ..DocumentStats::default()
        };
        for doc in documents {
            match doc.document_type.as_deref() {
                Some(DOC_TYPE_DISPATCH) => stats.dispatches += 1,
                Some(DOC_TYPE_DECISION) => stats.decisions += 1,
                _ => {}
            }
            if let Some(created) = doc.created_at {
                if created.year() == now.year() && created.month() == now.month() {
                    stats.this_month += 1;
                }
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn deserializes_a_full_document() {
        let raw = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "title": "Quyết định phê duyệt kế hoạch năm 2024",
            "content": "Nội dung quyết định...",
            "document_type": "Quyết định",
            "document_number": "125/QĐ-UBND",
            "sender": "UBND Thành phố",
            "receiver": null,
            "date_received": "2024-03-15T08:12:00",
            "date_issued": null,
            "file_name": "quyet-dinh-125.pdf",
            "file_size": 248101,
            "metadata": {"tags": ["kế hoạch", "2024"], "priority": "Khẩn"},
            "created_at": "2024-03-15T08:12:33.123456",
            "updated_at": "2024-03-15T08:12:33.123456",
            "attachments": [
                {"id": "a1", "filename": "phu-luc.docx", "file_size": 1024, "file_type": "docx"}
            ]
        }"#;
        let doc: DocumentSummary = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.document_number.as_deref(), Some("125/QĐ-UBND"));
        assert_eq!(doc.tags(), ["kế hoạch".to_string(), "2024".to_string()]);
        assert_eq!(doc.priority(), Some("Khẩn"));
        assert_eq!(doc.attachments.len(), 1);
        assert_eq!(doc.created_at.unwrap().year(), 2024);
    }

    #[test]
    fn deserializes_the_reduced_search_projection() {
        // Search responses omit most fields; defaults must absorb that.
        let raw = r#"{
            "document": {
                "id": "d1",
                "title": "Công văn số 42",
                "document_number": "42/CV",
                "document_type": "Công văn",
                "sender": "Sở Nội vụ",
                "created_at": "2024-01-02T10:00:00"
            },
            "score": 12,
            "matches": [{"snippet": "đoạn khớp", "chunk_index": 0}]
        }"#;
        let hit: SearchResult = serde_json::from_str(raw).unwrap();
        assert_eq!(hit.score, 12.0);
        assert!(hit.document.attachments.is_empty());
        assert_eq!(hit.matches[0].snippet, "đoạn khớp");
    }

    #[test]
    fn priority_labels_map_to_levels() {
        assert_eq!(PriorityLevel::from_label("Rất khẩn"), PriorityLevel::High);
        assert_eq!(PriorityLevel::from_label("Khẩn"), PriorityLevel::Medium);
        assert_eq!(PriorityLevel::from_label("Thường"), PriorityLevel::Low);
        assert_eq!(PriorityLevel::from_label(""), PriorityLevel::Low);
    }

    #[test]
    fn stats_bucket_by_type_and_month() {
        let mut docs = Vec::new();
        for (doc_type, created) in [
            (Some(DOC_TYPE_DISPATCH), Some(ts(2024, 3, 1))),
            (Some(DOC_TYPE_DISPATCH), Some(ts(2024, 2, 28))),
            (Some(DOC_TYPE_DECISION), Some(ts(2024, 3, 20))),
            (None, None),
        ] {
            docs.push(DocumentSummary {
                id: "x".to_string(),
                title: "t".to_string(),
                content: None,
                document_type: doc_type.map(str::to_string),
                document_number: None,
                sender: None,
                receiver: None,
                date_received: None,
                date_issued: None,
                file_name: None,
                file_size: None,
                metadata: None,
                created_at: created,
                updated_at: None,
                attachments: Vec::new(),
            });
        }
        let stats = DocumentStats::collect(&docs, ts(2024, 3, 15));
        assert_eq!(
            stats,
            DocumentStats {
                total: 4,
                dispatches: 2,
                decisions: 1,
                this_month: 2,
            }
        );
    }

    #[test]
    fn chat_reply_tolerates_a_bare_response() {
        let reply: ChatReply = serde_json::from_str(r#"{"response": "Xin chào"}"#).unwrap();
        assert_eq!(reply.response, "Xin chào");
        assert!(reply.results.is_empty());
    }
}
