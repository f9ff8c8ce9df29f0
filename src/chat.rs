//! Assistant chat transcript.
//!
//! The transcript owns the session id and every entry shown in the chat
//! panel. Callers push the user's message, send it through a
//! [`crate::api::DocumentService`], and fold the reply or the failure back
//! in; the transcript never talks to the network itself.

use uuid::Uuid;

use crate::models::{ChatReply, RelatedDocument};
use crate::notice::Locale;

/// Who said a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message in the transcript.
#[derive(Debug, Clone)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub body: String,
}

/// One chat session with the registry assistant.
#[derive(Debug)]
pub struct ChatTranscript {
    session_id: Uuid,
    locale: Locale,
    entries: Vec<ChatEntry>,
}

impl ChatTranscript {
    /// Open a session. The assistant's greeting is already on the transcript.
    pub fn new(locale: Locale) -> Self {
        Self::with_session(Uuid::new_v4(), locale)
    }

    /// Open a session under a caller-chosen id, e.g. one carried in a form.
    pub fn with_session(session_id: Uuid, locale: Locale) -> Self {
        let mut transcript = ChatTranscript {
            session_id,
            locale,
            entries: Vec::new(),
        };
        transcript.push_assistant(locale.chat_greeting());
        transcript
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn push_user(&mut self, message: impl Into<String>) {
        self.entries.push(ChatEntry {
            role: ChatRole::User,
            body: message.into(),
        });
    }

    fn push_assistant(&mut self, body: impl Into<String>) {
        self.entries.push(ChatEntry {
            role: ChatRole::Assistant,
            body: body.into(),
        });
    }

    /// Fold an assistant reply in. A blank answer becomes the fallback text;
    /// related documents arrive as a separate follow-up entry.
    pub fn push_reply(&mut self, reply: ChatReply) {
        let body = if reply.response.trim().is_empty() {
            self.locale.chat_fallback().to_string()
        } else {
            reply.response
        };
        self.push_assistant(body);

        if !reply.results.is_empty() {
            self.push_assistant(related_block(&reply.results, self.locale));
        }
    }

    /// Record that the request itself failed.
    pub fn push_failure(&mut self) {
        self.push_assistant(self.locale.chat_failed());
    }
}

/// Numbered "related documents" block shown after an answer.
fn related_block(results: &[RelatedDocument], locale: Locale) -> String {
    let mut text = String::from(locale.related_heading());
    for (idx, doc) in results.iter().enumerate() {
        text.push_str(&format!("\n{}. {}", idx + 1, doc.title));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn related(title: &str) -> RelatedDocument {
        RelatedDocument {
            id: "d".to_string(),
            title: title.to_string(),
            snippet: None,
        }
    }

    #[test]
    fn a_new_session_greets_in_the_session_locale() {
        let transcript = ChatTranscript::new(Locale::Vi);
        assert_eq!(transcript.entries().len(), 1);
        assert_eq!(transcript.entries()[0].role, ChatRole::Assistant);
        assert!(transcript.entries()[0].body.contains("Xin chào"));
    }

    #[test]
    fn session_ids_are_unique() {
        let a = ChatTranscript::new(Locale::Vi);
        let b = ChatTranscript::new(Locale::Vi);
        assert_ne!(a.session_id(), b.session_id());
    }

    #[test]
    fn replies_with_related_documents_become_two_entries() {
        let mut transcript = ChatTranscript::new(Locale::Vi);
        transcript.push_user("tìm công văn khẩn");
        transcript.push_reply(ChatReply {
            response: "Tôi tìm thấy 2 văn bản.".to_string(),
            results: vec![related("Công văn 15"), related("Công văn 18")],
        });

        let entries = transcript.entries();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].role, ChatRole::User);
        assert_eq!(entries[2].body, "Tôi tìm thấy 2 văn bản.");
        assert_eq!(
            entries[3].body,
            "📋 Kết quả liên quan:\n1. Công văn 15\n2. Công văn 18"
        );
    }

    #[test]
    fn a_blank_answer_becomes_the_fallback_text() {
        let mut transcript = ChatTranscript::new(Locale::Vi);
        transcript.push_reply(ChatReply {
            response: "   ".to_string(),
            results: Vec::new(),
        });
        assert_eq!(
            transcript.entries().last().unwrap().body,
            "Xin lỗi, đã có lỗi xảy ra."
        );
    }

    #[test]
    fn failures_apologize_and_keep_the_transcript() {
        let mut transcript = ChatTranscript::new(Locale::Vi);
        transcript.push_user("câu hỏi");
        transcript.push_failure();

        let entries = transcript.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].body, "câu hỏi");
        assert_eq!(
            entries[2].body,
            "Xin lỗi, đã có lỗi xảy ra. Vui lòng thử lại."
        );
    }
}
