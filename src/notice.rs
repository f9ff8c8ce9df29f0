//! User-facing notifications and the bilingual message catalog.
//!
//! The registry's audience works in Vietnamese, so `vi` is the default
//! locale; `en` exists for operators. Messages are returned as plain text
//! and escaped by whichever layer renders them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    /// CSS class suffix used by the web templates.
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

/// A transient message shown to the user without replacing the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Info,
            message: message.into(),
        }
    }
}

/// Display language for every user-facing string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Vi,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vi" | "vi-vn" => Ok(Locale::Vi),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(format!("unsupported locale {other:?} (expected vi or en)")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::Vi => "vi",
            Locale::En => "en",
        })
    }
}

macro_rules! msg {
    ($self:ident, $vi:expr, $en:expr) => {
        match $self {
            Locale::Vi => $vi,
            Locale::En => $en,
        }
    };
}

impl Locale {
    pub fn app_title(self) -> &'static str {
        msg!(self, "Hệ Thống Quản Lý Công Văn", "Dispatch Registry")
    }

    pub fn generic_error(self) -> &'static str {
        msg!(self, "Có lỗi xảy ra", "Something went wrong")
    }

    pub fn load_failed(self) -> &'static str {
        msg!(
            self,
            "Không thể tải danh sách văn bản",
            "Could not load the document list"
        )
    }

    pub fn search_failed(self) -> &'static str {
        msg!(self, "Lỗi khi tìm kiếm", "Search failed")
    }

    pub fn no_results(self) -> &'static str {
        msg!(self, "Không tìm thấy kết quả", "No results found")
    }

    pub fn no_results_hint(self, query: &str) -> String {
        msg!(
            self,
            format!("Không có văn bản nào khớp với \"{query}\""),
            format!("No documents matched \"{query}\"")
        )
    }

    pub fn missing_file(self) -> &'static str {
        msg!(self, "Vui lòng chọn file", "Please choose a file")
    }

    pub fn unsupported_file(self) -> &'static str {
        msg!(
            self,
            "Loại file không được hỗ trợ",
            "File type not allowed"
        )
    }

    pub fn upload_ok(self) -> &'static str {
        msg!(
            self,
            "Tải văn bản thành công!",
            "Document uploaded successfully!"
        )
    }

    pub fn upload_failed(self) -> &'static str {
        msg!(
            self,
            "Không thể tải văn bản lên",
            "Could not upload the document"
        )
    }

    pub fn detail_failed(self) -> &'static str {
        msg!(
            self,
            "Không thể tải chi tiết văn bản",
            "Could not load document details"
        )
    }

    pub fn download_failed(self) -> &'static str {
        msg!(self, "Không thể tải file", "Could not download the file")
    }

    pub fn saved_file(self, path: &str) -> String {
        msg!(self, format!("Đã lưu {path}"), format!("Saved {path}"))
    }

    pub fn chat_failed(self) -> &'static str {
        msg!(
            self,
            "Xin lỗi, đã có lỗi xảy ra. Vui lòng thử lại.",
            "Sorry, something went wrong. Please try again."
        )
    }

    /// Shown when the assistant reply arrives without any text.
    pub fn chat_fallback(self) -> &'static str {
        msg!(
            self,
            "Xin lỗi, đã có lỗi xảy ra.",
            "Sorry, something went wrong."
        )
    }

    pub fn chat_greeting(self) -> &'static str {
        msg!(
            self,
            "👋 Xin chào! Tôi là AI trợ lý quản lý công văn.\n\n\
             Tôi có thể giúp bạn:\n\
             • Tìm kiếm văn bản theo nội dung, số văn bản\n\
             • Thống kê văn bản trong hệ thống\n\
             • Trả lời câu hỏi về các văn bản đã lưu\n\n\
             Hãy hỏi tôi bất cứ điều gì!",
            "👋 Hello! I am the dispatch-registry assistant.\n\n\
             I can help you:\n\
             • Search documents by content or number\n\
             • Summarize the registry\n\
             • Answer questions about stored documents\n\n\
             Ask me anything!"
        )
    }

    pub fn related_heading(self) -> &'static str {
        msg!(self, "📋 Kết quả liên quan:", "📋 Related documents:")
    }

    pub fn empty_registry(self) -> &'static str {
        msg!(
            self,
            "Chưa có văn bản nào trong hệ thống",
            "No documents in the registry yet"
        )
    }

    pub fn empty_registry_hint(self) -> &'static str {
        msg!(
            self,
            "Nhấn \"Tải Văn Bản\" để bắt đầu",
            "Use \"Upload\" to add the first one"
        )
    }

    pub fn results_heading(self, count: usize) -> String {
        msg!(
            self,
            format!("Kết quả tìm kiếm ({count})"),
            format!("Search results ({count})")
        )
    }

    pub fn matches_found(self, count: usize) -> String {
        msg!(
            self,
            format!("Tìm thấy {count} đoạn khớp:"),
            format!("Found {count} matching passages:")
        )
    }

    pub fn more_matches(self, hidden: usize) -> String {
        msg!(
            self,
            format!("... và {hidden} đoạn khớp khác"),
            format!("... and {hidden} more matching passages")
        )
    }

    pub fn number_label(self) -> &'static str {
        msg!(self, "Số", "No.")
    }

    pub fn sender_label(self) -> &'static str {
        msg!(self, "Từ", "From")
    }

    pub fn receiver_label(self) -> &'static str {
        msg!(self, "Đến", "To")
    }

    pub fn title_label(self) -> &'static str {
        msg!(self, "Tiêu Đề", "Title")
    }

    pub fn type_label(self) -> &'static str {
        msg!(self, "Loại", "Type")
    }

    pub fn document_number_label(self) -> &'static str {
        msg!(self, "Số Văn Bản", "Document number")
    }

    pub fn date_received_label(self) -> &'static str {
        msg!(self, "Ngày Nhận", "Date received")
    }

    pub fn date_issued_label(self) -> &'static str {
        msg!(self, "Ngày Ban Hành", "Date issued")
    }

    pub fn general_heading(self) -> &'static str {
        msg!(self, "Thông Tin Chung", "General information")
    }

    pub fn content_heading(self) -> &'static str {
        msg!(self, "Nội Dung", "Content")
    }

    pub fn attachments_heading(self) -> &'static str {
        msg!(self, "Đính Kèm", "Attachments")
    }

    pub fn attachment_count(self, count: usize) -> String {
        msg!(
            self,
            format!("{count} file đính kèm"),
            format!("{count} attached files")
        )
    }

    pub fn view_detail_label(self) -> &'static str {
        msg!(self, "Xem Chi Tiết", "View details")
    }

    pub fn download_label(self) -> &'static str {
        msg!(self, "Tải", "Download")
    }

    pub fn download_original_label(self) -> &'static str {
        msg!(self, "Tải Văn Bản Gốc", "Download original file")
    }

    pub fn search_placeholder(self) -> &'static str {
        msg!(self, "Tìm kiếm văn bản...", "Search documents...")
    }

    pub fn search_heading(self) -> &'static str {
        msg!(self, "Tìm Kiếm", "Search")
    }

    pub fn documents_heading(self) -> &'static str {
        msg!(self, "Danh Sách Văn Bản", "Documents")
    }

    pub fn upload_heading(self) -> &'static str {
        msg!(self, "Tải Văn Bản", "Upload document")
    }

    pub fn upload_file_label(self) -> &'static str {
        msg!(self, "File văn bản", "Document file")
    }

    pub fn tags_label(self) -> &'static str {
        msg!(self, "Thẻ", "Tags")
    }

    pub fn priority_label(self) -> &'static str {
        msg!(self, "Độ ưu tiên", "Priority")
    }

    pub fn chat_heading(self) -> &'static str {
        msg!(self, "AI Trợ Lý", "Assistant")
    }

    pub fn send_label(self) -> &'static str {
        msg!(self, "Gửi", "Send")
    }

    pub fn stats_total(self) -> &'static str {
        msg!(self, "Tổng số văn bản", "Total documents")
    }

    pub fn stats_dispatches(self) -> &'static str {
        msg!(self, "Công văn", "Dispatches")
    }

    pub fn stats_decisions(self) -> &'static str {
        msg!(self, "Quyết định", "Decisions")
    }

    pub fn stats_this_month(self) -> &'static str {
        msg!(self, "Trong tháng này", "This month")
    }

    pub fn stats_storage(self) -> &'static str {
        msg!(self, "Dung lượng lưu trữ", "Storage used")
    }

    /// Date layout without time of day.
    pub fn format_date(self, ts: NaiveDateTime) -> String {
        match self {
            Locale::Vi => ts.format("%d/%m/%Y").to_string(),
            Locale::En => ts.format("%Y-%m-%d").to_string(),
        }
    }

    /// Date layout with time of day, used on detail pages.
    pub fn format_datetime(self, ts: NaiveDateTime) -> String {
        match self {
            Locale::Vi => ts.format("%H:%M %d/%m/%Y").to_string(),
            Locale::En => ts.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn locale_parses_common_spellings() {
        assert_eq!("vi".parse::<Locale>().unwrap(), Locale::Vi);
        assert_eq!("EN-us".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn vietnamese_is_the_default() {
        assert_eq!(Locale::default(), Locale::Vi);
        assert_eq!(Locale::default().search_failed(), "Lỗi khi tìm kiếm");
    }

    #[test]
    fn dates_follow_the_locale() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 0)
            .unwrap();
        assert_eq!(Locale::Vi.format_date(ts), "05/03/2024");
        assert_eq!(Locale::En.format_datetime(ts), "2024-03-05 14:07");
    }

    #[test]
    fn notices_carry_severity() {
        let n = Notice::error(Locale::Vi.upload_failed());
        assert_eq!(n.severity, Severity::Error);
        assert_eq!(n.severity.css_class(), "error");
    }
}
