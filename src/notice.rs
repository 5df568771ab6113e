// 💬 Notices - what the user gets told
//
// Anything a front end would show in a message box becomes a Notice: missing
// data files, failed saves, rejected input. NoticeLog queues them for the
// front end and mirrors each one to the tracing log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Expected situations, e.g. a first run with no data files.
    Info,

    /// Something failed; the affected operation was skipped or degraded.
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "Information",
            Severity::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, message)
    }

    fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Notice {
            severity,
            title: title.into(),
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.title, self.message)
    }
}

/// Pending notices, oldest first.
#[derive(Debug, Default)]
pub struct NoticeLog {
    entries: Vec<Notice>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        match notice.severity {
            Severity::Info => tracing::info!(
                severity = notice.severity.as_str(),
                title = %notice.title,
                "{}",
                notice.message
            ),
            Severity::Error => tracing::error!(
                severity = notice.severity.as_str(),
                title = %notice.title,
                "{}",
                notice.message
            ),
        }
        self.entries.push(notice);
    }

    pub fn entries(&self) -> &[Notice] {
        &self.entries
    }

    /// Hand every pending notice to the caller.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_constructors() {
        let info = Notice::info("Information", "Guest data file not found.");
        assert_eq!(info.severity, Severity::Info);
        assert!(!info.is_error());

        let error = Notice::error("Error", "disk full");
        assert!(error.is_error());
        assert_eq!(error.to_string(), "[Error] disk full");
    }

    #[test]
    fn test_log_drain_empties_queue() {
        let mut log = NoticeLog::new();
        log.push(Notice::info("Information", "one"));
        log.push(Notice::error("Error", "two"));
        assert_eq!(log.len(), 2);

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "one");
        assert_eq!(drained[1].message, "two");
        assert!(log.is_empty());
    }

    #[test]
    fn test_severity_labels_match_dialog_titles() {
        assert_eq!(Severity::Info.as_str(), "Information");
        assert_eq!(Severity::Error.as_str(), "Error");

        let notice = Notice::info(Severity::Info.as_str(), "Venue data file not found.");
        assert_eq!(notice.to_string(), "[Information] Venue data file not found.");
    }
}
