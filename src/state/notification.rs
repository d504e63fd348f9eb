//! Transient user feedback (toasts)

use crate::error::LeadError;
use std::time::{Duration, Instant};

/// Default lifetime of a toast
pub const DEFAULT_TOAST_SECONDS: u64 = 4;

/// How a notice should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
}

/// A single piece of feedback for the user
#[derive(Debug, Clone)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub raised_at: Instant,
}

/// Anything that can surface feedback to the user
pub trait NotificationSink {
    fn notify(&mut self, title: &str, message: &str, severity: Severity);
}

/// Shows the most recent notice until it expires; newer notices replace older ones
#[derive(Debug, Clone)]
pub struct ToastSink {
    current: Option<Notice>,
    ttl: Duration,
}

impl ToastSink {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop the current toast if it has outlived its ttl
    pub fn prune(&mut self, now: Instant) {
        if let Some(notice) = &self.current {
            if now.saturating_duration_since(notice.raised_at) >= self.ttl {
                self.current = None;
            }
        }
    }
}

impl Default for ToastSink {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TOAST_SECONDS))
    }
}

impl NotificationSink for ToastSink {
    fn notify(&mut self, title: &str, message: &str, severity: Severity) {
        tracing::debug!("toast [{severity:?}] {title}: {message}");
        self.current = Some(Notice {
            title: title.to_string(),
            message: message.to_string(),
            severity,
            raised_at: Instant::now(),
        });
    }
}

/// Log a failed operation and surface it with the most specific message available
pub fn report_error(sink: &mut impl NotificationSink, action: &str, err: &LeadError) {
    tracing::warn!("{action} failed: {err:?}");
    sink.notify(err.title(), &format!("{action} failed: {err}"), Severity::Error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        notices: Vec<(String, String, Severity)>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&mut self, title: &str, message: &str, severity: Severity) {
            self.notices
                .push((title.to_string(), message.to_string(), severity));
        }
    }

    #[test]
    fn test_toast_sink_starts_empty() {
        let sink = ToastSink::default();
        assert!(sink.current().is_none());
    }

    #[test]
    fn test_newer_notice_replaces_current() {
        let mut sink = ToastSink::default();
        sink.notify("Lead Created", "Acme was added", Severity::Success);
        sink.notify("Invalid Status", "'x' is not a status", Severity::Warning);

        let current = sink.current().unwrap();
        assert_eq!(current.title, "Invalid Status");
        assert_eq!(current.severity, Severity::Warning);
    }

    #[test]
    fn test_prune_expires_old_toast() {
        let mut sink = ToastSink::new(Duration::from_secs(2));
        sink.notify("Lead Deleted", "Acme was removed", Severity::Success);

        sink.prune(Instant::now());
        assert!(sink.current().is_some());

        sink.prune(Instant::now() + Duration::from_secs(3));
        assert!(sink.current().is_none());
    }

    #[test]
    fn test_dismiss_clears() {
        let mut sink = ToastSink::default();
        sink.notify("t", "m", Severity::Success);
        sink.dismiss();
        assert!(sink.current().is_none());
    }

    #[test]
    fn test_report_error_uses_error_title_and_message() {
        let mut sink = RecordingSink::default();
        report_error(
            &mut sink,
            "Delete",
            &LeadError::not_found("lead #9 does not exist"),
        );

        assert_eq!(sink.notices.len(), 1);
        let (title, message, severity) = &sink.notices[0];
        assert_eq!(title, "Lead Not Found");
        assert_eq!(message, "Delete failed: lead #9 does not exist");
        assert_eq!(*severity, Severity::Error);
    }
}
