//! Driven port for transient user-facing notices.

use std::fmt;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// An action completed.
    Success,
    /// An action failed or was rejected.
    Error,
    /// Neutral information.
    Info,
}

impl NoticeKind {
    /// Lower-case label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Port for surfacing notices. Delivery is best effort.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Show one notice.
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// Fixture implementation that drops every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureNotifier;

impl Notifier for FixtureNotifier {
    fn notify(&self, _kind: NoticeKind, _message: &str) {}
}
