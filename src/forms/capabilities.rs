//! Capabilities injected into the form controllers: user-visible notices and
//! the signed-in user.

use serde::Serialize;

/// Category of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    /// Field-level problems; nothing was sent
    ValidationError,
    /// The request failed; the user can retry
    SubmissionError,
}

/// A toast-style message for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Receives the notices the controllers decide to show
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that only logs; used when no presentation layer is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => {
                tracing::info!(title = %notice.title, message = %notice.message, "Form notice")
            }
            NoticeKind::ValidationError | NoticeKind::SubmissionError => tracing::warn!(
                kind = ?notice.kind,
                title = %notice.title,
                message = %notice.message,
                "Form notice"
            ),
        }
    }
}

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

/// Access to the signed-in user, if any
pub trait CurrentUser: Send + Sync {
    fn profile(&self) -> Option<UserProfile>;
}

/// No one is signed in
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl CurrentUser for Anonymous {
    fn profile(&self) -> Option<UserProfile> {
        None
    }
}

impl CurrentUser for UserProfile {
    fn profile(&self) -> Option<UserProfile> {
        Some(self.clone())
    }
}
