//! Host window collaborator.
//!
//! Controllers never create windows. They ask the window they run in to
//! close, or to put a blocking alert in front of the user.

use std::fmt;

/// Severity of an alert dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Information,
    Warning,
    Error,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Information => write!(f, "information"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A modal message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub header: Option<String>,
    pub content: String,
    pub kind: AlertKind,
}

impl Alert {
    pub fn new(
        title: impl Into<String>,
        header: Option<String>,
        content: impl Into<String>,
        kind: AlertKind,
    ) -> Self {
        Self {
            title: title.into(),
            header,
            content: content.into(),
            kind,
        }
    }

    /// Error alert without a header line.
    pub fn error(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(title, None, content, AlertKind::Error)
    }
}

/// The modal window a form is shown in.
pub trait FormWindow {
    /// Request that the window be closed.
    fn close(&self);

    /// Show a blocking alert over the window.
    fn show_alert(&self, alert: &Alert);
}
