use std::sync::Mutex;

/// How prominently a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Transient, non-blocking warning.
    Warning,
    /// Transient error message.
    Error,
    /// Persistent entry in the notification panel.
    Notification,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn warning(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: None,
        }
    }

    pub fn notification(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Notification,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Where user-facing error notices go.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Sends the user somewhere else, e.g. back to the login entry point.
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Notifier that only logs; the default when nothing user-facing is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Warning => tracing::warn!(title = %notice.title, description = ?notice.description, "notice"),
            _ => tracing::error!(title = %notice.title, description = ?notice.description, "notice"),
        }
    }
}

impl Navigator for LogNotifier {
    fn redirect(&self, path: &str) {
        tracing::warn!(path, "redirect requested");
    }
}

/// Keeps every notice and redirect, in order. Useful for embedding and tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
    redirects: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notice);
    }
}

impl Navigator for RecordingNotifier {
    fn redirect(&self, path: &str) {
        self.redirects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path.to_string());
    }
}
