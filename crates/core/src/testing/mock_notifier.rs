//! Notifier that records every notice.

use std::sync::{Mutex, PoisonError};

use crate::notify::{Notice, Notifier, Severity};

/// Captures notices so tests can assert on what the user would have seen.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices received so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Notices with the given severity.
    pub fn with_severity(&self, severity: Severity) -> Vec<Notice> {
        self.notices()
            .into_iter()
            .filter(|n| n.severity == severity)
            .collect()
    }

    pub fn clear(&self) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notice::new(message, severity));
    }
}
