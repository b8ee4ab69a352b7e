//! Notifications
//!
//! Transient messages produced by the controller and drained by the
//! presentation layer, which dismisses them after a timeout.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NoticeKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "notification success",
            NoticeKind::Error => "notification error",
            NoticeKind::Warning => "notification warning",
            NoticeKind::Info => "notification info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Unique within one controller; used as a render key
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Default, Clone)]
pub struct NoticeQueue {
    next_id: u64,
    pending: Vec<Notice>,
}

impl NoticeQueue {
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.next_id += 1;
        self.pending.push(Notice {
            id: self.next_id,
            kind,
            message: message.into(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Error, message);
    }

    pub fn pending(&self) -> &[Notice] {
        &self.pending
    }

    /// Hand all pending notices to the presentation layer
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }
}
