//! User notification channel
//!
//! Controllers describe outcomes as transient notices; whichever shell is
//! attached drains the receiver and renders them. Calm, neutral wording.
//! No emojis.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Alarm,
}

/// Ephemeral user notification (not persisted)
#[derive(Debug, Clone)]
pub struct Notice {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

/// Sending half handed to controllers
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl Notifier {
    /// Create a notifier and the receiver the shell drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn info(&self, body: impl Into<String>) {
        self.send(NoticeLevel::Info, body.into());
    }

    pub fn success(&self, body: impl Into<String>) {
        self.send(NoticeLevel::Success, body.into());
    }

    pub fn alarm(&self, body: impl Into<String>) {
        self.send(NoticeLevel::Alarm, body.into());
    }

    /// A dropped receiver means no shell is listening; notices become no-ops
    fn send(&self, level: NoticeLevel, body: String) {
        let notice = Notice {
            id: Uuid::new_v4(),
            level,
            body,
            timestamp: Utc::now(),
        };
        let _ = self.tx.send(notice);
    }
}
