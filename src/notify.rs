use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::debug;
use tokio::runtime::Handle;

use crate::render::escape;

/// How long a notification stays up unless dismissed first.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"alert alert-{} alert-dismissible fade show position-fixed\" data-notification=\"{}\">{}<button type=\"button\" class=\"btn-close\" data-bs-dismiss=\"alert\"></button></div>",
            self.severity,
            self.id,
            escape(&self.message)
        )
    }
}

#[derive(Debug, Default)]
struct Board {
    next_id: u64,
    live: Vec<Notification>,
}

/// Live notifications. Cloning shares the same board, which is how the
/// expiry timers reach it.
#[derive(Debug, Clone, Default)]
pub struct NotificationBoard {
    inner: Arc<Mutex<Board>>,
}

impl NotificationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Board> {
        // A poisoned board only ever holds plain data.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Adds a notification and, inside a tokio runtime, schedules its removal
    /// after [`NOTIFICATION_TTL`].
    pub fn push(&self, message: impl Into<String>, severity: Severity) -> u64 {
        let id = {
            let mut board = self.lock();
            board.next_id += 1;
            let id = board.next_id;
            board.live.push(Notification {
                id,
                message: message.into(),
                severity,
            });
            id
        };

        if let Ok(handle) = Handle::try_current() {
            let board = self.clone();
            handle.spawn(async move {
                tokio::time::sleep(NOTIFICATION_TTL).await;
                if board.dismiss(id) {
                    debug!("Notificación {} expirada", id);
                }
            });
        }
        id
    }

    /// Removes a notification. Returns false when it was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut board = self.lock();
        let before = board.live.len();
        board.live.retain(|n| n.id != id);
        board.live.len() != before
    }

    pub fn live(&self) -> Vec<Notification> {
        self.lock().live.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_html(&self) -> String {
        self.lock().live.iter().map(Notification::to_html).collect()
    }
}
