// ── Transient notifications ──
//
// Every store failure path, and most success paths, pushes one
// notification. Consumers subscribe and decide how to show them (the CLI
// prints them to stderr).

use std::time::Duration;

use strum::{Display, EnumString};
use tokio::sync::broadcast;
use tracing::debug;

const CHANNEL_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// How long the notification stays visible.
    pub fn life(self) -> Duration {
        match self {
            Self::Success | Self::Info => Duration::from_secs(3),
            Self::Warn => Duration::from_secs(4),
            Self::Error => Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub summary: String,
    pub detail: Option<String>,
    pub life: Duration,
}

/// Broadcast hub for notifications. Cheap to clone; all clones share
/// the same channel.
#[derive(Debug, Clone)]
pub struct Notifications {
    tx: broadcast::Sender<Notification>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifications {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_SIZE);
        Self { tx }
    }

    /// Receive every notification pushed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn push(&self, severity: Severity, summary: impl Into<String>, detail: Option<String>) {
        let notification = Notification {
            severity,
            summary: summary.into(),
            detail,
            life: severity.life(),
        };
        debug!(%severity, summary = %notification.summary, "notification");
        // No subscribers is fine: nobody is looking.
        let _ = self.tx.send(notification);
    }

    pub fn success(&self, summary: impl Into<String>) {
        self.push(Severity::Success, summary, None);
    }

    pub fn error(&self, summary: impl Into<String>) {
        self.push(Severity::Error, summary, None);
    }

    pub fn info(&self, summary: impl Into<String>) {
        self.push(Severity::Info, summary, None);
    }

    pub fn warning(&self, summary: impl Into<String>) {
        self.push(Severity::Warn, summary, None);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn lifetimes_follow_severity() {
        let hub = Notifications::new();
        let mut rx = hub.subscribe();

        hub.success("saved");
        hub.error("boom");
        hub.info("fyi");
        hub.warning("careful");

        let lives: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|n| (n.severity, n.life.as_secs()))
            .collect();
        assert_eq!(
            lives,
            vec![
                (Severity::Success, 3),
                (Severity::Error, 5),
                (Severity::Info, 3),
                (Severity::Warn, 4),
            ]
        );
    }

    #[test]
    fn push_without_subscribers_is_silent() {
        Notifications::new().error("nobody listens");
    }
}
