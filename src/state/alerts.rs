//! Alerts and the activity log.
//!
//! Every operation ends in an alert: a short coloured message that stacks
//! newest-first and disappears after [`ALERT_TTL`]. Each alert is also
//! appended to a bounded activity log, which is the application's log
//! (stdout belongs to the TUI).

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long an alert stays on screen.
pub const ALERT_TTL: Duration = Duration::from_secs(5);

/// Activity log capacity; older entries are dropped.
pub const LOG_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertLevel {
    Success,
    Danger,
    Warning,
    Info,
}

impl AlertLevel {
    /// Single-glyph marker shown before the message.
    pub fn icon(&self) -> char {
        match self {
            Self::Success => '✓',
            Self::Danger => '✗',
            Self::Warning => '!',
            Self::Info => 'i',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub raised_at: Instant,
}

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Monotonic sequence number, starting at 1.
    pub seq: u64,
    pub level: AlertLevel,
    pub message: String,
}

/// Live alerts plus the activity log.
#[derive(Debug, Default)]
pub struct AlertCenter {
    active: VecDeque<Alert>,
    log: VecDeque<LogEntry>,
    next_seq: u64,
}

impl AlertCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise an alert; it becomes the first active one.
    pub fn raise(&mut self, level: AlertLevel, message: impl Into<String>, now: Instant) {
        let message = message.into();

        self.next_seq += 1;
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_back();
        }
        self.log.push_front(LogEntry {
            seq: self.next_seq,
            level,
            message: message.clone(),
        });

        self.active.push_front(Alert {
            level,
            message,
            raised_at: now,
        });
    }

    /// Drop alerts older than [`ALERT_TTL`]. Returns true if any expired.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.active.len();
        self.active
            .retain(|alert| now.saturating_duration_since(alert.raised_at) < ALERT_TTL);
        self.active.len() != before
    }

    /// Active alerts, newest first.
    pub fn active(&self) -> impl Iterator<Item = &Alert> {
        self.active.iter()
    }

    /// Activity log, newest first.
    pub fn log(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.iter()
    }

    pub fn latest(&self) -> Option<&Alert> {
        self.active.front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alerts_stack_newest_first() {
        let mut center = AlertCenter::new();
        let now = Instant::now();
        center.raise(AlertLevel::Success, "Pushed 4 to stack", now);
        center.raise(AlertLevel::Danger, "Stack overflow!", now);

        let messages: Vec<_> = center.active().map(|a| a.message.as_str()).collect();
        assert_eq!(messages, ["Stack overflow!", "Pushed 4 to stack"]);
        assert_eq!(center.latest().unwrap().level, AlertLevel::Danger);
    }

    #[test]
    fn test_alerts_expire_after_ttl() {
        let mut center = AlertCenter::new();
        let start = Instant::now();
        center.raise(AlertLevel::Info, "Peeked: 7", start);
        center.raise(AlertLevel::Info, "Peeked: 8", start + Duration::from_secs(3));

        assert!(!center.expire(start + Duration::from_secs(4)));
        assert!(center.expire(start + ALERT_TTL));
        assert_eq!(center.active().count(), 1);
        // The log keeps everything.
        assert_eq!(center.log().count(), 2);
    }

    #[test]
    fn test_log_is_bounded() {
        let mut center = AlertCenter::new();
        let now = Instant::now();
        for i in 0..(LOG_CAPACITY + 10) {
            center.raise(AlertLevel::Success, format!("Inserted {i}"), now);
        }

        assert_eq!(center.log().count(), LOG_CAPACITY);
        let newest = center.log().next().unwrap();
        assert_eq!(newest.seq, (LOG_CAPACITY + 10) as u64);
        assert_eq!(newest.message, format!("Inserted {}", LOG_CAPACITY + 9));
    }
}
