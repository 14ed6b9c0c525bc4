use crate::infrastructure::config::NotifyConfig;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    Pending,
    Success,
    Error,
}

/// One transient status notice surfaced to the caller.
#[derive(Clone, Debug)]
pub struct StatusNotice {
    pub severity: Severity,
    pub message: String,
    expires_at: Option<Instant>,
}

impl StatusNotice {
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.map(|deadline| now >= deadline).unwrap_or(false)
    }
}

/// Single process-wide notification slot.
///
/// One `notify` primitive replaces the scattered fire/wait/clear pattern: a
/// new notice preempts the previous one unconditionally and carries its own
/// deadline, so overlapping timers cannot race. Expiry is evaluated lazily on
/// read, always relative to the last write. Pending notices are sticky until
/// replaced.
pub struct Notifier {
    slot: Mutex<Option<StatusNotice>>,
    success_ttl: Duration,
    error_ttl: Duration,
}

impl Notifier {
    pub fn new(config: &NotifyConfig) -> Self {
        Self {
            slot: Mutex::new(None),
            success_ttl: Duration::from_millis(config.success_ttl_ms),
            error_ttl: Duration::from_millis(config.error_ttl_ms),
        }
    }

    pub fn notify(&self, severity: Severity, message: impl Into<String>) {
        let ttl = match severity {
            Severity::Pending => None,
            Severity::Success => Some(self.success_ttl),
            Severity::Error => Some(self.error_ttl),
        };
        let notice =
            StatusNotice { severity, message: message.into(), expires_at: ttl.map(|ttl| Instant::now() + ttl) };
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(notice);
        }
    }

    pub fn pending(&self, message: impl Into<String>) {
        self.notify(Severity::Pending, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Severity::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Severity::Error, message);
    }

    /// The current notice, or `None` once the last one expired.
    pub fn current(&self) -> Option<StatusNotice> {
        let now = Instant::now();
        let mut slot = self.slot.lock().ok()?;
        match slot.as_ref() {
            Some(notice) if notice.is_expired(now) => {
                *slot = None;
                None
            }
            Some(notice) => Some(notice.clone()),
            None => None,
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(&NotifyConfig::default())
    }
}
