//! Transient, auto-dismissing user messages.

use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message shown to the user until it expires or is dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    pub expires_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Queue of live notices, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    items: Vec<Notice>,
    next_id: u64,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a notice that expires `lifetime` after `now`. Returns its id.
    pub fn push_at(&mut self, level: NoticeLevel, message: impl Into<String>, now: Instant, lifetime: Duration) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let message = message.into();
        match level {
            NoticeLevel::Info => log::info!("notice: {}", message),
            NoticeLevel::Error => log::warn!("error notice: {}", message),
        }
        self.items.push(Notice {
            id,
            level,
            message,
            expires_at: now + lifetime,
        });
        id
    }

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>, lifetime: Duration) -> u64 {
        self.push_at(level, message, Instant::now(), lifetime)
    }

    /// Drop every notice that has expired by `now`.
    pub fn tick(&mut self, now: Instant) {
        self.items.retain(|n| !n.is_expired(now));
    }

    /// Remove one notice. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    /// The newest notice, which is the one a single-slot UI shows.
    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_drops_expired() {
        let mut notices = Notices::new();
        let now = Instant::now();
        notices.push_at(NoticeLevel::Error, "short", now, Duration::from_secs(3));
        notices.push_at(NoticeLevel::Error, "long", now, Duration::from_secs(5));
        notices.tick(now + Duration::from_secs(1));
        assert_eq!(notices.len(), 2);
        notices.tick(now + Duration::from_secs(4));
        assert_eq!(notices.len(), 1);
        assert_eq!(notices.latest().unwrap().message, "long");
        notices.tick(now + Duration::from_secs(5));
        assert!(notices.is_empty());
    }

    #[test]
    fn test_dismiss() {
        let mut notices = Notices::new();
        let id = notices.push(NoticeLevel::Info, "hello", Duration::from_secs(60));
        assert!(notices.dismiss(id));
        assert!(!notices.dismiss(id));
        assert!(notices.is_empty());
    }
}
