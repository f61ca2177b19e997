use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub const EVENT_LOG_CAP: usize = 20;
pub const ALERT_LOG_CAP: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub is_threat: bool,
}

impl Event {
    pub fn new(message: String, is_threat: bool, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: now,
            message,
            is_threat,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub camera_id: String,
    pub message: String,
}

impl Alert {
    pub fn new(message: String, camera_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: now,
            camera_id: camera_id.to_string(),
            message,
        }
    }
}

/// Bounded newest-first log. `push` prepends and evicts the oldest
/// entries past the cap; there is no other removal path.
pub struct BoundedLog<T> {
    entries: VecDeque<T>,
    cap: usize,
}

impl<T> BoundedLog<T> {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn push(&mut self, entry: T) {
        self.entries.push_front(entry);
        self.entries.truncate(self.cap);
    }

    /// Entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<T: Clone> BoundedLog<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_is_newest_first() {
        let mut log = BoundedLog::new(5);
        log.push(1);
        log.push(2);
        log.push(3);
        assert_eq!(log.to_vec(), vec![3, 2, 1]);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut log = BoundedLog::new(3);
        for i in 0..10 {
            log.push(i);
            assert!(log.len() <= 3);
        }
        assert_eq!(log.to_vec(), vec![9, 8, 7]);
    }

    #[test]
    fn test_event_log_cap_matches_dashboard_budget() {
        let mut log = BoundedLog::new(EVENT_LOG_CAP);
        let now = Utc::now();
        for i in 0..50 {
            log.push(Event::new(format!("event {i}"), false, now));
        }
        assert_eq!(log.len(), EVENT_LOG_CAP);
        assert_eq!(log.iter().next().unwrap().message, "event 49");
    }

    #[test]
    fn test_alert_log_cap() {
        let mut log = BoundedLog::new(ALERT_LOG_CAP);
        let now = Utc::now();
        for i in 0..25 {
            log.push(Alert::new(format!("alert {i}"), "CAM001", now));
        }
        assert_eq!(log.len(), ALERT_LOG_CAP);
        assert_eq!(log.iter().next().unwrap().message, "alert 24");
    }
}
