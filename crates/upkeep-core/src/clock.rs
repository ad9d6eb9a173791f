//! Time and identifier sources.
//!
//! The activity factory and the task recommender read the wall clock and mint
//! identifiers through these traits so that callers can substitute fixed
//! implementations in tests.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Current time in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Source of fresh identifiers.
pub trait IdGenerator: Send + Sync {
    /// Return a new identifier starting with `prefix`.
    fn next_id(&self, prefix: &str) -> String;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Random v4 UUIDs: `<prefix>-<uuid>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4())
    }
}

/// Monotonic counter ids: `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting after `last`, so the first id is `last + 1`.
    pub fn starting_after(last: u64) -> Self {
        Self {
            counter: AtomicU64::new(last),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{n}")
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<T: IdGenerator + ?Sized> IdGenerator for &T {
    fn next_id(&self, prefix: &str) -> String {
        (**self).next_id(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sequential_ids_are_distinct() {
        let ids = SequentialIdGenerator::new();
        assert_eq!(ids.next_id("task"), "task-1");
        assert_eq!(ids.next_id("activity"), "activity-2");
    }

    #[test]
    fn test_sequential_ids_starting_after() {
        let ids = SequentialIdGenerator::starting_after(5);
        assert_eq!(ids.next_id("task"), "task-6");
    }

    #[test]
    fn test_uuid_ids_carry_prefix() {
        let ids = UuidIdGenerator;
        let a = ids.next_id("activity");
        let b = ids.next_id("activity");
        assert!(a.starts_with("activity-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_fixed_clock_is_frozen() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), at);
    }
}
