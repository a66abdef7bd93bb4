//! Monotonic creation timestamps
//!
//! Storage implementations use this to stamp records so `createdAt` strictly
//! increases with insertion order, even when the wall clock stalls or steps
//! backwards.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Mutex, MutexGuard};

/// Issues strictly increasing UTC timestamps
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl MonotonicClock {
    /// Create a clock with no previously issued timestamp
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock whose next timestamp is later than `last`
    ///
    /// Used when reopening durable storage so new records sort after the
    /// ones already on disk.
    pub fn starting_after(last: DateTime<Utc>) -> Self {
        Self {
            last: Mutex::new(Some(last)),
        }
    }

    /// Issue the next timestamp
    pub fn now(&self) -> DateTime<Utc> {
        let mut last = self.lock();
        Self::advance(&mut last)
    }

    /// Run `assign` and issue a timestamp under the same lock
    ///
    /// Whatever `assign` allocates (a sequence number, a key) is ordered
    /// consistently with the returned timestamp across concurrent callers.
    pub fn stamp<T, E>(
        &self,
        assign: impl FnOnce() -> Result<T, E>,
    ) -> Result<(T, DateTime<Utc>), E> {
        let mut last = self.lock();
        let value = assign()?;
        Ok((value, Self::advance(&mut last)))
    }

    /// The most recently issued timestamp
    pub fn last(&self) -> Option<DateTime<Utc>> {
        *self.lock()
    }

    fn advance(last: &mut Option<DateTime<Utc>>) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match *last {
            Some(prev) if now <= prev => prev + Duration::microseconds(1),
            _ => now,
        };
        *last = Some(next);
        next
    }

    fn lock(&self) -> MutexGuard<'_, Option<DateTime<Utc>>> {
        // The guarded value is a plain timestamp; a panic elsewhere cannot
        // leave it half-written.
        self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamps_strictly_increase() {
        let clock = MonotonicClock::new();
        let mut previous = clock.now();
        for _ in 0..1000 {
            let next = clock.now();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn test_starting_after_future_timestamp() {
        let future = Utc::now() + Duration::hours(1);
        let clock = MonotonicClock::starting_after(future);

        let next = clock.now();
        assert!(next > future);
        assert_eq!(clock.last(), Some(next));
    }

    #[test]
    fn test_stamp_propagates_assign_error() {
        let clock = MonotonicClock::new();
        let result: Result<(u64, _), &str> = clock.stamp(|| Err("boom"));

        assert_eq!(result.unwrap_err(), "boom");
        assert_eq!(clock.last(), None);
    }

    #[test]
    fn test_stamp_returns_assigned_value() {
        let clock = MonotonicClock::new();
        let (value, at) = clock.stamp(|| Ok::<_, ()>(7u64)).unwrap();

        assert_eq!(value, 7);
        assert_eq!(clock.last(), Some(at));
    }
}
