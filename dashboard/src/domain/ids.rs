//! Identifier allocation for locally created records.
//!
//! Ids are millisecond wall-clock timestamps made strictly increasing within a
//! session, so they stay compatible with ids written by earlier sessions.

use std::sync::Arc;

use mockable::Clock;
use tracing::debug;

/// Monotonic id source seeded from a clock.
#[derive(Clone)]
pub struct IdAllocator {
    clock: Arc<dyn Clock>,
    last: u64,
}

impl IdAllocator {
    /// Create an allocator reading time from `clock`.
    #[must_use]
    pub const fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock, last: 0 }
    }

    /// Allocate the next id, skipping any value for which `taken` is true.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use dashboard::domain::ids::IdAllocator;
    /// use mockable::DefaultClock;
    ///
    /// let mut ids = IdAllocator::new(Arc::new(DefaultClock));
    /// let first = ids.next(|_| false);
    /// let second = ids.next(|id| id == first + 1);
    /// assert!(second > first + 1);
    /// ```
    pub fn next(&mut self, taken: impl Fn(u64) -> bool) -> u64 {
        let now = u64::try_from(self.clock.utc().timestamp_millis()).unwrap_or(0);
        let mut candidate = now.max(self.last.saturating_add(1));
        while taken(candidate) {
            debug!(candidate, "id already in use, bumping");
            candidate = candidate.saturating_add(1);
        }
        self.last = candidate;
        candidate
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::rstest;

    use super::*;

    struct FrozenClock(DateTime<Utc>);

    impl Clock for FrozenClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn frozen_at(millis: i64) -> IdAllocator {
        let instant = Utc
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or_else(Utc::now);
        IdAllocator::new(Arc::new(FrozenClock(instant)))
    }

    #[test]
    fn first_id_is_the_current_timestamp() {
        let mut ids = frozen_at(1_700_000_000_000);
        assert_eq!(ids.next(|_| false), 1_700_000_000_000);
    }

    #[test]
    fn ids_in_the_same_millisecond_stay_unique() {
        let mut ids = frozen_at(1_700_000_000_000);
        let allocated: Vec<u64> = (0..4).map(|_| ids.next(|_| false)).collect();
        assert_eq!(
            allocated,
            [
                1_700_000_000_000,
                1_700_000_000_001,
                1_700_000_000_002,
                1_700_000_000_003
            ]
        );
    }

    #[rstest]
    #[case::one_collision(vec![500], 501)]
    #[case::run_of_collisions(vec![500, 501, 502], 503)]
    #[case::unrelated_ids(vec![7, 900], 500)]
    fn skips_ids_already_present(#[case] present: Vec<u64>, #[case] expected: u64) {
        let mut ids = frozen_at(500);
        assert_eq!(ids.next(|id| present.contains(&id)), expected);
    }

    #[test]
    fn clock_before_epoch_still_yields_positive_ids() {
        let mut ids = frozen_at(-5);
        assert_eq!(ids.next(|_| false), 1);
    }
}
