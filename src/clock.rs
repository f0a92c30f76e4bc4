//! Injectable time source
//!
//! Every timestamp dashgate produces (`resolvedAt`, `createdAt`,
//! `evaluatedAt`) and every expiry check goes through a [`Clock`]. Production
//! code uses [`SystemClock`]; tests pin time with [`FixedClock`] or step it
//! with [`ManualClock`] instead of sleeping.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;

/// Epoch milliseconds, the unit of every timestamp in dashgate.
pub type Millis = i64;

/// A source of the current time in epoch milliseconds.
pub trait Clock: Send + Sync {
    /// Returns the current Unix timestamp in milliseconds.
    fn now_millis(&self) -> Millis;
}

/// Wall clock backed by `chrono::Utc::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> Millis {
        Utc::now().timestamp_millis()
    }
}

/// Clock that always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    /// The fixed timestamp to return.
    pub millis: Millis,
}

impl FixedClock {
    /// Creates a new fixed clock at `millis`.
    pub const fn new(millis: Millis) -> Self {
        Self { millis }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> Millis {
        self.millis
    }
}

/// Clock that only moves when told to.
///
/// Shared by reference (or `Arc`) between a generator and a verifier to
/// simulate the passage of time between producing and consuming a snapshot.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    /// Creates a clock starting at `millis`.
    pub fn new(millis: Millis) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    /// Moves the clock forward (or backward, for negative deltas).
    pub fn advance(&self, delta_millis: Millis) {
        self.millis.fetch_add(delta_millis, Ordering::SeqCst);
    }

    /// Jumps the clock to an absolute instant.
    pub fn set(&self, millis: Millis) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> Millis {
        self.millis.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> Millis {
        (**self).now_millis()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_millis(&self) -> Millis {
        (**self).now_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn test_fixed_clock_never_moves() {
        let clock = FixedClock::new(42);
        assert_eq!(clock.now_millis(), 42);
        assert_eq!(clock.now_millis(), 42);
    }

    #[test]
    fn test_manual_clock_advance_and_set() {
        let clock = ManualClock::new(1_000);
        clock.advance(500);
        assert_eq!(clock.now_millis(), 1_500);
        clock.set(10);
        assert_eq!(clock.now_millis(), 10);
    }

    #[test]
    fn test_shared_manual_clock() {
        let clock = Arc::new(ManualClock::new(0));
        let observer = Arc::clone(&clock);
        clock.advance(7);
        assert_eq!(observer.now_millis(), 7);
        assert_eq!((&*clock).now_millis(), 7);
    }
}
