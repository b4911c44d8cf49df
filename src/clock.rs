//! Clock Abstraction
//!
//! The expiring memoizer does not read wall-clock time directly; it consults
//! a [`Clock`], which reports elapsed time since an arbitrary origin. This
//! keeps expiration logic deterministic under test (drive a manual clock
//! forward instead of sleeping) and keeps the core `no_std`.
//!
//! With the `std` feature, [`MonotonicClock`] provides the production
//! implementation on top of `std::time::Instant`.

#[cfg(feature = "std")]
extern crate std;

use core::time::Duration;

/// A source of elapsed time since an arbitrary, fixed origin.
///
/// Readings must be monotonic: a later call never returns a smaller
/// `Duration` than an earlier one. The origin itself is meaningless; only
/// differences between readings are.
pub trait Clock {
    /// Returns the elapsed time since this clock's origin.
    fn now(&self) -> Duration;
}

/// Monotonic clock backed by `std::time::Instant`.
///
/// The origin is the moment the clock was created.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "std")] {
/// use memo_rs::clock::{Clock, MonotonicClock};
///
/// let clock = MonotonicClock::new();
/// let earlier = clock.now();
/// assert!(clock.now() >= earlier);
/// # }
/// ```
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Creates a clock whose origin is the current instant.
    pub fn new() -> Self {
        MonotonicClock {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "std")]
    #[test]
    fn test_monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let mut last = clock.now();
        for _ in 0..1000 {
            let next = clock.now();
            assert!(next >= last);
            last = next;
        }
    }

    #[test]
    fn test_clock_is_object_safe() {
        use core::cell::Cell;

        struct Fixed(Cell<Duration>);
        impl Clock for Fixed {
            fn now(&self) -> Duration {
                self.0.get()
            }
        }

        let fixed = Fixed(Cell::new(Duration::from_millis(5)));
        let clock: &dyn Clock = &fixed;
        assert_eq!(clock.now(), Duration::from_millis(5));
        fixed.0.set(Duration::from_millis(9));
        assert_eq!(clock.now(), Duration::from_millis(9));
    }
}
