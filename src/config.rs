//! Memoizer Configuration Module
//!
//! Configuration structures for the memoizers that take parameters. Each
//! struct has public fields for simple instantiation:
//!
//! - **Simple**: just create the struct with all fields set
//! - **Type safety**: a zero capacity is unrepresentable (`NonZeroUsize`)
//! - **No boilerplate**: no constructors or builder methods needed
//!
//! The unlimited and concurrent memoizers are parameterless and have no
//! config struct.
//!
//! # Examples
//!
//! ```
//! use memo_rs::config::BoundedMemoConfig;
//! use memo_rs::BoundedMemo;
//! use core::num::NonZeroUsize;
//!
//! let config = BoundedMemoConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let memo: BoundedMemo<u32, u32, _> = BoundedMemo::init(|x: u32| x * 2, config, None);
//! # let _ = memo;
//! ```

use core::fmt;
use core::num::NonZeroUsize;
use core::time::Duration;

/// Configuration for a size-bounded memoizer.
///
/// The cache keeps at most `capacity` entries; inserting beyond that evicts
/// the least recently used entry. Capacity is `NonZeroUsize` so an
/// empty-cache configuration cannot be expressed at all.
///
/// # Examples
///
/// ```
/// use memo_rs::config::BoundedMemoConfig;
/// use core::num::NonZeroUsize;
///
/// let config = BoundedMemoConfig {
///     capacity: NonZeroUsize::new(64).unwrap(),
/// };
/// assert_eq!(config.capacity.get(), 64);
/// ```
#[derive(Clone, Copy)]
pub struct BoundedMemoConfig {
    /// Maximum number of cached entries.
    pub capacity: NonZeroUsize,
}

impl fmt::Debug for BoundedMemoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedMemoConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// Configuration for a time-expiring memoizer.
///
/// A cached entry is served while `now - stored < time_to_live` and
/// recomputed on the first access at or past that bound. A zero
/// `time_to_live` is legal and makes every repeat access recompute.
///
/// # Examples
///
/// ```
/// use memo_rs::config::ExpiringMemoConfig;
/// use core::time::Duration;
///
/// let config = ExpiringMemoConfig {
///     time_to_live: Duration::from_millis(250),
/// };
/// assert_eq!(config.time_to_live.as_millis(), 250);
/// ```
#[derive(Clone, Copy)]
pub struct ExpiringMemoConfig {
    /// How long a cached entry stays valid.
    pub time_to_live: Duration,
}

impl fmt::Debug for ExpiringMemoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringMemoConfig")
            .field("time_to_live", &self.time_to_live)
            .finish()
    }
}
