//! Injected time source and the timestamp type used for deadlines.
//!
//! Ranking and eligibility never read a process-global clock; callers pass a
//! [`Clock`] and the engine compares deadlines against `clock.now()`. Tests
//! substitute a fixed clock to pin deadline behaviour.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seconds since the Unix epoch.
///
/// Deadlines only ever need a total order, so the representation stays an
/// opaque `i64` rather than a full calendar type.
///
/// # Examples
/// ```
/// use pathlight_core::Timestamp;
///
/// let earlier = Timestamp::from_unix_seconds(1_000);
/// let later = Timestamp::from_unix_seconds(2_000);
/// assert!(earlier < later);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamp(i64);

impl Timestamp {
    /// Construct a timestamp from seconds since the Unix epoch.
    #[must_use]
    pub const fn from_unix_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Return the underlying seconds-since-epoch value.
    #[must_use]
    pub const fn unix_seconds(self) -> i64 {
        self.0
    }
}

/// Provide the current time to deadline comparisons.
///
/// Implementations must be thread-safe so a recommender can be shared across
/// request handlers.
///
/// # Examples
/// ```
/// use pathlight_core::{Clock, Timestamp};
///
/// struct StoppedClock;
///
/// impl Clock for StoppedClock {
///     fn now(&self) -> Timestamp {
///         Timestamp::from_unix_seconds(42)
///     }
/// }
///
/// assert_eq!(StoppedClock.now().unix_seconds(), 42);
/// ```
pub trait Clock: Send + Sync {
    /// Return the current time.
    fn now(&self) -> Timestamp;
}

/// Clock backed by the operating system.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let seconds = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| {
                i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
            });
        Timestamp::from_unix_seconds(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_order_by_seconds() {
        let a = Timestamp::from_unix_seconds(-5);
        let b = Timestamp::from_unix_seconds(0);
        assert!(a < b);
        assert_eq!(b.unix_seconds(), 0);
    }

    #[test]
    fn system_clock_is_after_epoch() {
        let now = SystemClock.now();
        assert!(now > Timestamp::from_unix_seconds(0));
    }
}
