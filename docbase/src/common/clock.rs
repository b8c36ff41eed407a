use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::fmt::Debug;
use std::ops::Deref;
use std::sync::Arc;

/// Provider trait for time sources.
///
/// Repositories read the current time through a `ClockProvider` when stamping
/// `created_at` and `updated_at`. Production code uses [SystemClock]; tests
/// inject a [FixedClock] to make timestamps deterministic.
pub trait ClockProvider: Send + Sync + Debug {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// A cloneable handle to a [ClockProvider].
#[derive(Clone, Debug)]
pub struct Clock {
    provider: Arc<dyn ClockProvider>,
}

impl Clock {
    pub fn new(provider: Arc<dyn ClockProvider>) -> Self {
        Clock { provider }
    }

    /// Creates a clock backed by the system time.
    pub fn system() -> Self {
        Clock::new(Arc::new(SystemClock))
    }
}

impl Deref for Clock {
    type Target = dyn ClockProvider;

    fn deref(&self) -> &Self::Target {
        self.provider.as_ref()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::system()
    }
}

/// The wall clock.
#[derive(Debug)]
pub struct SystemClock;

impl ClockProvider for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a settable instant.
///
/// `now` returns the held instant until [FixedClock::advance] or
/// [FixedClock::set] moves it.
#[derive(Debug)]
pub struct FixedClock {
    instant: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        FixedClock {
            instant: RwLock::new(instant),
        }
    }

    /// Moves the clock forward by the given duration.
    pub fn advance(&self, duration: Duration) {
        let mut instant = self.instant.write();
        *instant = *instant + duration;
    }

    /// Sets the clock to a new instant.
    pub fn set(&self, new_instant: DateTime<Utc>) {
        *self.instant.write() = new_instant;
    }
}

impl ClockProvider for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.instant.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn system_clock_tracks_wall_time() {
        let clock = Clock::system();
        let before = Utc::now();
        let now = clock.now();
        let after = Utc::now();
        assert!(now >= before && now <= after);
    }

    #[test]
    fn fixed_clock_holds_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let clock = Clock::new(Arc::new(FixedClock::new(instant)));
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn fixed_clock_advances() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let fixed = Arc::new(FixedClock::new(instant));
        let clock = Clock::new(fixed.clone());

        fixed.advance(Duration::seconds(30));
        assert_eq!(clock.now(), instant + Duration::seconds(30));

        let later = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        fixed.set(later);
        assert_eq!(clock.now(), later);
    }

    #[test]
    fn clock_handle_is_cloneable() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let clock = Clock::new(Arc::new(FixedClock::new(instant)));
        let cloned = clock.clone();
        assert_eq!(clock.now(), cloned.now());
    }
}
