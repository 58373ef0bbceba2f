//! Time abstraction traits for platform-agnostic timing.
//!
//! All values are milliseconds as `f64`, matching a free-running float timer.
//! [`Millis`] and [`MillisDuration`] are the ready-made implementations.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

impl<I: TimeInstant, F: Fn() -> I> TimeSource<I> for F {
    fn now(&self) -> I {
        self()
    }
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq + PartialOrd {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> f64;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy + PartialEq + PartialOrd {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant, ZERO if `earlier` is later.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}

/// Milliseconds since an arbitrary fixed epoch.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub f64);

/// A span of milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillisDuration(pub f64);

impl TimeDuration for MillisDuration {
    const ZERO: Self = MillisDuration(0.0);

    #[inline]
    fn as_millis(&self) -> f64 {
        self.0
    }

    #[inline]
    fn saturating_sub(self, other: Self) -> Self {
        if other.0 >= self.0 {
            Self::ZERO
        } else {
            MillisDuration(self.0 - other.0)
        }
    }
}

impl TimeInstant for Millis {
    type Duration = MillisDuration;

    #[inline]
    fn duration_since(&self, earlier: Self) -> Self::Duration {
        MillisDuration(self.0).saturating_sub(MillisDuration(earlier.0))
    }

    #[inline]
    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        let sum = self.0 + duration.0;
        sum.is_finite().then_some(Millis(sum))
    }
}
