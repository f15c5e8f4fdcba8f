//! Logical simulation time.
//!
//! # Design
//!
//! The clock is a plain count of simulated minutes held in an `f64`.  It is
//! advanced only by the event loop jumping to the next scheduled event, never
//! by wall-clock polling.  Service durations are continuous draws, so unlike
//! an integer tick model the clock can land anywhere on the real line.
//!
//! Comparisons use the IEEE partial order; configurations and variate sources
//! guarantee finite values.

use std::fmt;

pub const MINUTES_PER_HOUR: f64 = 60.0;
pub const HOURS_PER_DAY: f64 = 24.0;
pub const MINUTES_PER_DAY: f64 = MINUTES_PER_HOUR * HOURS_PER_DAY;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute point on the logical clock, in minutes since simulation start.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Build a time from whole days, hours and minutes.
    pub fn from_dhm(days: u64, hours: u64, minutes: u64) -> SimTime {
        SimTime(days as f64 * MINUTES_PER_DAY + hours as f64 * MINUTES_PER_HOUR + minutes as f64)
    }

    /// One simulated week, the default horizon.
    pub fn one_week() -> SimTime {
        SimTime::from_dhm(7, 0, 0)
    }

    #[inline]
    pub fn minutes(self) -> f64 {
        self.0
    }

    /// Time of day in fractional hours, in `[0, 24)`.
    #[inline]
    pub fn hour_of_day(self) -> f64 {
        (self.0 / MINUTES_PER_HOUR).rem_euclid(HOURS_PER_DAY)
    }

    /// The time `minutes` after `self`.
    #[inline]
    pub fn after(self, minutes: f64) -> SimTime {
        SimTime(self.0 + minutes)
    }

    /// Minutes elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Break elapsed time into (day, hour, minute) components, truncating.
    pub fn elapsed_dhm(self) -> (u64, u32, u32) {
        let total = self.0.max(0.0) as u64;
        let days = total / 1_440;
        let hours = ((total % 1_440) / 60) as u32;
        let minutes = (total % 60) as u32;
        (days, hours, minutes)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{d}d{h}h{m}m")
    }
}
