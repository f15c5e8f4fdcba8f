//! Stochastic durations consumed by the port state machine.
//!
//! Four kinds of draw are needed, all in minutes:
//!
//! | Draw            | Distribution                                   |
//! |-----------------|------------------------------------------------|
//! | inter-arrival   | `60 · Exp(λ(hour of day))`                     |
//! | empty tug trip  | `Normal(mu_empty, sig_empty)`, clamped at 0    |
//! | full tug trip   | `Normal(mu_full, sig_full)`, clamped at 0      |
//! | unloading       | `60 · ChiSquared(3)`                           |
//!
//! The state machine only sees the [`VariateSource`] trait, so tests swap in
//! [`FixedVariates`] to get hand-checkable timelines.

use rand_distr::{ChiSquared, Exp1, Normal};

use crate::time::MINUTES_PER_HOUR;
use crate::{PortError, PortResult, SimRng, SimTime, TugTravel};

/// Degrees of freedom of the unloading-time distribution.
const UNLOADING_DOF: f64 = 3.0;

/// Arrival rate λ(t) in tankers per hour, piecewise-linear over a 24-hour day.
pub fn arrival_rate(at: SimTime) -> f64 {
    let t = at.hour_of_day();
    if t < 5.0 {
        2.0 * t / 5.0 + 5.0
    } else if t < 9.0 {
        -t / 4.0 + 33.0 / 4.0
    } else if t < 15.0 {
        t / 2.0 + 3.0 / 2.0
    } else if t < 17.0 {
        -3.0 * t / 2.0 + 63.0 / 2.0
    } else {
        -t / 7.0 + 59.0 / 7.0
    }
}

/// Source of every random duration the simulator needs.
pub trait VariateSource {
    /// Minutes until the next tanker arrives, given the current clock.
    fn inter_arrival(&mut self, now: SimTime) -> f64;

    /// Minutes for a tug to reach a tanker with nothing in tow.
    fn empty_trip(&mut self) -> f64;

    /// Minutes for a tug to tow a tanker between entrance and wharf.
    fn full_trip(&mut self) -> f64;

    /// Minutes a tanker spends unloading at a wharf.
    fn unloading(&mut self) -> f64;
}

impl<V: VariateSource + ?Sized> VariateSource for Box<V> {
    fn inter_arrival(&mut self, now: SimTime) -> f64 {
        (**self).inter_arrival(now)
    }
    fn empty_trip(&mut self) -> f64 {
        (**self).empty_trip()
    }
    fn full_trip(&mut self) -> f64 {
        (**self).full_trip()
    }
    fn unloading(&mut self) -> f64 {
        (**self).unloading()
    }
}

// ── StochasticVariates ────────────────────────────────────────────────────────

/// Production variate source backed by `rand_distr`.
pub struct StochasticVariates {
    rng:       SimRng,
    empty:     Normal<f64>,
    full:      Normal<f64>,
    unloading: ChiSquared<f64>,
}

impl StochasticVariates {
    pub fn new(travel: &TugTravel, rng: SimRng) -> PortResult<Self> {
        let empty = Normal::new(travel.mu_empty, travel.sig_empty).map_err(|e| {
            PortError::Distribution { what: "empty trip", reason: e.to_string() }
        })?;
        let full = Normal::new(travel.mu_full, travel.sig_full).map_err(|e| {
            PortError::Distribution { what: "full trip", reason: e.to_string() }
        })?;
        let unloading = ChiSquared::new(UNLOADING_DOF).map_err(|e| {
            PortError::Distribution { what: "unloading", reason: e.to_string() }
        })?;
        Ok(Self { rng, empty, full, unloading })
    }
}

impl VariateSource for StochasticVariates {
    fn inter_arrival(&mut self, now: SimTime) -> f64 {
        // Exp(λ) == Exp(1) / λ; λ(t) is strictly positive over the whole day.
        let unit: f64 = self.rng.sample(&Exp1);
        MINUTES_PER_HOUR * unit / arrival_rate(now)
    }

    fn empty_trip(&mut self) -> f64 {
        self.rng.sample(&self.empty).max(0.0)
    }

    fn full_trip(&mut self) -> f64 {
        self.rng.sample(&self.full).max(0.0)
    }

    fn unloading(&mut self) -> f64 {
        MINUTES_PER_HOUR * self.rng.sample(&self.unloading)
    }
}

// ── FixedVariates ─────────────────────────────────────────────────────────────

/// Deterministic variate source: every draw of a kind returns the same value.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FixedVariates {
    pub inter_arrival: f64,
    pub empty_trip:    f64,
    pub full_trip:     f64,
    pub unloading:     f64,
}

impl FixedVariates {
    /// Every duration equal to `minutes`.
    pub fn uniform(minutes: f64) -> Self {
        Self {
            inter_arrival: minutes,
            empty_trip:    minutes,
            full_trip:     minutes,
            unloading:     minutes,
        }
    }
}

impl VariateSource for FixedVariates {
    fn inter_arrival(&mut self, _now: SimTime) -> f64 {
        self.inter_arrival
    }
    fn empty_trip(&mut self) -> f64 {
        self.empty_trip
    }
    fn full_trip(&mut self) -> f64 {
        self.full_trip
    }
    fn unloading(&mut self) -> f64 {
        self.unloading
    }
}
