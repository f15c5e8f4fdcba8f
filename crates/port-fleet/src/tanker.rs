//! A single tanker's time-in-system bookkeeping.

use std::fmt;
use std::hash::{Hash, Hasher};

use port_core::{SimTime, TankerId};

/// Where a tanker is in its trip through the port.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Phase {
    /// Waiting in the entrance queue for a tug.
    Entrance,
    /// Being towed from the entrance to a wharf.
    TowedIn,
    /// Reached the wharves while every berth was taken; held with its tug.
    AwaitingBerth,
    Unloading,
    /// Finished unloading, still occupying a berth until a tug arrives.
    AwaitingTug,
    /// Being towed out of the port.
    TowedOut,
    Departed,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Entrance      => "entrance",
            Phase::TowedIn       => "towed-in",
            Phase::AwaitingBerth => "awaiting-berth",
            Phase::Unloading     => "unloading",
            Phase::AwaitingTug   => "awaiting-tug",
            Phase::TowedOut      => "towed-out",
            Phase::Departed      => "departed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a call to [`Tanker::record_progress`] should be read.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Progress {
    /// A duration to charge directly.
    Interval(f64),
    /// An absolute timestamp; the charged interval is `t - last_service_time`.
    At(SimTime),
}

/// One vessel's trip through the port.
///
/// Identity is the id alone: two `Tanker` values with the same id compare
/// equal and hash identically.
#[derive(Clone, Debug)]
pub struct Tanker {
    pub id: TankerId,

    /// Clock value at which the tanker reaches the port entrance.
    pub arrival_time: SimTime,

    /// Clock value of the last recorded service event.
    pub last_service_time: SimTime,

    /// Sum of every recorded interval.
    pub total_elapsed: f64,

    /// Recorded intervals, in order.  Append-only.
    pub history: Vec<f64>,

    /// When a tug picked the tanker up at the entrance.
    pub entered_at: Option<SimTime>,

    /// Every phase entered so far, in order.
    pub route: Vec<Phase>,
}

impl Tanker {
    pub fn new(id: TankerId, arrival_time: SimTime) -> Self {
        Self {
            id,
            arrival_time,
            last_service_time: arrival_time,
            total_elapsed: 0.0,
            history: Vec::new(),
            entered_at: None,
            route: Vec::new(),
        }
    }

    /// Charge time to this tanker and return the interval recorded.
    ///
    /// Both `total_elapsed` and `last_service_time` only move forward; a
    /// timestamp earlier than `last_service_time` records a zero interval.
    pub fn record_progress(&mut self, progress: Progress) -> f64 {
        let interval = match progress {
            Progress::Interval(dt) => dt,
            Progress::At(t) => t.since(self.last_service_time),
        }
        .max(0.0);

        self.history.push(interval);
        self.total_elapsed += interval;
        self.last_service_time = self.last_service_time.after(interval);
        interval
    }

    pub fn enter(&mut self, phase: Phase) {
        self.route.push(phase);
    }

    /// The phase most recently entered.
    pub fn phase(&self) -> Option<Phase> {
        self.route.last().copied()
    }

    /// Minutes since a tug first picked the tanker up, if it has been.
    pub fn time_inside(&self, now: SimTime) -> Option<f64> {
        self.entered_at.map(|t| now.since(t))
    }
}

impl PartialEq for Tanker {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Tanker {}

impl Hash for Tanker {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Tanker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
