//! Plain data row types written by trace writers.

/// Port state right after one event was handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRow {
    /// 1-based position of the event in the run.
    pub seq:            u64,
    pub clock:          f64,
    pub kind:           &'static str,
    /// `None` for tug-scoped events.
    pub tanker:         Option<u32>,
    /// Tankers in the entrance queue.
    pub waiting:        u64,
    /// Tankers unloading at a berth.
    pub unloading:      u64,
    /// Tankers finished and waiting for a tug at a berth.
    pub done:           u64,
    /// Tankers held with their tug because every berth was taken.
    pub holding:        u64,
    pub free_tugs:      u64,
    pub blocked_events: u64,
}

/// One tanker leaving the port.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepartureRow {
    pub tanker:       u32,
    pub arrival:      f64,
    /// Clock when a tug picked the tanker up at the entrance.
    pub entered:      Option<f64>,
    pub departed:     f64,
    pub time_in_port: f64,
    pub time_inside:  Option<f64>,
}
