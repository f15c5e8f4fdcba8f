//! Running statistics sampled by the event loop.
//!
//! Queue-length style metrics are time-weighted: before each event is
//! dispatched, the value that held since the previous event is charged for
//! the elapsed interval.  Per-tanker durations are plain samples taken on
//! departure.

/// Time-weighted accumulator for a piecewise-constant quantity.
#[derive(Clone, Debug, Default)]
pub struct TimeWeighted {
    area: f64,
    max:  f64,
}

impl TimeWeighted {
    /// Charge `value` for `dt` minutes.
    #[inline]
    pub fn observe(&mut self, value: f64, dt: f64) {
        self.area += value * dt;
        self.max = self.max.max(value);
    }

    /// Mean over `span` minutes; `0.0` for an empty span.
    pub fn mean_over(&self, span: f64) -> f64 {
        if span > 0.0 { self.area / span } else { 0.0 }
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Count / sum / max of independent samples.
#[derive(Clone, Debug, Default)]
pub struct Sample {
    count: u64,
    sum:   f64,
    max:   f64,
}

impl Sample {
    pub fn record(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.max = self.max.max(value);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// `0.0` until at least one sample has been recorded.
    pub fn mean(&self) -> f64 {
        if self.count > 0 { self.sum / self.count as f64 } else { 0.0 }
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Everything the reporting side reads about a run.
#[derive(Clone, Debug, Default)]
pub struct PortStats {
    /// Tankers created by the arrival process.
    pub generated: u64,
    /// Tankers in the entrance queue.
    pub waiting: u64,
    /// Tankers between entrance pickup and departure.
    pub inside: u64,
    /// Tankers that have left the port.
    pub done: u64,

    pub events_processed: u64,

    /// Events after which no pending action could ever free a berth or a tug.
    pub blocked_events: u64,

    /// Wharf arrivals that found every berth taken.
    pub wharf_saturations: u64,

    pub entrance_queue: TimeWeighted,
    pub inside_port:    TimeWeighted,
    pub at_wharves:     TimeWeighted,
    pub unloading:      TimeWeighted,

    /// Minutes from arrival at the entrance to departure.
    pub time_in_port: Sample,
    /// Minutes from entrance pickup to departure.
    pub time_inside:  Sample,

    /// Clock value up to which the time-weighted accumulators are charged.
    pub observed_until: f64,
}

impl PortStats {
    pub fn mean_waiting(&self) -> f64 {
        self.entrance_queue.mean_over(self.observed_until)
    }

    pub fn mean_inside(&self) -> f64 {
        self.inside_port.mean_over(self.observed_until)
    }

    pub fn mean_at_wharves(&self) -> f64 {
        self.at_wharves.mean_over(self.observed_until)
    }

    pub fn mean_unloading(&self) -> f64 {
        self.unloading.mean_over(self.observed_until)
    }
}
