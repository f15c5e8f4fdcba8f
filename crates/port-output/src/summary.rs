//! Final results of a run.

use std::fmt;

use port_core::SimTime;
use port_sim::{PortStats, PortView};

const RULE: &str = "--------------------------------------------";

/// Snapshot of the figures reported at the end of a run.
///
/// Counts of tankers are time-weighted over the observed span; times are in
/// minutes and averaged over departed tankers.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub observed:           SimTime,
    pub events:             u64,
    pub generated:          u64,
    pub departed:           u64,
    pub still_waiting:      u64,
    pub still_inside:       u64,

    pub mean_waiting:       f64,
    pub max_waiting:        f64,
    pub mean_inside:        f64,
    pub max_inside:         f64,
    pub mean_time_inside:   f64,
    pub max_time_inside:    f64,
    pub mean_time_in_port:  f64,
    pub max_time_in_port:   f64,
    pub mean_unloading:     f64,
    pub max_unloading:      f64,
    pub mean_at_wharves:    f64,
    pub max_at_wharves:     f64,

    pub blocked_events:     u64,
    pub wharf_saturations:  u64,
}

impl Summary {
    pub fn from_stats(stats: &PortStats) -> Self {
        Self {
            observed:          SimTime(stats.observed_until),
            events:            stats.events_processed,
            generated:         stats.generated,
            departed:          stats.done,
            still_waiting:     stats.waiting,
            still_inside:      stats.inside,
            mean_waiting:      stats.mean_waiting(),
            max_waiting:       stats.entrance_queue.max(),
            mean_inside:       stats.mean_inside(),
            max_inside:        stats.inside_port.max(),
            mean_time_inside:  stats.time_inside.mean(),
            max_time_inside:   stats.time_inside.max(),
            mean_time_in_port: stats.time_in_port.mean(),
            max_time_in_port:  stats.time_in_port.max(),
            mean_unloading:    stats.mean_unloading(),
            max_unloading:     stats.unloading.max(),
            mean_at_wharves:   stats.mean_at_wharves(),
            max_at_wharves:    stats.at_wharves.max(),
            blocked_events:    stats.blocked_events,
            wharf_saturations: stats.wharf_saturations,
        }
    }

    pub fn from_view(view: &PortView<'_>) -> Self {
        Self::from_stats(view.stats)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "Results of the simulation ({}, {} events):", self.observed, self.events)?;
        writeln!(
            f,
            "Tankers generated: {}, departed: {}, waiting: {}, inside: {}",
            self.generated, self.departed, self.still_waiting, self.still_inside
        )?;
        writeln!(f, "Mean number of tankers waiting at the entrance: {:.3}", self.mean_waiting)?;
        writeln!(f, "Max number of tankers waiting at the entrance: {}", self.max_waiting)?;
        writeln!(f, "Mean number of tankers inside the port: {:.3}", self.mean_inside)?;
        writeln!(f, "Max number of tankers inside the port: {}", self.max_inside)?;
        writeln!(f, "Mean time spent by tankers inside the port: {:.1} min", self.mean_time_inside)?;
        writeln!(f, "Max time spent by tankers inside the port: {:.1} min", self.max_time_inside)?;
        writeln!(f, "Mean time from arrival to departure: {:.1} min", self.mean_time_in_port)?;
        writeln!(f, "Max time from arrival to departure: {:.1} min", self.max_time_in_port)?;
        writeln!(f, "Mean number of tankers unloading: {:.3}", self.mean_unloading)?;
        writeln!(f, "Max number of tankers unloading: {}", self.max_unloading)?;
        writeln!(f, "Mean number of tankers at the wharves: {:.3}", self.mean_at_wharves)?;
        writeln!(f, "Max number of tankers at the wharves: {}", self.max_at_wharves)?;
        writeln!(f, "Wharf arrivals refused a berth: {}", self.wharf_saturations)?;
        writeln!(f, "Number of times the port was blocked: {}", self.blocked_events)?;
        write!(f, "{RULE}")
    }
}
