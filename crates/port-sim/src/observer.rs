//! Observer trait for progress reporting and data collection.

use port_core::SimTime;
use port_events::Event;
use port_fleet::Tanker;

use crate::PortView;

/// Callbacks invoked by [`PortSim::run`][crate::PortSim::run] as events are
/// processed.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: departure counter
///
/// ```rust,ignore
/// struct Departures(usize);
///
/// impl PortObserver for Departures {
///     fn on_departure(&mut self, _tanker: &Tanker, _at: SimTime) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait PortObserver {
    /// Called after each event has been handled and statistics updated.
    fn on_event(&mut self, _event: &Event, _port: &PortView<'_>) {}

    /// Called when a tanker leaves the port, after it has been retired from
    /// the fleet.
    fn on_departure(&mut self, _tanker: &Tanker, _at: SimTime) {}

    /// Called after every event that leaves the port in a blocked situation.
    fn on_blocked(&mut self, _at: SimTime) {}

    /// Called once when the run reaches its horizon.
    fn on_sim_end(&mut self, _port: &PortView<'_>) {}
}

/// A [`PortObserver`] that does nothing.
pub struct NoopObserver;

impl PortObserver for NoopObserver {}
