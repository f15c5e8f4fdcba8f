//! `port-sim` — discrete-event simulation of an oil port.
//!
//! Tankers arrive at the entrance, are towed to a wharf by a tug, unload,
//! wait for a tug again and are towed out.  Tugs and wharves are bounded
//! pools shared by every tanker.
//!
//! # Event loop
//!
//! ```text
//! seed one TankerArrivalAtEntrance
//! loop:
//!   e = earliest pending event (ties: EventKind declaration order)
//!   if e.time >= horizon: break
//!   consume e; charge statistics; clock = e.time
//!   handler(e.kind)   mutates PortState and schedules follow-on events
//!   count blocked situation; audit invariants (optional); notify observer
//! finalise statistics at the horizon
//! ```
//!
//! # Handlers
//!
//! | Event                     | Effect                                                         |
//! |---------------------------|----------------------------------------------------------------|
//! | `TankerArrivalAtEntrance` | queue at entrance; schedule next arrival; send an idle tug     |
//! | `TugArrivalAtEntrance`    | tow the head of the entrance queue towards the wharves         |
//! | `TankerArrivalAtWharf`    | take a berth and release the tug, or wait with it for a berth  |
//! | `UnloadingDone`           | move to the done list; send an idle tug                        |
//! | `TugArrivalAtWharf`       | tow the head of the done list out; a held tanker gets the berth |
//! | `TankerDeparture`         | record time in port; release the tug                           |
//! | `TugAvailable`            | dispatch by [`DispatchPolicy`](port_core::DispatchPolicy) or idle |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use port_core::PortConfig;
//! use port_sim::{NoopObserver, PortSimBuilder};
//!
//! let mut sim = PortSimBuilder::stochastic(PortConfig::default())?.build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("{} tankers handled", sim.stats.done);
//! ```

pub mod builder;
pub mod dispatch;
pub mod error;
pub mod observer;
pub mod sim;
pub mod state;
pub mod stats;
pub mod view;

#[cfg(test)]
mod tests;

pub use builder::PortSimBuilder;
pub use dispatch::Side;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, PortObserver};
pub use sim::PortSim;
pub use state::PortState;
pub use stats::{PortStats, Sample, TimeWeighted};
pub use view::PortView;
