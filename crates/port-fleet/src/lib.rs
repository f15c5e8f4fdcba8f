//! `port-fleet` — tanker bookkeeping and the arena that owns every live tanker.
//!
//! # Ownership
//!
//! A tanker moves between the entrance queue, the berths and in-flight event
//! payloads.  [`TankerStore`] owns every [`Tanker`]; everything else holds
//! `TankerId` handles:
//!
//! ```ignore
//! let id = fleet.spawn(arrival);
//! entrance.push_back(id);                   // only the handle moves
//! fleet.get_mut(id)?.enter(Phase::TowedIn);
//! ```

pub mod store;
pub mod tanker;


pub use store::TankerStore;
pub use tanker::{Phase, Progress, Tanker};
