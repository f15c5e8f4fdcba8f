//! `port-core` — foundational types for the port discrete-event simulator.
//!
//! This crate is a dependency of every other `port-*` crate.  It has no
//! `port-*` dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `TankerId`                                                 |
//! | [`time`]        | `SimTime` (logical minutes)                                |
//! | [`rng`]         | `SimRng`                                                   |
//! | [`config`]      | `PortConfig`, `TugTravel`, `DispatchPolicy`                |
//! | [`variates`]    | `VariateSource`, `StochasticVariates`, `FixedVariates`     |
//! | [`error`]       | `PortError`, `PortResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and time types.   |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod variates;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DispatchPolicy, PortConfig, TugTravel};
pub use error::{PortError, PortResult};
pub use ids::TankerId;
pub use rng::SimRng;
pub use time::SimTime;
pub use variates::{FixedVariates, StochasticVariates, VariateSource, arrival_rate};
