//! `port-events` — the closed set of event kinds and the queue that orders them.
//!
//! # Crate layout
//!
//! | Module    | Contents                                             |
//! |-----------|------------------------------------------------------|
//! | [`kind`]  | `EventKind` (7 variants), `Event`                    |
//! | [`queue`] | `EventQueue` (one time-ordered lane per kind)        |
//! | [`error`] | `EventError`, `EventResult<T>`                       |
//!
//! # Ordering model (summary)
//!
//! ```text
//! lane(kind)   = entries sorted by time; equal times keep scheduling order
//! next_event() = head with the smallest time across all lanes;
//!                equal head times resolved by EventKind declaration order
//! ```

pub mod error;
pub mod kind;
pub mod queue;


pub use error::{EventError, EventResult};
pub use kind::{Event, EventKind};
pub use queue::EventQueue;
