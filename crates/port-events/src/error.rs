use port_core::TankerId;
use thiserror::Error;

use crate::EventKind;

/// Misuse of the event queue.  Always a programming error in the caller.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("{0} must carry a tanker")]
    MissingTanker(EventKind),

    #[error("{kind} carries no payload, got {tanker}")]
    UnexpectedTanker {
        kind:   EventKind,
        tanker: TankerId,
    },

    #[error("{kind} scheduled at non-finite time {time}")]
    NonFiniteTime {
        kind: EventKind,
        time: f64,
    },
}

pub type EventResult<T> = Result<T, EventError>;
