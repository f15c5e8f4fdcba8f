use port_core::{PortError, TankerId};
use port_events::EventError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] PortError),

    #[error("event queue error: {0}")]
    Event(#[from] EventError),

    #[error("{0} is not a live tanker")]
    UnknownTanker(TankerId),

    #[error("invariant violated at t={at:.3}: {what}")]
    Invariant {
        at:   f64,
        what: String,
    },
}

pub type SimResult<T> = Result<T, SimError>;
