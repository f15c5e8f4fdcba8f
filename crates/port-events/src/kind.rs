//! The seven event kinds and the event record handed to the simulator.

use std::fmt;

use port_core::{SimTime, TankerId};

/// Every occurrence that drives the port state machine.
///
/// Declaration order is the tie-break priority: when two lanes have heads at
/// the same time, the kind declared first is processed first.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum EventKind {
    TankerArrivalAtEntrance,
    TugArrivalAtEntrance,
    TankerArrivalAtWharf,
    UnloadingDone,
    TugArrivalAtWharf,
    TankerDeparture,
    TugAvailable,
}

impl EventKind {
    pub const COUNT: usize = 7;

    /// All kinds in priority order.
    pub const ALL: [EventKind; Self::COUNT] = [
        EventKind::TankerArrivalAtEntrance,
        EventKind::TugArrivalAtEntrance,
        EventKind::TankerArrivalAtWharf,
        EventKind::UnloadingDone,
        EventKind::TugArrivalAtWharf,
        EventKind::TankerDeparture,
        EventKind::TugAvailable,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Tanker-scoped kinds always carry exactly one tanker; the others carry
    /// nothing.
    pub fn is_tanker_scoped(self) -> bool {
        matches!(
            self,
            EventKind::TankerArrivalAtEntrance
                | EventKind::TankerArrivalAtWharf
                | EventKind::UnloadingDone
                | EventKind::TankerDeparture
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::TankerArrivalAtEntrance => "tanker-arrival-entrance",
            EventKind::TugArrivalAtEntrance    => "tug-arrival-entrance",
            EventKind::TankerArrivalAtWharf    => "tanker-arrival-wharf",
            EventKind::UnloadingDone           => "unloading-done",
            EventKind::TugArrivalAtWharf       => "tug-arrival-wharf",
            EventKind::TankerDeparture         => "tanker-departure",
            EventKind::TugAvailable            => "tug-available",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled occurrence: its kind, when it fires, and the tanker it
/// concerns (for tanker-scoped kinds).
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Event {
    pub kind:   EventKind,
    pub time:   SimTime,
    pub tanker: Option<TankerId>,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tanker {
            Some(t) => write!(f, "{} {} @ {:.2}", self.kind, t, self.time.minutes()),
            None    => write!(f, "{} @ {:.2}", self.kind, self.time.minutes()),
        }
    }
}
