//! Where a freed tug goes next.
//!
//! A side has *unmet demand* when tankers are waiting there and fewer tugs
//! are already en route than there are waiting tankers.  Checking this before
//! every dispatch is what stops two tugs converging on one tanker; scheduled
//! events are never cancelled.

use port_core::DispatchPolicy;
use port_events::{EventKind, EventQueue};

use crate::PortState;

/// The two places a tug can be sent to pick up a tanker.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Side {
    Entrance,
    Wharf,
}

impl Side {
    /// The event fired when a tug dispatched to this side arrives.
    pub fn tug_arrival(self) -> EventKind {
        match self {
            Side::Entrance => EventKind::TugArrivalAtEntrance,
            Side::Wharf    => EventKind::TugArrivalAtWharf,
        }
    }

    /// Tankers on this side waiting for a tug.
    pub fn waiting(self, state: &PortState) -> usize {
        match self {
            Side::Entrance => state.entrance.len(),
            Side::Wharf    => state.wharf_done.len(),
        }
    }
}

/// Whether one more tug sent to `side` would find a tanker to tow.
pub fn has_unmet_demand(side: Side, state: &PortState, queue: &EventQueue) -> bool {
    queue.pending_count(side.tug_arrival()) < side.waiting(state)
}

/// Pick the side a newly freed tug should serve under `policy`, or `None` if
/// neither side needs one.
pub fn choose_side(policy: DispatchPolicy, state: &PortState, queue: &EventQueue) -> Option<Side> {
    let order = match policy {
        DispatchPolicy::EntranceFirst => [Side::Entrance, Side::Wharf],
        DispatchPolicy::WharfFirst    => [Side::Wharf, Side::Entrance],
    };
    order.into_iter().find(|&side| has_unmet_demand(side, state, queue))
}
