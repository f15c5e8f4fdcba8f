//! Read-only view of a running simulation, and the invariant audit.

use port_core::PortConfig;
use port_events::{EventKind, EventQueue};
use port_fleet::TankerStore;

use crate::{PortState, PortStats, SimError, SimResult};

/// Event kinds whose pending occurrences each tie up one tug.
const TUG_BOUND_KINDS: [EventKind; 5] = [
    EventKind::TugArrivalAtEntrance,
    EventKind::TugArrivalAtWharf,
    EventKind::TankerArrivalAtWharf,
    EventKind::TankerDeparture,
    EventKind::TugAvailable,
];

/// Borrowed snapshot of everything the simulator owns, handed to observers.
#[derive(Copy, Clone)]
pub struct PortView<'a> {
    pub config: &'a PortConfig,
    pub state:  &'a PortState,
    pub queue:  &'a EventQueue,
    pub fleet:  &'a TankerStore,
    pub stats:  &'a PortStats,
}

impl PortView<'_> {
    /// Tugs not idle: travelling empty, towing, about to be released, or
    /// holding a tanker in the berth queue.
    pub fn tugs_busy(&self) -> usize {
        TUG_BOUND_KINDS
            .iter()
            .map(|&k| self.queue.pending_count(k))
            .sum::<usize>()
            + self.state.berth_queue.len()
    }

    /// Tugs travelling empty to pick a tanker up.
    pub fn tugs_en_route(&self) -> usize {
        self.queue.pending_count(EventKind::TugArrivalAtEntrance)
            + self.queue.pending_count(EventKind::TugArrivalAtWharf)
    }

    /// Tankers past the entrance queue: towed in, held, at a berth, or
    /// towed out.
    pub fn tankers_inside(&self) -> usize {
        self.queue.pending_count(EventKind::TankerArrivalAtWharf)
            + self.queue.pending_count(EventKind::TankerDeparture)
            + self.state.berths_in_use()
            + self.state.berth_queue.len()
    }

    /// No pending action can ever free a berth or a tug.
    pub fn is_blocked(&self) -> bool {
        self.state.free_tugs == 0
            && self.queue.pending_count(EventKind::TugArrivalAtWharf) == 0
            && self.state.berths_in_use() >= self.state.max_wharves
            && self.queue.pending_count(EventKind::TugAvailable) == 0
            && self.queue.pending_count(EventKind::TankerDeparture) == 0
    }

    /// Check every resource and location invariant, returning the first
    /// violation found.
    pub fn check_invariants(&self) -> SimResult<()> {
        let s = self.state;
        let fail = |what: String| Err(SimError::Invariant { at: s.clock.minutes(), what });

        if s.free_tugs > s.max_tugs {
            return fail(format!("{} free tugs exceeds pool of {}", s.free_tugs, s.max_tugs));
        }
        if s.berths_in_use() > s.max_wharves {
            return fail(format!("{} berths in use exceeds {} wharves", s.berths_in_use(), s.max_wharves));
        }
        let busy = self.tugs_busy();
        if s.free_tugs + busy != s.max_tugs {
            return fail(format!("{} free + {} busy tugs != pool of {}", s.free_tugs, busy, s.max_tugs));
        }
        if let Some(next) = self.queue.next_event().filter(|e| e.time < s.clock) {
            return fail(format!("pending {next} is earlier than the clock"));
        }

        // Every live tanker has exactly one location.
        let mut seen = vec![0u8; self.fleet.generated()];
        let queue = self.queue;
        // A berthed tanker also rides its UnloadingDone; the berth is its location.
        let scoped = EventKind::ALL
            .into_iter()
            .filter(|k| k.is_tanker_scoped() && *k != EventKind::UnloadingDone);
        let located = s
            .entrance
            .iter()
            .chain(&s.wharf_occupied)
            .chain(&s.wharf_done)
            .chain(&s.berth_queue)
            .copied()
            .chain(scoped.flat_map(move |k| queue.tankers(k)));
        for id in located {
            if !self.fleet.is_live(id) {
                return fail(format!("{id} is referenced but not live"));
            }
            seen[id.slot()] += 1;
            if seen[id.slot()] > 1 {
                return fail(format!("{id} is in more than one place"));
            }
        }
        let placed = seen.iter().filter(|&&n| n == 1).count();
        if placed != self.fleet.live() {
            return fail(format!("{} live tankers but {} located", self.fleet.live(), placed));
        }

        let unloading = self.queue.pending_count(EventKind::UnloadingDone);
        if unloading != s.wharf_occupied.len() {
            return fail(format!(
                "{} unloading completions pending for {} occupied berths",
                unloading,
                s.wharf_occupied.len()
            ));
        }
        let stray = queue
            .tankers(EventKind::UnloadingDone)
            .find(|id| !s.wharf_occupied.contains(id));
        if let Some(stray) = stray {
            return fail(format!("{stray} finishes unloading without a berth"));
        }
        Ok(())
    }
}
