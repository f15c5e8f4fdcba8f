//! `EventQueue` — one time-ordered lane per [`EventKind`].
//!
//! # Layout
//!
//! The queue is a fixed array indexed by `EventKind::index()`, so there is no
//! runtime key lookup and every kind always has a lane.  Each lane is a
//! `VecDeque` of `(time, tanker?)` entries kept sorted by time.  Keeping the
//! payload inside the entry means a lane's times and tankers can never fall
//! out of step.
//!
//! # Ordering
//!
//! `schedule` inserts after every entry whose time is `<=` the new time
//! (`partition_point`), which is a stable insertion: equal times come out in
//! scheduling order.  Insertion is O(n) in the lane length, popping the head
//! is O(1), and `next_event` scans the seven lane heads.

use std::collections::VecDeque;

use port_core::{SimTime, TankerId};
use tracing::trace;

use crate::{Event, EventError, EventKind, EventResult};

#[derive(Copy, Clone, Debug)]
struct Entry {
    time:   SimTime,
    tanker: Option<TankerId>,
}

/// Pending events, grouped by kind and ordered by time within each kind.
pub struct EventQueue {
    lanes: [VecDeque<Entry>; EventKind::COUNT],
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self {
            lanes: std::array::from_fn(|_| VecDeque::new()),
            total: 0,
        }
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an occurrence of `kind` at `time`.
    ///
    /// Tanker-scoped kinds must be given a tanker and the others must not.
    pub fn schedule(
        &mut self,
        kind:   EventKind,
        time:   SimTime,
        tanker: Option<TankerId>,
    ) -> EventResult<()> {
        match (kind.is_tanker_scoped(), tanker) {
            (true, None) => return Err(EventError::MissingTanker(kind)),
            (false, Some(tanker)) => return Err(EventError::UnexpectedTanker { kind, tanker }),
            _ => {}
        }
        if !time.is_finite() {
            return Err(EventError::NonFiniteTime { kind, time: time.minutes() });
        }

        let lane = &mut self.lanes[kind.index()];
        let at = lane.partition_point(|e| e.time <= time);
        lane.insert(at, Entry { time, tanker });
        self.total += 1;
        trace!(%kind, time = time.minutes(), tanker = ?tanker, "scheduled");
        Ok(())
    }

    /// Schedule a tanker-scoped event.
    pub fn schedule_tanker(&mut self, kind: EventKind, time: SimTime, tanker: TankerId) -> EventResult<()> {
        self.schedule(kind, time, Some(tanker))
    }

    /// Schedule a resource-scoped event.
    pub fn schedule_tug(&mut self, kind: EventKind, time: SimTime) -> EventResult<()> {
        self.schedule(kind, time, None)
    }

    /// The globally earliest pending event, without removing it.
    ///
    /// Empty lanes are never candidates.  Equal head times go to the kind
    /// declared first in [`EventKind`].
    pub fn next_event(&self) -> Option<Event> {
        let mut best: Option<Event> = None;
        for kind in EventKind::ALL {
            let Some(head) = self.lanes[kind.index()].front() else {
                continue;
            };
            if best.is_none_or(|b| head.time < b.time) {
                best = Some(Event { kind, time: head.time, tanker: head.tanker });
            }
        }
        best
    }

    /// The head of one lane, without removing it.
    pub fn head(&self, kind: EventKind) -> Option<Event> {
        self.lanes[kind.index()]
            .front()
            .map(|e| Event { kind, time: e.time, tanker: e.tanker })
    }

    /// Remove and return the head of `kind`'s lane.
    pub fn consume_head(&mut self, kind: EventKind) -> Option<Event> {
        let e = self.lanes[kind.index()].pop_front()?;
        self.total -= 1;
        Some(Event { kind, time: e.time, tanker: e.tanker })
    }

    /// Remove and return the globally earliest event.
    pub fn pop_next(&mut self) -> Option<Event> {
        let next = self.next_event()?;
        self.consume_head(next.kind)
    }

    /// Number of pending events of `kind`.
    #[inline]
    pub fn pending_count(&self, kind: EventKind) -> usize {
        self.lanes[kind.index()].len()
    }

    /// Tankers carried by pending events of `kind`, in firing order.
    pub fn tankers(&self, kind: EventKind) -> impl Iterator<Item = TankerId> + '_ {
        self.lanes[kind.index()].iter().filter_map(|e| e.tanker)
    }

    /// Pending events of `kind`, in firing order.
    pub fn iter(&self, kind: EventKind) -> impl Iterator<Item = Event> + '_ {
        self.lanes[kind.index()]
            .iter()
            .map(move |e| Event { kind, time: e.time, tanker: e.tanker })
    }

    /// Total pending events across all kinds.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
