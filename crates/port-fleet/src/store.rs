//! `TankerStore` — arena of tankers addressed by stable `TankerId` handles.
//!
//! Slots are indexed by `id.slot()`.  A tanker's slot is filled on
//! [`spawn`](TankerStore::spawn) and emptied on
//! [`retire`](TankerStore::retire); ids are never reused, so a stale handle
//! resolves to `None` rather than to a different vessel.

use port_core::{SimTime, TankerId};

use crate::Tanker;

#[derive(Default)]
pub struct TankerStore {
    slots: Vec<Option<Tanker>>,
    live:  usize,
}

impl TankerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tanker arriving at `arrival_time` and return its handle.
    pub fn spawn(&mut self, arrival_time: SimTime) -> TankerId {
        let id = self.next_id();
        self.slots.push(Some(Tanker::new(id, arrival_time)));
        self.live += 1;
        id
    }

    /// The id the next `spawn` will hand out.
    pub fn next_id(&self) -> TankerId {
        TankerId(self.slots.len() as u32 + 1)
    }

    #[inline]
    pub fn get(&self, id: TankerId) -> Option<&Tanker> {
        self.slots.get(id.slot())?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: TankerId) -> Option<&mut Tanker> {
        self.slots.get_mut(id.slot())?.as_mut()
    }

    /// Remove a departed tanker from the arena, returning it.
    pub fn retire(&mut self, id: TankerId) -> Option<Tanker> {
        let tanker = self.slots.get_mut(id.slot())?.take()?;
        self.live -= 1;
        Some(tanker)
    }

    /// Whether `id` names a tanker that has not yet been retired.
    pub fn is_live(&self, id: TankerId) -> bool {
        self.get(id).is_some()
    }

    /// Number of tankers ever spawned.
    pub fn generated(&self) -> usize {
        self.slots.len()
    }

    /// Number of tankers spawned and not yet retired.
    pub fn live(&self) -> usize {
        self.live
    }

    /// Iterate over live tankers in id order.
    pub fn iter_live(&self) -> impl Iterator<Item = &Tanker> {
        self.slots.iter().filter_map(Option::as_ref)
    }
}
