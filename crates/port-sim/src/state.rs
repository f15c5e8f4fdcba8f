//! Mutable port state: where every tanker is and how many tugs are idle.

use std::collections::VecDeque;

use port_core::{SimTime, TankerId};

/// The port's resource state.  Every live tanker is either in exactly one of
/// the four collections below or is the payload of exactly one pending
/// event.
#[derive(Clone, Debug)]
pub struct PortState {
    /// Logical clock, in minutes.  Never decreases.
    pub clock: SimTime,

    /// Tankers waiting at the entrance for a tug, earliest arrival first.
    pub entrance: VecDeque<TankerId>,

    /// Tankers unloading at a berth.
    pub wharf_occupied: Vec<TankerId>,

    /// Tankers done unloading, still holding a berth until a tug arrives.
    pub wharf_done: VecDeque<TankerId>,

    /// Tankers that reached the wharves while every berth was taken.  Each
    /// keeps the tug that towed it until a berth frees.
    pub berth_queue: VecDeque<TankerId>,

    /// Idle tugs, in `0..=max_tugs`.
    pub free_tugs: usize,

    pub max_tugs: usize,
    pub max_wharves: usize,
}

impl PortState {
    /// An empty port with every tug idle.
    pub fn new(max_wharves: usize, max_tugs: usize) -> Self {
        Self {
            clock: SimTime::ZERO,
            entrance: VecDeque::new(),
            wharf_occupied: Vec::new(),
            wharf_done: VecDeque::new(),
            berth_queue: VecDeque::new(),
            free_tugs: max_tugs,
            max_tugs,
            max_wharves,
        }
    }

    /// Berths held by unloading or finished tankers.
    #[inline]
    pub fn berths_in_use(&self) -> usize {
        self.wharf_occupied.len() + self.wharf_done.len()
    }

    #[inline]
    pub fn has_free_berth(&self) -> bool {
        self.berths_in_use() < self.max_wharves
    }
}
