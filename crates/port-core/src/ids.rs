//! Tanker identifiers.
//!
//! Ids are handed out sequentially from 1 by the fleet store and never
//! reused, so they double as stable arena handles.

use std::fmt;

/// Unique identity of one tanker.  Equality and hashing use the id only.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TankerId(pub u32);

impl TankerId {
    /// The first id handed out by a fresh store.
    pub const FIRST: TankerId = TankerId(1);

    /// Zero-based slot in the fleet arena.  Id 0 is never handed out and
    /// maps to an out-of-range slot.
    #[inline(always)]
    pub fn slot(self) -> usize {
        (self.0 as usize).wrapping_sub(1)
    }
}

impl fmt::Display for TankerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OT{:05}", self.0)
    }
}

impl From<TankerId> for u32 {
    #[inline(always)]
    fn from(id: TankerId) -> u32 {
        id.0
    }
}
