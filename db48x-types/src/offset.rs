//! The `Offset` newtype: an address into the arena that survives relocation.
//!
//! No component above this crate may hold a raw pointer into the arena
//! across a potential collection (spec.md §4.1, §9). `Offset` is the
//! currency every higher layer trades in instead: it is just a `u32`
//! byte offset from the start of the arena, meaningless without the arena
//! it was issued by, and cheap to rewrite in bulk when the collector
//! slides survivors down.

use crate::error::{
    Error,
    Result,
};
use core::fmt;

/// A byte offset into the arena.
///
/// `Offset` is `Copy` and ordinary data — it is the collector's job to
/// rewrite every live `Offset` when it compacts, not this type's job to
/// prevent that from happening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset(u32);

impl Offset {
    /// The offset of the first byte of the arena.
    pub const ZERO: Offset = Offset(0);

    /// Construct an offset from a raw `u32`.
    pub const fn new(raw: u32) -> Self {
        Offset(raw)
    }

    /// The raw byte offset.
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// The raw byte offset as a `usize`, for indexing into the arena's
    /// backing buffer.
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// `self + delta`, checked against arena address-space overflow.
    pub fn checked_add(self, delta: usize) -> Result<Offset> {
        let delta: u32 = delta.try_into().map_err(|_| Error::OffsetOverflow)?;
        self.0
            .checked_add(delta)
            .map(Offset)
            .ok_or(Error::OffsetOverflow)
    }

    /// `self - other`, as a byte count. Panics if `other > self`; callers
    /// within the arena/GC never subtract out of order, so this matches the
    /// "survivors only move down" invariant rather than silently wrapping.
    pub fn distance_from(self, other: Offset) -> usize {
        (self.0 - other.0) as usize
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_add_overflows_cleanly() {
        let near_top = Offset::new(u32::MAX - 1);
        assert!(near_top.checked_add(1).is_ok());
        assert_eq!(near_top.checked_add(10), Err(Error::OffsetOverflow));
    }

    #[test]
    fn distance_is_byte_count() {
        let a = Offset::new(100);
        let b = Offset::new(140);
        assert_eq!(b.distance_from(a), 40);
    }
}
