//! The bump-allocated byte arena (spec.md §4.1).

use crate::error::{
    ArenaError,
    Result,
};
use db48x_types::Offset;

/// A single growable byte region objects are bump-allocated into.
///
/// The main allocation area grows up from `0` towards `tip`; a temporaries
/// area for transient scratch (intermediate bignum digits, render buffers)
/// grows down from the end of `buffer` towards `temp_tip`. The two must
/// never cross — `alloc`/`alloc_temp` refuse a request that would make
/// `tip > temp_tip`.
pub struct Arena {
    pub(crate) buffer: Vec<u8>,
    pub(crate) tip: Offset,
    temp_tip: Offset,
    pub(crate) handles: Vec<Offset>,
}

impl Arena {
    /// Create an arena backed by `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Arena {
            buffer: alloc::vec![0u8; capacity],
            tip: Offset::ZERO,
            temp_tip: Offset::new(capacity as u32),
            handles: Vec::new(),
        }
    }

    /// The current high-water mark of the main allocation area.
    pub fn tip(&self) -> Offset {
        self.tip
    }

    /// The current low-water mark of the temporaries area.
    pub fn temp_tip(&self) -> Offset {
        self.temp_tip
    }

    /// Total capacity of the backing buffer.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes free between `tip` and `temp_tip`.
    pub fn available(&self) -> usize {
        self.temp_tip.distance_from(self.tip)
    }

    /// Bump-allocate `len` bytes at `tip`, zero-initialized, and return
    /// their offset. Fails with `OutOfMemory` if there is not enough room;
    /// the caller is expected to run a collection and retry once.
    pub fn alloc(&mut self, len: usize) -> Result<Offset> {
        if len > self.available() {
            return Err(ArenaError::OutOfMemory);
        }
        let at = self.tip;
        let new_tip = self.tip.checked_add(len).map_err(|_| ArenaError::OutOfMemory)?;
        self.buffer[at.as_usize()..new_tip.as_usize()].fill(0);
        self.tip = new_tip;
        Ok(at)
    }

    /// Append `bytes` at `tip` and return their offset.
    pub fn alloc_bytes(&mut self, bytes: &[u8]) -> Result<Offset> {
        let at = self.alloc(bytes.len())?;
        self.buffer[at.as_usize()..at.as_usize() + bytes.len()].copy_from_slice(bytes);
        Ok(at)
    }

    /// Read-only view of the live bytes of the main allocation area.
    pub fn live_bytes(&self) -> &[u8] {
        &self.buffer[..self.tip.as_usize()]
    }

    /// Bump-allocate `len` bytes of scratch space at the low end of the
    /// temporaries area and return their offset.
    pub fn alloc_temp(&mut self, len: usize) -> Result<Offset> {
        if len > self.available() {
            return Err(ArenaError::OutOfMemory);
        }
        let new_temp_tip = Offset::new(self.temp_tip.as_u32() - len as u32);
        self.temp_tip = new_temp_tip;
        Ok(new_temp_tip)
    }

    /// Discard every temporary allocated since `mark` was captured via
    /// [`Arena::temp_tip`]. Called at well-defined safepoints (spec.md §4.1).
    pub fn truncate_temp(&mut self, mark: Offset) {
        debug_assert!(mark.as_u32() >= self.temp_tip.as_u32());
        self.temp_tip = mark;
    }
}
