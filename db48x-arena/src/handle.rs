//! GC-safe handles: the scoped-acquisition protocol spec.md §4.1 and §9
//! require of anything that holds a reference into the arena across a
//! potential allocation.
//!
//! Handles live on an intrusive stack owned by the [`Arena`](crate::Arena).
//! `enter` pushes, `leave` pops; a [`Scope`] ties that pair to Rust's own
//! scoping via `Drop`, so a handle is released on every exit path —
//! including an error unwind — without the caller having to remember to.

use crate::{
    error::{
        ArenaError,
        Result,
    },
    Arena,
};
use db48x_types::Offset;

/// Identifies one slot on the arena's handle stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleId(pub(crate) usize);

/// A scoped, GC-safe reference to an arena object.
///
/// Dropping a `Scope` releases its handle. Scopes must be dropped in the
/// reverse order they were created in (LIFO) — dropping one out of order is
/// a programmer error and panics, the same static discipline spec.md §9
/// describes as "audited by a handle-depth assertion at frame boundaries".
pub struct Scope<'a> {
    arena: &'a mut Arena,
    id: HandleId,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(arena: &'a mut Arena, id: HandleId) -> Self {
        Scope { arena, id }
    }

    /// The object offset this handle currently identifies.
    ///
    /// Valid until the next allocation or collection, at which point the
    /// handle (and this accessor) reflect the post-collection address.
    pub fn offset(&self) -> Offset {
        self.arena.handles[self.id.0]
    }

    /// Borrow the arena this handle is registered with, e.g. to allocate.
    pub fn arena_mut(&mut self) -> &mut Arena {
        self.arena
    }
}

impl<'a> Drop for Scope<'a> {
    fn drop(&mut self) {
        self.arena
            .leave(self.id)
            .expect("GC handle released out of nested order");
    }
}

impl Arena {
    /// Register `offset` as a live handle and return a scope guard for it.
    pub fn enter(&mut self, offset: Offset) -> Scope<'_> {
        let id = HandleId(self.handles.len());
        self.handles.push(offset);
        Scope::new(self, id)
    }

    pub(crate) fn leave(&mut self, id: HandleId) -> Result<()> {
        if self.handles.len() != id.0 + 1 {
            return Err(ArenaError::HandleStackMismatch);
        }
        self.handles.pop();
        Ok(())
    }
}
