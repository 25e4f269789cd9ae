//! Seams the collector needs from the object-family crates above it.
//!
//! `db48x-arena` knows how to move bytes around; it does not know how to
//! interpret them. Everything it needs to do that is expressed as a trait
//! implemented elsewhere, the same collaborator-contract pattern spec.md
//! §6.5 uses for storage/clock/rasterizer.

use db48x_types::Offset;

/// Derives the byte length of the object starting at the front of `bytes`.
///
/// Implemented once, above this crate, by whichever layer can decode every
/// `ObjectTag` variant's payload (db48x-numeric, db48x-container, …
/// aggregate into one dispatcher). The arena invariant that objects are
/// laid out with no gaps (spec.md §3.1) is what lets the collector walk the
/// whole arena with nothing but this one function.
pub trait ObjectModel {
    /// Number of bytes, including the tag, that the object at the front of
    /// `bytes` occupies.
    fn object_size(&self, bytes: &[u8]) -> db48x_types::Result<usize>;
}

/// Enumerates every arena root a collection must trace (spec.md §3.2).
///
/// Each root is visited through a `&mut Offset` so the collector can
/// rewrite it in place once compaction has decided where survivors land.
pub trait Roots {
    /// Invoke `visit` once per root offset.
    fn for_each_root_mut(&mut self, visit: &mut dyn FnMut(&mut Offset));
}
