//! The arena and mark-and-compact collector (spec.md §4.1).
//!
//! This crate knows how to bump-allocate bytes, register GC-safe handles,
//! and compact — it defers everything about what those bytes *mean* to the
//! [`ObjectModel`] seam, so that the tag enumeration in `db48x-object` and
//! the payload layouts in `db48x-numeric`/`db48x-container` stay free to
//! grow without this crate changing.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;

mod arena;
mod error;
mod gc;
mod handle;
mod model;

pub use arena::Arena;
pub use error::{
    ArenaError,
    Result,
};
pub use handle::{
    HandleId,
    Scope,
};
pub use model::{
    ObjectModel,
    Roots,
};

#[cfg(test)]
mod tests {
    use super::*;
    use db48x_types::Offset;

    struct FixedSizeModel(usize);

    impl ObjectModel for FixedSizeModel {
        fn object_size(&self, bytes: &[u8]) -> db48x_types::Result<usize> {
            if bytes.len() < self.0 {
                return Err(db48x_types::Error::BufferTooShort);
            }
            Ok(self.0)
        }
    }

    struct StackRoots(Vec<Offset>);

    impl Roots for StackRoots {
        fn for_each_root_mut(&mut self, visit: &mut dyn FnMut(&mut Offset)) {
            for o in &mut self.0 {
                visit(o);
            }
        }
    }

    #[test]
    fn alloc_advances_tip_and_zero_fills() {
        let mut arena = Arena::new(64);
        let at = arena.alloc(8).unwrap();
        assert_eq!(at, Offset::ZERO);
        assert_eq!(arena.tip().as_usize(), 8);
        assert_eq!(&arena.live_bytes()[0..8], &[0u8; 8]);
    }

    #[test]
    fn alloc_past_capacity_is_out_of_memory() {
        let mut arena = Arena::new(16);
        assert!(arena.alloc(8).is_ok());
        assert_eq!(arena.alloc(16), Err(ArenaError::OutOfMemory));
    }

    #[test]
    fn collect_compacts_survivors_and_rewrites_roots() {
        let mut arena = Arena::new(64);
        let model = FixedSizeModel(4);
        let garbage = arena.alloc_bytes(&[1, 1, 1, 1]).unwrap();
        let survivor = arena.alloc_bytes(&[2, 2, 2, 2]).unwrap();
        let _ = garbage;

        let mut roots = StackRoots(alloc::vec![survivor]);
        arena.collect(&mut roots, &model).unwrap();

        assert_eq!(arena.tip(), Offset::new(4));
        assert_eq!(roots.0[0], Offset::ZERO);
        assert_eq!(&arena.live_bytes()[0..4], &[2, 2, 2, 2]);
    }

    #[test]
    fn nested_handles_release_in_lifo_order() {
        let mut arena = Arena::new(32);
        let a = arena.alloc_bytes(&[9, 9]).unwrap();
        {
            let outer = arena.enter(a);
            {
                let inner = outer.arena_mut().enter(a);
                drop(inner);
            }
            drop(outer);
        }
        assert!(arena.handles.is_empty());
    }
}
