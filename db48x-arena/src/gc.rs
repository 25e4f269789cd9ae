//! Mark-and-compact collection (spec.md §4.1).
//!
//! Because every object is self-contained — lists and directories hold
//! children by copy, not by reference (spec.md §9) — "mark" never needs to
//! recurse into an object's payload: marking the byte range a root names is
//! marking everything reachable through it. That turns "trace the
//! reachability graph" into "walk the arena once, offset by offset,
//! consulting a start-of-object bitmap", which is also a good way to
//! confirm the graph really is acyclic: the walk only works at all because
//! `size_of` makes a single consistent left-to-right pass possible.

use crate::{
    error::Result,
    model::{
        ObjectModel,
        Roots,
    },
    Arena,
};
use db48x_types::Offset;

impl Arena {
    /// Run one mark-and-compact collection.
    ///
    /// `roots` is asked twice: once to mark, once — after compaction — to
    /// rewrite surviving offsets in place. GC handles are rewritten the
    /// same way automatically.
    pub fn collect(&mut self, roots: &mut dyn Roots, model: &dyn ObjectModel) -> Result<()> {
        let tip = self.tip().as_usize();
        tracing::debug!(tip, "starting mark-and-compact collection");
        let mut marked = alloc::vec![false; tip];

        let mark_at = |offset: Offset, marked: &mut [bool]| {
            let at = offset.as_usize();
            if at < tip {
                marked[at] = true;
            }
        };
        roots.for_each_root_mut(&mut |offset| mark_at(*offset, &mut marked));
        for &h in &self.handles {
            mark_at(h, &mut marked);
        }

        // Compact: walk the arena left to right, copying marked objects
        // down to `write`. Survivor order is preserved (stable compaction).
        let mut mapping: Vec<(usize, usize)> = Vec::new();
        let mut read = 0usize;
        let mut write = 0usize;
        while read < tip {
            let size = model.object_size(&self.buffer[read..tip])?;
            debug_assert!(size > 0, "zero-size object would loop forever");
            if marked[read] {
                if write != read {
                    self.buffer.copy_within(read..read + size, write);
                }
                mapping.push((read, write));
                write += size;
            }
            read += size;
        }
        self.buffer[write..tip].fill(0);
        self.tip = Offset::new(write as u32);
        tracing::debug!(reclaimed = tip - write, new_tip = write, "collection complete");

        let mut rewrite = |offset: &mut Offset| {
            let at = offset.as_usize();
            // Survivors' mapping entries are sorted by `read` (ascending,
            // built during the left-to-right walk above).
            if let Ok(idx) = mapping.binary_search_by_key(&at, |&(read, _)| read) {
                *offset = Offset::new(mapping[idx].1 as u32);
            }
        };
        roots.for_each_root_mut(&mut rewrite);
        for h in &mut self.handles {
            rewrite(h);
        }

        Ok(())
    }
}
