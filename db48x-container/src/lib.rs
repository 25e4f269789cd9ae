//! Length-prefixed containers and the directory store (spec.md §4.4,
//! §4.6): text, list, array, program, expression, polynomial, tag, and a
//! nested symbol table with parent-directory walk. Every container here is
//! generic over its element type, the way `fuel-merkle`'s tree structures
//! are generic over a storage trait, so this crate never needs to depend
//! on the concrete object representation `db48x-vm` assembles above it.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod array;
mod directory;
mod expression;
mod list;
mod polynomial;
mod program;
mod tag;
mod text;

pub use array::{
    Array,
    cylindrical_to_rect,
    polar_to_rect,
    rect_to_cylindrical,
    rect_to_polar,
    rect_to_spherical,
    spherical_to_rect,
};
pub use directory::{
    Directory,
    DirectoryError,
    Path,
    StoreCombineError,
    is_reserved_name,
};
pub use expression::{
    Arity,
    ExprNode,
};
pub use list::{
    List,
    SortOrder,
};
pub use polynomial::{
    Monomial,
    Polynomial,
};
pub use program::Program;
pub use tag::Tag;
pub use text::Text;
