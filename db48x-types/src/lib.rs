//! Arena primitives shared by every layer of the DB48X RPL runtime.
//!
//! This crate owns the three things every object-family crate above it
//! needs but none of them should redefine: the LEB128 codec used for both
//! the object tag and every variable-length payload length, the `Offset`
//! newtype that stands in for "a pointer into the arena" (so that nothing
//! above this crate holds a raw address across a potential collection),
//! and the `Canonical` trait that gives every object a uniform
//! size/encode/decode surface.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod canonical;
pub mod error;
pub mod leb128;
mod offset;

pub use canonical::Canonical;
pub use error::{
    Error,
    Result,
};
pub use offset::Offset;
