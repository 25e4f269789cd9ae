//! The closed enumerations every object-family crate above this one shares:
//! the object type tag, the error taxonomy, the built-in command table, and
//! the user/system flag vector.
//!
//! Nothing in this crate knows how to allocate, parse, render, or evaluate
//! an object — it only names the shapes those operations dispatch on
//! (spec.md §4.2, §4.8, §3.4).

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

mod command;
mod error;
mod flags;
mod tag;

pub use command::CommandId;
pub use error::{
    ErrorKind,
    Result,
};
pub use flags::{
    Flags,
    SystemFlag,
};
pub use tag::ObjectTag;
