//! Parser, evaluator, and rewrite engine for the DB48X RPL runtime
//! (spec.md §3, §4): this crate assembles the concrete [`object::Object`]
//! representation from `db48x-numeric`'s numeric kernels and
//! `db48x-container`'s compound types, parses source text into objects,
//! evaluates them against an [`interpreter::Interpreter`], and rewrites
//! algebraic expressions.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(unused_must_use)]

#[doc(hidden)] // Needed by some of the exported macros
pub extern crate alloc;

extern crate core;

pub mod arithmetic;
pub mod collab;
pub mod evaluator;
pub mod interpreter;
pub mod object;
pub mod parser;
pub mod rewrite;
pub mod units;

pub mod prelude {
    //! Required implementations for full functionality.
    pub use db48x_object::{
        CommandId,
        ErrorKind,
    };
    pub use db48x_runtime::RuntimeError;

    pub use crate::{
        interpreter::Interpreter,
        object::Object,
        parser::Parser,
    };
}
