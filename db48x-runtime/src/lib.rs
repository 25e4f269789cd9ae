//! Stacks, settings, error-handler, and library tables for the RPL runtime
//! (spec.md §3.5, §4.5, §4.6, §4.9, §6.2): everything the evaluator in
//! `db48x-vm` needs as working state besides the arena and the object
//! representation itself.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod editor;
mod error_handler;
mod errors;
mod last_args;
mod library;
pub mod settings;
mod stack;
mod undo;

pub use editor::EditorRing;
pub use error_handler::{
    ErrorAction,
    ErrorHandlerStack,
};
pub use errors::RuntimeError;
pub use last_args::LastArgs;
pub use library::{
    Attachment,
    Library,
};
pub use settings::Settings;
pub use stack::{
    DataStack,
    Frame,
    ReturnStack,
};
pub use undo::UndoStack;
