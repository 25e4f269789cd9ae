//! The last-arguments buffer (spec.md §4.5): remembers the operands the
//! most recent command consumed from the data stack, so `LastArg`/`Undo`
//! can put them back without re-deriving them from the result.

use alloc::{
    string::String,
    vec::Vec,
};

/// The operands a single command consumed, recorded for `LastArg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastArgs<T> {
    /// The command's name, as shown by `LastArg`'s prompt.
    pub command: String,
    /// The operands, in the order they were popped (top of stack first).
    pub args: Vec<T>,
}

impl<T> LastArgs<T> {
    /// Record the arguments `command` just consumed.
    pub fn new(command: String, args: Vec<T>) -> Self {
        LastArgs { command, args }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_command_name_and_consumed_arguments() {
        let recorded = LastArgs::new("+".into(), alloc::vec![1, 2]);
        assert_eq!(recorded.command, "+");
        assert_eq!(recorded.args, alloc::vec![1, 2]);
    }
}
