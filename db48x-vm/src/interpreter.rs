//! The top-level interpreter (spec.md §3.5, §4.5): the data and return
//! stacks, the working directory and its path from `HOME`, settings,
//! flags, error handlers, the library tables, undo history, and the
//! command-line editor ring, all tied to the concrete [`Object`]
//! representation this crate assembles. This plays the same role here
//! that `Interpreter<S, Tx, Ecal>` played for the teacher this crate was
//! drawn from: one struct owning every piece of mutable state a single
//! evaluation step touches.

use alloc::{
    string::ToString,
    vec::Vec,
};

use db48x_container::{
    Path,
    Program,
};
use db48x_object::{
    CommandId,
    ErrorKind,
    Flags,
};
use db48x_runtime::{
    DataStack,
    EditorRing,
    ErrorHandlerStack,
    Frame,
    LastArgs,
    Library,
    ReturnStack,
    RuntimeError,
    Settings,
    UndoStack,
};

#[cfg(feature = "random")]
use db48x_numeric::Prng;

use crate::{
    evaluator,
    object::{
        Object,
        ObjectDirectory,
    },
    parser::Parser,
    rewrite,
};

/// How many nested program/user-function calls the return stack allows
/// before `StackOverflow`.
pub const RETURN_STACK_DEPTH_LIMIT: usize = 256;

/// How many data-stack levels are allowed before `StackOverflow`.
pub const DATA_STACK_DEPTH_LIMIT: usize = 4096;

/// How many undo snapshots are retained.
pub const UNDO_HISTORY_CAPACITY: usize = 32;

/// Everything a single RPL evaluation step needs: the stacks, the
/// variable store, and every ambient setting that shapes how a command
/// behaves or a result renders.
pub struct Interpreter {
    /// The data stack objects are pushed to and popped from.
    pub stack: DataStack<Object>,
    /// The return stack of program/user-function call frames.
    pub returns: ReturnStack<Object>,
    /// The root of the directory tree (`HOME`).
    pub root: ObjectDirectory,
    /// The working directory's path from `HOME`.
    pub path: Path,
    /// Display, numeric, and evaluation settings.
    pub settings: Settings,
    /// The user/system flag vector.
    pub flags: Flags,
    /// The nested `iferr` handler stack.
    pub handlers: ErrorHandlerStack<Object>,
    /// Named constants, equations, and attachable libraries.
    pub library: Library<Object>,
    /// The bounded undo/redo history of data-stack snapshots.
    pub undo: UndoStack<Object>,
    /// The command-line editor ring.
    pub editor: EditorRing,
    /// The operands the most recently executed command consumed.
    pub last_args: Option<LastArgs<Object>>,
    /// The seeded PRNG backing `RAND`/`RANDOM`.
    #[cfg(feature = "random")]
    pub prng: Prng,
}

impl Interpreter {
    /// A fresh interpreter: empty stacks, `HOME` with nothing stored,
    /// and every setting at its documented default.
    pub fn new() -> Self {
        Interpreter {
            stack: DataStack::with_depth_limit(DATA_STACK_DEPTH_LIMIT),
            returns: ReturnStack::with_depth_limit(RETURN_STACK_DEPTH_LIMIT),
            root: ObjectDirectory::new(),
            path: Path::home(),
            settings: Settings::default(),
            flags: Flags::new(),
            handlers: ErrorHandlerStack::new(),
            library: Library::new(),
            undo: UndoStack::new(UNDO_HISTORY_CAPACITY),
            editor: EditorRing::new(),
            last_args: None,
            #[cfg(feature = "random")]
            prng: Prng::seeded(0),
        }
    }

    /// The working directory, per [`Interpreter::path`].
    pub fn current_directory(&self) -> Result<&ObjectDirectory, ErrorKind> {
        self.root.resolve(self.path.segments()).map_err(ErrorKind::from)
    }

    /// Mutable counterpart of [`Interpreter::current_directory`].
    pub fn current_directory_mut(&mut self) -> Result<&mut ObjectDirectory, ErrorKind> {
        self.root.resolve_mut(self.path.segments()).map_err(ErrorKind::from)
    }

    /// Resolve `name` against the innermost local frame first, then the
    /// working directory, the way a bound name's value is found before
    /// falling back to leaving it as a free symbol.
    pub fn resolve(&self, name: &str) -> Option<Object> {
        if let Some(value) = self.returns.resolve_local(name) {
            return Some(value.clone());
        }
        if let Some(value) = self.current_directory().ok().and_then(|dir| dir.recall(name).ok()) {
            return Some(value.clone());
        }
        self.library.constant(name).ok().map(|constant| constant.value.clone())
    }

    /// Parse `source` into a sequence of objects and evaluate each in
    /// turn, the command-line `ENTER` behavior.
    pub fn run_text(&mut self, source: &str) -> Result<(), RuntimeError> {
        tracing::debug!(len = source.len(), "evaluating command line");
        let objects = Parser::new(source).parse_all().map_err(RuntimeError::Kind)?;
        for object in objects {
            self.eval_object(object)?;
        }
        Ok(())
    }

    /// Evaluate one object per the object's own auto-eval rule (spec.md
    /// §4.5): self-evaluating objects push themselves; a bound symbol
    /// evaluates the value it names; a program runs its steps in
    /// sequence; a command dispatches to its handler; an algebraic
    /// expression evaluates as far as its free symbols allow.
    pub fn eval_object(&mut self, object: Object) -> Result<(), RuntimeError> {
        match object {
            Object::Symbol(name) => match self.resolve(&name) {
                Some(value) => self.eval_object(value),
                None => Ok(self.stack.push(Object::Symbol(name))?),
            },
            Object::Local(name) => match self.returns.resolve_local(&name) {
                Some(value) => {
                    let value = value.clone();
                    Ok(self.stack.push(value)?)
                }
                None => Err(RuntimeError::Kind(ErrorKind::UndefinedName)),
            },
            Object::Program(program) => self.run_program(&program),
            Object::Command(id) => self.run_command(id),
            Object::Expression(tree) => {
                let precision = self.settings.precision;
                let mut resolve = |name: &str| self.resolve(name);
                match rewrite::evaluate(&tree, &mut resolve, precision) {
                    Ok(value) => Ok(self.stack.push(value)?),
                    Err(ErrorKind::UndefinedName) => Ok(self.stack.push(Object::Expression(tree))?),
                    Err(kind) => Err(RuntimeError::Kind(kind)),
                }
            }
            other => Ok(self.stack.push(other)?),
        }
    }

    /// Run every step of a program in sequence, in a fresh call frame so
    /// `→` locals it introduces are scoped to this invocation.
    pub fn run_program(&mut self, program: &Program<Object>) -> Result<(), RuntimeError> {
        self.returns.enter(Frame::new(0))?;
        for step in program.steps() {
            if let Err(error) = self.eval_object(step.clone()) {
                self.returns.leave()?;
                return Err(error);
            }
        }
        self.returns.leave()?;
        Ok(())
    }

    /// Dispatch a single built-in command, recording its undo snapshot
    /// first (mutating commands only; see [`evaluator::mutates_stack`]).
    pub fn run_command(&mut self, id: CommandId) -> Result<(), RuntimeError> {
        if evaluator::mutates_stack(id) {
            self.undo.record(self.stack.snapshot());
        }
        let result = evaluator::dispatch(self, id);
        if let Err(ref error) = result {
            tracing::debug!(?id, ?error, "command failed");
        }
        result
    }

    /// `UNDO`: restore the data stack to its state before the most
    /// recent mutating command.
    pub fn undo(&mut self) -> Result<(), RuntimeError> {
        match self.undo.undo(self.stack.snapshot()) {
            Some(previous) => {
                self.stack.restore(previous);
                Ok(())
            }
            None => Err(RuntimeError::NothingToUndo),
        }
    }

    /// `REDO`: step forward to the state most recently undone.
    pub fn redo(&mut self) -> Result<(), RuntimeError> {
        match self.undo.redo(self.stack.snapshot()) {
            Some(next) => {
                self.stack.restore(next);
                Ok(())
            }
            None => Err(RuntimeError::NothingToUndo),
        }
    }

    /// Record the operands a command just consumed, for `LASTARG`.
    pub fn record_last_args(&mut self, command: &str, args: Vec<Object>) {
        self.last_args = Some(LastArgs::new(command.to_string(), args));
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db48x_numeric::Integer;

    #[test]
    fn numbers_push_themselves() {
        let mut vm = Interpreter::new();
        vm.eval_object(Object::Integer(Integer::from_i64(42))).unwrap();
        assert_eq!(vm.stack.depth(), 1);
        assert_eq!(*vm.stack.peek(0).unwrap(), Object::Integer(Integer::from_i64(42)));
    }

    #[test]
    fn an_unbound_symbol_pushes_itself() {
        let mut vm = Interpreter::new();
        vm.eval_object(Object::Symbol("X".to_string())).unwrap();
        assert_eq!(*vm.stack.peek(0).unwrap(), Object::Symbol("X".to_string()));
    }

    #[test]
    fn a_bound_symbol_evaluates_to_its_stored_value() {
        let mut vm = Interpreter::new();
        vm.current_directory_mut().unwrap().store("X", Object::Integer(Integer::from_i64(7))).unwrap();
        vm.eval_object(Object::Symbol("X".to_string())).unwrap();
        assert_eq!(*vm.stack.peek(0).unwrap(), Object::Integer(Integer::from_i64(7)));
    }

    #[test]
    fn running_a_program_executes_every_step_in_order() {
        let mut vm = Interpreter::new();
        let program = Program::from_steps(alloc::vec![
            Object::Integer(Integer::from_i64(1)),
            Object::Integer(Integer::from_i64(2)),
            Object::Command(CommandId::Add),
        ]);
        vm.run_program(&program).unwrap();
        assert_eq!(*vm.stack.peek(0).unwrap(), Object::Integer(Integer::from_i64(3)));
    }

    #[test]
    fn undo_restores_the_stack_before_a_mutating_command() {
        let mut vm = Interpreter::new();
        vm.eval_object(Object::Integer(Integer::from_i64(1))).unwrap();
        vm.eval_object(Object::Integer(Integer::from_i64(2))).unwrap();
        vm.run_command(CommandId::Add).unwrap();
        assert_eq!(vm.stack.depth(), 1);
        vm.undo().unwrap();
        assert_eq!(vm.stack.depth(), 2);
    }
}
