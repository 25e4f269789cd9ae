//! Data and return stacks (spec.md §3.5, §4.5): the data stack objects are
//! pushed to and popped from, and a return stack of call frames tracking
//! local-variable bindings during program execution.

use alloc::vec::Vec;
use db48x_object::ErrorKind;

/// A bounded-depth LIFO stack of objects, `T` being the concrete object
/// representation `db48x-vm` assembles above this crate.
#[derive(Debug, Clone)]
pub struct DataStack<T> {
    items: Vec<T>,
    depth_limit: usize,
}

impl<T> DataStack<T> {
    /// A stack with no configured depth limit beyond available memory.
    pub fn new() -> Self {
        DataStack {
            items: Vec::new(),
            depth_limit: usize::MAX,
        }
    }

    /// A stack that raises `StackOverflow` once it holds `depth_limit`
    /// items.
    pub fn with_depth_limit(depth_limit: usize) -> Self {
        DataStack {
            items: Vec::new(),
            depth_limit,
        }
    }

    /// The number of objects currently on the stack.
    pub fn depth(&self) -> usize {
        self.items.len()
    }

    /// Push `value`, failing if this would exceed the configured depth
    /// limit.
    pub fn push(&mut self, value: T) -> Result<(), crate::RuntimeError> {
        if self.items.len() >= self.depth_limit {
            return Err(crate::RuntimeError::StackOverflow);
        }
        self.items.push(value);
        Ok(())
    }

    /// Pop the top object.
    pub fn pop(&mut self) -> Result<T, ErrorKind> {
        self.items.pop().ok_or(ErrorKind::TooFewArguments)
    }

    /// Peek the object `levels` below the top (`levels = 0` is the top,
    /// matching the level-1-based stack-picture convention of `Dup2`/
    /// `Roll`/`Pick` being expressed at the call site).
    pub fn peek(&self, levels: usize) -> Result<&T, ErrorKind> {
        let len = self.items.len();
        levels
            .checked_add(1)
            .and_then(|n| len.checked_sub(n))
            .and_then(|i| self.items.get(i))
            .ok_or(ErrorKind::TooFewArguments)
    }

    /// `Dup`: push a copy of the top object.
    pub fn dup(&mut self) -> Result<(), ErrorKind>
    where
        T: Clone,
    {
        let top = self.peek(0)?.clone();
        self.items.push(top);
        Ok(())
    }

    /// `Swap`: exchange the top two objects.
    pub fn swap(&mut self) -> Result<(), ErrorKind> {
        let len = self.items.len();
        if len < 2 {
            return Err(ErrorKind::TooFewArguments);
        }
        self.items.swap(len - 1, len - 2);
        Ok(())
    }

    /// `Drop`: discard the top object.
    pub fn drop_top(&mut self) -> Result<T, ErrorKind> {
        self.pop()
    }

    /// `Roll`: move the object `count` levels down (1-based, `count = 1`
    /// is a no-op) to the top.
    pub fn roll(&mut self, count: usize) -> Result<(), ErrorKind> {
        if count == 0 || count > self.items.len() {
            return Err(ErrorKind::TooFewArguments);
        }
        let index = self.items.len() - count;
        let value = self.items.remove(index);
        self.items.push(value);
        Ok(())
    }

    /// `RollDown`: move the top object down to `count` levels below the
    /// top (1-based, `count = 1` is a no-op), the inverse of [`Self::roll`].
    pub fn roll_down(&mut self, count: usize) -> Result<(), ErrorKind> {
        if count == 0 || count > self.items.len() {
            return Err(ErrorKind::TooFewArguments);
        }
        let value = self.items.pop().ok_or(ErrorKind::TooFewArguments)?;
        let index = self.items.len() + 1 - count;
        self.items.insert(index, value);
        Ok(())
    }

    /// `Pick`: push a copy of the object `count` levels down (1-based).
    pub fn pick(&mut self, count: usize) -> Result<(), ErrorKind>
    where
        T: Clone,
    {
        if count == 0 || count > self.items.len() {
            return Err(ErrorKind::TooFewArguments);
        }
        let index = self.items.len() - count;
        let value = self.items[index].clone();
        self.items.push(value);
        Ok(())
    }

    /// A snapshot of the current stack contents, bottom to top, for undo
    /// and stack-picture display.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    /// Restore the stack to a previously captured snapshot.
    pub fn restore(&mut self, snapshot: Vec<T>) {
        self.items = snapshot;
    }
}

impl<T> Default for DataStack<T> {
    fn default() -> Self {
        DataStack::new()
    }
}

/// A single return-stack entry: the step index to resume at in the
/// enclosing program, plus this call's local-variable bindings.
#[derive(Debug, Clone)]
pub struct Frame<T> {
    /// 0-based step index to resume execution at in the caller.
    pub resume_at: usize,
    /// Local variable bindings introduced by this call (`→` locals or a
    /// user-defined function's formal parameters), in declaration order.
    pub locals: Vec<(alloc::string::String, T)>,
}

impl<T> Frame<T> {
    /// A frame with no locals, resuming at `resume_at`.
    pub fn new(resume_at: usize) -> Self {
        Frame {
            resume_at,
            locals: Vec::new(),
        }
    }

    /// Look up a local binding by name, innermost declaration wins.
    pub fn local(&self, name: &str) -> Option<&T> {
        self.locals.iter().rev().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Bind a local variable, shadowing any existing binding of the same
    /// name within this frame.
    pub fn bind(&mut self, name: alloc::string::String, value: T) {
        self.locals.push((name, value));
    }
}

/// A stack of call frames, one per nested program/user-function
/// invocation.
#[derive(Debug, Clone)]
pub struct ReturnStack<T> {
    frames: Vec<Frame<T>>,
    depth_limit: usize,
}

impl<T> ReturnStack<T> {
    /// A return stack bounded at `depth_limit` nested calls, guarding
    /// against unbounded recursion.
    pub fn with_depth_limit(depth_limit: usize) -> Self {
        ReturnStack {
            frames: Vec::new(),
            depth_limit,
        }
    }

    /// The current call nesting depth.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Push a new call frame.
    pub fn enter(&mut self, frame: Frame<T>) -> Result<(), crate::RuntimeError> {
        if self.frames.len() >= self.depth_limit {
            return Err(crate::RuntimeError::StackOverflow);
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the innermost call frame on return.
    pub fn leave(&mut self) -> Result<Frame<T>, ErrorKind> {
        self.frames.pop().ok_or(ErrorKind::TooFewArguments)
    }

    /// Resolve `name` against the innermost frame that binds it, walking
    /// outward through enclosing calls.
    pub fn resolve_local(&self, name: &str) -> Option<&T> {
        self.frames.iter().rev().find_map(|frame| frame.local(name))
    }

    /// The innermost frame, mutable, for binding new locals mid-call.
    pub fn current_mut(&mut self) -> Option<&mut Frame<T>> {
        self.frames.last_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_past_the_depth_limit_overflows() {
        let mut stack: DataStack<i64> = DataStack::with_depth_limit(2);
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        assert_eq!(stack.push(3), Err(crate::RuntimeError::StackOverflow));
    }

    #[test]
    fn pop_from_an_empty_stack_is_too_few_arguments() {
        let mut stack: DataStack<i64> = DataStack::new();
        assert_eq!(stack.pop(), Err(ErrorKind::TooFewArguments));
    }

    #[test]
    fn swap_exchanges_the_top_two() {
        let mut stack = DataStack::new();
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        stack.swap().unwrap();
        assert_eq!(stack.pop().unwrap(), 1);
        assert_eq!(stack.pop().unwrap(), 2);
    }

    #[test]
    fn roll_moves_the_nth_level_to_the_top() {
        let mut stack = DataStack::new();
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        stack.push(3).unwrap();
        stack.roll(3).unwrap();
        assert_eq!(stack.snapshot(), alloc::vec![2, 3, 1]);
    }

    #[test]
    fn roll_down_moves_the_top_to_the_nth_level() {
        let mut stack = DataStack::new();
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        stack.push(3).unwrap();
        stack.roll_down(3).unwrap();
        assert_eq!(stack.snapshot(), alloc::vec![3, 1, 2]);
    }

    #[test]
    fn pick_copies_without_removing() {
        let mut stack = DataStack::new();
        stack.push(10).unwrap();
        stack.push(20).unwrap();
        stack.pick(2).unwrap();
        assert_eq!(stack.snapshot(), alloc::vec![10, 20, 10]);
    }

    #[test]
    fn frame_local_lookup_prefers_the_innermost_binding() {
        let mut frame = Frame::new(0);
        frame.bind("X".into(), 1);
        frame.bind("X".into(), 2);
        assert_eq!(frame.local("X"), Some(&2));
    }

    #[test]
    fn return_stack_resolves_locals_outward_through_enclosing_calls() {
        let mut stack: ReturnStack<i64> = ReturnStack::with_depth_limit(8);
        let mut outer = Frame::new(0);
        outer.bind("X".into(), 1);
        stack.enter(outer).unwrap();
        stack.enter(Frame::new(0)).unwrap();
        assert_eq!(stack.resolve_local("X"), Some(&1));
    }
}
