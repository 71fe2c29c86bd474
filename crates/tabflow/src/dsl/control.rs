//! Non-local control flow inside the DSL is mediated by two small pieces
//! of state rather than unwinding: a `LoopStack` for break/continue intent
//! and a `ReturnState` for early return. Handlers observe these after each
//! statement instead of throwing (SPEC_FULL.md §4.6).

// dependencies
use crate::mv::Mv;

/// A stack of small integers signaling break/continue intent at each
/// nested loop depth. Zero at rest; a nonzero top means a break or
/// continue is in flight at that depth.
///
/// By convention, `LoopStack` instances are named `loop_stack`.
#[derive(Debug, Default)]
pub struct LoopStack {
    levels: Vec<i32>,
}

impl LoopStack {
    pub fn new() -> Self {
        Self { levels: vec![0] }
    }

    /// The current top-of-stack value; `0` means no break/continue is in
    /// flight.
    pub fn top(&self) -> i32 {
        *self.levels.last().expect("LoopStack::top: stack unexpectedly empty")
    }

    /// Set the top-of-stack value, e.g. to signal a break.
    pub fn set_top(&mut self, value: i32) {
        *self.levels.last_mut().expect("LoopStack::set_top: stack unexpectedly empty") = value;
    }

    /// Enter a new loop nesting level.
    pub fn enter_loop(&mut self) {
        self.levels.push(0);
    }

    /// Exit a loop nesting level, clearing any pending break/continue that
    /// belonged to it (the enclosing loop handler's responsibility per
    /// SPEC_FULL.md §4.6 step 2).
    pub fn exit_loop(&mut self) {
        self.levels.pop();
        assert!(!self.levels.is_empty(), "LoopStack::exit_loop: popped the base level");
    }
}

/// Captures an in-flight `return` from a UDF or subroutine body.
///
/// Invariant: when `returned` is `false`, `value` is `Mv::Absent`.
///
/// By convention, `ReturnState` instances are named `return_state`.
#[derive(Debug)]
pub struct ReturnState {
    pub returned: bool,
    pub value: Mv,
}

impl Default for ReturnState {
    fn default() -> Self {
        Self {
            returned: false,
            value: Mv::Absent,
        }
    }
}

impl ReturnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value-returning `return`.
    pub fn set_value(&mut self, value: Mv) {
        self.returned = true;
        self.value = value;
    }

    /// Record a value-less `return`, as used by subroutines.
    pub fn set_void(&mut self) {
        self.returned = true;
        self.value = Mv::Absent;
    }

    /// Reset to the at-rest state, taking the captured value (if any).
    /// This is the step `process_callback` performs on the way out of a
    /// UDF/subroutine invocation (SPEC_FULL.md §4.7 step 4).
    pub fn take(&mut self) -> Mv {
        self.returned = false;
        std::mem::replace(&mut self.value, Mv::Absent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_stack_top_is_zero_at_rest() {
        let stack = LoopStack::new();
        assert_eq!(stack.top(), 0);
    }

    #[test]
    fn loop_stack_clears_on_exit() {
        let mut stack = LoopStack::new();
        stack.enter_loop();
        stack.set_top(1);
        assert_eq!(stack.top(), 1);
        stack.exit_loop();
        assert_eq!(stack.top(), 0);
    }

    #[test]
    fn return_state_invariant_after_take() {
        let mut rs = ReturnState::new();
        rs.set_value(Mv::Int(7));
        assert_eq!(rs.take(), Mv::Int(7));
        assert!(!rs.returned);
        assert_eq!(rs.value, Mv::Absent);
    }
}
