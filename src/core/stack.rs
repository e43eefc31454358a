//! Operand stack and call stack for the Phooey engine.

use std::fmt;

/// The operand stack.
///
/// Popping an empty stack yields zero. This is language semantics, so there
/// is no checked pop.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stack {
    elements: Vec<i64>,
}

impl Stack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Get the current depth of the stack.
    #[inline]
    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    /// Check if the stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn push(&mut self, value: i64) {
        self.elements.push(value);
    }

    /// Pop a value, returning zero if empty.
    #[inline]
    pub fn pop(&mut self) -> i64 {
        self.elements.pop().unwrap_or(0)
    }

    /// Values from bottom to top.
    pub fn as_slice(&self) -> &[i64] {
        &self.elements
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stack{:?}", self.elements)
    }
}

/// A saved `(` position and the value `)` compares the cell against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallFrame {
    /// Index of the `(` instruction that pushed this frame.
    pub return_index: usize,
    /// Resolved once when the frame is created.
    pub compare: i64,
}

/// LIFO of call frames driving `(`...`)` repeat-until-equal blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStack {
    frames: Vec<CallFrame>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, return_index: usize, compare: i64) {
        self.frames.push(CallFrame {
            return_index,
            compare,
        });
    }

    /// The innermost frame, if any.
    pub fn top(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    pub fn pop(&mut self) -> Option<CallFrame> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
