//! Core machine state for Phooey.
//!
//! - **Tape**: fixed-size array of signed 64-bit cells with one cursor
//! - **Stack**: operand stack (popping an empty stack yields 0) and call frames
//! - **Error**: error hierarchy, fault policies and source locations
//!
//! # Layer 0 - No Internal Dependencies
//!
//! This module depends on no other Phooey module.

pub mod error;
pub mod stack;
pub mod tape;

pub use error::{
    BoundsPolicy, DivisionByZeroPolicy, ErrorCategory, PhooeyError, PhooeyResult, SourceLocation,
};
pub use stack::{CallFrame, CallStack, Stack};
pub use tape::{Tape, TAPE_SIZE};
