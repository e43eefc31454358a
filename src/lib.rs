//! Phooey: an interpreter for a terse, tape-based esoteric language.
//!
//! Source text is scanned into a flat list of instructions, brackets are
//! resolved into a jump table, and the engine executes the list against a
//! tape of signed 64-bit cells, an operand stack and a call stack.
//!
//! ```
//! use phooey::{Engine, EngineConfig, ReaderInput, RecordingHost};
//!
//! let mut engine = Engine::from_source(
//!     "&42 $i",
//!     EngineConfig::default(),
//!     ReaderInput::scripted(""),
//!     Vec::new(),
//!     RecordingHost::new(0),
//! )?;
//! engine.run()?;
//! assert_eq!(engine.output(), b"42");
//! # Ok::<(), phooey::PhooeyError>(())
//! ```

// ═══════════════════════════════════════════════════════════════════════════
// Layer 0: Core (No internal dependencies)
// ═══════════════════════════════════════════════════════════════════════════
pub mod core;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 1: Front end (depends on core)
// ═══════════════════════════════════════════════════════════════════════════
pub mod ast;
pub mod parser;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 2: Runtime collaborators (depends on core)
// ═══════════════════════════════════════════════════════════════════════════
pub mod runtime;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 3: VM (depends on all of the above)
// ═══════════════════════════════════════════════════════════════════════════
pub mod vm;

pub use ast::{Instruction, OperandSource, Operator, Payload, Program, SpecialKind};
pub use crate::core::error::{
    BoundsPolicy, DivisionByZeroPolicy, ErrorCategory, PhooeyError, PhooeyResult, SourceLocation,
};
pub use crate::core::{CallStack, Stack, Tape, TAPE_SIZE};
pub use parser::{parse_program, tokenize};
pub use runtime::{Host, InputSource, ReaderInput, RecordingHost, StdinInput, SystemHost, EOF_CHAR};
pub use vm::{Engine, EngineConfig, EngineStatus};
