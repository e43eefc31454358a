//! Error types for the Phooey interpreter.
//!
//! Every fallible operation in the crate returns [`PhooeyResult`]. Errors are
//! grouped into three categories:
//!
//! - **Parse Errors**: raised while tokenizing or building the jump table
//! - **Runtime Errors**: raised by the execution engine
//! - **I/O Errors**: failures of the program file or the output sink
//!
//! Popping an empty operand stack is deliberately absent from this list: it
//! yields zero and is part of the language.

use std::fmt;

/// How the engine reacts when the tape cursor leaves the tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Produce a runtime error.
    #[default]
    Error,
    /// Wrap the cursor modulo the tape length.
    Wrap,
    /// Saturate the cursor to the first or last cell.
    Clamp,
}

/// How the engine reacts to `/`, `\` or `%` with a zero divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivisionByZeroPolicy {
    /// Produce a runtime error.
    #[default]
    Error,
    /// Store zero in the cell and continue.
    ReturnZero,
}

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// Line number (1-indexed, 0 when unknown).
    pub line: usize,
    /// Column number (1-indexed, 0 when unknown).
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "?:?")
        }
    }
}

/// Error type for the Phooey interpreter.
#[derive(Debug, thiserror::Error)]
pub enum PhooeyError {
    // ═══════════════════════════════════════════════════════════════════
    // Parse Errors
    // ═══════════════════════════════════════════════════════════════════

    /// A `"` with no closing quote before the end of the source.
    #[error("[{location}] Unterminated string literal")]
    UnterminatedString { location: SourceLocation },

    /// The source ended while an operator still needed its mode letter.
    #[error("[{location}] Operator '{op}' is missing its mode character")]
    TruncatedOperator { op: char, location: SourceLocation },

    /// An immediate literal that does not fit in a signed 64-bit cell.
    #[error("[{location}] Numeric literal out of range: '{text}'")]
    LiteralOutOfRange { text: String, location: SourceLocation },

    /// A closing bracket with no pending opener of the same family.
    #[error("[{location}] Unmatched '{bracket}'")]
    UnmatchedClose { bracket: char, location: SourceLocation },

    /// An opening bracket that is never closed.
    #[error("[{location}] Unclosed '{bracket}'")]
    UnclosedBracket { bracket: char, location: SourceLocation },

    // ═══════════════════════════════════════════════════════════════════
    // Runtime Errors
    // ═══════════════════════════════════════════════════════════════════

    /// The instruction's leading character has no operator behind it.
    #[error("[{location}] Unimplemented: {op}")]
    UnimplementedOperator {
        op: char,
        index: usize,
        location: SourceLocation,
    },

    /// The tape cursor moved outside `0..tape_len`.
    #[error("[{location}] Tape cursor out of bounds: {target} (tape length {tape_len})")]
    TapeOutOfBounds {
        target: i128,
        tape_len: usize,
        location: SourceLocation,
    },

    /// `)` reached with an empty call stack.
    #[error("[{location}] Call stack underflow: ')' without a matching '('")]
    CallStackUnderflow { index: usize, location: SourceLocation },

    /// Division or modulo by zero.
    #[error("[{location}] Division by zero in '{op}': {dividend} / 0")]
    DivisionByZero {
        op: char,
        dividend: i64,
        location: SourceLocation,
    },

    /// The configured instruction limit was reached.
    #[error("Instruction limit exceeded: {limit} instructions")]
    InstructionLimitExceeded { limit: u64 },

    // ═══════════════════════════════════════════════════════════════════
    // I/O Errors
    // ═══════════════════════════════════════════════════════════════════

    /// The output sink or the program file failed.
    #[error("I/O error during {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl PhooeyError {
    /// Wrap an I/O error with the operation that produced it.
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        PhooeyError::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            PhooeyError::UnterminatedString { .. }
            | PhooeyError::TruncatedOperator { .. }
            | PhooeyError::LiteralOutOfRange { .. }
            | PhooeyError::UnmatchedClose { .. }
            | PhooeyError::UnclosedBracket { .. } => ErrorCategory::Parse,

            PhooeyError::UnimplementedOperator { .. }
            | PhooeyError::TapeOutOfBounds { .. }
            | PhooeyError::CallStackUnderflow { .. }
            | PhooeyError::DivisionByZero { .. }
            | PhooeyError::InstructionLimitExceeded { .. } => ErrorCategory::Runtime,

            PhooeyError::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Get the error code for programmatic handling.
    pub fn code(&self) -> u32 {
        match self {
            // Parse: 1000-1999
            PhooeyError::UnterminatedString { .. } => 1001,
            PhooeyError::TruncatedOperator { .. } => 1002,
            PhooeyError::LiteralOutOfRange { .. } => 1003,
            PhooeyError::UnmatchedClose { .. } => 1004,
            PhooeyError::UnclosedBracket { .. } => 1005,

            // Runtime: 2000-2999
            PhooeyError::UnimplementedOperator { .. } => 2001,
            PhooeyError::TapeOutOfBounds { .. } => 2002,
            PhooeyError::CallStackUnderflow { .. } => 2003,
            PhooeyError::DivisionByZero { .. } => 2004,
            PhooeyError::InstructionLimitExceeded { .. } => 2005,

            // I/O: 3000-3999
            PhooeyError::Io { .. } => 3001,
        }
    }

    /// Process exit status for this error.
    ///
    /// An unimplemented operator aborts with status 255; everything else
    /// exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            PhooeyError::UnimplementedOperator { .. } => 255,
            _ => 1,
        }
    }

    /// Get the source location if available.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            PhooeyError::UnterminatedString { location }
            | PhooeyError::TruncatedOperator { location, .. }
            | PhooeyError::LiteralOutOfRange { location, .. }
            | PhooeyError::UnmatchedClose { location, .. }
            | PhooeyError::UnclosedBracket { location, .. }
            | PhooeyError::UnimplementedOperator { location, .. }
            | PhooeyError::TapeOutOfBounds { location, .. }
            | PhooeyError::CallStackUnderflow { location, .. }
            | PhooeyError::DivisionByZero { location, .. } => Some(*location),

            PhooeyError::InstructionLimitExceeded { .. } | PhooeyError::Io { .. } => None,
        }
    }
}

/// Error category for filtering and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Runtime,
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Parse => write!(f, "parse"),
            ErrorCategory::Runtime => write!(f, "runtime"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Result type alias for Phooey operations.
pub type PhooeyResult<T> = Result<T, PhooeyError>;
