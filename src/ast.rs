//! Instruction model for Phooey programs.
//!
//! A program is a flat sequence of [`Instruction`]s plus a [`JumpTable`]
//! resolving its brackets. Each instruction keeps the exact source bytes it
//! was scanned from; the engine dispatches on the leading byte. Source is
//! not required to be UTF-8.

use std::fmt;
use crate::core::error::{PhooeyResult, SourceLocation};
use crate::parser::jumps::JumpTable;

/// Where an instruction's operand comes from when it carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSource {
    /// Resolves to 0.
    None,
    /// Pops the operand stack.
    StackPop,
    /// Reads the cell under the tape cursor.
    TapeRead,
    /// A value fixed by the operator table.
    Constant(i64),
}

/// Operand resolution modes that need a side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKind {
    /// `.` reads a whitespace-delimited integer from input.
    ReadInt,
    /// `:` reads one raw byte from input.
    ReadChar,
    /// `!` pops the stack the first time only.
    PopStackOnce,
}

impl SpecialKind {
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            '.' => Some(SpecialKind::ReadInt),
            ':' => Some(SpecialKind::ReadChar),
            '!' => Some(SpecialKind::PopStackOnce),
            _ => None,
        }
    }

    pub fn marker(&self) -> char {
        match self {
            SpecialKind::ReadInt => '.',
            SpecialKind::ReadChar => ':',
            SpecialKind::PopStackOnce => '!',
        }
    }
}

impl fmt::Display for SpecialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialKind::ReadInt => write!(f, "ReadInt"),
            SpecialKind::ReadChar => write!(f, "ReadChar"),
            SpecialKind::PopStackOnce => write!(f, "PopStackOnce"),
        }
    }
}

/// Operand carried by the instruction itself.
///
/// `Special(PopStackOnce)` becomes `Immediate` after its first execution and
/// stays that way for the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Payload {
    #[default]
    None,
    Immediate(i64),
    Special(SpecialKind),
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::None => write!(f, "{{}}"),
            Payload::Immediate(v) => write!(f, "{}", v),
            Payload::Special(kind) => write!(f, "{}", kind),
        }
    }
}

/// Every operator of the language, keyed by its leading character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `"..."`
    StringLiteral,
    /// `&`
    Assign,
    /// `*`
    Multiply,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `;` computes operand - cell.
    ReverseSubtract,
    /// `=`
    Equals,
    /// `/`
    Divide,
    /// `\` computes operand / cell.
    ReverseDivide,
    /// `%`
    Modulo,
    /// `^`
    Power,
    /// `>`
    Right,
    /// `<`
    Left,
    /// `@`
    Push,
    /// `#`
    Sleep,
    /// `(`
    CallOpen,
    /// `)`
    CallClose,
    /// `?`
    Debug,
    /// `{`
    IfOpen,
    /// `}`
    IfClose,
    /// `[`
    LoopOpen,
    /// `]`
    LoopClose,
    /// `$` + mode
    Print,
    /// `~` + mode
    Extended,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        let op = match c {
            '"' => Operator::StringLiteral,
            '&' => Operator::Assign,
            '*' => Operator::Multiply,
            '+' => Operator::Add,
            '-' => Operator::Subtract,
            ';' => Operator::ReverseSubtract,
            '=' => Operator::Equals,
            '/' => Operator::Divide,
            '\\' => Operator::ReverseDivide,
            '%' => Operator::Modulo,
            '^' => Operator::Power,
            '>' => Operator::Right,
            '<' => Operator::Left,
            '@' => Operator::Push,
            '#' => Operator::Sleep,
            '(' => Operator::CallOpen,
            ')' => Operator::CallClose,
            '?' => Operator::Debug,
            '{' => Operator::IfOpen,
            '}' => Operator::IfClose,
            '[' => Operator::LoopOpen,
            ']' => Operator::LoopClose,
            '$' => Operator::Print,
            '~' => Operator::Extended,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::StringLiteral => '"',
            Operator::Assign => '&',
            Operator::Multiply => '*',
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::ReverseSubtract => ';',
            Operator::Equals => '=',
            Operator::Divide => '/',
            Operator::ReverseDivide => '\\',
            Operator::Modulo => '%',
            Operator::Power => '^',
            Operator::Right => '>',
            Operator::Left => '<',
            Operator::Push => '@',
            Operator::Sleep => '#',
            Operator::CallOpen => '(',
            Operator::CallClose => ')',
            Operator::Debug => '?',
            Operator::IfOpen => '{',
            Operator::IfClose => '}',
            Operator::LoopOpen => '[',
            Operator::LoopClose => ']',
            Operator::Print => '$',
            Operator::Extended => '~',
        }
    }

    /// Raw characters consumed after the operator character itself.
    pub fn mode_width(&self) -> usize {
        match self {
            Operator::Print | Operator::Extended => 1,
            _ => 0,
        }
    }

    /// Operand source used when the instruction carries no payload.
    pub fn default_source(&self) -> OperandSource {
        match self {
            Operator::Print | Operator::Push | Operator::Sleep | Operator::Debug => {
                OperandSource::TapeRead
            }
            Operator::Right | Operator::Left => OperandSource::Constant(1),
            Operator::CallOpen | Operator::IfOpen | Operator::LoopOpen => {
                OperandSource::Constant(0)
            }
            Operator::Extended
            | Operator::StringLiteral
            | Operator::CallClose
            | Operator::IfClose
            | Operator::LoopClose => OperandSource::None,
            Operator::Assign
            | Operator::Multiply
            | Operator::Add
            | Operator::Subtract
            | Operator::ReverseSubtract
            | Operator::Equals
            | Operator::Divide
            | Operator::ReverseDivide
            | Operator::Modulo
            | Operator::Power => OperandSource::StackPop,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Source bytes exactly as scanned: operator, mode byte, literal digits
    /// or special marker, or the quoted string with its delimiters.
    pub raw: Vec<u8>,
    pub source: OperandSource,
    pub payload: Payload,
    pub location: SourceLocation,
}

impl Instruction {
    pub fn new(raw: impl Into<Vec<u8>>, source: OperandSource, payload: Payload) -> Self {
        Self {
            raw: raw.into(),
            source,
            payload,
            location: SourceLocation::default(),
        }
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    /// First raw byte, widened to a `char`.
    pub fn leading(&self) -> Option<char> {
        self.raw.first().map(|&b| char::from(b))
    }

    /// Second raw byte, used as the `$`/`~` mode letter.
    pub fn mode(&self) -> Option<char> {
        self.raw.get(1).map(|&b| char::from(b))
    }

    /// Body of a string literal, without its quotes. Bytes are untouched.
    pub fn string_body(&self) -> &[u8] {
        let inner = self.raw.strip_prefix(b"\"").unwrap_or(&self.raw[..]);
        inner.strip_suffix(b"\"").unwrap_or(inner)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instruction(`{}`, {})", String::from_utf8_lossy(&self.raw), self.payload)
    }
}

/// A tokenized program with its resolved brackets.
#[derive(Debug, Clone)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    pub jumps: JumpTable,
}

impl Program {
    /// Build the jump table for `instructions`.
    pub fn new(instructions: Vec<Instruction>) -> PhooeyResult<Self> {
        let jumps = JumpTable::build(&instructions)?;
        Ok(Self {
            instructions,
            jumps,
        })
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
