//! Tokenizer for Phooey.
//!
//! Syntax:
//! - Operators are single punctuation bytes; every other byte is a comment
//!   and is skipped. Source need not be UTF-8.
//! - `$` and `~` take one extra mode byte (`$i`, `~T`, ...).
//! - A decimal literal may follow an operator: `+5`, `>_2` (`_` negates).
//! - Otherwise a special marker may follow: `.` read integer, `:` read
//!   character, `!` pop the stack once.
//! - `"..."` is a string literal printed verbatim.
//!
//! # Architecture
//!
//! - `mod.rs`: the scanner producing [`Instruction`]s with source locations
//! - `jumps`: bracket matching into a [`JumpTable`](jumps::JumpTable)

pub mod jumps;

use crate::ast::{Instruction, Operator, Payload, Program, SpecialKind};
use crate::core::error::{PhooeyError, PhooeyResult, SourceLocation};
use tracing::debug;

/// Tokenize source and resolve its brackets.
pub fn parse_program(source: impl AsRef<[u8]>) -> PhooeyResult<Program> {
    let instructions = tokenize(source)?;
    Program::new(instructions)
}

/// Tokenize source into instructions.
///
/// Source is scanned as raw bytes, so it need not be valid UTF-8; bytes
/// outside the operator set are skipped like any other comment. The whole
/// source is scanned before anything executes.
pub fn tokenize(source: impl AsRef<[u8]>) -> PhooeyResult<Vec<Instruction>> {
    let instructions = Tokenizer::new(source.as_ref()).run()?;
    debug!(count = instructions.len(), "tokenized program");
    Ok(instructions)
}

/// Byte scanner with line/column tracking. Columns count bytes.
struct Tokenizer<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    fn current(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    fn advance(&mut self) {
        if let Some(b) = self.current() {
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn run(mut self) -> PhooeyResult<Vec<Instruction>> {
        let mut instructions = Vec::new();
        while let Some(b) = self.current() {
            match Operator::from_char(char::from(b)) {
                Some(op) => instructions.push(self.instruction(op)?),
                None => self.advance(),
            }
        }
        Ok(instructions)
    }

    /// Scan one instruction starting at the operator byte.
    fn instruction(&mut self, op: Operator) -> PhooeyResult<Instruction> {
        let start = self.pos;
        let location = self.location();

        if op == Operator::StringLiteral {
            self.string_literal(location)?;
            let raw = self.bytes[start..self.pos].to_vec();
            return Ok(Instruction::new(raw, op.default_source(), Payload::None).at(location));
        }

        self.advance();
        for _ in 0..op.mode_width() {
            if self.current().is_none() {
                return Err(PhooeyError::TruncatedOperator {
                    op: op.symbol(),
                    location,
                });
            }
            self.advance();
        }

        let payload = if let Some(value) = self.literal()? {
            Payload::Immediate(value)
        } else if let Some(kind) = self.current().and_then(|b| SpecialKind::from_marker(char::from(b))) {
            self.advance();
            Payload::Special(kind)
        } else {
            Payload::None
        };

        let raw = self.bytes[start..self.pos].to_vec();
        Ok(Instruction::new(raw, op.default_source(), payload).at(location))
    }

    /// Consume `"` ... `"` inclusive.
    fn string_literal(&mut self, location: SourceLocation) -> PhooeyResult<()> {
        self.advance();
        loop {
            match self.current() {
                Some(b'"') => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => self.advance(),
                None => return Err(PhooeyError::UnterminatedString { location }),
            }
        }
    }

    /// Consume an optional `_`-negated decimal literal.
    fn literal(&mut self) -> PhooeyResult<Option<i64>> {
        let negative = match (self.current(), self.peek(1)) {
            (Some(b'_'), Some(d)) if d.is_ascii_digit() => true,
            (Some(d), _) if d.is_ascii_digit() => false,
            _ => return Ok(None),
        };

        let location = self.location();
        let mut text = String::new();
        if negative {
            text.push('-');
            self.advance();
        }
        while let Some(d) = self.current().filter(u8::is_ascii_digit) {
            text.push(char::from(d));
            self.advance();
        }

        text.parse::<i64>()
            .map(Some)
            .map_err(|_| PhooeyError::LiteralOutOfRange { text, location })
    }
}
