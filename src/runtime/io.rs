//! Program input for the Phooey engine.
//!
//! Input is consumed lazily, only when an instruction asks for it:
//!
//! ```text
//! &.     # cell := next integer from input
//! &:     # cell := next byte from input (-1 at end of input)
//! ~i     # cell := 1 if any input remains, else 0
//! ```
//!
//! The engine talks to an [`InputSource`]; [`ReaderInput`] adapts any
//! `BufRead` (stdin, a file, an in-memory script) to it.

use std::io::{self, BufRead, Cursor};
use crate::core::error::{PhooeyError, PhooeyResult};

/// Value produced by a character read once input is exhausted.
pub const EOF_CHAR: i64 = -1;

/// Source of runtime input.
pub trait InputSource {
    /// Read the next whitespace-delimited decimal integer. Yields 0 when no
    /// integer can be parsed.
    fn read_int(&mut self) -> PhooeyResult<i64>;

    /// Read the next raw byte, or `None` at end of input.
    fn read_byte(&mut self) -> PhooeyResult<Option<u8>>;

    /// Whether at least one more byte can be read.
    ///
    /// This peeks the input, so on an interactive terminal it blocks until a
    /// byte arrives or the stream closes.
    fn has_more(&mut self) -> PhooeyResult<bool>;
}

/// [`InputSource`] over any buffered reader.
#[derive(Debug)]
pub struct ReaderInput<R> {
    reader: R,
}

/// Input read from the process's standard input.
pub type StdinInput = ReaderInput<io::StdinLock<'static>>;

impl<R: BufRead> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn peek_byte(&mut self) -> PhooeyResult<Option<u8>> {
        let buf = self
            .reader
            .fill_buf()
            .map_err(|e| PhooeyError::io("input read", e))?;
        Ok(buf.first().copied())
    }

    fn bump(&mut self) {
        self.reader.consume(1);
    }
}

impl StdinInput {
    pub fn stdin() -> Self {
        ReaderInput::new(io::stdin().lock())
    }
}

impl ReaderInput<Cursor<Vec<u8>>> {
    /// Input fed from a fixed byte script.
    pub fn scripted(script: impl Into<Vec<u8>>) -> Self {
        ReaderInput::new(Cursor::new(script.into()))
    }
}

impl<R: BufRead> InputSource for ReaderInput<R> {
    fn read_int(&mut self) -> PhooeyResult<i64> {
        while let Some(b) = self.peek_byte()? {
            if !b.is_ascii_whitespace() {
                break;
            }
            self.bump();
        }

        let mut negative = false;
        if let Some(sign @ (b'-' | b'+')) = self.peek_byte()? {
            negative = sign == b'-';
            self.bump();
        }

        let mut value: i64 = 0;
        let mut saw_digit = false;
        while let Some(b) = self.peek_byte()? {
            if !b.is_ascii_digit() {
                break;
            }
            saw_digit = true;
            let digit = i64::from(b - b'0');
            // Accumulate toward the sign so i64::MIN parses; overflow saturates.
            value = if negative {
                value.saturating_mul(10).saturating_sub(digit)
            } else {
                value.saturating_mul(10).saturating_add(digit)
            };
            self.bump();
        }

        Ok(if saw_digit { value } else { 0 })
    }

    fn read_byte(&mut self) -> PhooeyResult<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.bump();
        }
        Ok(byte)
    }

    fn has_more(&mut self) -> PhooeyResult<bool> {
        Ok(self.peek_byte()?.is_some())
    }
}
