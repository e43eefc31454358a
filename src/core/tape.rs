//! The memory tape.
//!
//! A fixed number of signed 64-bit cells, all initially zero, addressed by a
//! single cursor. The tape also remembers the furthest cell the cursor ever
//! reached so the diagnostic dump knows how much of it to show.

use std::fmt;
use super::error::{BoundsPolicy, PhooeyError, PhooeyResult, SourceLocation};

/// Default number of tape cells.
pub const TAPE_SIZE: usize = 30_000;

#[derive(Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<i64>,
    cursor: usize,
    furthest: usize,
    policy: BoundsPolicy,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Create a tape of [`TAPE_SIZE`] cells that rejects out-of-range moves.
    pub fn new() -> Self {
        Self::with_size(TAPE_SIZE, BoundsPolicy::Error)
    }

    /// Create a tape of `size` cells. A size of zero is bumped to one so the
    /// cursor always addresses a real cell.
    pub fn with_size(size: usize, policy: BoundsPolicy) -> Self {
        Self {
            cells: vec![0; size.max(1)],
            cursor: 0,
            furthest: 0,
            policy,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a tape has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Furthest cursor position ever reached.
    #[inline]
    pub fn furthest(&self) -> usize {
        self.furthest
    }

    /// Value of the cell under the cursor.
    #[inline]
    pub fn current(&self) -> i64 {
        self.cells[self.cursor]
    }

    #[inline]
    pub fn set_current(&mut self, value: i64) {
        self.cells[self.cursor] = value;
    }

    /// Read an arbitrary cell.
    pub fn get(&self, index: usize) -> Option<i64> {
        self.cells.get(index).copied()
    }

    pub fn right(&mut self, amount: i64, location: SourceLocation) -> PhooeyResult<()> {
        self.shift(amount as i128, location)
    }

    pub fn left(&mut self, amount: i64, location: SourceLocation) -> PhooeyResult<()> {
        self.shift(-(amount as i128), location)
    }

    /// Move the cursor by `delta`, applying the bounds policy.
    fn shift(&mut self, delta: i128, location: SourceLocation) -> PhooeyResult<()> {
        let len = self.cells.len() as i128;
        let target = self.cursor as i128 + delta;

        let landed = if (0..len).contains(&target) {
            target
        } else {
            match self.policy {
                BoundsPolicy::Error => {
                    return Err(PhooeyError::TapeOutOfBounds {
                        target,
                        tape_len: self.cells.len(),
                        location,
                    });
                }
                BoundsPolicy::Wrap => target.rem_euclid(len),
                BoundsPolicy::Clamp => target.clamp(0, len - 1),
            }
        };

        self.cursor = landed as usize;
        if self.cursor > self.furthest {
            self.furthest = self.cursor;
        }
        Ok(())
    }

    /// Cells from 0 through the high-water mark.
    pub fn visited(&self) -> &[i64] {
        &self.cells[..=self.furthest]
    }
}

/// Renders `[c0 c1 >cur< ... cN]` up to the high-water mark.
impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.visited().iter().enumerate() {
            if i == self.cursor {
                write!(f, ">{}<", value)?;
            } else {
                write!(f, "{}", value)?;
            }
            if i != self.furthest {
                write!(f, " ")?;
            }
        }
        write!(f, "]")
    }
}

impl fmt::Debug for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nonzero: Vec<_> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .collect();

        write!(f, "Tape{{cursor: {}, ", self.cursor)?;
        if nonzero.is_empty() {
            write!(f, "all zero}}")
        } else {
            for (i, (addr, val)) in nonzero.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "[{}]={}", addr, val)?;
            }
            write!(f, "}}")
        }
    }
}
