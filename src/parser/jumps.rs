//! Bracket resolution.
//!
//! Two bracket families exist: conditionals `{ }` and loops `[ ]`. Each
//! family must nest properly on its own, but the two may interleave freely
//! (`{ [ } ]` is valid). One forward pass with a pending stack per family
//! fills a single table indexed by instruction position.

use crate::ast::{Instruction, Operator};
use crate::core::error::{PhooeyError, PhooeyResult};
use tracing::debug;

/// Resolved control-flow targets, one slot per instruction.
///
/// - `{` → index of its `}`
/// - `[` → index of its `]`
/// - `]` → index of its `[`
///
/// The engine resumes *after* the stored index for `{` and `[`, and *at* the
/// stored index for `]`, so a loop re-evaluates its opening guard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpTable {
    targets: Vec<Option<usize>>,
}

impl JumpTable {
    pub fn build(instructions: &[Instruction]) -> PhooeyResult<Self> {
        let mut targets = vec![None; instructions.len()];
        let mut pending_ifs: Vec<usize> = Vec::new();
        let mut pending_loops: Vec<usize> = Vec::new();

        for (index, inst) in instructions.iter().enumerate() {
            match inst.leading().and_then(Operator::from_char) {
                Some(Operator::IfOpen) => pending_ifs.push(index),
                Some(Operator::IfClose) => {
                    let open = pending_ifs.pop().ok_or(PhooeyError::UnmatchedClose {
                        bracket: '}',
                        location: inst.location,
                    })?;
                    targets[open] = Some(index);
                }
                Some(Operator::LoopOpen) => pending_loops.push(index),
                Some(Operator::LoopClose) => {
                    let open = pending_loops.pop().ok_or(PhooeyError::UnmatchedClose {
                        bracket: ']',
                        location: inst.location,
                    })?;
                    targets[open] = Some(index);
                    targets[index] = Some(open);
                }
                _ => {}
            }
        }

        // Report the innermost unclosed opener first.
        if let Some(&open) = pending_ifs.last() {
            return Err(PhooeyError::UnclosedBracket {
                bracket: '{',
                location: instructions[open].location,
            });
        }
        if let Some(&open) = pending_loops.last() {
            return Err(PhooeyError::UnclosedBracket {
                bracket: '[',
                location: instructions[open].location,
            });
        }

        let table = Self { targets };
        debug!(pairs = table.pairs(), "built jump table");
        Ok(table)
    }

    /// Target recorded for the instruction at `index`.
    #[inline]
    pub fn target(&self, index: usize) -> Option<usize> {
        self.targets.get(index).copied().flatten()
    }

    /// Number of matched bracket pairs.
    fn pairs(&self) -> usize {
        self.targets
            .iter()
            .enumerate()
            .filter(|(i, t)| matches!(t, Some(target) if target > i))
            .count()
    }
}
