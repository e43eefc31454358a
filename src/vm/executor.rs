//! The Phooey execution engine.
//!
//! The engine owns the program, the tape, the operand stack, the call stack
//! and the instruction pointer. Each step:
//!
//! 1. resolves the current instruction's operand,
//! 2. applies the operator to the machine state,
//! 3. moves to the next instruction or to a redirected one.
//!
//! The program halts when the pointer moves past the last instruction.
//!
//! # Operand resolution
//!
//! In priority order: an immediate literal; a special payload (read an
//! integer, read a byte, or pop the stack once and cache the result in the
//! instruction for every later visit); the operator's default source.
//!
//! # Control flow
//!
//! - `{` skips to just past its `}` when the cell differs from the operand.
//! - `[` skips to just past its `]` when the cell already equals the operand.
//! - `]` returns to its `[` while the cell differs from the operand, so the
//!   opening guard and its operand are evaluated again on every iteration.
//! - `(` saves its own index and operand; `)` resumes just past that `(`
//!   until the cell equals the saved value, then drops the frame.

use std::io::Write;
use std::time::Duration;
use tracing::{info, trace, warn};

use crate::ast::{Instruction, OperandSource, Operator, Payload, Program, SpecialKind};
use crate::core::error::{
    BoundsPolicy, DivisionByZeroPolicy, PhooeyError, PhooeyResult, SourceLocation,
};
use crate::core::stack::{CallStack, Stack};
use crate::core::tape::{Tape, TAPE_SIZE};
use crate::parser::jumps::JumpTable;
use crate::parser::parse_program;
use crate::runtime::host::Host;
use crate::runtime::io::{InputSource, EOF_CHAR};

/// Status of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// The pointer addresses an instruction.
    Running,
    /// The pointer has moved past the last instruction.
    Halted,
}

/// Configuration for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of tape cells.
    pub tape_size: usize,
    /// What happens when the cursor leaves the tape.
    pub bounds: BoundsPolicy,
    /// What happens on a zero divisor.
    pub division_by_zero: DivisionByZeroPolicy,
    /// Maximum instructions to execute (`None` = unlimited).
    pub max_instructions: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tape_size: TAPE_SIZE,
            bounds: BoundsPolicy::Error,
            division_by_zero: DivisionByZeroPolicy::Error,
            max_instructions: None,
        }
    }
}

impl EngineConfig {
    /// Strict mode: every fault is an error and runs are capped.
    pub fn strict() -> Self {
        Self {
            max_instructions: Some(10_000_000),
            ..Self::default()
        }
    }

    /// Permissive mode: the cursor wraps and zero divisors produce zero.
    pub fn permissive() -> Self {
        Self {
            bounds: BoundsPolicy::Wrap,
            division_by_zero: DivisionByZeroPolicy::ReturnZero,
            ..Self::default()
        }
    }
}

/// Where execution continues after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Next,
    Resume(usize),
}

/// The Phooey virtual machine.
///
/// Generic over its collaborators: `I` supplies input, `O` receives output
/// and `H` provides sleeping, time and randomness.
pub struct Engine<I, O, H> {
    config: EngineConfig,
    instructions: Vec<Instruction>,
    jumps: JumpTable,
    tape: Tape,
    stack: Stack,
    calls: CallStack,
    pointer: usize,
    steps: u64,
    input: I,
    output: O,
    host: H,
}

impl<I: InputSource, O: Write, H: Host> Engine<I, O, H> {
    /// Create an engine with default configuration.
    pub fn new(program: Program, input: I, output: O, host: H) -> Self {
        Self::with_config(program, EngineConfig::default(), input, output, host)
    }

    /// Create an engine with custom configuration.
    pub fn with_config(program: Program, config: EngineConfig, input: I, output: O, host: H) -> Self {
        let tape = Tape::with_size(config.tape_size, config.bounds);
        Self {
            config,
            instructions: program.instructions,
            jumps: program.jumps,
            tape,
            stack: Stack::new(),
            calls: CallStack::new(),
            pointer: 0,
            steps: 0,
            input,
            output,
            host,
        }
    }

    /// Tokenize `source` and build an engine for it.
    pub fn from_source(source: impl AsRef<[u8]>, config: EngineConfig, input: I, output: O, host: H) -> PhooeyResult<Self> {
        let program = parse_program(source)?;
        Ok(Self::with_config(program, config, input, output, host))
    }

    pub fn status(&self) -> EngineStatus {
        if self.pointer < self.instructions.len() {
            EngineStatus::Running
        } else {
            EngineStatus::Halted
        }
    }

    /// Run until the program halts. Returns the number of steps executed.
    pub fn run(&mut self) -> PhooeyResult<u64> {
        while self.status() == EngineStatus::Running {
            self.step()?;
        }
        info!(steps = self.steps, "program halted");
        Ok(self.steps)
    }

    /// Execute one instruction.
    pub fn step(&mut self) -> PhooeyResult<EngineStatus> {
        if self.status() == EngineStatus::Halted {
            return Ok(EngineStatus::Halted);
        }
        if let Some(limit) = self.config.max_instructions {
            if self.steps >= limit {
                return Err(PhooeyError::InstructionLimitExceeded { limit });
            }
        }

        let index = self.pointer;
        trace!(pointer = index, inst = %self.instructions[index], "step");

        let operand = self.resolve_operand(index)?;
        self.pointer = match self.apply(index, operand)? {
            Flow::Next => index + 1,
            Flow::Resume(target) => target,
        };
        self.steps += 1;
        Ok(self.status())
    }

    /// Resolve the operand of the instruction at `index`.
    fn resolve_operand(&mut self, index: usize) -> PhooeyResult<i64> {
        let (payload, source) = {
            let inst = &self.instructions[index];
            (inst.payload, inst.source)
        };

        match payload {
            Payload::Immediate(value) => Ok(value),
            Payload::Special(SpecialKind::ReadInt) => self.input.read_int(),
            Payload::Special(SpecialKind::ReadChar) => {
                Ok(self.input.read_byte()?.map_or(EOF_CHAR, i64::from))
            }
            Payload::Special(SpecialKind::PopStackOnce) => {
                let value = self.stack.pop();
                self.instructions[index].payload = Payload::Immediate(value);
                Ok(value)
            }
            Payload::None => Ok(match source {
                OperandSource::None => 0,
                OperandSource::StackPop => self.stack.pop(),
                OperandSource::TapeRead => self.tape.current(),
                OperandSource::Constant(value) => value,
            }),
        }
    }

    /// Apply the instruction at `index` with its resolved operand.
    fn apply(&mut self, index: usize, operand: i64) -> PhooeyResult<Flow> {
        let location = self.instructions[index].location;
        let leading = self.instructions[index].leading().unwrap_or('\0');
        let Some(op) = Operator::from_char(leading) else {
            return Err(PhooeyError::UnimplementedOperator {
                op: leading,
                index,
                location,
            });
        };
        let cell = self.tape.current();

        match op {
            Operator::StringLiteral => {
                let body = self.instructions[index].string_body().to_vec();
                self.emit(&body)?;
            }

            // ═══════════════════════════════════════════════════════════
            // Arithmetic
            // ═══════════════════════════════════════════════════════════

            Operator::Assign => self.tape.set_current(operand),
            Operator::Multiply => self.tape.set_current(cell.wrapping_mul(operand)),
            Operator::Add => self.tape.set_current(cell.wrapping_add(operand)),
            Operator::Subtract => self.tape.set_current(cell.wrapping_sub(operand)),
            Operator::ReverseSubtract => self.tape.set_current(operand.wrapping_sub(cell)),
            Operator::Equals => self.tape.set_current(i64::from(cell == operand)),
            Operator::Divide => {
                let value = self.divide(op, cell, operand, location, i64::wrapping_div)?;
                self.tape.set_current(value);
            }
            Operator::ReverseDivide => {
                let value = self.divide(op, operand, cell, location, i64::wrapping_div)?;
                self.tape.set_current(value);
            }
            Operator::Modulo => {
                let value = self.divide(op, cell, operand, location, i64::wrapping_rem)?;
                self.tape.set_current(value);
            }
            Operator::Power => {
                // Computed in floating point and truncated; f64 -> i64 saturates.
                let value = (cell as f64).powf(operand as f64) as i64;
                self.tape.set_current(value);
            }

            // ═══════════════════════════════════════════════════════════
            // Tape, Stack and Time
            // ═══════════════════════════════════════════════════════════

            Operator::Right => self.tape.right(operand, location)?,
            Operator::Left => self.tape.left(operand, location)?,
            Operator::Push => self.stack.push(operand),
            Operator::Sleep => {
                let seconds = u64::try_from(operand).unwrap_or(0);
                self.host.sleep(Duration::from_secs(seconds));
            }
            Operator::Debug => self.dump()?,

            // ═══════════════════════════════════════════════════════════
            // Control Flow
            // ═══════════════════════════════════════════════════════════

            Operator::CallOpen => self.calls.push(index, operand),
            Operator::CallClose => {
                let frame = *self
                    .calls
                    .top()
                    .ok_or(PhooeyError::CallStackUnderflow { index, location })?;
                if cell != frame.compare {
                    return Ok(Flow::Resume(frame.return_index + 1));
                }
                self.calls.pop();
            }
            Operator::IfOpen => {
                if cell != operand {
                    let close = self.jump_target(index, '{', location)?;
                    return Ok(Flow::Resume(close + 1));
                }
            }
            Operator::IfClose => {}
            Operator::LoopOpen => {
                if cell == operand {
                    let close = self.jump_target(index, '[', location)?;
                    return Ok(Flow::Resume(close + 1));
                }
            }
            Operator::LoopClose => {
                if cell != operand {
                    let open = self.jump_target(index, ']', location)?;
                    return Ok(Flow::Resume(open));
                }
            }

            // ═══════════════════════════════════════════════════════════
            // Output and Extended
            // ═══════════════════════════════════════════════════════════

            Operator::Print => self.print(index, operand)?,
            Operator::Extended => self.extended(index, operand)?,
        }

        Ok(Flow::Next)
    }

    /// `numerator / denominator` under the configured zero-divisor policy.
    fn divide(
        &self,
        op: Operator,
        numerator: i64,
        denominator: i64,
        location: SourceLocation,
        combine: fn(i64, i64) -> i64,
    ) -> PhooeyResult<i64> {
        if denominator != 0 {
            return Ok(combine(numerator, denominator));
        }
        match self.config.division_by_zero {
            DivisionByZeroPolicy::ReturnZero => Ok(0),
            DivisionByZeroPolicy::Error => Err(PhooeyError::DivisionByZero {
                op: op.symbol(),
                dividend: numerator,
                location,
            }),
        }
    }

    fn jump_target(&self, index: usize, bracket: char, location: SourceLocation) -> PhooeyResult<usize> {
        self.jumps.target(index).ok_or(if bracket == ']' {
            PhooeyError::UnmatchedClose { bracket, location }
        } else {
            PhooeyError::UnclosedBracket { bracket, location }
        })
    }

    /// `$h` hex, `$i` decimal, `$c` byte.
    fn print(&mut self, index: usize, operand: i64) -> PhooeyResult<()> {
        match self.instructions[index].mode() {
            Some('h') => self.emit(format!("{:x}", operand).as_bytes()),
            Some('i') => self.emit(operand.to_string().as_bytes()),
            Some('c') => self.emit(&[operand as u8]),
            mode => {
                warn!(?mode, location = %self.instructions[index].location, "unknown mode for '$'");
                Ok(())
            }
        }
    }

    /// `~` operators. A lowercase mode letter stores the result in the cell,
    /// an uppercase one pushes it; `s` produces no result.
    ///
    /// `~i` peeks the input and blocks on an interactive terminal until a
    /// byte arrives or input is closed.
    fn extended(&mut self, index: usize, operand: i64) -> PhooeyResult<()> {
        let original = self.instructions[index].mode().unwrap_or('\0');
        let mode = original.to_ascii_lowercase();

        let result = match mode {
            'i' => i64::from(self.input.has_more()?),
            '?' => self.host.random_between(0, operand),
            'r' => self.host.random_between(self.tape.current(), operand),
            's' => {
                let millis = u64::try_from(operand).unwrap_or(0);
                self.host.sleep(Duration::from_millis(millis));
                return Ok(());
            }
            't' => self.host.now_millis(),
            _ => 0,
        };

        if mode == original {
            self.tape.set_current(result);
        } else {
            self.stack.push(result);
        }
        Ok(())
    }

    /// Write the `?` diagnostic dump.
    fn dump(&mut self) -> PhooeyResult<()> {
        let mut text = format!(">>> DEBUG <<<\nTape: {}\nStack:\n", self.tape);
        for value in self.stack.as_slice() {
            text.push_str(&value.to_string());
            text.push('\n');
        }
        self.emit(text.as_bytes())
    }

    /// Write and flush so output interleaves exactly with execution.
    fn emit(&mut self, bytes: &[u8]) -> PhooeyResult<()> {
        self.output
            .write_all(bytes)
            .and_then(|_| self.output.flush())
            .map_err(|e| PhooeyError::io("output write", e))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.calls
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Instructions executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Consume the engine, returning its output sink.
    pub fn into_output(self) -> O {
        self.output
    }
}
