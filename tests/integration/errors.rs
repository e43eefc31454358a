//! Parse and runtime failures through the public API.

#![cfg(test)]

use crate::common::*;

use phooey::*;

mod parse_errors {
    use super::*;

    #[test]
    fn unmatched_close_reports_location() {
        let err = parse_program("+ }").unwrap_err();
        assert_eq!(err.to_string(), "[1:3] Unmatched '}'");
        assert_eq!(err.category(), ErrorCategory::Parse);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn unclosed_loop() {
        let err = parse_program("&1\n  [ +1").unwrap_err();
        assert_eq!(err.location(), Some(SourceLocation::new(2, 3)));
        assert_eq!(err.code(), 1005);
    }

    #[test]
    fn unterminated_string() {
        let err = parse_program("\"never closed").unwrap_err();
        assert_eq!(err.to_string(), "[1:1] Unterminated string literal");
    }

    #[test]
    fn nothing_runs_when_parsing_fails() {
        // The whole source is scanned before execution begins.
        let result = Engine::from_source(
            "\"printed?\" ]",
            EngineConfig::default(),
            ReaderInput::scripted(""),
            Vec::new(),
            RecordingHost::new(0),
        );
        assert!(matches!(result, Err(PhooeyError::UnmatchedClose { bracket: ']', .. })));
    }
}

mod runtime_errors {
    use super::*;

    #[test]
    fn tape_underflow_keeps_earlier_output() {
        let (err, printed) = run_err("\"before\" <", EngineConfig::default());
        assert_eq!(printed, "before");
        assert_eq!(err.to_string(), "[1:10] Tape cursor out of bounds: -1 (tape length 30000)");
        assert_eq!(err.category(), ErrorCategory::Runtime);
    }

    #[test]
    fn division_by_zero() {
        let (err, _) = run_err("&7 /0", EngineConfig::default());
        assert_eq!(err.to_string(), "[1:4] Division by zero in '/': 7 / 0");
    }

    #[test]
    fn call_stack_underflow() {
        let (err, _) = run_err("&1 )", EngineConfig::default());
        assert!(matches!(err, PhooeyError::CallStackUnderflow { index: 1, .. }));
    }

    #[test]
    fn instruction_limit() {
        let config = EngineConfig {
            max_instructions: Some(100),
            ..EngineConfig::default()
        };
        let (err, _) = run_err("[1 ]1", config);
        assert_eq!(err.to_string(), "Instruction limit exceeded: 100 instructions");
        assert_eq!(err.location(), None);
    }

    #[test]
    fn unimplemented_operator_exit_status() {
        let program = Program::new(vec![
            Instruction::new("+3", OperandSource::StackPop, Payload::Immediate(3)),
            Instruction::new("x", OperandSource::None, Payload::None),
        ])
        .unwrap();
        let mut e = Engine::new(program, ReaderInput::scripted(""), Vec::new(), RecordingHost::new(0));
        let err = e.run().unwrap_err();
        assert_eq!(err.to_string(), "[?:?] Unimplemented: x");
        assert_eq!(err.exit_code(), 255);
        // The instruction before it still ran.
        assert_eq!(e.tape().current(), 3);
    }
}
