//! Whole-program tests.
//!
//! These tests verify:
//! - String output and comments
//! - Loops, conditionals and call frames on real programs
//! - Arithmetic and print modes end to end
//! - The diagnostic dump
//! - Tape policies from configuration

#![cfg(test)]

use crate::common::*;

use phooey::*;

// =============================================================================
// Output
// =============================================================================

mod output {
    use super::*;

    #[test]
    fn hello_world() {
        assert_eq!(output("\"Hello, World!\" &10 $c"), "Hello, World!\n");
    }

    #[test]
    fn comments_are_ignored() {
        assert_eq!(output("This program prints 7: &7 $i"), "7");
    }

    #[test]
    fn latin1_source_runs() {
        // Neither the comment nor the string body is valid UTF-8.
        let source: &[u8] = b"caf\xe9 comment &42 $i \"\xe9t\xe9\" &1 $i";
        let mut e = Engine::from_source(
            source,
            EngineConfig::default(),
            ReaderInput::scripted(""),
            Vec::new(),
            RecordingHost::new(0),
        )
        .unwrap();
        e.run().unwrap();
        assert_eq!(e.output(), b"42\xe9t\xe91");
    }

    #[test]
    fn print_modes() {
        assert_eq!(output("&48879 $h"), "beef");
        assert_eq!(output("$c72 $c105"), "Hi");
        assert_eq!(output("&_12 $i"), "-12");
    }

    #[test]
    fn arithmetic_chain() {
        // (2 ^ 4 + 4) * 3 / 7 = 8
        assert_eq!(output("&2 ^4 +4 *3 /7 $i"), "8");
        // Reverse forms take the operand on the left.
        assert_eq!(output("&2 ;10 $i \" \" &4 \\20 $i"), "8 5");
    }

    #[test]
    fn debug_dump_mid_program() {
        let out = output("&3 @ @4 ? \"after\"");
        assert_eq!(out, ">>> DEBUG <<<\nTape: [>3<]\nStack:\n3\n4\nafter");
    }
}

// =============================================================================
// Control Flow
// =============================================================================

mod control_flow {
    use super::*;

    #[test]
    fn factorial() {
        // cell 0 counts down, cell 1 accumulates.
        assert_eq!(output("&5 > &1 < [0 @ > * < -1 ]0 > $i"), "120");
    }

    #[test]
    fn fibonacci() {
        let source = "> > &1 < < [10 > $i \" \" @ > @ < & > + < < +1 ]10";
        assert_eq!(output(source), "0 1 1 2 3 5 8 13 21 34 ");
    }

    #[test]
    fn parity_with_two_guards() {
        let source = |n: i64| format!("&{} %2 {{0 \"even\" }} {{1 \"odd\" }}", n);
        assert_eq!(output(&source(7)), "odd");
        assert_eq!(output(&source(8)), "even");
    }

    #[test]
    fn countdown_with_call_frame() {
        assert_eq!(output("&3 (0 $i -1 )"), "321");
    }

    #[test]
    fn nested_call_frames() {
        // The outer frame runs the inner one twice.
        let e = run("(2 > &0 (3 +1 $i ) < +1 )");
        assert_eq!(e.output(), b"123123");
        assert_eq!(e.tape().get(0), Some(2));
        assert_eq!(e.tape().get(1), Some(3));
        assert!(e.call_stack().is_empty());
    }

    #[test]
    fn loop_and_if_interleave() {
        // The if block spans the loop's opening bracket.
        let e = run("&1 {1 [3 } +1 ]3");
        assert_eq!(e.tape().current(), 3);
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod configuration {
    use super::*;

    #[test]
    fn permissive_config_wraps_and_zeroes() {
        let e = run_with("< &5 $i &5 /0 $i", "", EngineConfig::permissive());
        assert_eq!(e.output(), b"50");
        assert_eq!(e.tape().cursor(), TAPE_SIZE - 1);
    }

    #[test]
    fn clamp_policy_on_small_tape() {
        let config = EngineConfig {
            tape_size: 4,
            bounds: BoundsPolicy::Clamp,
            ..EngineConfig::default()
        };
        let e = run_with(">10 &9 ?", "", config);
        assert_eq!(e.output(), b">>> DEBUG <<<\nTape: [0 0 0 >9<]\nStack:\n");
    }

    #[test]
    fn strict_config_caps_runaway_programs() {
        let config = EngineConfig::strict();
        assert_eq!(config.max_instructions, Some(10_000_000));
        assert_eq!(config.bounds, BoundsPolicy::Error);
    }
}
