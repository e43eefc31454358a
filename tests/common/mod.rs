//! Shared test utilities for Phooey integration tests.
//!
//! ## AAA Pattern
//!
//! Tests follow the Arrange-Act-Assert pattern:
//! - Arrange: Write the program and its input
//! - Act: Run it through the engine
//! - Assert: Check output and machine state

#![allow(dead_code)]

use phooey::*;
use std::io::Cursor;

pub type TestEngine = Engine<ReaderInput<Cursor<Vec<u8>>>, Vec<u8>, RecordingHost>;

// =============================================================================
// Engine Builders
// =============================================================================

/// Build an engine over `source` with scripted input and a recording host.
///
/// # Panics
/// Panics if the source fails to parse, which is appropriate for test code.
pub fn engine(source: &str, input: &str, config: EngineConfig, host: RecordingHost) -> TestEngine {
    Engine::from_source(source, config, ReaderInput::scripted(input), Vec::new(), host)
        .expect("Failed to parse program")
}

/// Run a program to completion and return the finished engine.
pub fn run_with(source: &str, input: &str, config: EngineConfig) -> TestEngine {
    let mut e = engine(source, input, config, RecordingHost::new(0));
    e.run().expect("Program failed");
    e
}

/// Run a program with no input and default configuration.
pub fn run(source: &str) -> TestEngine {
    run_with(source, "", EngineConfig::default())
}

/// Run a program and return what it printed.
pub fn output_with_input(source: &str, input: &str) -> String {
    let e = run_with(source, input, EngineConfig::default());
    String::from_utf8(e.into_output()).expect("Output was not UTF-8")
}

pub fn output(source: &str) -> String {
    output_with_input(source, "")
}

/// Run a program expected to fail; returns the error and whatever was
/// printed before the failure.
pub fn run_err(source: &str, config: EngineConfig) -> (PhooeyError, String) {
    let mut e = engine(source, "", config, RecordingHost::new(0));
    let err = e.run().expect_err("Program should have failed");
    let printed = String::from_utf8(e.into_output()).expect("Output was not UTF-8");
    (err, printed)
}
