//! Integration tests for Phooey.
//!
//! Tests are organised by concern.

pub mod errors;
pub mod io;
pub mod programs;
