//! Runtime collaborators of the engine.
//!
//! - **IO**: program input (integers, bytes, end-of-input checks)
//! - **Host**: sleeping, wall-clock time and random numbers

pub mod host;
pub mod io;

pub use host::{Host, RecordingHost, SystemHost};
pub use io::{InputSource, ReaderInput, StdinInput, EOF_CHAR};
