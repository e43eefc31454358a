//! Virtual machine for Phooey programs.
//!
//! The [`Engine`] is generic over three collaborators so the same code runs
//! against the real process and against deterministic test doubles:
//!
//! | Parameter | Trait | Real | Test |
//! |-----------|-------|------|------|
//! | `I` | [`InputSource`](crate::runtime::InputSource) | `StdinInput` | `ReaderInput::scripted` |
//! | `O` | `std::io::Write` | `Stdout` | `Vec<u8>` |
//! | `H` | [`Host`](crate::runtime::Host) | `SystemHost` | `RecordingHost` |

pub mod executor;

pub use executor::{Engine, EngineConfig, EngineStatus};
