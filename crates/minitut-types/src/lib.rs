//! Foundation types for minitut.
//!
//! This crate contains the platform-agnostic types shared by the minitut
//! crates: input events and error types. Host adapters (a real browser
//! bridge, a test harness) map their native events to these enums; the
//! viewer core never sees raw platform input.

pub mod error;
pub mod input;
