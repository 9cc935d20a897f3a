//! Process-boundary helpers.
//!
//! The TUI draws on the alternate screen (stderr-backed), so stdout stays
//! free for the exit payload: the banner link destination, when the user
//! follows it.

pub mod clipboard;
pub mod integration;
