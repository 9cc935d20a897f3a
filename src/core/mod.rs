//! Core algorithms: reveal scheduling, tree model, navigation state,
//! highlighting and tree sources.
//!
//! Nothing in this module depends on Ratatui or crossterm.  Time is passed
//! in as a `Duration` since mount, so everything here is deterministic.

pub mod ack;
pub mod highlight;
pub mod icons;
pub mod navigator;
pub mod reveal;
pub mod script;
pub mod source;
pub mod tree;
