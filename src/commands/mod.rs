//! Command handlers
//!
//! Entry points shared by the CLI binary and library callers.

pub mod replay;

pub use replay::{replay_events, replay_file, PointerTrace, ReplayFrame, TargetLink, TimedPointerEvent};
