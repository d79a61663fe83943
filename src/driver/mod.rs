//! Frame-driven follower runtime
//!
//! Connects a `PointerEventBus` to a `PointerFollowerAnimator` and pushes
//! one transform per display frame into a `TransformSink`.

pub mod controller;
pub mod sink;

pub use controller::FollowerController;
pub use sink::{ChannelSink, DriverError, DriverResult, TransformSink};
