//! Pointer-follower animation
//!
//! This module turns a stream of raw pointer samples into a smoothed,
//! elastically deformed marker transform, one frame at a time.

pub mod animator;
pub mod deformation;
pub mod smoothing;
pub mod types;

pub use animator::PointerFollowerAnimator;
pub use smoothing::{normalize_angle, shortest_angle_delta, Smoothed, Smoothed2D, SmoothedAngle};
pub use types::{DeformationState, FollowerState, MarkerTransform, RawPointerSample};
