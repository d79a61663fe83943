//! Pointer Follower - an elastic marker that trails the mouse pointer.
//!
//! The animator smooths raw pointer samples into a lagging marker position,
//! squashes and rotates it with motion, and enlarges it over highlighted
//! targets. A tokio-driven controller runs it once per display frame.

pub mod commands;
pub mod config;
pub mod driver;
pub mod follower;
pub mod input;

pub use config::{ConfigError, DriverConfig, FollowerConfig, Settings};
pub use driver::{FollowerController, TransformSink};
pub use follower::{MarkerTransform, PointerFollowerAnimator};
pub use input::{HighlightRegistry, PointerEvent, PointerEventBus, TargetId};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
///
/// Honors `RUST_LOG`, defaulting to `pointer_follower=info`.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pointer_follower=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
