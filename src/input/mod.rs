//! Host pointer input
//!
//! Event model, the highlight capability check, and the subscribe/unsubscribe
//! bus that feeds events into a running follower.

pub mod bus;
pub mod dispatch;
pub mod highlight;
pub mod types;

pub use bus::{PointerEventBus, Subscription};
pub use dispatch::dispatch;
pub use highlight::HighlightRegistry;
pub use types::{PointerEvent, TargetId};
