//! Transform output seam
//!
//! Defines where per-frame transforms go once the frame loop produces them.

use crate::config::ConfigError;
use crate::follower::MarkerTransform;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc::Sender;

/// Errors that can occur while driving a follower
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("No tokio runtime available to drive the frame loop")]
    NoRuntime,

    #[error("Sink error: {0}")]
    Sink(String),

    /// The sink can never accept another frame; the frame loop stops
    #[error("Sink closed: {0}")]
    SinkClosed(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Receiver of per-frame marker transforms
///
/// Implemented by whatever renders the marker (a webview bridge, a
/// compositor layer, a test collector).
#[async_trait]
pub trait TransformSink: Send + Sync {
    /// Apply the transform for the frame just computed
    async fn apply(&self, transform: &MarkerTransform) -> DriverResult<()>;
}

/// Forwards transforms into a bounded tokio channel
pub struct ChannelSink {
    tx: Sender<MarkerTransform>,
}

impl ChannelSink {
    pub fn new(tx: Sender<MarkerTransform>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl TransformSink for ChannelSink {
    async fn apply(&self, transform: &MarkerTransform) -> DriverResult<()> {
        self.tx
            .send(*transform)
            .await
            .map_err(|e| DriverError::SinkClosed(format!("transform receiver dropped: {}", e)))
    }
}
