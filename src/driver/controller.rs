//! Frame loop owning one follower animator
//!
//! Two tasks share the animator: the input task is the only writer of raw
//! pointer, hover, press, and visibility state; the frame task is the only
//! caller of `tick`. A liveness flag guards every frame so a callback that
//! fires after teardown does nothing.

use crate::config::Settings;
use crate::driver::sink::{DriverError, DriverResult, TransformSink};
use crate::follower::{MarkerTransform, PointerFollowerAnimator};
use crate::input::{dispatch, HighlightRegistry, PointerEventBus, Subscription};
use parking_lot::{Mutex as ParkingMutex, RwLock};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

/// Repeated sink failures are logged once per this many frames
const SINK_WARN_EVERY: u64 = 300;

/// Running follower: `create -> tick* -> destroy`
pub struct FollowerController {
    id: Uuid,
    animator: Arc<ParkingMutex<PointerFollowerAnimator>>,
    alive: Arc<AtomicBool>,
    frames_emitted: Arc<AtomicU64>,
    input_task: Option<JoinHandle<()>>,
    frame_task: Option<JoinHandle<()>>,
}

impl FollowerController {
    /// Subscribe to `bus` and start the frame loop
    ///
    /// Must be called from within a tokio runtime.
    pub fn create(
        bus: &PointerEventBus,
        registry: Arc<RwLock<HighlightRegistry>>,
        settings: &Settings,
        sink: Arc<dyn TransformSink>,
    ) -> DriverResult<Self> {
        settings.validate()?;
        let handle = tokio::runtime::Handle::try_current().map_err(|_| DriverError::NoRuntime)?;

        let id = Uuid::new_v4();
        let animator = Arc::new(ParkingMutex::new(PointerFollowerAnimator::new(
            settings.follower.clone(),
        )));
        let alive = Arc::new(AtomicBool::new(true));
        let frames_emitted = Arc::new(AtomicU64::new(0));

        let input_task = handle.spawn(run_input(
            bus.subscribe(),
            animator.clone(),
            registry,
            alive.clone(),
        ));
        let frame_task = handle.spawn(run_frames(
            settings.driver.frame_interval(),
            animator.clone(),
            sink,
            alive.clone(),
            frames_emitted.clone(),
        ));

        tracing::info!(
            "Follower {} started at {}Hz",
            id,
            settings.driver.frame_rate_hz
        );

        Ok(Self {
            id,
            animator,
            alive,
            frames_emitted,
            input_task: Some(input_task),
            frame_task: Some(frame_task),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Number of transforms handed to the sink so far
    pub fn frames_emitted(&self) -> u64 {
        self.frames_emitted.load(Ordering::SeqCst)
    }

    /// Whether the frame task is still producing frames
    pub fn is_frame_loop_running(&self) -> bool {
        self.frame_task
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    /// Transform for the animator's current state
    pub fn current_transform(&self) -> MarkerTransform {
        self.animator.lock().transform()
    }

    /// Stop the frame loop and release the input subscription
    ///
    /// Safe to call more than once.
    pub async fn destroy(&mut self) -> DriverResult<()> {
        if !self.release() {
            return Ok(());
        }

        for task in [self.input_task.take(), self.frame_task.take()]
            .into_iter()
            .flatten()
        {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::warn!("Follower {} task ended abnormally: {}", self.id, e);
                }
            }
        }

        tracing::info!(
            "Follower {} destroyed (frames={})",
            self.id,
            self.frames_emitted()
        );
        Ok(())
    }

    /// Flip liveness and cancel both tasks; returns false if already released
    fn release(&mut self) -> bool {
        if !self.alive.swap(false, Ordering::SeqCst) {
            return false;
        }

        self.animator.lock().destroy();
        if let Some(task) = &self.input_task {
            task.abort();
        }
        if let Some(task) = &self.frame_task {
            task.abort();
        }
        true
    }
}

impl Drop for FollowerController {
    fn drop(&mut self) {
        if self.release() {
            tracing::debug!("Follower {} released on drop", self.id);
        }
    }
}

async fn run_input(
    mut subscription: Subscription,
    animator: Arc<ParkingMutex<PointerFollowerAnimator>>,
    registry: Arc<RwLock<HighlightRegistry>>,
    alive: Arc<AtomicBool>,
) {
    while let Some(event) = subscription.recv().await {
        if !alive.load(Ordering::SeqCst) {
            break;
        }
        let registry = registry.read();
        dispatch(&mut animator.lock(), &registry, &event);
    }
    // Subscription drops here and unsubscribes from the bus
}

async fn run_frames(
    interval: Duration,
    animator: Arc<ParkingMutex<PointerFollowerAnimator>>,
    sink: Arc<dyn TransformSink>,
    alive: Arc<AtomicBool>,
    frames_emitted: Arc<AtomicU64>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut consecutive_failures: u64 = 0;

    loop {
        ticker.tick().await;
        if !alive.load(Ordering::SeqCst) {
            break;
        }

        let next = animator.lock().tick();
        let Some(transform) = next else {
            break;
        };

        if !alive.load(Ordering::SeqCst) {
            break;
        }
        match sink.apply(&transform).await {
            Ok(()) => {
                if consecutive_failures > 0 {
                    tracing::info!("Sink recovered after {} failed frames", consecutive_failures);
                }
                consecutive_failures = 0;
                frames_emitted.fetch_add(1, Ordering::SeqCst);
            }
            Err(DriverError::SinkClosed(reason)) => {
                tracing::info!("Transform sink closed, stopping frame loop: {}", reason);
                break;
            }
            Err(e) => {
                if consecutive_failures % SINK_WARN_EVERY == 0 {
                    tracing::warn!(
                        "Failed to apply marker transform ({} consecutive): {}",
                        consecutive_failures + 1,
                        e
                    );
                }
                consecutive_failures += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::sink::ChannelSink;
    use crate::input::{PointerEvent, TargetId};
    use async_trait::async_trait;

    #[derive(Default)]
    struct CollectingSink {
        frames: ParkingMutex<Vec<MarkerTransform>>,
    }

    #[async_trait]
    impl TransformSink for CollectingSink {
        async fn apply(&self, transform: &MarkerTransform) -> DriverResult<()> {
            self.frames.lock().push(*transform);
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl TransformSink for FailingSink {
        async fn apply(&self, _transform: &MarkerTransform) -> DriverResult<()> {
            Err(DriverError::Sink("renderer gone".to_string()))
        }
    }

    fn frame() -> Duration {
        Settings::default().driver.frame_interval()
    }

    #[test]
    fn test_create_requires_runtime() {
        let bus = PointerEventBus::new();
        let result = FollowerController::create(
            &bus,
            Arc::new(RwLock::new(HighlightRegistry::new())),
            &Settings::default(),
            Arc::new(CollectingSink::default()),
        );
        assert!(matches!(result, Err(DriverError::NoRuntime)));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_rejects_invalid_settings() {
        let mut settings = Settings::default();
        settings.driver.frame_rate_hz = -1.0;

        let result = FollowerController::create(
            &PointerEventBus::new(),
            Arc::new(RwLock::new(HighlightRegistry::new())),
            &settings,
            Arc::new(CollectingSink::default()),
        );
        assert!(matches!(result, Err(DriverError::Config(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_follow_published_input() {
        let bus = PointerEventBus::new();
        let sink = Arc::new(CollectingSink::default());
        let mut controller = FollowerController::create(
            &bus,
            Arc::new(RwLock::new(HighlightRegistry::new())),
            &Settings::default(),
            sink.clone(),
        )
        .unwrap();
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(PointerEvent::Move {
            x: 0.0,
            y: 0.0,
            timestamp_ms: 0.0,
        });
        tokio::time::sleep(frame() * 3).await;
        bus.publish(PointerEvent::Move {
            x: 200.0,
            y: 100.0,
            timestamp_ms: 50.0,
        });
        tokio::time::sleep(frame() * 30).await;

        let frames = sink.frames.lock().clone();
        assert!(frames.len() >= 20, "expected frames, got {}", frames.len());
        let last = frames.last().unwrap();
        assert_eq!(last.opacity, 1.0);
        assert!(last.translate_x > 150.0 && last.translate_x <= 200.0);
        assert!(last.translate_y > 75.0 && last.translate_y <= 100.0);
        assert_eq!(controller.frames_emitted(), frames.len() as u64);

        controller.destroy().await.unwrap();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hover_over_highlight_target() {
        let bus = PointerEventBus::new();
        let registry = Arc::new(RwLock::new(HighlightRegistry::new()));
        registry.write().tag(TargetId(5));

        let sink = Arc::new(CollectingSink::default());
        let mut controller =
            FollowerController::create(&bus, registry, &Settings::default(), sink.clone()).unwrap();

        bus.publish(PointerEvent::Move {
            x: 10.0,
            y: 10.0,
            timestamp_ms: 0.0,
        });
        bus.publish(PointerEvent::Over {
            target: Some(TargetId(5)),
        });
        tokio::time::sleep(frame() * 5).await;

        let scale = controller.current_transform().scale_x;
        assert!(scale > 1.0 && scale < 3.5, "hover scale {} animates in", scale);

        controller.destroy().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_destroy_stops_frames() {
        let bus = PointerEventBus::new();
        let sink = Arc::new(CollectingSink::default());
        let mut controller = FollowerController::create(
            &bus,
            Arc::new(RwLock::new(HighlightRegistry::new())),
            &Settings::default(),
            sink.clone(),
        )
        .unwrap();

        tokio::time::sleep(frame() * 5).await;
        controller.destroy().await.unwrap();
        assert!(!controller.is_alive());

        let emitted = sink.frames.lock().len();
        bus.publish(PointerEvent::Move {
            x: 1.0,
            y: 1.0,
            timestamp_ms: 0.0,
        });
        tokio::time::sleep(frame() * 10).await;
        assert_eq!(sink.frames.lock().len(), emitted);

        // Second destroy is a no-op
        controller.destroy().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_listener() {
        let bus = PointerEventBus::new();
        let controller = FollowerController::create(
            &bus,
            Arc::new(RwLock::new(HighlightRegistry::new())),
            &Settings::default(),
            Arc::new(CollectingSink::default()),
        )
        .unwrap();
        assert_eq!(bus.subscriber_count(), 1);

        drop(controller);
        // Let the aborted input task unwind
        tokio::time::sleep(frame()).await;
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_sink_stops_frame_loop() {
        let bus = PointerEventBus::new();
        let (tx, rx) = tokio::sync::mpsc::channel(16);
        drop(rx);

        let mut controller = FollowerController::create(
            &bus,
            Arc::new(RwLock::new(HighlightRegistry::new())),
            &Settings::default(),
            Arc::new(ChannelSink::new(tx)),
        )
        .unwrap();

        tokio::time::sleep(frame() * 5).await;
        assert!(!controller.is_frame_loop_running());
        assert_eq!(controller.frames_emitted(), 0);

        controller.destroy().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sink_errors_do_not_stop_loop() {
        let bus = PointerEventBus::new();
        let mut controller = FollowerController::create(
            &bus,
            Arc::new(RwLock::new(HighlightRegistry::new())),
            &Settings::default(),
            Arc::new(FailingSink),
        )
        .unwrap();

        bus.publish(PointerEvent::Move {
            x: 30.0,
            y: 0.0,
            timestamp_ms: 0.0,
        });
        tokio::time::sleep(frame() * 5).await;

        assert!(controller.is_alive());
        assert!(controller.is_frame_loop_running());
        assert_eq!(controller.frames_emitted(), 0);
        assert_eq!(controller.current_transform().translate_x, 30.0);

        controller.destroy().await.unwrap();
    }
}
