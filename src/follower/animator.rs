//! Per-frame pointer follower
//!
//! Input operations (`on_pointer_*`) only record raw state. `tick` is the
//! only place the smoothed position, deformation, and scale multipliers
//! change. The owner calls it once per display refresh.

use crate::config::FollowerConfig;
use crate::follower::deformation::Deformer;
use crate::follower::smoothing::{Smoothed, Smoothed2D};
use crate::follower::types::{DeformationState, FollowerState, MarkerTransform, RawPointerSample};

/// Raw coordinates are clamped to +/- this many pixels
pub const MAX_COORDINATE: f64 = 1.0e7;

/// Elastic marker that trails the pointer
#[derive(Debug, Clone)]
pub struct PointerFollowerAnimator {
    config: FollowerConfig,

    /// Latest raw sample from the host
    current: Option<RawPointerSample>,
    /// Raw sample as of the previous frame
    previous: Option<RawPointerSample>,

    position: Smoothed2D,
    deformer: Deformer,
    hover_scale: Smoothed,
    press_scale: Smoothed,

    hovering: bool,
    pressed: bool,
    hidden: bool,
    alive: bool,
    frames: u64,
}

impl PointerFollowerAnimator {
    pub fn new(config: FollowerConfig) -> Self {
        Self {
            config,
            current: None,
            previous: None,
            position: Smoothed2D::new(0.0, 0.0),
            deformer: Deformer::new(),
            hover_scale: Smoothed::new(1.0),
            press_scale: Smoothed::new(1.0),
            hovering: false,
            pressed: false,
            hidden: true,
            alive: true,
            frames: 0,
        }
    }

    /// Record a raw pointer position
    ///
    /// Non-finite coordinates are dropped and the last good sample kept.
    /// Finite coordinates outside `MAX_COORDINATE` are clamped so the
    /// smoothing arithmetic cannot overflow.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, timestamp_ms: f64) {
        if !RawPointerSample::new(x, y, timestamp_ms).is_finite() {
            tracing::debug!("Discarding non-finite pointer sample ({}, {})", x, y);
            return;
        }
        let x = x.clamp(-MAX_COORDINATE, MAX_COORDINATE);
        let y = y.clamp(-MAX_COORDINATE, MAX_COORDINATE);
        let sample = RawPointerSample::new(x, y, timestamp_ms);

        if self.current.is_none() {
            // First sample: start on the pointer instead of sweeping in from the origin
            self.position.reset(x, y);
            self.previous = Some(sample);
        }
        self.current = Some(sample);
        self.hidden = false;
    }

    pub fn on_pointer_down(&mut self) {
        self.pressed = true;
    }

    pub fn on_pointer_up(&mut self) {
        self.pressed = false;
    }

    /// Pointer entered a target; `is_highlighted` is the host's capability check
    pub fn on_pointer_enter_target(&mut self, is_highlighted: bool) {
        self.hovering = is_highlighted;
    }

    pub fn on_pointer_leave_target(&mut self) {
        self.hovering = false;
    }

    /// Hide the marker without touching accumulated position
    pub fn on_pointer_leave_viewport(&mut self) {
        self.hidden = true;
    }

    pub fn on_pointer_enter_viewport(&mut self) {
        self.hidden = false;
    }

    /// Advance one frame and return the transform to apply
    ///
    /// Returns `None` once the animator has been destroyed.
    pub fn tick(&mut self) -> Option<MarkerTransform> {
        if !self.alive {
            return None;
        }

        let config = &self.config;

        if let (Some(current), Some(previous)) = (self.current, self.previous) {
            self.position.step(
                current.x,
                current.y,
                config.smoothing_factor,
                config.settle_epsilon,
            );
            self.deformer
                .step(current.x - previous.x, current.y - previous.y, config);
            self.previous = Some(current);
        }

        let hover_target = if self.hovering {
            config.highlight_scale_factor
        } else {
            1.0
        };
        self.hover_scale.step(
            hover_target,
            config.hover_smoothing_gain,
            config.settle_epsilon,
        );

        let press_target = if self.pressed {
            config.press_scale_factor
        } else {
            1.0
        };
        self.press_scale.step(
            press_target,
            config.press_smoothing_gain,
            config.settle_epsilon,
        );

        self.frames += 1;

        let transform = self.transform();
        tracing::trace!(frame = self.frames, "{}", transform.to_css());
        Some(transform)
    }

    /// Transform for the current state without advancing
    pub fn transform(&self) -> MarkerTransform {
        let (x, y) = self.position.position();
        let deformation = self.deformer.state();
        let scale = self.hover_scale.value * self.press_scale.value;

        MarkerTransform {
            translate_x: x,
            translate_y: y,
            rotate_deg: deformation.angle_deg,
            scale_x: scale * deformation.scale_x,
            scale_y: scale * deformation.scale_y,
            opacity: if self.hidden { 0.0 } else { 1.0 },
        }
    }

    /// Stop producing frames; later ticks are no-ops
    pub fn destroy(&mut self) {
        if self.alive {
            tracing::debug!("Follower animator destroyed after {} frames", self.frames);
        }
        self.alive = false;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn config(&self) -> &FollowerConfig {
        &self.config
    }

    pub fn raw(&self) -> Option<RawPointerSample> {
        self.current
    }

    pub fn follower(&self) -> FollowerState {
        let (x, y) = self.position.position();
        FollowerState { x, y }
    }

    pub fn deformation(&self) -> DeformationState {
        self.deformer.state()
    }

    pub fn hover_scale(&self) -> f64 {
        self.hover_scale.value
    }

    pub fn press_scale(&self) -> f64 {
        self.press_scale.value
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for PointerFollowerAnimator {
    fn default() -> Self {
        Self::new(FollowerConfig::default())
    }
}
