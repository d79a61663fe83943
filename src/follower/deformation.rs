//! Squash/stretch and heading derived from per-frame pointer motion
//!
//! Velocity here is the per-frame pixel distance scaled by a constant gain,
//! not distance over elapsed time. Two samples landing in the same instant
//! therefore never divide by zero, at the cost of the effect strength
//! depending on the display refresh rate.

use crate::config::FollowerConfig;
use crate::follower::smoothing::{Smoothed, SmoothedAngle};
use crate::follower::types::DeformationState;

/// Gain-scaled, capped velocity for a per-frame displacement
pub fn frame_velocity(dx: f64, dy: f64, config: &FollowerConfig) -> f64 {
    (dx.hypot(dy) * config.velocity_gain).min(config.velocity_cap)
}

/// Target (scale_x, scale_y) for a given velocity
///
/// Stretch along X is bounded by `max_deform`, squash along Y by
/// `max_deform * squash_dampen`.
pub fn squash_stretch(velocity: f64, config: &FollowerConfig) -> (f64, f64) {
    let scale_value = (velocity / config.velocity_cap) * config.max_deform;
    (1.0 + scale_value, 1.0 - scale_value * config.squash_dampen)
}

/// Heading of a displacement in degrees, screen coordinates (y down)
pub fn heading_deg(dx: f64, dy: f64) -> f64 {
    dy.atan2(dx).to_degrees()
}

/// Frame-to-frame deformation state
#[derive(Debug, Clone, Copy)]
pub struct Deformer {
    scale_x: Smoothed,
    scale_y: Smoothed,
    target_angle: f64,
    angle: SmoothedAngle,
}

impl Deformer {
    pub fn new() -> Self {
        Self {
            scale_x: Smoothed::new(1.0),
            scale_y: Smoothed::new(1.0),
            target_angle: 0.0,
            angle: SmoothedAngle::new(0.0),
        }
    }

    /// Update from this frame's displacement `(dx, dy)`
    pub fn step(&mut self, dx: f64, dy: f64, config: &FollowerConfig) {
        let distance = dx.hypot(dy);
        let velocity = frame_velocity(dx, dy, config);

        if distance < config.idle_epsilon {
            // Idle: ease back to neutral and keep the last heading
            self.scale_x.step(1.0, config.relax_rate, config.settle_epsilon);
            self.scale_y.step(1.0, config.relax_rate, config.settle_epsilon);
        } else {
            let (scale_x, scale_y) = squash_stretch(velocity, config);
            self.scale_x = Smoothed::new(scale_x);
            self.scale_y = Smoothed::new(scale_y);
        }

        if velocity > config.rotation_threshold {
            self.target_angle = heading_deg(dx, dy);
        }
        self.angle.step(
            self.target_angle,
            config.angle_smoothing_gain,
            config.settle_epsilon,
        );
    }

    pub fn state(&self) -> DeformationState {
        DeformationState {
            scale_x: self.scale_x.value,
            scale_y: self.scale_y.value,
            angle_deg: self.angle.degrees,
        }
    }

    pub fn target_angle(&self) -> f64 {
        self.target_angle
    }
}

impl Default for Deformer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_is_capped() {
        let config = FollowerConfig::default();
        assert_eq!(frame_velocity(1000.0, 1000.0, &config), config.velocity_cap);
        assert_eq!(frame_velocity(3.0, 4.0, &config), 5.0 * config.velocity_gain);
    }

    #[test]
    fn test_zero_displacement_has_zero_velocity() {
        let config = FollowerConfig::default();
        assert_eq!(frame_velocity(0.0, 0.0, &config), 0.0);
    }

    #[test]
    fn test_squash_stretch_bounds() {
        let config = FollowerConfig::default();
        let (sx, sy) = squash_stretch(config.velocity_cap, &config);
        assert_eq!(sx, 1.0 + config.max_deform);
        assert_eq!(sy, 1.0 - config.max_deform * config.squash_dampen);

        let (sx, sy) = squash_stretch(0.0, &config);
        assert_eq!((sx, sy), (1.0, 1.0));
    }

    #[test]
    fn test_heading() {
        assert_eq!(heading_deg(1.0, 0.0), 0.0);
        assert!((heading_deg(0.0, 1.0) - 90.0).abs() < 1e-12);
        assert!((heading_deg(-1.0, 0.0) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_idle_relaxes_toward_neutral() {
        let config = FollowerConfig::default();
        let mut deformer = Deformer::new();
        deformer.step(40.0, 0.0, &config);
        let stretched = deformer.state();
        assert!(stretched.scale_x > 1.0);

        deformer.step(0.0, 0.0, &config);
        let relaxed = deformer.state();
        assert!(relaxed.scale_x < stretched.scale_x);
        assert!(relaxed.scale_x > 1.0, "relaxation is gradual, not a freeze or a jump");

        for _ in 0..200 {
            deformer.step(0.0, 0.0, &config);
        }
        assert_eq!(deformer.state().scale_x, 1.0);
        assert_eq!(deformer.state().scale_y, 1.0);
    }

    #[test]
    fn test_slow_motion_keeps_heading() {
        let config = FollowerConfig::default();
        let mut deformer = Deformer::new();
        deformer.step(0.0, 50.0, &config);
        assert!((deformer.target_angle() - 90.0).abs() < 1e-9);

        // Below the rotation threshold the target heading is held
        deformer.step(1.0, 0.0, &config);
        assert!((deformer.target_angle() - 90.0).abs() < 1e-9);
    }
}
