//! Tunable knobs for the follower animation and its frame loop
//!
//! All values are plain numbers with defaults tuned for a small marker
//! trailing a desktop mouse pointer at 60Hz. Settings files are camelCase
//! JSON; any field left out falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Per-frame animation parameters for the follower marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FollowerConfig {
    /// Exponential smoothing weight applied to position each frame, in (0, 1)
    pub smoothing_factor: f64,
    /// Multiplier turning per-frame pixel distance into a velocity figure
    pub velocity_gain: f64,
    /// Upper bound on the velocity figure
    pub velocity_cap: f64,
    /// Maximum stretch added to the X scale at `velocity_cap`
    pub max_deform: f64,
    /// Fraction of the stretch removed from the Y scale
    pub squash_dampen: f64,
    /// Per-frame pixel distance under which the pointer counts as idle
    pub idle_epsilon: f64,
    /// Rate at which scale relaxes back to neutral while idle
    pub relax_rate: f64,
    /// Velocity above which the heading is recomputed
    pub rotation_threshold: f64,
    /// Smoothing weight applied to the rendered angle
    pub angle_smoothing_gain: f64,
    /// Scale applied while hovering a highlight target
    pub highlight_scale_factor: f64,
    /// Smoothing weight for the hover scale
    pub hover_smoothing_gain: f64,
    /// Scale applied while the pointer is pressed
    pub press_scale_factor: f64,
    /// Smoothing weight for the press scale
    pub press_smoothing_gain: f64,
    /// Distance at which a smoothed value snaps onto its target
    pub settle_epsilon: f64,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.15,
            velocity_gain: 4.0,
            velocity_cap: 150.0,
            max_deform: 0.5,
            squash_dampen: 1.0,
            idle_epsilon: 0.1,
            relax_rate: 0.15,
            rotation_threshold: 20.0,
            angle_smoothing_gain: 0.5,
            highlight_scale_factor: 3.5,
            hover_smoothing_gain: 0.15,
            press_scale_factor: 0.75,
            press_smoothing_gain: 0.25,
            settle_epsilon: 0.001,
        }
    }
}

impl FollowerConfig {
    /// Check every knob against the range the animator relies on
    pub fn validate(&self) -> ConfigResult<()> {
        open_unit("smoothingFactor", self.smoothing_factor)?;
        positive("velocityGain", self.velocity_gain)?;
        positive("velocityCap", self.velocity_cap)?;
        finite("maxDeform", self.max_deform)?;
        if !(0.0..1.0).contains(&self.max_deform) {
            return Err(invalid("maxDeform", "must be in [0, 1)"));
        }
        half_open_unit("squashDampen", self.squash_dampen)?;
        positive("idleEpsilon", self.idle_epsilon)?;
        half_open_unit("relaxRate", self.relax_rate)?;
        finite("rotationThreshold", self.rotation_threshold)?;
        if self.rotation_threshold < 0.0 {
            return Err(invalid("rotationThreshold", "must not be negative"));
        }
        half_open_unit("angleSmoothingGain", self.angle_smoothing_gain)?;
        positive("highlightScaleFactor", self.highlight_scale_factor)?;
        half_open_unit("hoverSmoothingGain", self.hover_smoothing_gain)?;
        positive("pressScaleFactor", self.press_scale_factor)?;
        half_open_unit("pressSmoothingGain", self.press_smoothing_gain)?;
        positive("settleEpsilon", self.settle_epsilon)?;
        Ok(())
    }
}

/// Frame loop parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverConfig {
    /// Display refresh rate the frame loop is paced at
    pub frame_rate_hz: f64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { frame_rate_hz: 60.0 }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        positive("frameRateHz", self.frame_rate_hz)
    }

    /// Time between two frame callbacks
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate_hz)
    }
}

/// Complete settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub follower: FollowerConfig,
    pub driver: DriverConfig,
}

impl Settings {
    /// Read and validate a JSON settings file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;

        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.follower.validate()?;
        self.driver.validate()
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn finite(field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a finite number"))
    }
}

fn positive(field: &'static str, value: f64) -> ConfigResult<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be greater than zero"))
    }
}

fn open_unit(field: &'static str, value: f64) -> ConfigResult<()> {
    finite(field, value)?;
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be in (0, 1)"))
    }
}

fn half_open_unit(field: &'static str, value: f64) -> ConfigResult<()> {
    finite(field, value)?;
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be in (0, 1]"))
    }
}
