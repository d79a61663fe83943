use serde::{Deserialize, Serialize};

/// A raw pointer position as reported by the host, in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPointerSample {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: f64,
}

impl RawPointerSample {
    pub fn new(x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self { x, y, timestamp_ms }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Smoothed marker position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowerState {
    pub x: f64,
    pub y: f64,
}

/// Velocity-derived squash/stretch and heading of the marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeformationState {
    pub scale_x: f64,
    pub scale_y: f64,
    pub angle_deg: f64,
}

impl DeformationState {
    /// Unit scale, no rotation
    pub fn neutral() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            angle_deg: 0.0,
        }
    }
}

impl Default for DeformationState {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Final transform applied to the marker for one frame
///
/// Composition order is translate, then rotate, then scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotate_deg: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// 0.0 while hidden, 1.0 while visible
    pub opacity: f64,
}

impl MarkerTransform {
    /// Render as a CSS `transform` value
    pub fn to_css(&self) -> String {
        format!(
            "translate({:.3}px, {:.3}px) rotate({:.3}deg) scale({:.4}, {:.4})",
            self.translate_x, self.translate_y, self.rotate_deg, self.scale_x, self.scale_y
        )
    }

    /// 2D affine matrix `[a, b, c, d, e, f]` in the CSS `matrix()` layout
    pub fn to_matrix(&self) -> [f64; 6] {
        let (sin, cos) = self.rotate_deg.to_radians().sin_cos();
        [
            cos * self.scale_x,
            sin * self.scale_x,
            -sin * self.scale_y,
            cos * self.scale_y,
            self.translate_x,
            self.translate_y,
        ]
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}
