//! Exponential smoothing primitives for the follower marker
//!
//! Every animated quantity moves a fixed fraction of the remaining distance
//! toward its target each frame, and snaps onto the target once the
//! remainder drops below a settle threshold so an idle marker reaches an
//! exact fixed point instead of creeping forever.

/// 1D exponentially smoothed value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed {
    pub value: f64,
}

impl Smoothed {
    pub fn new(initial: f64) -> Self {
        Self { value: initial }
    }

    /// Advance one frame toward `target`
    ///
    /// With `factor` in (0, 1] the value never passes the target.
    pub fn step(&mut self, target: f64, factor: f64, settle_epsilon: f64) {
        self.value += (target - self.value) * factor;
        if (target - self.value).abs() < settle_epsilon {
            self.value = target;
        }
    }

    pub fn is_settled(&self, target: f64) -> bool {
        self.value == target
    }
}

/// 2D smoothed position (X and Y axes smoothed independently)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed2D {
    pub x: Smoothed,
    pub y: Smoothed,
}

impl Smoothed2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Smoothed::new(x),
            y: Smoothed::new(y),
        }
    }

    pub fn step(&mut self, target_x: f64, target_y: f64, factor: f64, settle_epsilon: f64) {
        self.x.step(target_x, factor, settle_epsilon);
        self.y.step(target_y, factor, settle_epsilon);
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x.value, self.y.value)
    }

    /// Jump straight to a position
    pub fn reset(&mut self, x: f64, y: f64) {
        self.x = Smoothed::new(x);
        self.y = Smoothed::new(y);
    }

    pub fn is_settled(&self, target_x: f64, target_y: f64) -> bool {
        self.x.is_settled(target_x) && self.y.is_settled(target_y)
    }
}

/// Wrap an angle in degrees into [-180, 180)
pub fn normalize_angle(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Signed shortest rotation from `from` to `to`, in [-180, 180)
pub fn shortest_angle_delta(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Angle smoothed along the shortest arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedAngle {
    pub degrees: f64,
}

impl SmoothedAngle {
    pub fn new(degrees: f64) -> Self {
        Self {
            degrees: normalize_angle(degrees),
        }
    }

    pub fn step(&mut self, target_deg: f64, gain: f64, settle_epsilon: f64) {
        let delta = shortest_angle_delta(self.degrees, target_deg);
        if delta.abs() < settle_epsilon {
            self.degrees = normalize_angle(target_deg);
        } else {
            self.degrees = normalize_angle(self.degrees + delta * gain);
        }
    }
}
