//! Rotation state carried between frames

use crate::config::AnimationSettings;

/// Per-frame angle increments
pub const DELTA_A: f64 = 0.14;
pub const DELTA_B: f64 = 0.06;

/// The two rotation angles of the torus.
///
/// `a` rotates about the horizontal screen axis, `b` about the viewing axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub a: f64,
    pub b: f64,
}

impl Default for RotationState {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl RotationState {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Starting angles from the animation settings
    pub fn from_settings(settings: &AnimationSettings) -> Self {
        Self::new(settings.initial_a, settings.initial_b)
    }

    /// State after one frame with the reference increments
    pub fn advanced(self) -> Self {
        self.advanced_by(DELTA_A, DELTA_B)
    }

    pub fn advanced_by(self, delta_a: f64, delta_b: f64) -> Self {
        Self {
            a: self.a + delta_a,
            b: self.b + delta_b,
        }
    }
}
