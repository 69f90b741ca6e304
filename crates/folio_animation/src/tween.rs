//! Retargetable tweens
//!
//! A fixed-duration eased transition between two scalars. Retargeting
//! mid-flight starts a new segment from the current value, so interrupted
//! transitions never jump.

use crate::easing::Easing;
use crate::values::Interpolate;

/// Time-based transition of a single scalar
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed_ms: f32,
    duration_ms: u32,
    easing: Easing,
}

impl Tween {
    /// A tween resting at `value`
    pub fn new(value: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from: value,
            to: value,
            elapsed_ms: duration_ms as f32,
            duration_ms,
            easing,
        }
    }

    /// Current value
    pub fn value(&self) -> f32 {
        if self.duration_ms == 0 {
            return self.to;
        }
        let t = (self.elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0);
        self.from.lerp(&self.to, self.easing.apply(t))
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Start a new segment from the current value toward `to`
    pub fn retarget(&mut self, to: f32) {
        if to == self.to {
            return;
        }
        self.from = self.value();
        self.to = to;
        self.elapsed_ms = 0.0;
    }

    /// Jump to `value` with no transition
    pub fn snap(&mut self, value: f32) {
        self.from = value;
        self.to = value;
        self.elapsed_ms = self.duration_ms as f32;
    }

    /// Advance by `dt_ms` milliseconds
    pub fn advance(&mut self, dt_ms: f32) {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms as f32);
        }
    }

    pub fn is_done(&self) -> bool {
        self.elapsed_ms >= self.duration_ms as f32
    }
}
