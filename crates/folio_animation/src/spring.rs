//! Spring physics
//!
//! RK4-integrated damped springs. [`Spring`] animates one scalar;
//! [`Spring2D`] pairs two of them for planar offsets such as the magnetic
//! pull of a button.

use folio_core::{ConfigurationError, Result, Vec2};

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Lightly underdamped spring used by magnetic buttons (small overshoot)
    pub fn magnetic() -> Self {
        Self {
            stiffness: 170.0,
            damping: 20.0,
            mass: 1.0,
        }
    }

    /// Critically damped spring for the given stiffness (no overshoot)
    pub fn critical(stiffness: f32) -> Self {
        let mut config = Self::new(stiffness, 0.0, 1.0);
        config.damping = config.critical_damping();
        config
    }

    /// Reject parameters that cannot produce a stable simulation
    pub fn validate(self) -> Result<Self> {
        let finite =
            self.stiffness.is_finite() && self.damping.is_finite() && self.mass.is_finite();
        if !finite || self.stiffness <= 0.0 || self.damping < 0.0 || self.mass <= 0.0 {
            return Err(ConfigurationError::InvalidSpring {
                stiffness: self.stiffness,
                damping: self.damping,
                mass: self.mass,
            });
        }
        Ok(self)
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Damping ratio (1.0 = critical)
    pub fn damping_ratio(&self) -> f32 {
        self.damping / self.critical_damping()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::magnetic()
    }
}

/// A spring-based animator
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` with zero velocity
    pub fn snap(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Check if the spring has settled (within epsilon of target with minimal velocity)
    pub fn is_settled(&self) -> bool {
        // Half a pixel and 5px/s are below what anyone can see
        const EPSILON: f32 = 0.5;
        const VELOCITY_EPSILON: f32 = 5.0;

        (self.value - self.target).abs() < EPSILON && self.velocity.abs() < VELOCITY_EPSILON
    }

    /// Step the spring simulation using RK4 integration (`dt` in seconds)
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }

    fn scale_state(&mut self, factor: f32) {
        self.value *= factor;
        self.velocity *= factor;
    }
}

/// Two independent springs driving a planar offset
#[derive(Clone, Copy, Debug)]
pub struct Spring2D {
    x: Spring,
    y: Spring,
}

impl Spring2D {
    pub fn new(config: SpringConfig, initial: Vec2) -> Self {
        Self {
            x: Spring::new(config, initial.x),
            y: Spring::new(config, initial.y),
        }
    }

    pub fn value(&self) -> Vec2 {
        Vec2::new(self.x.value(), self.y.value())
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.x.velocity(), self.y.velocity())
    }

    pub fn target(&self) -> Vec2 {
        Vec2::new(self.x.target(), self.y.target())
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    pub fn snap(&mut self, value: Vec2) {
        self.x.snap(value.x);
        self.y.snap(value.y);
    }

    pub fn is_settled(&self) -> bool {
        self.x.is_settled() && self.y.is_settled()
    }

    pub fn step(&mut self, dt: f32) {
        self.x.step(dt);
        self.y.step(dt);
    }

    /// Pull the offset back inside a circle of radius `max_len`
    ///
    /// Velocity is scaled by the same factor so the spring keeps its heading.
    pub fn clamp_length(&mut self, max_len: f32) {
        let len = self.value().length();
        if len > max_len && len > 0.0 {
            let factor = max_len / len;
            self.x.scale_state(factor);
            self.y.scale_state(factor);
        }
    }
}
