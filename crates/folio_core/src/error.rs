//! Configuration error types
//!
//! Every error here is raised while building a component, before its first
//! frame. Per-frame anomalies are recovered silently and never become errors.

use thiserror::Error;

/// Errors raised when an animation or interaction configuration is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// A curve needs at least two control points
    #[error("curve needs at least 2 control points, got {0}")]
    TooFewControlPoints(usize),

    /// Control point inputs must be strictly increasing
    #[error("curve input at index {index} ({input}) is not greater than the previous input ({previous})")]
    NonMonotonicCurve {
        index: usize,
        previous: f32,
        input: f32,
    },

    /// A control point contains NaN or infinity
    #[error("curve control point {0} is not finite")]
    NonFiniteControlPoint(usize),

    /// Magnetic influence radius must be finite and positive
    #[error("influence radius must be > 0, got {0}")]
    InvalidInfluenceRadius(f32),

    /// Spring parameters must be finite, stiffness and mass positive, damping non-negative
    #[error("invalid spring parameters: stiffness {stiffness}, damping {damping}, mass {mass}")]
    InvalidSpring {
        stiffness: f32,
        damping: f32,
        mass: f32,
    },

    /// Attraction falloff must map [0,1] into [0,1] and reach 0 at the boundary
    #[error("attraction falloff is invalid: {0}")]
    InvalidAttraction(String),

    /// Color string could not be parsed
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// Scroll anchor edge is not a finite fraction
    #[error("invalid scroll anchor: {0}")]
    InvalidAnchor(String),

    /// Cubic bezier x control points must lie in [0,1]
    #[error("invalid easing: {0}")]
    InvalidEasing(String),
}

/// Result type for configuration-time operations
pub type Result<T> = std::result::Result<T, ConfigurationError>;
