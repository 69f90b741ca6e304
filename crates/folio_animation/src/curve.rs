//! Value mapper
//!
//! Piecewise-linear curves from a normalized input (usually scroll progress)
//! to an output range. Several curves can read the same input: the hero maps
//! one progress value to opacity, scale and vertical offset at once.
//!
//! ```rust
//! use folio_animation::{map_value, Curve};
//!
//! let y = Curve::new([(0.0, 0.0), (1.0, 80.0)]).unwrap();
//! assert_eq!(map_value(&y, 0.5), 40.0);
//! assert_eq!(map_value(&y, 3.0), 80.0); // clamped
//! ```

use smallvec::SmallVec;

use crate::values::Interpolate;
use folio_core::{ConfigurationError, Result};

/// A single (input, output) pair on a curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub input: f32,
    pub output: f32,
}

/// Piecewise-linear mapping with strictly increasing inputs
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    points: SmallVec<[ControlPoint; 4]>,
}

impl Curve {
    /// Build a curve from `(input, output)` pairs
    ///
    /// Fails if there are fewer than two points, any value is not finite, or
    /// inputs are not strictly increasing.
    pub fn new<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let points: SmallVec<[ControlPoint; 4]> = points
            .into_iter()
            .map(|(input, output)| ControlPoint { input, output })
            .collect();

        if points.len() < 2 {
            return Err(ConfigurationError::TooFewControlPoints(points.len()));
        }

        for (index, point) in points.iter().enumerate() {
            if !point.input.is_finite() || !point.output.is_finite() {
                return Err(ConfigurationError::NonFiniteControlPoint(index));
            }
            if index > 0 {
                let previous = points[index - 1].input;
                if point.input <= previous {
                    return Err(ConfigurationError::NonMonotonicCurve {
                        index,
                        previous,
                        input: point.input,
                    });
                }
            }
        }

        Ok(Self { points })
    }

    /// Two-point curve mapping `domain` onto `range`
    pub fn linear(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        Self::new([(domain.0, range.0), (domain.1, range.1)])
    }

    /// Input domain `(first, last)`
    pub fn domain(&self) -> (f32, f32) {
        (self.first().input, self.last().input)
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Map `x` through the curve, clamping outside the domain
    pub fn map(&self, x: f32) -> f32 {
        let first = self.first();
        let last = self.last();

        if x.is_nan() {
            tracing::trace!("curve input is NaN, using first output");
            return first.output;
        }
        if x <= first.input {
            return first.output;
        }
        if x >= last.input {
            return last.output;
        }

        // First point strictly after x; x is inside the domain so 1 <= upper < len
        let upper = self.points.partition_point(|p| p.input <= x);
        let a = self.points[upper - 1];
        let b = self.points[upper];
        let t = (x - a.input) / (b.input - a.input);
        a.output.lerp(&b.output, t)
    }

    fn first(&self) -> ControlPoint {
        self.points[0]
    }

    fn last(&self) -> ControlPoint {
        self.points[self.points.len() - 1]
    }
}

/// Map `progress` through `curve`
pub fn map_value(curve: &Curve, progress: f32) -> f32 {
    curve.map(progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_scenario() {
        let curve = Curve::new([(0.0, 0.0), (1.0, 80.0)]).unwrap();
        assert_eq!(map_value(&curve, 0.5), 40.0);
    }

    #[test]
    fn test_clamping_law() {
        let curve = Curve::new([(0.5, 1.0), (1.0, 0.0)]).unwrap();
        assert_eq!(curve.map(0.0), 1.0);
        assert_eq!(curve.map(0.5), 1.0);
        assert_eq!(curve.map(1.0), 0.0);
        assert_eq!(curve.map(7.0), 0.0);
        assert_eq!(curve.map(-7.0), 1.0);
    }

    #[test]
    fn test_multi_segment() {
        let curve = Curve::new([(0.0, 0.0), (0.5, 10.0), (1.0, 30.0)]).unwrap();
        assert!((curve.map(0.25) - 5.0).abs() < 1e-5);
        assert!((curve.map(0.5) - 10.0).abs() < 1e-5);
        assert!((curve.map(0.75) - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_monotonic_direction_matches() {
        let rising = Curve::new([(0.0, 0.0), (0.3, 2.0), (1.0, 100.0)]).unwrap();
        let falling = Curve::linear((0.5, 1.0), (1.0, 0.95)).unwrap();

        let mut prev_rising = f32::MIN;
        let mut prev_falling = f32::MAX;
        for i in 0..=200 {
            let x = i as f32 / 200.0;
            let r = rising.map(x);
            let f = falling.map(x);
            assert!(r >= prev_rising - 1e-5);
            assert!(f <= prev_falling + 1e-5);
            prev_rising = r;
            prev_falling = f;
        }
    }

    #[test]
    fn test_shared_input() {
        let opacity = Curve::linear((0.5, 1.0), (1.0, 0.0)).unwrap();
        let scale = Curve::linear((0.5, 1.0), (1.0, 0.95)).unwrap();
        let y = Curve::linear((0.0, 1.0), (0.0, 100.0)).unwrap();

        let progress = 0.75;
        assert!((opacity.map(progress) - 0.5).abs() < 1e-6);
        assert!((scale.map(progress) - 0.975).abs() < 1e-6);
        assert!((y.map(progress) - 75.0).abs() < 1e-4);
    }

    #[test]
    fn test_rejects_non_monotonic() {
        let err = Curve::new([(0.0, 0.0), (0.5, 1.0), (0.5, 2.0)]).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NonMonotonicCurve { index: 2, .. }
        ));
        assert!(Curve::new([(1.0, 0.0), (0.0, 1.0)]).is_err());
    }

    #[test]
    fn test_rejects_degenerate() {
        assert_eq!(
            Curve::new([(0.0, 0.0)]).unwrap_err(),
            ConfigurationError::TooFewControlPoints(1)
        );
        assert!(Curve::new([(0.0, f32::NAN), (1.0, 1.0)]).is_err());
    }

    #[test]
    fn test_nan_input() {
        let curve = Curve::linear((0.0, 1.0), (3.0, 9.0)).unwrap();
        assert_eq!(curve.map(f32::NAN), 3.0);
    }
}
