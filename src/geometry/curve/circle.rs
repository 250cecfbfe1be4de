use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// Radius used for circle animation paths.
pub const DEFAULT_RADIUS: f64 = 4.0;

/// A circle in the `z = 0` plane, centered at the origin.
///
/// `P(t) = (radius * cos(t), radius * sin(t), 0)` over `t` in `[0, 2*pi)`;
/// the curve is always closed.
#[derive(Debug, Clone)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn new(radius: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("circle radius must be positive".into()).into(),
            );
        }
        Ok(Self { radius })
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Samples a closed control polygon around the circle.
    ///
    /// `num_points` angles are taken with step `2*pi / num_points`, and a
    /// copy of the first point is appended so the polygon closes on itself,
    /// giving `num_points + 1` points in total. Note the step divisor: the
    /// lemniscate generator divides by `num_points - 1` instead; the
    /// spacing difference between the two generators is deliberate.
    #[must_use]
    pub fn control_polygon(&self, num_points: usize) -> Vec<Point3> {
        let step = std::f64::consts::TAU / num_points as f64;

        let mut points = Vec::with_capacity(num_points + 1);
        for i in 0..num_points {
            points.push(self.point_at(i as f64 * step));
        }
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        points
    }

    fn point_at(&self, t: f64) -> Point3 {
        Point3::new(self.radius * t.cos(), self.radius * t.sin(), 0.0)
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
        }
    }
}

impl Curve for Circle {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.point_at(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let tangent = Vector3::new(-self.radius * t.sin(), self.radius * t.cos(), 0.0);
        let len = tangent.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(tangent / len)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, std::f64::consts::TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}
