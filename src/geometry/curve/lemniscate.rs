use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// Width used for infinity animation paths.
pub const DEFAULT_WIDTH: f64 = 2.5;

/// Height used for infinity animation paths.
pub const DEFAULT_HEIGHT: f64 = 2.5;

/// A lemniscate of Bernoulli (figure-eight) in the `z = 0` plane.
///
/// `P(t) = (width * cos(t) / denom, height * width * sin(t) * cos(t) / denom, 0)`
/// with `denom = 1 + sin^2(t)`, over `t` in `[0, 2*pi)`. The curve crosses
/// itself at the origin and is always closed.
#[derive(Debug, Clone)]
pub struct Lemniscate {
    width: f64,
    height: f64,
}

impl Lemniscate {
    /// Creates a new lemniscate.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is non-positive.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if width < TOLERANCE {
            return Err(
                GeometryError::Degenerate("lemniscate width must be positive".into()).into(),
            );
        }
        if height < TOLERANCE {
            return Err(
                GeometryError::Degenerate("lemniscate height must be positive".into()).into(),
            );
        }
        Ok(Self { width, height })
    }

    /// Returns the width of the lemniscate.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the height of the lemniscate.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Samples a closed control polygon around the figure eight.
    ///
    /// `num_points` parameters are taken with step `2*pi / (num_points - 1)`,
    /// and a copy of the first point is appended so the polygon closes on
    /// itself, giving `num_points + 1` points in total. The step divisor
    /// differs from the circle generator (`num_points` there); the spacing
    /// difference is deliberate.
    ///
    /// `num_points` must be at least 2; smaller values degenerate the step
    /// and produce unusable output.
    #[must_use]
    pub fn control_polygon(&self, num_points: usize) -> Vec<Point3> {
        let step = std::f64::consts::TAU / (num_points as f64 - 1.0);

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
        let (sin, cos) = t.sin_cos();
        let denom = 1.0 + sin * sin;
        let x = self.width * cos / denom;
        let y = self.height * self.width * sin * cos / denom;
        Point3::new(x, y, 0.0)
    }
}

impl Default for Lemniscate {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Curve for Lemniscate {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.point_at(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let (sin, cos) = t.sin_cos();
        let denom = 1.0 + sin * sin;
        let denom_sq = denom * denom;

        // d/dt of width * cos / denom
        let dx = -self.width * sin * (denom + 2.0 * cos * cos) / denom_sq;
        // d/dt of height * width * sin * cos / denom
        let dy = self.height * self.width * ((cos * cos - sin * sin) * denom
            - 2.0 * sin * sin * cos * cos)
            / denom_sq;

        let tangent = Vector3::new(dx, dy, 0.0);
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
