use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A single global Bézier curve over a control polygon.
///
/// The curve degree is `control_points.len() - 1`: every control point
/// contributes to every curve point through its Bernstein basis weight,
/// as opposed to a piecewise spline. Control points are fixed at
/// construction; [`Bezier::sample`] derives the dense polyline the
/// animation layer walks along.
#[derive(Debug, Clone, PartialEq)]
pub struct Bezier {
    control_points: Vec<Point3>,
    curve_points: Vec<Point3>,
}

impl Bezier {
    /// Creates a Bézier curve over the given control polygon.
    ///
    /// No samples are generated until [`Bezier::sample`] is called.
    #[must_use]
    pub fn new(control_points: Vec<Point3>) -> Self {
        Self {
            control_points,
            curve_points: Vec::new(),
        }
    }

    /// Returns the control polygon.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    /// Returns the sampled curve polyline (empty before sampling).
    #[must_use]
    pub fn curve_points(&self) -> &[Point3] {
        &self.curve_points
    }

    /// Samples the curve at `sample_count + 1` evenly spaced parameters
    /// `t = j / sample_count` for `j = 0..=sample_count`, replacing any
    /// previous samples. Sampling is deterministic: identical inputs
    /// produce identical polylines.
    ///
    /// Control polygons with fewer than two points define no curve and
    /// yield no samples.
    pub fn sample(&mut self, sample_count: usize) {
        self.curve_points.clear();
        if self.control_points.len() < 2 {
            return;
        }

        self.curve_points.reserve(sample_count + 1);
        for j in 0..=sample_count {
            let t = j as f64 / sample_count as f64;
            self.curve_points.push(self.point_at(t));
        }
    }

    fn point_at(&self, t: f64) -> Point3 {
        let n = self.control_points.len() - 1;
        let mut point = Vector3::zeros();
        for (i, cp) in self.control_points.iter().enumerate() {
            point += bernstein(n, i, t) * cp.coords;
        }
        Point3::from(point)
    }
}

/// Bernstein basis polynomial `B(n,i)(t) = C(n,i) * (1-t)^(n-i) * t^i`.
fn bernstein(n: usize, i: usize, t: f64) -> f64 {
    binomial(n, i) * (1.0 - t).powi((n - i) as i32) * t.powi(i as i32)
}

/// Binomial coefficient via the gamma identity
/// `C(n,i) = gamma(n+1) / (gamma(i+1) * gamma(n-i+1))`.
///
/// Exact enough in double precision for the control-polygon sizes this
/// viewer produces (around 20 points); very high degrees would overflow.
fn binomial(n: usize, i: usize) -> f64 {
    libm::tgamma(n as f64 + 1.0) / (libm::tgamma(i as f64 + 1.0) * libm::tgamma((n - i) as f64 + 1.0))
}

impl Curve for Bezier {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        if self.control_points.len() < 2 {
            return Err(GeometryError::Degenerate(
                "Bézier curve needs at least two control points".into(),
            )
            .into());
        }
        Ok(self.point_at(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        if self.control_points.len() < 2 {
            return Err(GeometryError::Degenerate(
                "Bézier curve needs at least two control points".into(),
            )
            .into());
        }

        // Derivative of a degree-n Bézier: n * sum of B(n-1,i) * (P[i+1] - P[i])
        let n = self.control_points.len() - 1;
        let mut derivative = Vector3::zeros();
        for i in 0..n {
            let delta = self.control_points[i + 1] - self.control_points[i];
            derivative += bernstein(n - 1, i, t) * delta;
        }
        derivative *= n as f64;

        let len = derivative.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(derivative / len)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        match (self.control_points.first(), self.control_points.last()) {
            (Some(first), Some(last)) if self.control_points.len() > 1 => {
                (last - first).norm() < TOLERANCE
            }
            _ => false,
        }
    }
}
