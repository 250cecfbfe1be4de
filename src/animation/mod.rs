use std::f64::consts::FRAC_PI_2;

use crate::geometry::curve::{Bezier, Circle, Lemniscate};
use crate::math::{Point3, TOLERANCE};

/// Steps per second along a sampled curve, independent of the frame rate.
pub const STEP_RATE_HZ: f64 = 60.0;

/// Number of control points generated for a path shape.
pub const CONTROL_POINT_COUNT: usize = 20;

/// Bézier sample count for a path track (yielding `CURVE_SAMPLE_COUNT + 1`
/// track points).
pub const CURVE_SAMPLE_COUNT: usize = 100;

/// Built-in animation path shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathShape {
    /// Figure-eight lemniscate path.
    Infinity,
    /// Circular path.
    Circle,
}

impl PathShape {
    /// Parses a scene-config selector.
    ///
    /// Anything other than `"infinity"` or `"circle"` means no animation;
    /// unknown selectors are not an error.
    #[must_use]
    pub fn parse(selector: &str) -> Option<Self> {
        match selector {
            "infinity" => Some(Self::Infinity),
            "circle" => Some(Self::Circle),
            _ => None,
        }
    }

    /// Builds the sampled Bézier track for this shape.
    ///
    /// Every call generates a fresh curve; entities never share track
    /// storage even when their shapes match.
    #[must_use]
    pub fn build_curve(self) -> Bezier {
        let control_points = match self {
            Self::Infinity => Lemniscate::default().control_polygon(CONTROL_POINT_COUNT),
            Self::Circle => Circle::default().control_polygon(CONTROL_POINT_COUNT),
        };
        let mut curve = Bezier::new(control_points);
        curve.sample(CURVE_SAMPLE_COUNT);
        tracing::debug!(
            shape = ?self,
            track_points = curve.curve_points().len(),
            "built animation track"
        );
        curve
    }
}

/// Per-entity curve playback state.
///
/// Owns its sampled curve and walks it cyclically at [`STEP_RATE_HZ`],
/// deriving a forward heading from the direction to the next track point.
/// The track index advances at most once per [`advance`](Self::advance)
/// call, so a long frame stall slows the object down instead of making it
/// jump ahead.
#[derive(Debug, Clone)]
pub struct PathAnimation {
    curve: Bezier,
    index: usize,
    last_step: f64,
    heading: f64,
}

impl PathAnimation {
    /// Attaches playback state to a curve.
    ///
    /// `origin` is the entity's position at attach time and seeds the
    /// initial heading towards the second track point; `now` (seconds)
    /// becomes the first step timestamp.
    #[must_use]
    pub fn new(curve: Bezier, origin: &Point3, now: f64) -> Self {
        let mut heading = 0.0;
        if let Some(second) = curve.curve_points().get(1) {
            if let Some(bootstrap) = heading_towards(origin, second) {
                heading = bootstrap;
            }
        }
        Self {
            curve,
            index: 0,
            last_step: now,
            heading,
        }
    }

    /// Returns the sampled curve this entity follows.
    #[must_use]
    pub fn curve(&self) -> &Bezier {
        &self.curve
    }

    /// Returns the current track index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the timestamp (seconds) of the last index step.
    #[must_use]
    pub fn last_step(&self) -> f64 {
        self.last_step
    }

    /// Returns the current forward heading in radians.
    #[must_use]
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Advances playback, writing the entity position for this frame.
    ///
    /// The position is taken from the *current* track sample before the
    /// step check, so the frame shows the result of the previous step. A
    /// step fires once `now - last_step` reaches `1 / STEP_RATE_HZ`,
    /// moving the index forward cyclically by exactly one and recomputing
    /// the heading as `atan2(dir.y, dir.x) - 90°` towards the next sample;
    /// a degenerate (zero-length) direction keeps the previous heading.
    ///
    /// Call once per frame with a monotonically non-decreasing `now`;
    /// an empty track leaves the position untouched.
    pub fn advance(&mut self, position: &mut Point3, now: f64) {
        let track = self.curve.curve_points();
        if track.is_empty() {
            return;
        }
        *position = track[self.index];

        let elapsed = now - self.last_step;
        if elapsed >= 1.0 / STEP_RATE_HZ {
            self.index = (self.index + 1) % track.len();
            self.last_step = now;

            let next = self.curve.curve_points()[self.index];
            if let Some(heading) = heading_towards(position, &next) {
                self.heading = heading;
            }
        }
    }
}

/// Heading of the direction `from -> to`, offset by -90° for the mesh's
/// default forward axis. `None` when the direction is too short to
/// normalize.
fn heading_towards(from: &Point3, to: &Point3) -> Option<f64> {
    let delta = to - from;
    let len = delta.norm();
    if len < TOLERANCE {
        return None;
    }
    let dir = delta / len;
    Some(dir.y.atan2(dir.x) - FRAC_PI_2)
}
