use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};

/// Degrees of yaw/pitch change per pixel of mouse travel.
pub const MOUSE_SENSITIVITY: f64 = 0.05;

/// Camera translation per movement step.
pub const MOVE_SPEED: f64 = 0.02;

/// Vertical field of view, in degrees.
pub const FOV_Y_DEG: f64 = 39.6;

const NEAR_PLANE: f64 = 0.1;
const FAR_PLANE: f64 = 100.0;
const PITCH_LIMIT_DEG: f64 = 89.0;

/// Direction of one camera movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Free-flying first-person camera.
///
/// Orientation is tracked as yaw/pitch angles in degrees; the front vector
/// is rederived from them whenever the view direction changes. Pitch is
/// clamped short of the poles so the view never flips.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space camera position.
    pub position: Point3,
    front: Vector3,
    up: Vector3,
    yaw: f64,
    pitch: f64,
}

impl Camera {
    /// Creates a camera at `position` looking along `front`.
    #[must_use]
    pub fn new(position: Point3, front: Vector3, up: Vector3) -> Self {
        Self {
            position,
            front,
            up,
            yaw: -90.0,
            pitch: 0.0,
        }
    }

    /// Returns the current view direction.
    #[must_use]
    pub fn front(&self) -> Vector3 {
        self.front
    }

    /// Returns the up vector.
    #[must_use]
    pub fn up(&self) -> Vector3 {
        self.up
    }

    /// Returns the yaw angle in degrees.
    #[must_use]
    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    /// Returns the pitch angle in degrees.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Applies a mouse delta in pixels; positive `dy` looks up.
    pub fn look(&mut self, dx: f64, dy: f64) {
        self.yaw += dx * MOUSE_SENSITIVITY;
        self.pitch = (self.pitch + dy * MOUSE_SENSITIVITY)
            .clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);

        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        self.front = Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
    }

    /// Moves the camera one step in the given direction.
    pub fn advance(&mut self, movement: CameraMovement) {
        match movement {
            CameraMovement::Forward => self.position += MOVE_SPEED * self.front,
            CameraMovement::Backward => self.position -= MOVE_SPEED * self.front,
            CameraMovement::Left | CameraMovement::Right => {
                let side = self.front.cross(&self.up);
                let len = side.norm();
                if len < TOLERANCE {
                    return;
                }
                let side = side / len;
                if movement == CameraMovement::Left {
                    self.position -= MOVE_SPEED * side;
                } else {
                    self.position += MOVE_SPEED * side;
                }
            }
        }
    }

    /// Builds the view matrix for the external renderer.
    #[must_use]
    pub fn view_matrix(&self) -> Matrix4 {
        Matrix4::look_at_rh(&self.position, &(self.position + self.front), &self.up)
    }

    /// Builds the perspective projection matrix for the given aspect ratio.
    #[must_use]
    pub fn projection_matrix(&self, aspect: f64) -> Matrix4 {
        Matrix4::new_perspective(aspect, FOV_Y_DEG.to_radians(), NEAR_PLANE, FAR_PLANE)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 0.0, 10.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let mut camera = Camera::default();
        // The very first look integrates the stored yaw/pitch (-90°, 0°).
        camera.look(0.0, 0.0);
        assert!((camera.front() - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-9);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.look(0.0, 10_000.0);
        assert!((camera.pitch() - 89.0).abs() < TOLERANCE);
        camera.look(0.0, -100_000.0);
        assert!((camera.pitch() + 89.0).abs() < TOLERANCE);
        assert!(camera.front().norm().is_finite());
    }

    #[test]
    fn yaw_rotates_front() {
        let mut camera = Camera::default();
        // Turn from -90° to 0°: front swings to +X.
        camera.look(90.0 / MOUSE_SENSITIVITY, 0.0);
        assert!((camera.front() - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn moves_along_front_and_side() {
        let mut camera = Camera::default();
        let start = camera.position;

        camera.advance(CameraMovement::Forward);
        assert!((camera.position - (start + MOVE_SPEED * Vector3::new(0.0, 0.0, -1.0))).norm() < 1e-9);

        camera.advance(CameraMovement::Right);
        // front x up = (0,0,-1) x (0,1,0) = (1,0,0)
        assert!(camera.position.x > start.x);
    }

    #[test]
    fn view_matrix_centers_look_target() {
        let camera = Camera::default();
        let view = camera.view_matrix();
        let target = camera.position + camera.front();
        let in_view = view.transform_point(&target);
        assert!((in_view - Point3::new(0.0, 0.0, -1.0)).norm() < 1e-9);
    }

    #[test]
    fn projection_is_perspective() {
        let camera = Camera::default();
        let projection = camera.projection_matrix(16.0 / 9.0);
        assert!((projection[(3, 2)] + 1.0).abs() < TOLERANCE);
        assert!(projection[(3, 3)].abs() < TOLERANCE);
    }
}
