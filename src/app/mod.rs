mod camera;
mod input;

pub use camera::{Camera, CameraMovement, FOV_Y_DEG, MOUSE_SENSITIVITY, MOVE_SPEED};
pub use input::{FrameInput, MovementInput, NudgeInput};

use crate::config::{build_scene, SceneConfig};
use crate::math::Vector3;
use crate::scene::{ObjectId, Scene, SceneObject};

/// Position change per nudge step for the selected object.
pub const NUDGE_STEP: f64 = 0.005;

/// Scale change per scale step.
pub const SCALE_STEP: f64 = 0.1;

/// Lower bound for each scale component.
pub const MIN_SCALE: f64 = 0.1;

/// Spin axis selected by the rotation toggle keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinAxis {
    X,
    Y,
    Z,
}

/// Everything the render/update loop mutates, gathered into one owned
/// struct instead of process-wide globals: the camera, the scene, the
/// current selection, and the cursor-capture flag.
#[derive(Debug)]
pub struct ApplicationState {
    /// The fly camera.
    pub camera: Camera,
    /// The scene being viewed.
    pub scene: Scene,
    selected: Option<ObjectId>,
    cursor_captured: bool,
}

impl ApplicationState {
    /// Creates application state over a scene and camera, with no object
    /// selected and the cursor captured for mouse look.
    #[must_use]
    pub fn new(scene: Scene, camera: Camera) -> Self {
        Self {
            camera,
            scene,
            selected: None,
            cursor_captured: true,
        }
    }

    /// Builds the scene and camera from a configuration.
    ///
    /// `now` (seconds) stamps the curve-animation attachment; a missing
    /// camera section falls back to the default camera.
    #[must_use]
    pub fn from_config(config: &SceneConfig, now: f64) -> Self {
        let scene = build_scene(config, now);
        let camera = config
            .camera
            .as_ref()
            .map_or_else(Camera::default, |c| Camera::new(c.position(), c.front(), c.up()));
        Self::new(scene, camera)
    }

    /// Returns the currently selected object, if any.
    #[must_use]
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Returns a mutable reference to the selected object, if any.
    pub fn selected_object_mut(&mut self) -> Option<&mut SceneObject> {
        let id = self.selected?;
        self.scene.object_mut(id).ok()
    }

    /// Handles a selection digit: `0` clears the selection, `1..=9`
    /// select the corresponding object in draw order when it exists
    /// (otherwise the selection is cleared).
    pub fn select_slot(&mut self, digit: u8) {
        self.selected = if digit == 0 {
            None
        } else {
            self.scene.object_at(usize::from(digit) - 1)
        };
        tracing::debug!(digit, selected = self.selected.is_some(), "selection changed");
    }

    /// Toggles cursor capture, returning the new state. The windowing
    /// layer mirrors this onto the real cursor mode.
    pub fn toggle_cursor(&mut self) -> bool {
        self.cursor_captured = !self.cursor_captured;
        self.cursor_captured
    }

    /// Returns whether the cursor is captured for mouse look.
    #[must_use]
    pub fn cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Applies one scale step to the selected object, keeping every
    /// component at [`MIN_SCALE`] or above.
    pub fn scale_selected(&mut self, delta: f64) {
        if let Some(object) = self.selected_object_mut() {
            object.scale = object.scale.add_scalar(delta).map(|c| c.max(MIN_SCALE));
        }
    }

    /// Latches a spin axis on the selected object.
    pub fn set_spin_axis(&mut self, axis: SpinAxis) {
        if let Some(object) = self.selected_object_mut() {
            match axis {
                SpinAxis::X => object.spin_axis.x = 1.0,
                SpinAxis::Y => object.spin_axis.y = 1.0,
                SpinAxis::Z => object.spin_axis.z = 1.0,
            }
        }
    }

    /// Clears the selected object's spin axis.
    pub fn clear_spin(&mut self) {
        if let Some(object) = self.selected_object_mut() {
            object.spin_axis = Vector3::zeros();
        }
    }

    /// Applies one frame's held input: mouse look, camera movement, and
    /// arrow-key nudges on the selected object.
    pub fn apply_input(&mut self, input: &FrameInput) {
        let (dx, dy) = input.mouse_delta;
        if dx != 0.0 || dy != 0.0 {
            self.camera.look(dx, dy);
        }

        if input.movement.forward {
            self.camera.advance(CameraMovement::Forward);
        }
        if input.movement.backward {
            self.camera.advance(CameraMovement::Backward);
        }
        if input.movement.left {
            self.camera.advance(CameraMovement::Left);
        }
        if input.movement.right {
            self.camera.advance(CameraMovement::Right);
        }

        let nudge = input.nudge;
        if let Some(object) = self.selected_object_mut() {
            if nudge.up {
                object.position.y += NUDGE_STEP;
            }
            if nudge.down {
                object.position.y -= NUDGE_STEP;
            }
            if nudge.left {
                object.position.x -= NUDGE_STEP;
            }
            if nudge.right {
                object.position.x += NUDGE_STEP;
            }
        }
    }

    /// Per-frame update: advances every curve animation with the single
    /// frame timestamp sampled by the loop.
    pub fn update(&mut self, now: f64) {
        self.scene.animate_all(now);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::math::{Point3, TOLERANCE};
    use crate::scene::MeshRef;

    fn two_object_state() -> ApplicationState {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new(MeshRef::new("a.obj", "a.png", "a.mtl")));
        scene.add_object(SceneObject::new(MeshRef::new("b.obj", "b.png", "b.mtl")));
        ApplicationState::new(scene, Camera::default())
    }

    #[test]
    fn selection_slots() {
        let mut state = two_object_state();
        assert_eq!(state.selected(), None);

        state.select_slot(1);
        assert_eq!(state.selected(), state.scene.object_at(0));

        state.select_slot(2);
        assert_eq!(state.selected(), state.scene.object_at(1));

        state.select_slot(0);
        assert_eq!(state.selected(), None);

        // Slots past the scene size clear the selection instead of
        // pointing at a nonexistent object.
        state.select_slot(9);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn manipulating_without_selection_is_a_no_op() {
        let mut state = two_object_state();
        state.scale_selected(SCALE_STEP);
        state.set_spin_axis(SpinAxis::X);
        state.clear_spin();
        let input = FrameInput {
            nudge: NudgeInput {
                up: true,
                ..NudgeInput::default()
            },
            ..FrameInput::default()
        };
        state.apply_input(&input);

        let object = state.scene.object(state.scene.object_at(0).unwrap()).unwrap();
        assert!((object.position - Point3::origin()).norm() < TOLERANCE);
        assert!(object.spin_axis.norm() < TOLERANCE);
    }

    #[test]
    fn scale_steps_clamp_at_minimum() {
        let mut state = two_object_state();
        state.select_slot(1);

        state.scale_selected(SCALE_STEP);
        let scale = state.selected_object_mut().unwrap().scale;
        assert!((scale.x - 1.1).abs() < 1e-9);

        for _ in 0..20 {
            state.scale_selected(-SCALE_STEP);
        }
        let scale = state.selected_object_mut().unwrap().scale;
        assert!((scale.x - MIN_SCALE).abs() < 1e-9);
        assert!((scale.y - MIN_SCALE).abs() < 1e-9);
        assert!((scale.z - MIN_SCALE).abs() < 1e-9);
    }

    #[test]
    fn spin_axis_latches_and_clears() {
        let mut state = two_object_state();
        state.select_slot(1);

        state.set_spin_axis(SpinAxis::Y);
        state.set_spin_axis(SpinAxis::Z);
        let axis = state.selected_object_mut().unwrap().spin_axis;
        assert!((axis - Vector3::new(0.0, 1.0, 1.0)).norm() < TOLERANCE);

        state.clear_spin();
        let axis = state.selected_object_mut().unwrap().spin_axis;
        assert!(axis.norm() < TOLERANCE);
    }

    #[test]
    fn nudges_move_the_selected_object_only() {
        let mut state = two_object_state();
        state.select_slot(2);

        let input = FrameInput {
            nudge: NudgeInput {
                up: true,
                right: true,
                ..NudgeInput::default()
            },
            ..FrameInput::default()
        };
        state.apply_input(&input);

        let second = state.scene.object(state.scene.object_at(1).unwrap()).unwrap();
        assert!((second.position - Point3::new(NUDGE_STEP, NUDGE_STEP, 0.0)).norm() < 1e-12);

        let first = state.scene.object(state.scene.object_at(0).unwrap()).unwrap();
        assert!((first.position - Point3::origin()).norm() < TOLERANCE);
    }

    #[test]
    fn movement_input_drives_the_camera() {
        let mut state = two_object_state();
        let start = state.camera.position;

        let input = FrameInput {
            movement: MovementInput {
                forward: true,
                ..MovementInput::default()
            },
            ..FrameInput::default()
        };
        state.apply_input(&input);
        assert!((state.camera.position - start).norm() > 0.0);
    }

    #[test]
    fn cursor_toggle_flips_state() {
        let mut state = two_object_state();
        assert!(state.cursor_captured());
        assert!(!state.toggle_cursor());
        assert!(state.toggle_cursor());
    }

    #[test]
    fn update_threads_one_timestamp_into_animations() {
        let config = SceneConfig::from_json(
            r#"{
                "objects": [{
                    "objFile": "a.obj", "textureFile": "a.png", "mtlFile": "a.mtl",
                    "position": [0, 0, 0], "scale": [1, 1, 1], "rotation": [0, 0, 0],
                    "curveAnimation": "circle"
                }]
            }"#,
        )
        .unwrap();
        let mut state = ApplicationState::from_config(&config, 0.0);

        state.update(1.0);
        let object = state.scene.object(state.scene.object_at(0).unwrap()).unwrap();
        let animation = object.animation().unwrap();
        assert_eq!(animation.index(), 1);
        assert!((animation.last_step() - 1.0).abs() < TOLERANCE);
    }
}
