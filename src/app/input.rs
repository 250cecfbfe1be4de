use serde::{Deserialize, Serialize};

/// Camera movement key states for one frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Selected-object nudge key states (arrow keys) for one frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NudgeInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Snapshot of held input for a single frame.
///
/// The external windowing loop fills one of these per frame from its raw
/// key/cursor state; edge-triggered commands (selection digits, scale
/// steps, toggles) call the [`ApplicationState`](crate::app::ApplicationState)
/// methods directly instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameInput {
    /// Camera movement keys.
    pub movement: MovementInput,
    /// Arrow-key nudges for the selected object.
    pub nudge: NudgeInput,
    /// Mouse travel in pixels since the previous frame; positive `y`
    /// looks up.
    pub mouse_delta: (f64, f64),
}
