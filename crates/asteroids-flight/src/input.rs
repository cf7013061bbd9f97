//! One frame of flight controls, decoupled from keys and buttons.

use asteroids_input::{Action, ActionState, MouseState};
use glam::Vec2;

/// Scale from window pixels to pointer units. One pointer unit is 1024
/// pixels of travel, so the default sensitivity turns a 100 px flick into
/// roughly a quarter radian per second of turn rate.
pub const POINTER_UNITS_PER_PIXEL: f32 = 1.0 / 1024.0;

/// Controls for a single frame. Thrust strengths are in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightInput {
    pub forward: f32,
    pub back: f32,
    pub left: f32,
    pub right: f32,
    pub up: f32,
    pub down: f32,
    pub yaw_left: bool,
    pub yaw_right: bool,
    /// Look button held.
    pub look: bool,
    /// Pointer travel this frame in pointer units, +x right and +y up.
    pub look_delta: Vec2,
}

impl FlightInput {
    /// Read resolved actions and this frame's mouse motion.
    ///
    /// Window coordinates grow downwards, so the vertical delta is flipped.
    #[must_use]
    pub fn from_actions(actions: &ActionState, mouse: &MouseState) -> Self {
        let pixels = mouse.delta();
        Self {
            forward: actions.action_value(Action::MoveForward),
            back: actions.action_value(Action::MoveBack),
            left: actions.action_value(Action::MoveLeft),
            right: actions.action_value(Action::MoveRight),
            up: actions.action_value(Action::MoveUp),
            down: actions.action_value(Action::MoveDown),
            yaw_left: actions.is_action_active(Action::YawLeft),
            yaw_right: actions.is_action_active(Action::YawRight),
            look: actions.is_action_active(Action::Look),
            look_delta: Vec2::new(pixels.x, -pixels.y) * POINTER_UNITS_PER_PIXEL,
        }
    }

    /// Nothing pressed and no pointer travel.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}
