//! Action mapping: flight actions bound to physical keys and mouse buttons.
//!
//! [`InputMap`] says which inputs trigger which [`Action`]. [`ActionResolver`]
//! turns the current keyboard and mouse state into an [`ActionState`] once per
//! frame, before the flight update runs.

use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;
use asteroids_config::ControlScheme;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use winit::event::MouseButton;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Serde helper for [`KeyCode`], which has no serde support of its own.
mod keycode_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use winit::keyboard::KeyCode;

    pub fn serialize<S: Serializer>(code: &KeyCode, s: S) -> Result<S::Ok, S::Error> {
        format!("{code:?}").serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KeyCode, D::Error> {
        let name = String::deserialize(d)?;
        string_to_keycode(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown key: {name}")))
    }

    fn string_to_keycode(s: &str) -> Option<KeyCode> {
        Some(match s {
            "KeyA" => KeyCode::KeyA,
            "KeyB" => KeyCode::KeyB,
            "KeyC" => KeyCode::KeyC,
            "KeyD" => KeyCode::KeyD,
            "KeyE" => KeyCode::KeyE,
            "KeyF" => KeyCode::KeyF,
            "KeyG" => KeyCode::KeyG,
            "KeyH" => KeyCode::KeyH,
            "KeyI" => KeyCode::KeyI,
            "KeyJ" => KeyCode::KeyJ,
            "KeyK" => KeyCode::KeyK,
            "KeyL" => KeyCode::KeyL,
            "KeyM" => KeyCode::KeyM,
            "KeyN" => KeyCode::KeyN,
            "KeyO" => KeyCode::KeyO,
            "KeyP" => KeyCode::KeyP,
            "KeyQ" => KeyCode::KeyQ,
            "KeyR" => KeyCode::KeyR,
            "KeyS" => KeyCode::KeyS,
            "KeyT" => KeyCode::KeyT,
            "KeyU" => KeyCode::KeyU,
            "KeyV" => KeyCode::KeyV,
            "KeyW" => KeyCode::KeyW,
            "KeyX" => KeyCode::KeyX,
            "KeyY" => KeyCode::KeyY,
            "KeyZ" => KeyCode::KeyZ,
            "Space" => KeyCode::Space,
            "ShiftLeft" => KeyCode::ShiftLeft,
            "ShiftRight" => KeyCode::ShiftRight,
            "ControlLeft" => KeyCode::ControlLeft,
            "ControlRight" => KeyCode::ControlRight,
            "AltLeft" => KeyCode::AltLeft,
            "AltRight" => KeyCode::AltRight,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "PageUp" => KeyCode::PageUp,
            "PageDown" => KeyCode::PageDown,
            _ => return None,
        })
    }
}

/// Flight actions the ship controller understands.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Action {
    /// Thrust along the horizontal forward direction.
    MoveForward,
    /// Thrust against the horizontal forward direction.
    MoveBack,
    /// Thrust along the horizontal left direction.
    MoveLeft,
    /// Thrust against the horizontal left direction.
    MoveRight,
    /// Thrust along world up.
    MoveUp,
    /// Thrust along world down.
    MoveDown,
    /// Kick the yaw drift counter-clockwise (seen from above).
    YawLeft,
    /// Kick the yaw drift clockwise (seen from above).
    YawRight,
    /// While held, pointer motion pitches and yaws the ship.
    Look,
}

/// Serde-friendly mirror of the winit mouse buttons the demo binds.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum MouseButtonBinding {
    Left,
    Right,
    Middle,
}

impl MouseButtonBinding {
    #[must_use]
    pub fn to_winit(self) -> MouseButton {
        match self {
            Self::Left => MouseButton::Left,
            Self::Right => MouseButton::Right,
            Self::Middle => MouseButton::Middle,
        }
    }
}

/// A physical input that can be bound to an action.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum InputBinding {
    /// A keyboard key (physical scan code).
    Key(#[serde(with = "keycode_serde")] KeyCode),
    /// A mouse button.
    MouseButton(MouseButtonBinding),
}

/// Maps [`Action`]s to lists of [`InputBinding`]s. Any bound input activates
/// its action. Serializable to RON for user-editable keybinding files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMap {
    /// The binding table.
    pub bindings: HashMap<Action, Vec<InputBinding>>,
}

impl Default for InputMap {
    fn default() -> Self {
        Self::for_scheme(ControlScheme::default())
    }
}

impl InputMap {
    /// An input map with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// The preset bindings for a control scheme.
    #[must_use]
    pub fn for_scheme(scheme: ControlScheme) -> Self {
        match scheme {
            ControlScheme::Classic => Self::classic(),
            ControlScheme::MouseLook => Self::mouse_look(),
        }
    }

    /// W/S forward/back, A/D left/right, Q/E yaw, Space/Left Shift up/down,
    /// right mouse button to look.
    #[must_use]
    pub fn mouse_look() -> Self {
        let mut map = Self::keyboard_common();
        map.set_bindings(Action::MoveLeft, vec![InputBinding::Key(KeyCode::KeyA)]);
        map.set_bindings(Action::MoveRight, vec![InputBinding::Key(KeyCode::KeyD)]);
        map.set_bindings(
            Action::Look,
            vec![InputBinding::MouseButton(MouseButtonBinding::Right)],
        );
        map
    }

    /// Keyboard-only preset.
    ///
    /// A and D are bound the other way round from [`InputMap::mouse_look`]:
    /// A strafes right and D strafes left. This mirrors how the keyboard-only
    /// build of the demo shipped and is kept as-is.
    #[must_use]
    pub fn classic() -> Self {
        let mut map = Self::keyboard_common();
        map.set_bindings(Action::MoveLeft, vec![InputBinding::Key(KeyCode::KeyD)]);
        map.set_bindings(Action::MoveRight, vec![InputBinding::Key(KeyCode::KeyA)]);
        map
    }

    fn keyboard_common() -> Self {
        let mut map = Self::new();
        map.set_bindings(Action::MoveForward, vec![InputBinding::Key(KeyCode::KeyW)]);
        map.set_bindings(Action::MoveBack, vec![InputBinding::Key(KeyCode::KeyS)]);
        map.set_bindings(Action::MoveUp, vec![InputBinding::Key(KeyCode::Space)]);
        map.set_bindings(Action::MoveDown, vec![InputBinding::Key(KeyCode::ShiftLeft)]);
        map.set_bindings(Action::YawLeft, vec![InputBinding::Key(KeyCode::KeyQ)]);
        map.set_bindings(Action::YawRight, vec![InputBinding::Key(KeyCode::KeyE)]);
        map
    }

    /// Set the bindings for an action, replacing any existing ones.
    pub fn set_bindings(&mut self, action: Action, bindings: Vec<InputBinding>) {
        self.bindings.insert(action, bindings);
    }

    /// Get the bindings for an action.
    #[must_use]
    pub fn get_bindings(&self, action: Action) -> &[InputBinding] {
        self.bindings.get(&action).map_or(&[], |v| v.as_slice())
    }

    /// Serialize to a pretty RON string.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from a RON string.
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}

/// Per-frame action values computed by [`ActionResolver`].
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    values: HashMap<Action, f32>,
    prev_values: HashMap<Action, f32>,
}

/// Values at or below this count as released.
const ACTIVATION_THRESHOLD: f32 = 0.001;

impl ActionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the action is held this frame.
    #[must_use]
    pub fn is_action_active(&self, action: Action) -> bool {
        self.action_value(action) > ACTIVATION_THRESHOLD
    }

    /// Strength of the action this frame, in `[0, 1]`.
    #[must_use]
    pub fn action_value(&self, action: Action) -> f32 {
        self.values.get(&action).copied().unwrap_or(0.0)
    }

    /// True only on the frame the action went from released to held.
    #[must_use]
    pub fn action_just_activated(&self, action: Action) -> bool {
        let prev = self.prev_values.get(&action).copied().unwrap_or(0.0);
        self.is_action_active(action) && prev <= ACTIVATION_THRESHOLD
    }

    /// True only on the frame the action went from held to released.
    #[must_use]
    pub fn action_just_deactivated(&self, action: Action) -> bool {
        let prev = self.prev_values.get(&action).copied().unwrap_or(0.0);
        !self.is_action_active(action) && prev > ACTIVATION_THRESHOLD
    }

    /// Force an action value. Used by scripted (headless) input.
    pub fn set_value(&mut self, action: Action, value: f32) {
        self.values.insert(action, value.clamp(0.0, 1.0));
    }
}

/// Fills an [`ActionState`] from the keyboard and mouse each frame.
pub struct ActionResolver;

impl ActionResolver {
    /// Resolve every bound action. Call once per frame after input events
    /// have been processed.
    pub fn resolve(
        input_map: &InputMap,
        keyboard: &KeyboardState,
        mouse: &MouseState,
        state: &mut ActionState,
    ) {
        state.prev_values.clone_from(&state.values);
        state.values.clear();

        for (action, bindings) in &input_map.bindings {
            let value = bindings
                .iter()
                .map(|binding| Self::read_binding(binding, keyboard, mouse))
                .sum::<f32>()
                .clamp(0.0, 1.0);
            state.values.insert(*action, value);
        }
    }

    fn read_binding(binding: &InputBinding, keyboard: &KeyboardState, mouse: &MouseState) -> f32 {
        let held = match binding {
            InputBinding::Key(code) => keyboard.is_pressed(PhysicalKey::Code(*code)),
            InputBinding::MouseButton(btn) => mouse.is_button_pressed(btn.to_winit()),
        };
        if held { 1.0 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::RawKeyEvent;
    use winit::event::ElementState;

    fn press_key(kb: &mut KeyboardState, code: KeyCode) {
        kb.process_raw(RawKeyEvent::press(PhysicalKey::Code(code)));
    }

    fn resolve(map: &InputMap, kb: &KeyboardState, mouse: &MouseState) -> ActionState {
        let mut state = ActionState::new();
        ActionResolver::resolve(map, kb, mouse, &mut state);
        state
    }

    #[test]
    fn test_mouse_look_preset_strafes_left_on_a() {
        let map = InputMap::mouse_look();
        let mut kb = KeyboardState::new();
        press_key(&mut kb, KeyCode::KeyA);
        let state = resolve(&map, &kb, &MouseState::new());
        assert!(state.is_action_active(Action::MoveLeft));
        assert!(!state.is_action_active(Action::MoveRight));
    }

    #[test]
    fn test_classic_preset_has_mirrored_strafe_keys() {
        let map = InputMap::classic();
        assert_eq!(
            map.get_bindings(Action::MoveRight),
            &[InputBinding::Key(KeyCode::KeyA)]
        );
        assert_eq!(
            map.get_bindings(Action::MoveLeft),
            &[InputBinding::Key(KeyCode::KeyD)]
        );
        assert!(map.get_bindings(Action::Look).is_empty());
    }

    #[test]
    fn test_presets_share_thrust_and_yaw_keys() {
        let classic = InputMap::classic();
        let look = InputMap::mouse_look();
        for action in [
            Action::MoveForward,
            Action::MoveBack,
            Action::MoveUp,
            Action::MoveDown,
            Action::YawLeft,
            Action::YawRight,
        ] {
            assert_eq!(classic.get_bindings(action), look.get_bindings(action));
        }
    }

    #[test]
    fn test_look_follows_right_mouse_button() {
        let map = InputMap::mouse_look();
        let kb = KeyboardState::new();
        let mut mouse = MouseState::new();
        mouse.on_button(MouseButton::Right, ElementState::Pressed);
        let state = resolve(&map, &kb, &mouse);
        assert!(state.is_action_active(Action::Look));
    }

    #[test]
    fn test_unbound_action_is_zero() {
        let state = resolve(&InputMap::new(), &KeyboardState::new(), &MouseState::new());
        assert!(!state.is_action_active(Action::YawLeft));
        assert_eq!(state.action_value(Action::YawLeft), 0.0);
    }

    #[test]
    fn test_two_bindings_clamp_to_one() {
        let mut map = InputMap::new();
        map.set_bindings(
            Action::MoveUp,
            vec![
                InputBinding::Key(KeyCode::Space),
                InputBinding::Key(KeyCode::PageUp),
            ],
        );
        let mut kb = KeyboardState::new();
        press_key(&mut kb, KeyCode::Space);
        press_key(&mut kb, KeyCode::PageUp);
        let state = resolve(&map, &kb, &MouseState::new());
        assert_eq!(state.action_value(Action::MoveUp), 1.0);
    }

    #[test]
    fn test_just_activated_edge() {
        let map = InputMap::mouse_look();
        let mut kb = KeyboardState::new();
        let mouse = MouseState::new();
        let mut state = ActionState::new();

        press_key(&mut kb, KeyCode::KeyQ);
        ActionResolver::resolve(&map, &kb, &mouse, &mut state);
        assert!(state.action_just_activated(Action::YawLeft));

        ActionResolver::resolve(&map, &kb, &mouse, &mut state);
        assert!(!state.action_just_activated(Action::YawLeft));
        assert!(state.is_action_active(Action::YawLeft));

        kb.process_raw(RawKeyEvent::release(PhysicalKey::Code(KeyCode::KeyQ)));
        ActionResolver::resolve(&map, &kb, &mouse, &mut state);
        assert!(state.action_just_deactivated(Action::YawLeft));
    }

    #[test]
    fn test_set_value_clamps() {
        let mut state = ActionState::new();
        state.set_value(Action::MoveForward, 3.0);
        assert_eq!(state.action_value(Action::MoveForward), 1.0);
    }

    #[test]
    fn test_preset_survives_ron() {
        let original = InputMap::classic();
        let restored = InputMap::from_ron(&original.to_ron().unwrap()).unwrap();
        assert_eq!(original, restored);
    }
}
