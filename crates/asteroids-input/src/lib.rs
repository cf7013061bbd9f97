//! Input abstraction: keyboard and mouse state mapped through action-based
//! keybindings, with preset control schemes for the flight demo.

pub mod action_map;
pub mod keybindings;
pub mod keyboard;
pub mod mouse;

pub use action_map::{Action, ActionResolver, ActionState, InputBinding, InputMap, MouseButtonBinding};
pub use keybindings::{Conflict, InputMapError};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
