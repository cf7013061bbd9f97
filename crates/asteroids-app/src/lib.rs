//! Host layer for the flight demo.
//!
//! Owns the window, the event loop and the per-frame clock, collects keyboard
//! and mouse state, and hands each frame to a caller-supplied update
//! function. [`HeadlessRunner`] drives the same update without a window.

pub mod error;
pub mod frame_clock;
pub mod headless;
pub mod platform;
pub mod window;

pub use error::AppError;
pub use frame_clock::{FrameClock, MAX_FRAME_TIME};
pub use headless::HeadlessRunner;
pub use platform::PlatformDirs;
pub use window::{AppState, Frame, FrameFn, run_with_config};
