//! Ship flight model and the chase camera that follows it.
//!
//! [`MotionIntegrator`] turns one frame of [`FlightInput`] into a change of
//! [`ShipState`] and a [`MotionDelta`] for the ship's transform.
//! [`FollowCamera`] places the camera behind the ship afterwards.

mod camera;
mod input;
mod integrator;
mod state;

pub use camera::{CameraPose, FollowCamera};
pub use input::{FlightInput, POINTER_UNITS_PER_PIXEL};
pub use integrator::{Heading, MotionDelta, MotionIntegrator};
pub use state::ShipState;
