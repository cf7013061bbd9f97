//! Drifting flight model.
//!
//! Each frame:
//! 1. thrust impulses add `direction * acceleration * strength * dt` to the
//!    velocity (capped by `max_speed` when set),
//! 2. the ship moves by `velocity * dt`,
//! 3. velocity decays by `damping`,
//! 4. a yaw key sets the yaw drift to `±rotation_speed`; the drift decays by
//!    `yaw_damping` and then turns the ship about world up,
//! 5. with mouse look enabled and the look button held, pointer travel adds
//!    to the angular velocity, which turns the ship (yaw about world up,
//!    pitch about the ship's right axis) and then decays by
//!    `angular_damping`.
//!
//! Decay factors are applied once per frame, not per second, so the feel of
//! the ship depends on frame rate.

use crate::input::FlightInput;
use crate::state::ShipState;
use asteroids_config::FlightConfig;
use asteroids_scene::Transform;
use glam::{Quat, Vec3};
use tracing::trace;

/// Horizontal basis that thrust is expressed in. Both vectors lie in the
/// XZ plane and are unit length, or zero when the source direction is
/// vertical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading {
    pub forward: Vec3,
    pub left: Vec3,
}

impl Heading {
    /// Flatten arbitrary forward/left vectors onto the horizontal plane.
    #[must_use]
    pub fn from_axes(forward: Vec3, left: Vec3) -> Self {
        Self {
            forward: flatten(forward),
            left: flatten(left),
        }
    }

    /// Heading of a node facing local +Z with local +X on its left.
    #[must_use]
    pub fn from_orientation(rotation: Quat) -> Self {
        Self::from_axes(rotation * Vec3::Z, rotation * Vec3::X)
    }
}

/// Horizontal projections shorter than this count as vertical.
const MIN_HORIZONTAL: f32 = 1e-4;

fn flatten(v: Vec3) -> Vec3 {
    let flat = Vec3::new(v.x, 0.0, v.z);
    if flat.length() < MIN_HORIZONTAL {
        Vec3::ZERO
    } else {
        flat.normalize()
    }
}

/// Change to apply to the ship's transform after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionDelta {
    /// World-space displacement.
    pub translation: Vec3,
    /// World-frame rotation, pre-multiplied onto the current orientation.
    pub rotation: Quat,
}

impl MotionDelta {
    pub const NONE: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn apply(&self, transform: &mut Transform) {
        transform.translation += self.translation;
        transform.rotate_parent(self.rotation);
    }
}

/// Integrates [`ShipState`] one frame at a time from a [`FlightConfig`].
#[derive(Debug, Clone)]
pub struct MotionIntegrator {
    config: FlightConfig,
}

impl MotionIntegrator {
    #[must_use]
    pub fn new(config: FlightConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    /// Advance `state` by one frame of length `dt` seconds.
    ///
    /// `orientation` is the ship's current rotation and `heading` the basis
    /// thrust is applied in. A non-positive or non-finite `dt` leaves the
    /// state untouched.
    pub fn step(
        &self,
        state: &mut ShipState,
        orientation: Quat,
        heading: Heading,
        input: &FlightInput,
        dt: f32,
    ) -> MotionDelta {
        if !(dt.is_finite() && dt > 0.0) {
            return MotionDelta::NONE;
        }
        let cfg = &self.config;

        state.velocity += self.thrust(heading, input) * cfg.acceleration * dt;
        if let Some(max) = cfg.max_speed
            && state.velocity.length() > max
        {
            state.velocity = state.velocity.clamp_length_max(max.max(0.0));
        }

        let translation = state.velocity * dt;
        state.velocity *= cfg.damping;

        match (input.yaw_left, input.yaw_right) {
            (true, false) => state.yaw_velocity = cfg.rotation_speed,
            (false, true) => state.yaw_velocity = -cfg.rotation_speed,
            _ => {}
        }
        state.yaw_velocity *= cfg.yaw_damping;
        let drift = Quat::from_rotation_y(state.yaw_velocity * dt);

        if cfg.mouse_look && input.look {
            let turn = input.look_delta * cfg.mouse_sensitivity * cfg.angular_acceleration;
            state.angular_velocity.y -= turn.x;
            state.angular_velocity.x -= turn.y;
        }
        let yaw = Quat::from_rotation_y(state.angular_velocity.y * dt);
        let turned = yaw * drift * orientation;
        let right = (turned * Vec3::X).normalize_or_zero();
        let pitch = if right == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_axis_angle(right, state.angular_velocity.x * dt)
        };
        state.angular_velocity *= cfg.angular_damping;

        trace!(
            speed = state.velocity.length(),
            yaw_velocity = state.yaw_velocity,
            "flight step"
        );

        MotionDelta {
            translation,
            rotation: (pitch * yaw * drift).normalize(),
        }
    }

    fn thrust(&self, heading: Heading, input: &FlightInput) -> Vec3 {
        heading.forward * (input.forward - input.back)
            + heading.left * (input.left - input.right)
            + Vec3::Y * (input.up - input.down)
    }
}
