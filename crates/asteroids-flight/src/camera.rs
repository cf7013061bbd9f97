//! Rigid chase camera.

use crate::integrator::Heading;
use asteroids_config::CameraConfig;
use asteroids_scene::Transform;
use glam::{Mat4, Vec3};

/// Where the camera sits and what it looks at for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraPose {
    /// Unit view direction, or zero if the camera sits on its target.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Unit vector to the camera's left.
    #[must_use]
    pub fn left(&self) -> Vec3 {
        self.up.cross(self.direction()).normalize_or_zero()
    }

    /// Horizontal thrust basis as seen through this camera.
    #[must_use]
    pub fn heading(&self) -> Heading {
        Heading::from_axes(self.direction(), self.left())
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }
}

/// Keeps the camera at a fixed offset in the ship's frame, looking at the ship.
#[derive(Debug, Clone)]
pub struct FollowCamera {
    offset: Vec3,
    fov_y: f32,
    near: f32,
    far: f32,
}

impl FollowCamera {
    #[must_use]
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            offset: Vec3::from_array(config.offset),
            fov_y: config.fov_y_degrees.to_radians(),
            near: config.near,
            far: config.far,
        }
    }

    /// Camera pose for a ship with world transform `target`.
    #[must_use]
    pub fn pose(&self, target: &Transform) -> CameraPose {
        CameraPose {
            position: target.translation + target.rotation * self.offset,
            target: target.translation,
            up: Vec3::Y,
        }
    }

    /// Vertical field of view in radians.
    #[must_use]
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Right-handed perspective projection. `aspect` falls back to 1 when the
    /// window has no area.
    #[must_use]
    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }
}
