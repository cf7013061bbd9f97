use glam::Vec3;

/// Per-frame kinematic state of the ship. Position and orientation live on
/// the ship's scene node; this holds the rates that drift between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShipState {
    /// World-space linear velocity in units per second.
    pub velocity: Vec3,
    /// Pitch (x), yaw (y) and roll (z) rates in radians per second.
    pub angular_velocity: Vec3,
    /// Keyboard yaw drift around world up, radians per second.
    pub yaw_velocity: f32,
}

impl ShipState {
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// True once every rate has decayed below `epsilon`.
    #[must_use]
    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.velocity.length() < epsilon
            && self.angular_velocity.length() < epsilon
            && self.yaw_velocity.abs() < epsilon
    }
}
