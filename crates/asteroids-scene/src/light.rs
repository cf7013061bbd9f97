//! Scene-wide lights and the sky backdrop.

use crate::geometry::Color;
use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub enum Light {
    /// Parallel rays travelling along `direction` (unit length).
    Directional { color: Color, direction: Vec3 },
    /// Constant fill light.
    Ambient { color: Color },
}

impl Light {
    /// Directional light; `direction` is normalized here.
    #[must_use]
    pub fn directional(color: Color, direction: Vec3) -> Self {
        Light::Directional {
            color,
            direction: direction.normalize_or_zero(),
        }
    }
}

/// How the sky texture is projected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkyKind {
    SphereMap,
    CubeMap,
}

/// Background drawn behind everything else.
#[derive(Clone, Debug, PartialEq)]
pub struct Sky {
    pub texture: String,
    pub kind: SkyKind,
}
