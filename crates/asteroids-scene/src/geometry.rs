//! Primitive meshes and materials attached to scene nodes.

/// Linear RGBA color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Self = Self::rgb(0.2, 0.2, 0.2);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);

    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Primitive shape descriptors.
#[derive(Clone, Debug, PartialEq)]
pub enum Mesh {
    /// Axis-aligned box centred on the node origin.
    Box { half_extents: glam::Vec3 },
    /// UV sphere centred on the node origin.
    Sphere {
        /// Rings from pole to pole.
        z_samples: u32,
        /// Segments around the equator.
        radial_samples: u32,
        radius: f32,
    },
}

/// Surface description.
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    /// Flat color, ignores lights.
    Unshaded { color: Color },
    /// Lambert/Phong lit surface with an optional diffuse texture.
    Lit {
        /// Asset path of the diffuse texture, relative to the asset root.
        diffuse_map: Option<String>,
        diffuse: Color,
        shininess: f32,
    },
}

/// A named mesh plus its material.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    pub name: String,
    pub mesh: Mesh,
    pub material: Material,
}

impl Geometry {
    pub fn new(name: impl Into<String>, mesh: Mesh, material: Material) -> Self {
        Self {
            name: name.into(),
            mesh,
            material,
        }
    }
}
