//! The fixed set of planets and the sizing rules for their moons.

/// Static description of one planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetSpec {
    /// File stem under `Textures/planet/`.
    pub texture: &'static str,
    pub name: &'static str,
    pub orbit_radius: f32,
    /// Radians per second.
    pub orbit_speed: f32,
    pub has_moons: bool,
}

impl PlanetSpec {
    const fn new(
        texture: &'static str,
        name: &'static str,
        orbit_radius: f32,
        orbit_speed: f32,
        has_moons: bool,
    ) -> Self {
        Self {
            texture,
            name,
            orbit_radius,
            orbit_speed,
            has_moons,
        }
    }

    #[must_use]
    pub fn texture_path(&self) -> String {
        format!("Textures/planet/{}.png", self.texture)
    }

    /// Name of the node the orbit moves. The planet's geometry is its child
    /// and carries the bare planet name.
    #[must_use]
    pub fn node_name(&self) -> String {
        format!("{}_Node", self.name)
    }

    #[must_use]
    pub fn moon_node_name(&self, index: usize) -> String {
        format!("{}_Moon_{index}", self.name)
    }
}

pub const PLANETS: [PlanetSpec; 10] = [
    PlanetSpec::new("acid", "Acidia", 100.0, 0.65, true),
    PlanetSpec::new("atmosphere", "Atmos", 130.0, 0.52, false),
    PlanetSpec::new("clouds", "Nimbus", 160.0, 0.61, true),
    PlanetSpec::new("craters", "Crateria", 190.0, 0.67, true),
    PlanetSpec::new("haze", "Hazeon", 220.0, 0.44, false),
    PlanetSpec::new("home", "Earth", 50.0, 0.50, true),
    PlanetSpec::new("ice", "Glacior", 40.0, 0.48, false),
    PlanetSpec::new("rock", "Petra", 110.0, 0.58, true),
    PlanetSpec::new("stripes", "Striatos", 120.0, 0.40, true),
    PlanetSpec::new("swirl", "Swirlia", 250.0, 0.30, true),
];

pub const SUN_RADIUS: f32 = 16.0;
pub const PLANET_SIZE: f32 = 8.0;
pub const MOON_SIZE_RATIO: f32 = 0.2;
/// A moon-bearing planet gets between 1 and this many moons.
pub const MAX_MOONS: usize = 3;

/// Orbit radius of the `index`-th moon around its planet.
#[must_use]
pub fn moon_orbit_radius(index: usize) -> f32 {
    6.0 + 4.0 * index as f32
}

/// Orbit speed of the `index`-th moon, radians per second.
#[must_use]
pub fn moon_orbit_speed(index: usize) -> f32 {
    1.2 + 0.3 * index as f32
}
