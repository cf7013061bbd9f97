//! Circular orbits for the sun's planets and their moons.
//!
//! Every [`OrbitingBody`] drives one scene node around its parent node on a
//! flat circle in the XZ plane. [`SolarSystem`] builds the bodies from the
//! [`PLANETS`] catalog and advances all of them once per frame.

mod body;
mod catalog;
mod system;

pub use body::OrbitingBody;
pub use catalog::{
    MAX_MOONS, MOON_SIZE_RATIO, PLANET_SIZE, PLANETS, PlanetSpec, SUN_RADIUS, moon_orbit_radius,
    moon_orbit_speed,
};
pub use system::SolarSystem;
