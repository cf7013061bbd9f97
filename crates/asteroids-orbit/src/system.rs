//! The sun, its planets and their moons.

use crate::body::OrbitingBody;
use crate::catalog::{
    MAX_MOONS, MOON_SIZE_RATIO, PLANET_SIZE, PlanetSpec, SUN_RADIUS, moon_orbit_radius,
    moon_orbit_speed,
};
use asteroids_scene::{Color, Geometry, Material, Mesh, NodeId, SceneGraph};
use rand::Rng;
use tracing::{debug, info};

/// Sun node plus every planet orbiting it. Planets own their moons.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    sun: NodeId,
    planets: Vec<OrbitingBody>,
}

impl SolarSystem {
    /// Create the sun under `parent` and one planet per catalog entry under
    /// the sun. Initial angles and moon counts are drawn from `rng`.
    pub fn build<R: Rng + ?Sized>(
        graph: &mut SceneGraph,
        parent: NodeId,
        catalog: &[PlanetSpec],
        rng: &mut R,
    ) -> Self {
        let sun = graph.add_node(parent, "Sun");
        graph.attach_geometry(
            sun,
            Geometry::new(
                "Sun",
                Mesh::Sphere {
                    z_samples: 22,
                    radial_samples: 22,
                    radius: SUN_RADIUS,
                },
                Material::Unshaded {
                    color: Color::YELLOW,
                },
            ),
        );

        let planets: Vec<_> = catalog
            .iter()
            .map(|spec| Self::build_planet(graph, sun, spec, rng))
            .collect();

        let system = Self { sun, planets };
        info!(
            planets = system.planets.len(),
            bodies = system.body_count(),
            "Solar system built"
        );
        system
    }

    fn build_planet<R: Rng + ?Sized>(
        graph: &mut SceneGraph,
        sun: NodeId,
        spec: &PlanetSpec,
        rng: &mut R,
    ) -> OrbitingBody {
        let node = graph.add_node(sun, spec.node_name());
        graph.attach_geometry(
            node,
            Geometry::new(
                spec.name,
                Mesh::Sphere {
                    z_samples: 16,
                    radial_samples: 16,
                    radius: PLANET_SIZE,
                },
                Material::Lit {
                    diffuse_map: Some(spec.texture_path()),
                    diffuse: Color::WHITE,
                    shininess: 16.0,
                },
            ),
        );

        let mut planet =
            OrbitingBody::with_random_angle(node, spec.orbit_radius, spec.orbit_speed, rng);
        graph.set_translation(node, planet.local_position());

        if spec.has_moons {
            let count = rng.random_range(1..=MAX_MOONS);
            for i in 0..count {
                let moon_node = graph.add_node(node, spec.moon_node_name(i));
                graph.attach_geometry(
                    moon_node,
                    Geometry::new(
                        format!("Moon_{i}"),
                        Mesh::Sphere {
                            z_samples: 8,
                            radial_samples: 8,
                            radius: PLANET_SIZE * MOON_SIZE_RATIO,
                        },
                        Material::Lit {
                            diffuse_map: None,
                            diffuse: Color::GRAY,
                            shininess: 1.0,
                        },
                    ),
                );
                let moon = OrbitingBody::with_random_angle(
                    moon_node,
                    moon_orbit_radius(i),
                    moon_orbit_speed(i),
                    rng,
                );
                graph.set_translation(moon_node, moon.local_position());
                planet.add_moon(moon);
            }
        }

        debug!(
            planet = spec.name,
            angle = planet.angle(),
            moons = planet.moons().len(),
            "Planet placed"
        );
        planet
    }

    /// Advance every planet and moon by `dt` seconds.
    pub fn advance(&mut self, graph: &mut SceneGraph, dt: f32) {
        for planet in &mut self.planets {
            planet.advance(graph, dt);
        }
    }

    #[must_use]
    pub fn sun(&self) -> NodeId {
        self.sun
    }

    #[must_use]
    pub fn planets(&self) -> &[OrbitingBody] {
        &self.planets
    }

    /// Planets plus moons.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.planets.iter().map(OrbitingBody::body_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PLANETS;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn build(seed: u64) -> (SceneGraph, SolarSystem) {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let system = SolarSystem::build(&mut graph, root, &PLANETS, &mut rng);
        (graph, system)
    }

    #[test]
    fn test_builds_every_catalog_planet_under_sun() {
        let (graph, system) = build(1);
        assert_eq!(graph.node(system.sun()).name(), "Sun");
        assert_eq!(system.planets().len(), PLANETS.len());
        for (planet, spec) in system.planets().iter().zip(PLANETS.iter()) {
            let node = graph.node(planet.node());
            assert_eq!(node.name(), spec.node_name());
            assert_eq!(node.parent(), Some(system.sun()));
            assert_eq!(planet.radius(), spec.orbit_radius);
            assert_eq!(planet.speed(), spec.orbit_speed);
            assert_eq!(node.geometries()[0].name, spec.name);
        }
    }

    #[test]
    fn test_planet_material_uses_catalog_texture() {
        let (graph, system) = build(2);
        let acidia = &graph.node(system.planets()[0].node()).geometries()[0];
        assert_eq!(
            acidia.material,
            Material::Lit {
                diffuse_map: Some("Textures/planet/acid.png".into()),
                diffuse: Color::WHITE,
                shininess: 16.0,
            }
        );
    }

    #[test]
    fn test_moon_counts_follow_catalog() {
        let mut seen = HashSet::new();
        for seed in 0..64 {
            let (graph, system) = build(seed);
            for (planet, spec) in system.planets().iter().zip(PLANETS.iter()) {
                let moons = planet.moons().len();
                if spec.has_moons {
                    assert!((1..=MAX_MOONS).contains(&moons));
                    seen.insert(moons);
                } else {
                    assert_eq!(moons, 0);
                }
                for (i, moon) in planet.moons().iter().enumerate() {
                    assert_eq!(graph.node(moon.node()).name(), spec.moon_node_name(i));
                    assert_eq!(graph.node(moon.node()).parent(), Some(planet.node()));
                    assert_eq!(moon.radius(), moon_orbit_radius(i));
                }
            }
        }
        assert_eq!(seen, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let (_, a) = build(42);
        let (_, b) = build(42);
        let angles = |s: &SolarSystem| s.planets().iter().map(|p| p.angle()).collect::<Vec<_>>();
        assert_eq!(angles(&a), angles(&b));
        assert_eq!(a.body_count(), b.body_count());
    }

    #[test]
    fn test_advance_moves_planets_and_moons() {
        let (mut graph, mut system) = build(3);
        let before: Vec<_> = system.planets().iter().map(|p| p.angle()).collect();
        system.advance(&mut graph, 0.5);
        for (planet, start) in system.planets().iter().zip(before) {
            assert!((planet.angle() - (start + planet.speed() * 0.5)).abs() < 1e-5);
            let placed = graph.local_transform(planet.node()).translation;
            assert!((placed - planet.local_position()).length() < 1e-4);
            for moon in planet.moons() {
                let world = graph.world_transform(moon.node()).translation;
                let expected = planet.local_position() + moon.local_position();
                assert!((world - expected).length() < 1e-3);
            }
        }
    }

    #[test]
    fn test_nodes_placed_before_first_frame() {
        let (graph, system) = build(5);
        let earth = &system.planets()[5];
        let placed = graph.local_transform(earth.node()).translation;
        assert!((placed.length() - 50.0).abs() < 1e-3);
    }
}
