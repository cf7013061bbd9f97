//! One-time construction of the demo scene.

use asteroids_orbit::{PLANETS, SolarSystem};
use asteroids_scene::{
    Color, Geometry, Light, Material, Mesh, NodeId, SceneGraph, Sky, SkyKind,
};
use glam::Vec3;
use rand::Rng;
use tracing::info;

pub const SKY_TEXTURE: &str = "Textures/cosmos/stars.png";
pub const PLAYER_NODE: &str = "Player";
/// Half extents of the ship box: wide, flat and long.
pub const SHIP_HALF_EXTENTS: Vec3 = Vec3::new(1.0, 0.25, 2.0);

/// Handles to the parts of the scene that change every frame.
pub struct SceneHandles {
    pub player: NodeId,
    pub system: SolarSystem,
}

/// Populate `graph` with the sky, the player ship, the lights, the sun and
/// every catalog planet.
pub fn build_scene<R: Rng + ?Sized>(graph: &mut SceneGraph, rng: &mut R) -> SceneHandles {
    let root = graph.root();

    graph.set_sky(Sky {
        texture: SKY_TEXTURE.to_owned(),
        kind: SkyKind::SphereMap,
    });

    let player = graph.add_node(root, PLAYER_NODE);
    graph.attach_geometry(
        player,
        Geometry::new(
            "Ship",
            Mesh::Box {
                half_extents: SHIP_HALF_EXTENTS,
            },
            Material::Unshaded { color: Color::BLUE },
        ),
    );

    graph.add_light(Light::directional(Color::WHITE, Vec3::new(-1.0, -1.0, -1.0)));
    graph.add_light(Light::Ambient { color: Color::GRAY });

    let system = SolarSystem::build(graph, root, &PLANETS, rng);

    info!(nodes = graph.len(), lights = graph.lights().len(), "Scene built");
    SceneHandles { player, system }
}
