use asteroids_scene::{NodeId, SceneGraph};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// A node that circles its parent node at a fixed radius and angular speed.
///
/// Radius and speed are fixed at construction. The angle grows without bound;
/// positions are taken through `cos`/`sin` so it never needs wrapping.
#[derive(Debug, Clone)]
pub struct OrbitingBody {
    node: NodeId,
    radius: f32,
    speed: f32,
    angle: f32,
    moons: Vec<OrbitingBody>,
}

impl OrbitingBody {
    /// Body starting at `angle` radians. Negative radii are treated as zero.
    #[must_use]
    pub fn new(node: NodeId, radius: f32, speed: f32, angle: f32) -> Self {
        Self {
            node,
            radius: radius.max(0.0),
            speed,
            angle,
            moons: Vec::new(),
        }
    }

    /// Body starting at a uniformly random angle in `[0, 2π)`.
    pub fn with_random_angle<R: Rng + ?Sized>(
        node: NodeId,
        radius: f32,
        speed: f32,
        rng: &mut R,
    ) -> Self {
        Self::new(node, radius, speed, rng.random_range(0.0..TAU))
    }

    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Angular speed in radians per second. Negative values orbit clockwise.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[must_use]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[must_use]
    pub fn moons(&self) -> &[OrbitingBody] {
        &self.moons
    }

    pub fn add_moon(&mut self, moon: OrbitingBody) {
        self.moons.push(moon);
    }

    /// Offset from the parent node at the current angle.
    #[must_use]
    pub fn local_position(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.angle.cos(),
            0.0,
            self.radius * self.angle.sin(),
        )
    }

    /// Advance this body and its moons by `dt` seconds and move their nodes.
    pub fn advance(&mut self, graph: &mut SceneGraph, dt: f32) {
        self.angle += self.speed * dt;
        graph.set_translation(self.node, self.local_position());
        for moon in &mut self.moons {
            moon.advance(graph, dt);
        }
    }

    /// This body plus every moon beneath it.
    #[must_use]
    pub fn body_count(&self) -> usize {
        1 + self.moons.iter().map(OrbitingBody::body_count).sum::<usize>()
    }
}
