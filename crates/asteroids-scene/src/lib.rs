//! Scene graph for the flight demo: an arena of named transform nodes, each
//! carrying primitive geometry descriptors, plus global lights and the sky.
//!
//! The graph records what a renderer should draw; it does not load assets or
//! touch the GPU.

mod geometry;
mod graph;
mod light;
mod transform;

pub use geometry::{Color, Geometry, Material, Mesh};
pub use graph::{Node, NodeId, SceneGraph};
pub use light::{Light, Sky, SkyKind};
pub use transform::Transform;
