//! Arena-backed node hierarchy.

use crate::geometry::Geometry;
use crate::light::{Light, Sky};
use crate::transform::Transform;
use tracing::trace;

/// Handle to a node in a [`SceneGraph`].
///
/// Only the graph that issued an id can resolve it. Ids stay valid for the
/// lifetime of the graph because nodes are never removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Transform relative to the parent node.
    pub local: Transform,
    geometries: Vec<Geometry>,
}

impl Node {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            local: Transform::IDENTITY,
            geometries: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }
}

/// Named transform nodes under a single root, plus scene-wide lights and sky.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    lights: Vec<Light>,
    sky: Option<Sky>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub const ROOT_NAME: &'static str = "Root";

    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Self::ROOT_NAME.to_owned(), None)],
            lights: Vec::new(),
            sky: None,
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create an empty node with an identity transform under `parent`.
    pub fn add_node(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let name = name.into();
        trace!(?id, ?parent, "add node {name}");
        self.nodes.push(Node::new(name, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn attach_geometry(&mut self, node: NodeId, geometry: Geometry) {
        self.nodes[node.0].geometries.push(geometry);
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn local_transform(&self, id: NodeId) -> &Transform {
        &self.nodes[id.0].local
    }

    pub fn local_transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].local
    }

    pub fn set_translation(&mut self, id: NodeId, translation: glam::Vec3) {
        self.nodes[id.0].local.translation = translation;
    }

    /// Compose local transforms from the root down to `id`.
    #[must_use]
    pub fn world_transform(&self, id: NodeId) -> Transform {
        let mut chain = vec![id];
        let mut cursor = self.nodes[id.0].parent;
        while let Some(parent) = cursor {
            chain.push(parent);
            cursor = self.nodes[parent.0].parent;
        }
        chain
            .iter()
            .rev()
            .fold(Transform::IDENTITY, |acc, node| {
                acc.mul_transform(&self.nodes[node.0].local)
            })
    }

    /// First node with the given name, in creation order.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    #[must_use]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn set_sky(&mut self, sky: Sky) {
        self.sky = Some(sky);
    }

    #[must_use]
    pub fn sky(&self) -> Option<&Sky> {
        self.sky.as_ref()
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root node exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
