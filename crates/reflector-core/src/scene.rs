//! Scene graph with explicit capability tags and render sets.
//!
//! Nodes carry a [`NodeTag`] assigned when they are inserted, so renderers
//! never have to inspect a node to find out whether it can be drawn. What a
//! render pass draws is decided by the [`RenderSet`] handed to it, which is how
//! a mirror leaves itself out of its own reflection.

use glam::{Mat4, Vec3, Vec4};

use crate::error::{ReflectorError, Result};

/// Stable identifier of a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capability tag attached to a node at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    /// A mesh drawn with its flat material.
    RenderableMesh,
    /// A planar mirror surface.
    Mirror,
    /// A grouping or helper node with nothing to draw.
    Empty,
}

impl NodeTag {
    /// Returns display name.
    pub fn name(self) -> &'static str {
        match self {
            NodeTag::RenderableMesh => "renderable-mesh",
            NodeTag::Mirror => "mirror",
            NodeTag::Empty => "empty",
        }
    }

    /// Whether nodes with this tag produce draw calls.
    pub fn is_drawable(self) -> bool {
        !matches!(self, NodeTag::Empty)
    }
}

/// Triangle mesh in node-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGeometry {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
    /// Flat surface color (RGBA).
    pub color: Vec4,
}

impl MeshGeometry {
    /// Creates geometry, checking that every index refers to a vertex.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, color: Vec4) -> Result<Self> {
        if let Some(&index) = indices
            .iter()
            .find(|&&i| i as usize >= positions.len())
        {
            return Err(ReflectorError::IndexOutOfRange {
                index,
                vertex_count: positions.len(),
            });
        }
        Ok(Self {
            positions,
            indices,
            color,
        })
    }

    /// A `width` x `height` rectangle in the local XY plane, facing +Z.
    pub fn quad(width: f32, height: f32, color: Vec4) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        Self {
            positions: vec![
                Vec3::new(-hw, -hh, 0.0),
                Vec3::new(hw, -hh, 0.0),
                Vec3::new(hw, hh, 0.0),
                Vec3::new(-hw, hh, 0.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
            color,
        }
    }

    /// An axis-aligned box centered at the origin.
    pub fn cuboid(half_extents: Vec3, color: Vec4) -> Self {
        let h = half_extents;
        let positions = vec![
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
        ];
        #[rustfmt::skip]
        let indices = vec![
            4, 5, 6, 4, 6, 7, // +Z
            1, 0, 3, 1, 3, 2, // -Z
            5, 1, 2, 5, 2, 6, // +X
            0, 4, 7, 0, 7, 3, // -X
            7, 6, 2, 7, 2, 3, // +Y
            0, 1, 5, 0, 5, 4, // -Y
        ];
        Self {
            positions,
            indices,
            color,
        }
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A node in the scene.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Human-readable name.
    pub name: String,
    /// Capability tag, fixed at insertion.
    tag: NodeTag,
    /// Local-to-world transform.
    pub transform: Mat4,
    /// Geometry for drawable nodes.
    geometry: Option<MeshGeometry>,
    /// Whether the node takes part in render sets.
    pub visible: bool,
}

impl SceneNode {
    /// Returns the capability tag.
    pub fn tag(&self) -> NodeTag {
        self.tag
    }

    /// Returns the geometry, if the node has any.
    pub fn geometry(&self) -> Option<&MeshGeometry> {
        self.geometry.as_ref()
    }
}

/// The scene: a flat list of nodes addressed by [`NodeId`].
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<(NodeId, SceneNode)>,
    next_id: u32,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        log::debug!("scene: added {} '{}' as {id}", node.tag.name(), node.name);
        self.nodes.push((id, node));
        id
    }

    /// Adds a drawable mesh.
    pub fn add_mesh(
        &mut self,
        name: impl Into<String>,
        geometry: MeshGeometry,
        transform: Mat4,
    ) -> NodeId {
        self.insert(SceneNode {
            name: name.into(),
            tag: NodeTag::RenderableMesh,
            transform,
            geometry: Some(geometry),
            visible: true,
        })
    }

    /// Adds a mirror surface with the given local geometry.
    pub fn add_mirror(
        &mut self,
        name: impl Into<String>,
        geometry: MeshGeometry,
        transform: Mat4,
    ) -> NodeId {
        self.insert(SceneNode {
            name: name.into(),
            tag: NodeTag::Mirror,
            transform,
            geometry: Some(geometry),
            visible: true,
        })
    }

    /// Adds a node with nothing to draw.
    pub fn add_empty(&mut self, name: impl Into<String>, transform: Mat4) -> NodeId {
        self.insert(SceneNode {
            name: name.into(),
            tag: NodeTag::Empty,
            transform,
            geometry: None,
            visible: true,
        })
    }

    /// Gets a node by id.
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes
            .iter()
            .find(|(node_id, _)| *node_id == id)
            .map(|(_, node)| node)
    }

    /// Gets a mutable node by id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes
            .iter_mut()
            .find(|(node_id, _)| *node_id == id)
            .map(|(_, node)| node)
    }

    /// Replaces the transform of a node.
    pub fn set_transform(&mut self, id: NodeId, transform: Mat4) -> Result<()> {
        let node = self.get_mut(id).ok_or(ReflectorError::NodeNotFound(id.0))?;
        node.transform = transform;
        Ok(())
    }

    /// Checks that `id` exists and carries `expected`.
    pub fn expect_tag(&self, id: NodeId, expected: NodeTag) -> Result<&SceneNode> {
        let node = self.get(id).ok_or(ReflectorError::NodeNotFound(id.0))?;
        if node.tag != expected {
            return Err(ReflectorError::WrongNodeTag {
                id: id.0,
                expected: expected.name(),
                actual: node.tag.name(),
            });
        }
        Ok(node)
    }

    /// Removes a node.
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        let index = self.nodes.iter().position(|(node_id, _)| *node_id == id)?;
        Some(self.nodes.remove(index).1)
    }

    /// Iterates nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every visible drawable node, in insertion order.
    pub fn render_set(&self) -> RenderSet {
        RenderSet {
            nodes: self
                .nodes
                .iter()
                .filter(|(_, node)| node.visible && node.tag.is_drawable())
                .map(|(id, _)| *id)
                .collect(),
        }
    }
}

/// An explicit, ordered selection of nodes for one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSet {
    nodes: Vec<NodeId>,
}

impl RenderSet {
    /// Builds a set from ids, keeping their order.
    pub fn from_ids(ids: impl IntoIterator<Item = NodeId>) -> Self {
        let mut nodes: Vec<NodeId> = Vec::new();
        for id in ids {
            if !nodes.contains(&id) {
                nodes.push(id);
            }
        }
        Self { nodes }
    }

    /// Returns the set without `id`.
    #[must_use]
    pub fn without(mut self, id: NodeId) -> Self {
        self.nodes.retain(|&n| n != id);
        self
    }

    /// Whether `id` is part of the set.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    /// Iterates ids in draw order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
