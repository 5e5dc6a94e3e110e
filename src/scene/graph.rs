//! Minimal scene description used to frame loaded content.
//!
//! This is not a glTF loader: hosts translate whatever their engine holds
//! into these nodes (or implement [`SceneBounds`] directly on their own
//! graph). Only what auto-framing needs is kept: node transforms, the
//! position extent of each mesh primitive, and which nodes carry cameras.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;

/// Provider of world-space bounds for renderable scene content.
pub trait SceneBounds {
    /// Bounds of everything renderable, excluding camera-carrying nodes.
    /// Returns [`Aabb::EMPTY`] when there is nothing to frame.
    fn content_bounds(&self) -> Aabb;
}

/// One drawable piece of a mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    /// Local-space `(min, max)` of the POSITION attribute, if present.
    #[serde(default)]
    pub position_extent: Option<(Vec3, Vec3)>,
}

/// A mesh: a list of primitives sharing a node transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Primitives drawn by this mesh.
    #[serde(default)]
    pub primitives: Vec<Primitive>,
}

/// A node in the scene hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneNode {
    /// Optional display name.
    pub name: Option<String>,
    /// Transform relative to the parent node.
    pub transform: Mat4,
    /// Mesh attached to this node.
    pub mesh: Option<Mesh>,
    /// Whether this node carries a camera.
    pub camera: bool,
    /// Child nodes.
    pub children: Vec<SceneNode>,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            name: None,
            transform: Mat4::IDENTITY,
            mesh: None,
            camera: false,
            children: Vec::new(),
        }
    }
}

impl SceneNode {
    /// A node holding a single primitive with the given local extent.
    #[must_use]
    pub fn with_extent(min: Vec3, max: Vec3) -> Self {
        Self {
            mesh: Some(Mesh {
                primitives: vec![Primitive {
                    position_extent: Some((min, max)),
                }],
            }),
            ..Self::default()
        }
    }

    /// Bounds of this node and its subtree in world space, given the
    /// parent's world transform.
    fn world_bounds(&self, parent_world: &Mat4) -> Aabb {
        if self.camera {
            return Aabb::EMPTY;
        }
        let world = *parent_world * self.transform;

        let own = self
            .mesh
            .iter()
            .flat_map(|mesh| &mesh.primitives)
            .filter_map(|p| p.position_extent)
            .map(|(min, max)| Aabb::from_transformed_extent(min, max, &world))
            .fold(Aabb::EMPTY, |acc, b| acc.union(&b));

        self.children
            .iter()
            .map(|child| child.world_bounds(&world))
            .fold(own, |acc, b| acc.union(&b))
    }
}

/// A scene: the root nodes of one glTF scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Root nodes.
    #[serde(default)]
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    /// Parse a scene description from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl SceneBounds for Scene {
    fn content_bounds(&self) -> Aabb {
        self.nodes
            .iter()
            .map(|node| node.world_bounds(&Mat4::IDENTITY))
            .fold(Aabb::EMPTY, |acc, b| acc.union(&b))
    }
}

impl SceneBounds for Aabb {
    fn content_bounds(&self) -> Aabb {
        *self
    }
}
