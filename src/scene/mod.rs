//! Scene-side collaborators of the camera: bounding boxes and the
//! [`SceneBounds`] port the controller frames against.

mod bounds;
mod graph;

pub use bounds::Aabb;
pub use graph::{Mesh, Primitive, Scene, SceneBounds, SceneNode};
