//! # Scene Management Module
//!
//! Objects, their meshes and the camera that looks at them.
//!
//! - [`Scene`] - container for objects and the camera manager
//! - [`Object`] - a named set of meshes with a transform and flat material
//! - [`Vertex3D`] - position and normal vertex layout

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{DrawObject, Mesh, Object};
pub use scene::{Scene, SceneStatistics};
pub use vertex::Vertex3D;
