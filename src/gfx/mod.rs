//! # Graphics Module
//!
//! Camera, geometry, scene and rendering for the orrery.
//!
//! - **Camera System** ([`camera`]) - orbit camera with drag, pan and zoom
//! - **Geometry** ([`geometry`]) - procedural spheres, rings and starfield
//! - **Rendering Pipeline** ([`rendering`]) - single forward pass with a point light
//! - **Scene Management** ([`scene`]) - objects, meshes and transforms
//! - **Resource Management** ([`resources`]) - uniforms, bind groups and depth buffer

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
