//! # Graphics Module
//!
//! Camera, procedural geometry, scene management, rendering, GPU resources,
//! and pointer picking for the solar system viewer.

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
