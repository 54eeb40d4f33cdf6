//! # Scene Management Module
//!
//! The scene graph for the solar system: the sun, one sphere object per
//! planet, one orbit guide per planet, Saturn's decorative ring, and the
//! starfield, together with the camera and the material library.

pub mod object;
pub mod scene;
pub mod starfield;
pub mod vertex;

// Re-export main types
pub use object::{DrawObject, Object};
pub use scene::Scene;
pub use starfield::StarField;
pub use vertex::{StarVertex, Vertex3D};
