//! GPU resource management: materials, textures, and global uniforms.

pub mod global_bindings;
pub mod material;
pub mod texture_loader;
pub mod texture_resource;

pub use material::{Material, MaterialManager};
pub use texture_loader::{TextureLoader, TextureRequest};
pub use texture_resource::TextureResource;
