//! Small wgpu helpers shared across the graphics stack.

pub mod binding_builder;
pub mod binding_types;
pub mod uniform_buffer;
