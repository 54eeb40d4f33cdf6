// src/lib.rs
//! Orrery
//!
//! An interactive 3D solar system viewer built on wgpu and winit. The scene
//! (sun, planets, orbit guides, starfield) is built once, planets advance on
//! closed-form circular orbits every frame, and the pointer is ray-cast
//! against the planet spheres to drive a hover tooltip. An imgui overlay
//! exposes per-planet speed sliders and a light/dark theme toggle.

pub mod app;
pub mod gfx;
pub mod registry;
pub mod sim;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::OrreryApp;
