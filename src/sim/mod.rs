//! Per-frame simulation of the solar system.

pub mod orbit;

pub use orbit::OrbitSimulator;
