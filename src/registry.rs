//! Static registry of the celestial bodies the viewer renders.
//!
//! The registry order is load-bearing: speed sliders, simulator state, and
//! scene meshes are all indexed by position in [`PLANETS`]. Picking is the
//! only place bodies are resolved by identity rather than position.

/// Immutable configuration for one orbiting body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDef {
    pub name: &'static str,
    /// Sphere radius used for rendering and picking.
    pub visual_radius: f32,
    /// Orbit circle radius, centered on the sun.
    pub orbit_radius: f32,
    /// Default orbital advance in radians per rendered frame.
    pub angular_speed: f32,
    /// Material color shown until the body's texture finishes loading,
    /// and kept if the load fails.
    pub fallback_color: [f32; 3],
}

pub const PLANETS: [BodyDef; 8] = [
    BodyDef { name: "Mercury", visual_radius: 2.0, orbit_radius: 18.0, angular_speed: 0.030, fallback_color: [0.55, 0.53, 0.52] },
    BodyDef { name: "Venus",   visual_radius: 2.5, orbit_radius: 24.0, angular_speed: 0.020, fallback_color: [0.80, 0.66, 0.44] },
    BodyDef { name: "Earth",   visual_radius: 3.0, orbit_radius: 30.0, angular_speed: 0.010, fallback_color: [0.24, 0.43, 0.66] },
    BodyDef { name: "Mars",    visual_radius: 2.7, orbit_radius: 36.0, angular_speed: 0.016, fallback_color: [0.69, 0.33, 0.20] },
    BodyDef { name: "Jupiter", visual_radius: 4.5, orbit_radius: 44.0, angular_speed: 0.011, fallback_color: [0.76, 0.62, 0.47] },
    BodyDef { name: "Saturn",  visual_radius: 4.2, orbit_radius: 52.0, angular_speed: 0.010, fallback_color: [0.82, 0.72, 0.54] },
    BodyDef { name: "Uranus",  visual_radius: 3.8, orbit_radius: 60.0, angular_speed: 0.008, fallback_color: [0.62, 0.80, 0.84] },
    BodyDef { name: "Neptune", visual_radius: 3.7, orbit_radius: 68.0, angular_speed: 0.006, fallback_color: [0.27, 0.42, 0.81] },
];

pub const SUN_NAME: &str = "Sun";
pub const SUN_RADIUS: f32 = 10.0;
pub const SUN_FALLBACK_COLOR: [f32; 3] = [1.0, 0.85, 0.45];

/// Self-rotation applied to every planet mesh, radians per frame,
/// independent of the orbital speed.
pub const SELF_SPIN_STEP: f32 = 0.01;

/// Upper bound for the speed sliders. Lower bound is zero.
pub const MAX_ANGULAR_SPEED: f32 = 0.1;

/// Whether this body carries the semi-transparent decorative ring.
pub fn has_decor_ring(def: &BodyDef) -> bool {
    def.name == "Saturn"
}

/// Texture file path for a body name.
pub fn texture_path(name: &str) -> std::path::PathBuf {
    std::path::PathBuf::from(format!("assets/textures/{}.jpg", name.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_is_fixed() {
        let names: Vec<&str> = PLANETS.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            ["Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );
    }

    #[test]
    fn test_only_saturn_has_decor_ring() {
        let ringed: Vec<&str> = PLANETS
            .iter()
            .filter(|p| has_decor_ring(p))
            .map(|p| p.name)
            .collect();
        assert_eq!(ringed, ["Saturn"]);
    }

    #[test]
    fn test_default_speeds_within_slider_bounds() {
        for planet in &PLANETS {
            assert!(planet.angular_speed >= 0.0);
            assert!(planet.angular_speed <= MAX_ANGULAR_SPEED);
        }
    }

    #[test]
    fn test_texture_paths_are_lowercase() {
        assert_eq!(
            texture_path("Earth"),
            std::path::PathBuf::from("assets/textures/earth.jpg")
        );
    }
}
