//! Closed-form circular orbit simulation.
//!
//! Runs once per rendered frame: each body's orbital angle advances by its
//! current speed and its mesh spins by a fixed step. Advancement is
//! per-frame rather than per-second on purpose; the viewer is a visual toy
//! and inherits the frame-rate-dependent pacing of its controls.

use cgmath::Vector3;
use rand::Rng;

use crate::registry::{BodyDef, SELF_SPIN_STEP};

/// Mutable per-body simulation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// Orbital angle in radians. Unbounded; positions wrap naturally
    /// through cos/sin.
    pub angle: f32,
    /// Accumulated self-rotation about the body's vertical axis.
    pub spin: f32,
}

/// Advances every body along its orbit circle.
///
/// Indexed identically to the body registry. Speeds are owned by the control
/// surface and passed in each step, so a slider change takes effect on the
/// next frame without touching any scene state.
pub struct OrbitSimulator {
    orbit_radii: Vec<f32>,
    states: Vec<BodyState>,
}

impl OrbitSimulator {
    /// Creates a simulator with a random initial angle per body.
    pub fn new<R: Rng>(bodies: &[BodyDef], rng: &mut R) -> Self {
        let angles = bodies
            .iter()
            .map(|_| rng.random_range(0.0..std::f32::consts::TAU))
            .collect();
        Self::with_initial_angles(bodies, angles)
    }

    /// Creates a simulator with explicit initial angles.
    pub fn with_initial_angles(bodies: &[BodyDef], angles: Vec<f32>) -> Self {
        assert_eq!(bodies.len(), angles.len());
        Self {
            orbit_radii: bodies.iter().map(|b| b.orbit_radius).collect(),
            states: angles
                .into_iter()
                .map(|angle| BodyState { angle, spin: 0.0 })
                .collect(),
        }
    }

    /// Advances every body by one frame.
    ///
    /// `speeds` is indexed like the registry; each entry is radians per
    /// frame. Self-rotation advances by a fixed step regardless of the
    /// orbital speed.
    pub fn step(&mut self, speeds: &[f32]) {
        debug_assert_eq!(speeds.len(), self.states.len());
        for (state, &speed) in self.states.iter_mut().zip(speeds) {
            state.angle += speed;
            state.spin += SELF_SPIN_STEP;
        }
    }

    /// World-space position of body `index` on its orbit circle, in the
    /// Y-up orbital plane.
    pub fn position(&self, index: usize) -> Vector3<f32> {
        let state = &self.states[index];
        let radius = self.orbit_radii[index];
        Vector3::new(radius * state.angle.cos(), 0.0, radius * state.angle.sin())
    }

    pub fn state(&self, index: usize) -> BodyState {
        self.states[index]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PLANETS;
    use cgmath::InnerSpace;

    fn single_body(orbit_radius: f32, angular_speed: f32) -> [BodyDef; 1] {
        [BodyDef {
            name: "Earth",
            visual_radius: 3.0,
            orbit_radius,
            angular_speed,
            fallback_color: [0.24, 0.43, 0.66],
        }]
    }

    #[test]
    fn test_angle_advances_linearly() {
        let bodies = single_body(30.0, 0.01);
        let mut sim = OrbitSimulator::with_initial_angles(&bodies, vec![0.5]);
        for _ in 0..200 {
            sim.step(&[0.01]);
        }
        assert!((sim.state(0).angle - (0.5 + 200.0 * 0.01)).abs() < 1e-4);
    }

    #[test]
    fn test_earth_scenario_after_100_frames() {
        let bodies = single_body(30.0, 0.01);
        let mut sim = OrbitSimulator::with_initial_angles(&bodies, vec![0.0]);
        for _ in 0..100 {
            sim.step(&[0.01]);
        }
        let state = sim.state(0);
        assert!((state.angle - 1.0).abs() < 1e-5);

        let position = sim.position(0);
        assert!((position.x - 30.0 * 1.0f32.cos()).abs() < 1e-3);
        assert_eq!(position.y, 0.0);
        assert!((position.z - 30.0 * 1.0f32.sin()).abs() < 1e-3);
        // ~ (16.2, 0.0, 25.2)
        assert!((position.x - 16.2).abs() < 0.1);
        assert!((position.z - 25.2).abs() < 0.1);
    }

    #[test]
    fn test_position_stays_on_orbit_circle() {
        let bodies = single_body(44.0, 0.07);
        let mut sim = OrbitSimulator::with_initial_angles(&bodies, vec![2.1]);
        for _ in 0..500 {
            sim.step(&[0.07]);
            assert!((sim.position(0).magnitude() - 44.0).abs() < 1e-2);
        }
    }

    #[test]
    fn test_bodies_are_independent() {
        let mut baseline = OrbitSimulator::with_initial_angles(&PLANETS, vec![0.0; PLANETS.len()]);
        let mut modified = OrbitSimulator::with_initial_angles(&PLANETS, vec![0.0; PLANETS.len()]);

        let default_speeds: Vec<f32> = PLANETS.iter().map(|p| p.angular_speed).collect();
        let mut altered_speeds = default_speeds.clone();
        altered_speeds[2] = 0.09; // crank Earth only

        for _ in 0..50 {
            baseline.step(&default_speeds);
            modified.step(&altered_speeds);
        }

        for i in 0..PLANETS.len() {
            if i == 2 {
                assert_ne!(baseline.state(i).angle, modified.state(i).angle);
            } else {
                assert_eq!(baseline.state(i).angle, modified.state(i).angle);
            }
        }
    }

    #[test]
    fn test_zero_speed_freezes_orbit_but_not_spin() {
        let bodies = single_body(30.0, 0.01);
        let mut sim = OrbitSimulator::with_initial_angles(&bodies, vec![1.25]);
        let frozen = sim.position(0);
        for _ in 0..300 {
            sim.step(&[0.0]);
        }
        assert_eq!(sim.position(0), frozen);
        assert!((sim.state(0).spin - 300.0 * SELF_SPIN_STEP).abs() < 1e-4);
    }

    #[test]
    fn test_random_initial_angles_in_range() {
        let mut rng = rand::rng();
        let sim = OrbitSimulator::new(&PLANETS, &mut rng);
        assert_eq!(sim.len(), PLANETS.len());
        for i in 0..sim.len() {
            let angle = sim.state(i).angle;
            assert!((0.0..std::f32::consts::TAU).contains(&angle));
        }
    }
}
