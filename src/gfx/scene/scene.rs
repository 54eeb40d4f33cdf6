use cgmath::Rad;
use rand::Rng;
use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    geometry::{generate_annulus, generate_uv_sphere},
    resources::{
        material::{Material, MaterialManager},
        texture_loader::TextureRequest,
    },
};
use crate::registry::{self, PLANETS, SUN_FALLBACK_COLOR, SUN_NAME, SUN_RADIUS};
use crate::sim::OrbitSimulator;

use super::object::{Mesh, Object};
use super::starfield::StarField;

/// Sphere tessellation used for the sun and every planet.
const SPHERE_SEGMENTS: u32 = 32;
/// Full-circle segment count for the orbit guide rings.
const ORBIT_GUIDE_SEGMENTS: u32 = 128;
/// Segment count for Saturn's decorative ring.
const DECOR_RING_SEGMENTS: u32 = 64;

/// Subtle self-glow on the planet materials so the night side is not
/// pitch black.
const PLANET_EMISSIVE: [f32; 3] = [0.066, 0.066, 0.066];

const ORBIT_GUIDE_COLOR: [f32; 4] = [0.533, 0.533, 0.533, 1.0];
const DECOR_RING_COLOR: [f32; 4] = [0.824, 0.706, 0.549, 0.6];

/// The solar system scene: camera, materials, and every renderable object.
///
/// Built exactly once per window lifetime. Speed and theme changes never
/// touch it — speeds live in the control state and the theme only selects
/// the clear color.
pub struct Scene {
    pub camera_manager: CameraManager,
    pub material_manager: MaterialManager,
    pub sun: Object,
    /// One sphere per planet, index-aligned with the body registry.
    pub planets: Vec<Object>,
    /// One orbit guide annulus per planet, same index order.
    pub orbit_guides: Vec<Object>,
    /// Decorative rings and the index of the planet each one follows.
    pub decor_rings: Vec<(usize, Object)>,
    pub starfield: StarField,
}

impl Scene {
    /// Builds the scene graph and returns it along with the texture requests
    /// it wants loaded (one per body plus the sun).
    pub fn build<R: Rng>(camera_manager: CameraManager, rng: &mut R) -> (Self, Vec<TextureRequest>) {
        let mut material_manager = MaterialManager::new();
        let mut texture_requests = Vec::with_capacity(PLANETS.len() + 1);

        let sun_material_id = material_id(SUN_NAME);
        material_manager.add_material(Material::new(
            &sun_material_id,
            [
                SUN_FALLBACK_COLOR[0],
                SUN_FALLBACK_COLOR[1],
                SUN_FALLBACK_COLOR[2],
                1.0,
            ],
        ));
        texture_requests.push(TextureRequest {
            material: sun_material_id.clone(),
            path: registry::texture_path(SUN_NAME),
        });

        let sun = Object::new(
            SUN_NAME,
            Mesh::from_geometry(&generate_uv_sphere(SUN_RADIUS, SPHERE_SEGMENTS, SPHERE_SEGMENTS)),
            &sun_material_id,
        );

        let mut planets = Vec::with_capacity(PLANETS.len());
        let mut orbit_guides = Vec::with_capacity(PLANETS.len());
        let mut decor_rings = Vec::new();

        material_manager.add_material(Material::new("orbit_guide", ORBIT_GUIDE_COLOR));
        material_manager.add_material(Material::new("decor_ring", DECOR_RING_COLOR));

        for (index, def) in PLANETS.iter().enumerate() {
            let id = material_id(def.name);
            material_manager.add_material(
                Material::new(
                    &id,
                    [
                        def.fallback_color[0],
                        def.fallback_color[1],
                        def.fallback_color[2],
                        1.0,
                    ],
                )
                .with_emission(PLANET_EMISSIVE[0], PLANET_EMISSIVE[1], PLANET_EMISSIVE[2]),
            );
            texture_requests.push(TextureRequest {
                material: id.clone(),
                path: registry::texture_path(def.name),
            });

            planets.push(Object::new(
                def.name,
                Mesh::from_geometry(&generate_uv_sphere(
                    def.visual_radius,
                    SPHERE_SEGMENTS,
                    SPHERE_SEGMENTS,
                )),
                &id,
            ));

            orbit_guides.push(Object::new(
                &format!("{} orbit", def.name),
                Mesh::from_geometry(&generate_annulus(
                    def.orbit_radius - 1.0,
                    def.orbit_radius + 1.0,
                    ORBIT_GUIDE_SEGMENTS,
                )),
                "orbit_guide",
            ));

            if registry::has_decor_ring(def) {
                decor_rings.push((
                    index,
                    Object::new(
                        &format!("{} ring", def.name),
                        Mesh::from_geometry(&generate_annulus(
                            def.visual_radius + 1.0,
                            def.visual_radius + 2.0,
                            DECOR_RING_SEGMENTS,
                        )),
                        "decor_ring",
                    ),
                ));
            }
        }

        let scene = Self {
            camera_manager,
            material_manager,
            sun,
            planets,
            orbit_guides,
            decor_rings,
            starfield: StarField::generate(rng),
        };

        (scene, texture_requests)
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    /// Moves every planet to its simulated orbit position and carries each
    /// decorative ring along with its planet.
    pub fn sync_orbits(&mut self, simulator: &OrbitSimulator) {
        debug_assert_eq!(self.planets.len(), simulator.len());
        for (index, planet) in self.planets.iter_mut().enumerate() {
            let state = simulator.state(index);
            planet.set_orbit_transform(simulator.position(index), Rad(state.spin));
        }
        for (planet_index, ring) in &mut self.decor_rings {
            ring.transform = self.planets[*planet_index].transform;
        }
    }

    /// Initializes GPU resources for all objects and materials
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        self.sun.init_gpu_resources(device);
        for planet in &mut self.planets {
            planet.init_gpu_resources(device);
        }
        for guide in &mut self.orbit_guides {
            guide.init_gpu_resources(device);
        }
        for (_, ring) in &mut self.decor_rings {
            ring.init_gpu_resources(device);
        }
        self.starfield.init_gpu_resources(device);

        self.material_manager.update_all_gpu_resources(device, queue);
    }

    /// Syncs every object transform to the GPU.
    pub fn update_transforms(&self, queue: &wgpu::Queue) {
        self.sun.update_transform(queue);
        for planet in &self.planets {
            planet.update_transform(queue);
        }
        for guide in &self.orbit_guides {
            guide.update_transform(queue);
        }
        for (_, ring) in &self.decor_rings {
            ring.update_transform(queue);
        }
    }

    /// Pickable spheres (world-space center + radius), index-aligned with
    /// the registry.
    pub fn planet_spheres(&self, simulator: &OrbitSimulator) -> Vec<(cgmath::Vector3<f32>, f32)> {
        PLANETS
            .iter()
            .enumerate()
            .map(|(i, def)| (simulator.position(i), def.visual_radius))
            .collect()
    }
}

fn material_id(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::camera_controller::CameraController;
    use crate::gfx::camera::orbit_camera::OrbitCamera;
    use cgmath::{InnerSpace, Vector4};

    fn test_scene() -> Scene {
        let camera_manager =
            CameraManager::new(OrbitCamera::default(), CameraController::new(0.005, 0.1));
        let mut rng = rand::rng();
        Scene::build(camera_manager, &mut rng).0
    }

    #[test]
    fn test_build_aligns_with_registry() {
        let scene = test_scene();
        assert_eq!(scene.planets.len(), PLANETS.len());
        assert_eq!(scene.orbit_guides.len(), PLANETS.len());
        for (planet, def) in scene.planets.iter().zip(PLANETS.iter()) {
            assert_eq!(planet.name, def.name);
        }
        // Exactly one decorative ring, attached to Saturn
        assert_eq!(scene.decor_rings.len(), 1);
        let (saturn_index, _) = scene.decor_rings[0];
        assert_eq!(PLANETS[saturn_index].name, "Saturn");
    }

    #[test]
    fn test_every_body_requests_one_texture() {
        let camera_manager =
            CameraManager::new(OrbitCamera::default(), CameraController::new(0.005, 0.1));
        let mut rng = rand::rng();
        let (_, requests) = Scene::build(camera_manager, &mut rng);
        assert_eq!(requests.len(), PLANETS.len() + 1);
        assert!(requests.iter().any(|r| r.material == "sun"));
        assert!(requests.iter().any(|r| r.material == "earth"));
    }

    #[test]
    fn test_sync_orbits_places_planets_on_their_circles() {
        let mut scene = test_scene();
        let mut simulator =
            OrbitSimulator::with_initial_angles(&PLANETS, vec![0.0; PLANETS.len()]);
        let speeds: Vec<f32> = PLANETS.iter().map(|p| p.angular_speed).collect();
        for _ in 0..10 {
            simulator.step(&speeds);
        }
        scene.sync_orbits(&simulator);

        for (index, planet) in scene.planets.iter().enumerate() {
            let origin = planet.transform * Vector4::new(0.0, 0.0, 0.0, 1.0);
            let radius = Vector4::new(origin.x, 0.0, origin.z, 0.0).magnitude();
            assert!((radius - PLANETS[index].orbit_radius).abs() < 1e-3);
            assert!(origin.y.abs() < 1e-5);
        }
    }

    #[test]
    fn test_decor_ring_follows_saturn() {
        let mut scene = test_scene();
        let mut simulator =
            OrbitSimulator::with_initial_angles(&PLANETS, vec![1.0; PLANETS.len()]);
        simulator.step(&vec![0.05; PLANETS.len()]);
        scene.sync_orbits(&simulator);

        let (saturn_index, ring) = &scene.decor_rings[0];
        assert_eq!(ring.transform, scene.planets[*saturn_index].transform);
    }
}
