//! # Planet Picking System
//!
//! Resolves a pointer position to the planet under it, if any, using mouse
//! ray-casting. This drives the hover tooltip.
//!
//! ## How it works
//!
//! 1. **Mouse to Ray**: Convert cursor coordinates to a 3D ray in world space
//! 2. **Ray-Sphere Intersection**: Test the ray against every planet sphere
//! 3. **Selection**: Return the closest intersected planet
//!
//! Planets are few, so the scan is a plain O(n) loop over the sphere list —
//! no spatial index. Picking runs synchronously on each pointer-move event,
//! independent of the frame cadence.

use cgmath::{
    EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Vector3, Vector4,
};

use crate::gfx::camera::orbit_camera::OrbitCamera;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Result of a picking operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    /// Index of the picked planet in the registry
    pub planet_index: usize,
    /// Distance from the ray origin to the intersection point
    pub distance: f32,
}

/// Convert screen coordinates to a world-space ray through the camera.
///
/// The cursor is normalized to [-1, 1] device coordinates (Y flipped), then
/// the near- and far-plane points are unprojected through the inverse
/// view-projection matrix.
pub fn screen_to_ray(
    screen_pos: (f32, f32),
    screen_size: (f32, f32),
    camera: &OrbitCamera,
) -> Ray {
    let (mouse_x, mouse_y) = screen_pos;
    let (screen_width, screen_height) = screen_size;

    let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
    let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height; // Flip Y axis

    let eye = Point3::from_vec(camera.eye);
    let target = Point3::from_vec(camera.target);
    let view_matrix = Matrix4::look_at_rh(eye, target, camera.up);
    let proj_matrix = cgmath::perspective(camera.fovy, camera.aspect, camera.znear, camera.zfar);

    let view_proj = proj_matrix * view_matrix;
    let inv_view_proj = view_proj.invert().unwrap_or(Matrix4::identity());

    // Near and far plane points in NDC
    let near_point = Vector4::new(ndc_x, ndc_y, -1.0, 1.0);
    let far_point = Vector4::new(ndc_x, ndc_y, 1.0, 1.0);

    let world_near = inv_view_proj * near_point;
    let world_far = inv_view_proj * far_point;

    let near_3d = world_near.truncate() / world_near.w;
    let far_3d = world_far.truncate() / world_far.w;

    Ray::new(near_3d, far_3d - near_3d)
}

/// Analytic ray-sphere intersection.
///
/// Returns the distance to the nearest intersection at or in front of the
/// ray origin, or None. Assumes `ray.direction` is normalized.
pub fn intersect_sphere(ray: &Ray, center: Vector3<f32>, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.magnitude2() - radius * radius;

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_discriminant = discriminant.sqrt();
    let t = -b - sqrt_discriminant;
    if t >= 0.0 {
        return Some(t);
    }
    let t = -b + sqrt_discriminant;
    if t >= 0.0 {
        Some(t)
    } else {
        None
    }
}

/// Pick the planet under the cursor, if any.
///
/// `spheres` is the list of world-space (center, radius) pairs, indexed like
/// the body registry. Only the frontmost hit is reported.
pub fn pick_planet(
    screen_pos: (f32, f32),
    screen_size: (f32, f32),
    camera: &OrbitCamera,
    spheres: &[(Vector3<f32>, f32)],
) -> Option<PickResult> {
    let ray = screen_to_ray(screen_pos, screen_size, camera);

    let mut closest: Option<PickResult> = None;
    for (planet_index, &(center, radius)) in spheres.iter().enumerate() {
        if let Some(distance) = intersect_sphere(&ray, center, radius) {
            if closest.map_or(true, |hit| distance < hit.distance) {
                closest = Some(PickResult {
                    planet_index,
                    distance,
                });
            }
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera(aspect: f32) -> OrbitCamera {
        OrbitCamera::new(120.8, 0.427, 0.0, Vector3::new(0.0, 0.0, 0.0), aspect)
    }

    /// Projects a world point to screen coordinates with the same matrices
    /// the picker uses.
    fn project(world: Vector3<f32>, camera: &OrbitCamera, size: (f32, f32)) -> (f32, f32) {
        let eye = Point3::from_vec(camera.eye);
        let target = Point3::from_vec(camera.target);
        let view = Matrix4::look_at_rh(eye, target, camera.up);
        let proj = cgmath::perspective(camera.fovy, camera.aspect, camera.znear, camera.zfar);
        let clip = proj * view * Vector4::new(world.x, world.y, world.z, 1.0);
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        (
            (ndc_x + 1.0) * 0.5 * size.0,
            (1.0 - ndc_y) * 0.5 * size.1,
        )
    }

    #[test]
    fn test_ray_sphere_hit_and_miss() {
        let ray = Ray::new(Vector3::new(0.0, 0.0, -50.0), Vector3::new(0.0, 0.0, 1.0));
        let hit = intersect_sphere(&ray, Vector3::new(0.0, 0.0, 0.0), 3.0);
        assert!((hit.unwrap() - 47.0).abs() < 1e-4);

        let miss = intersect_sphere(&ray, Vector3::new(10.0, 0.0, 0.0), 3.0);
        assert!(miss.is_none());
    }

    #[test]
    fn test_sphere_behind_ray_is_ignored() {
        let ray = Ray::new(Vector3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(intersect_sphere(&ray, Vector3::new(0.0, 0.0, 0.0), 3.0).is_none());
    }

    #[test]
    fn test_pick_resolves_body_under_its_projection() {
        let camera = test_camera(1.6);
        let size = (1280.0, 800.0);
        let center = Vector3::new(30.0, 0.0, 0.0);
        let screen = project(center, &camera, size);

        let spheres = vec![(center, 3.0)];
        let result = pick_planet(screen, size, &camera, &spheres);
        assert_eq!(result.unwrap().planet_index, 0);
    }

    #[test]
    fn test_pick_far_from_any_body_resolves_none() {
        let camera = test_camera(1.6);
        let size = (1280.0, 800.0);
        // Project a point well above the single planet; nothing lies there.
        let empty_spot = project(Vector3::new(30.0, 60.0, 0.0), &camera, size);

        let spheres = vec![(Vector3::new(30.0, 0.0, 0.0), 3.0)];
        assert!(pick_planet(empty_spot, size, &camera, &spheres).is_none());
    }

    #[test]
    fn test_nearest_hit_wins() {
        let camera = test_camera(1.6);
        let size = (1280.0, 800.0);
        // Two spheres stacked along the view ray through the origin
        let near = Vector3::new(0.0, 0.0, 40.0);
        let far = Vector3::new(0.0, 0.0, -40.0);
        let screen = project(Vector3::new(0.0, 0.0, 0.0), &camera, size);

        // Generous radii so the shared ray pierces both
        let spheres = vec![(far, 20.0), (near, 20.0)];
        let result = pick_planet(screen, size, &camera, &spheres).unwrap();
        assert_eq!(result.planet_index, 1);
    }
}
