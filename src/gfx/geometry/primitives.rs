//! # Primitive Shape Generation
//!
//! All shapes are generated with proper normals and texture coordinates,
//! in a Y-up coordinate system (orbits lie in the XZ plane).

use super::GeometryData;
use rand::Rng;
use std::f32::consts::PI;

/// Generate a UV sphere centered at the origin.
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
pub fn generate_uv_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    // Generate vertices
    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();

            // Spherical to Cartesian coordinates, Y-up
            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.vertices.push([radius * x, radius * y, radius * z]);
            data.normals.push([x, y, z]); // unit sphere normal

            let u = long as f32 / long_segs as f32;
            let v = lat as f32 / lat_segs as f32;
            data.tex_coords.push([u, v]);
        }
    }

    // Generate indices
    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

/// Generate a flat annulus (ring) in the XZ plane, centered at the origin.
///
/// Used for orbit guides and Saturn's decorative ring. The ring is a single
/// triangulated strip between the two radii; it is rendered without back-face
/// culling so both sides are visible.
///
/// # Arguments
/// * `inner_radius` - Inner edge of the ring
/// * `outer_radius` - Outer edge of the ring
/// * `segments` - Number of segments around the full circle
pub fn generate_annulus(inner_radius: f32, outer_radius: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        let u = i as f32 / segs as f32;

        // Inner then outer vertex per segment
        data.vertices
            .push([inner_radius * cos_a, 0.0, inner_radius * sin_a]);
        data.normals.push([0.0, 1.0, 0.0]);
        data.tex_coords.push([u, 0.0]);

        data.vertices
            .push([outer_radius * cos_a, 0.0, outer_radius * sin_a]);
        data.normals.push([0.0, 1.0, 0.0]);
        data.tex_coords.push([u, 1.0]);
    }

    for i in 0..segs {
        let inner_current = i * 2;
        let outer_current = inner_current + 1;
        let inner_next = inner_current + 2;
        let outer_next = inner_current + 3;

        data.indices.push(inner_current);
        data.indices.push(outer_current);
        data.indices.push(inner_next);

        data.indices.push(outer_current);
        data.indices.push(outer_next);
        data.indices.push(inner_next);
    }

    data
}

/// Generate random star positions uniformly distributed in a cube of the
/// given edge length centered at the origin.
///
/// Positions are regenerated on every call; the starfield has no seed
/// stability across scene builds.
pub fn generate_star_positions<R: Rng>(count: usize, extent: f32, rng: &mut R) -> Vec<[f32; 3]> {
    let half = extent * 0.5;
    (0..count)
        .map(|_| {
            [
                rng.random_range(-half..half),
                rng.random_range(-half..half),
                rng.random_range(-half..half),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_uv_sphere(3.0, 32, 32);
        assert!(!sphere.vertices.is_empty());
        assert!(!sphere.indices.is_empty());
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());

        // Every vertex sits on the sphere surface
        for v in &sphere.vertices {
            let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((len - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_annulus_radii_bounds() {
        let ring = generate_annulus(29.0, 31.0, 128);
        assert_eq!(ring.vertices.len(), (128 + 1) * 2);
        assert_eq!(ring.triangle_count(), 128 * 2);

        for v in &ring.vertices {
            assert_eq!(v[1], 0.0); // flat in the orbital plane
            let r = (v[0] * v[0] + v[2] * v[2]).sqrt();
            assert!(r >= 29.0 - 1e-3 && r <= 31.0 + 1e-3);
        }
    }

    #[test]
    fn test_starfield_count_and_extent() {
        let mut rng = rand::rng();
        let stars = generate_star_positions(3000, 3000.0, &mut rng);
        assert_eq!(stars.len(), 3000);
        for star in &stars {
            for axis in star {
                assert!(axis.abs() <= 1500.0);
            }
        }
    }
}
