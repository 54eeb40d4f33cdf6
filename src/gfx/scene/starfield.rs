//! Background starfield point cloud.

use rand::Rng;
use wgpu::Device;

use crate::gfx::geometry::generate_star_positions;

use super::vertex::StarVertex;

pub const STAR_COUNT: usize = 3000;
pub const STAR_EXTENT: f32 = 3000.0;

/// Fixed-count random point cloud rendered as white points.
pub struct StarField {
    vertices: Vec<StarVertex>,
    vertex_buffer: Option<wgpu::Buffer>,
}

impl StarField {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let vertices = generate_star_positions(STAR_COUNT, STAR_EXTENT, rng)
            .into_iter()
            .map(|position| StarVertex { position })
            .collect();
        Self {
            vertices,
            vertex_buffer: None,
        }
    }

    pub fn init_gpu_resources(&mut self, device: &Device) {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Starfield Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        self.vertex_buffer = Some(vertex_buffer);
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.vertex_buffer.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starfield_has_fixed_count() {
        let mut rng = rand::rng();
        let stars = StarField::generate(&mut rng);
        assert_eq!(stars.vertex_count(), STAR_COUNT as u32);
    }
}
