//! Material system for the solar system renderer
//!
//! Materials pair a base color with an optional texture. Textures arrive
//! asynchronously; until one does (or if its load fails) the material
//! renders with its base color against a built-in white fallback texture.
//! Materials are stored in MaterialManager and objects reference them by ID.

use std::collections::HashMap;
use wgpu::Device;

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

use super::texture_resource::TextureResource;

/// Material ID for referencing materials
pub type MaterialId = String;

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    _padding: f32,
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Material bind group management
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl MaterialBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(device, "Material Bind Group");

        MaterialBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(
        &mut self,
        device: &Device,
        ubo: &MaterialUBO,
        texture: &TextureResource,
    ) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .resource(wgpu::BindingResource::TextureView(&texture.view))
                .resource(wgpu::BindingResource::Sampler(&texture.sampler))
                .create(device, "Material Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_groups(&self) -> Option<&wgpu::BindGroup> {
        self.bind_group.as_ref()
    }
}

/// Material definition: base color, emissive term, and an optional texture.
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],

    texture: Option<TextureResource>,
    material_ubo: Option<MaterialUBO>,
    material_bindings: Option<MaterialBindings>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            emissive: [0.0, 0.0, 0.0],
            texture: None,
            material_ubo: None,
            material_bindings: None,
        }
    }
}

impl Material {
    pub fn new(name: &str, base_color: [f32; 4]) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            emissive: [0.0, 0.0, 0.0],
            texture: None,
            material_ubo: None,
            material_bindings: None,
        }
    }

    /// Builder pattern: Set emissive color
    pub fn with_emission(mut self, r: f32, g: f32, b: f32) -> Self {
        self.emissive = [r, g, b];
        self
    }

    /// Updates GPU resources for this material
    ///
    /// Must be called after material properties change to sync with GPU.
    /// `fallback` is bound while the material has no texture of its own.
    pub fn update_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        fallback: &TextureResource,
    ) {
        if self.material_ubo.is_none() {
            self.material_ubo = Some(MaterialUBO::new(device));
        }

        if self.material_bindings.is_none() {
            let mut bindings = MaterialBindings::new(device);
            let texture = self.texture.as_ref().unwrap_or(fallback);
            bindings.create_bind_group(device, self.material_ubo.as_ref().unwrap(), texture);
            self.material_bindings = Some(bindings);
        }

        let uniform_data = MaterialUniform {
            base_color: self.base_color,
            emissive: self.emissive,
            _padding: 0.0,
        };

        if let Some(ubo) = &mut self.material_ubo {
            ubo.update_content(queue, uniform_data);
        }
    }

    /// Installs a loaded texture and rebinds.
    ///
    /// Safe to call before GPU resources exist; the texture is picked up on
    /// the next `update_gpu_resources`.
    pub fn set_texture(&mut self, device: &Device, texture: TextureResource) {
        self.texture = Some(texture);
        if let (Some(ubo), Some(bindings)) = (&self.material_ubo, &mut self.material_bindings) {
            bindings.create_bind_group(device, ubo, self.texture.as_ref().unwrap());
        }
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.material_bindings
            .as_ref()
            .and_then(|b| b.bind_groups())
    }

    /// Gets the bind group layout for pipeline creation
    pub fn get_bind_group_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.material_bindings
            .as_ref()
            .map(|b| b.bind_group_layouts())
    }
}

/// Manages all materials in the viewer
///
/// Centralized storage; objects reference materials by ID so GPU resources
/// are shared between objects using the same material.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material_id: MaterialId,
    fallback_texture: Option<TextureResource>,
}

impl MaterialManager {
    /// Creates a new material manager with a default material
    pub fn new() -> Self {
        let mut manager = Self {
            materials: HashMap::new(),
            default_material_id: "default".to_string(),
            fallback_texture: None,
        };

        manager.add_material(Material::default());
        manager
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    /// Gets the material for an object, falling back to the default when the
    /// requested one does not exist.
    pub fn material_for(&self, id: &MaterialId) -> &Material {
        self.materials
            .get(id)
            .unwrap_or_else(|| self.materials.get(&self.default_material_id).unwrap())
    }

    /// Updates GPU resources for all materials
    ///
    /// Should be called when the GPU context becomes available or when
    /// materials have been modified.
    pub fn update_all_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        if self.fallback_texture.is_none() {
            self.fallback_texture = Some(TextureResource::create_fallback(device, queue));
        }
        let fallback = self.fallback_texture.as_ref().unwrap();

        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue, fallback);
        }
    }

    /// Uploads a decoded image and installs it on the named material.
    pub fn install_texture(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        id: &MaterialId,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) {
        let Some(material) = self.materials.get_mut(id) else {
            log::warn!("texture arrived for unknown material '{}'", id);
            return;
        };
        let texture = TextureResource::create_from_rgba_data(device, queue, pixels, width, height, id);
        material.set_texture(device, texture);
        log::debug!("installed {}x{} texture on material '{}'", width, height, id);
    }

    /// Gets material bind group layout for pipeline creation
    ///
    /// Uses the default material's layout; all materials share the same layout.
    pub fn get_bind_group_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.materials
            .get(&self.default_material_id)
            .and_then(|m| m.get_bind_group_layout())
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_for_falls_back_to_default() {
        let manager = MaterialManager::new();
        let material = manager.material_for(&"nonexistent".to_string());
        assert_eq!(material.name, "default");
    }

    #[test]
    fn test_added_material_is_resolved_by_id() {
        let mut manager = MaterialManager::new();
        manager.add_material(Material::new("earth", [0.24, 0.43, 0.66, 1.0]));
        let material = manager.material_for(&"earth".to_string());
        assert_eq!(material.base_color, [0.24, 0.43, 0.66, 1.0]);
        assert!(!material.has_texture());
    }
}
