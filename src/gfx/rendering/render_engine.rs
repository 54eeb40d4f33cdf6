//! WGPU-based rendering engine for the solar system viewer
//!
//! Owns the surface, device, depth buffer and pipelines, and encodes one
//! frame per redraw: starfield, then the unlit sun and orbit guides, then
//! the lit planets, then translucent decorative rings, then the UI overlay.

use std::sync::Arc;
use thiserror::Error;
use wgpu::{Device, TextureFormat};

use crate::gfx::{
    camera::camera_utils::CameraUniform,
    resources::{
        global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightConfig},
        material::MaterialBindings,
        texture_resource::TextureResource,
    },
    scene::{
        object::{transform_bind_group_layout, DrawObject, Object},
        scene::Scene,
    },
};

use super::pipeline_manager::{PipelineConfig, PipelineManager, VertexLayout};

/// Configuration failures during renderer bring-up.
///
/// These are fail-fast: the viewer cannot run without a surface, adapter and
/// device, so they surface to `main` instead of being retried.
#[derive(Debug, Error)]
pub enum RenderInitError {
    #[error("drawing region has zero size ({width}x{height})")]
    ZeroSizedSurface { width: u32, height: u32 },
    #[error("failed to create rendering surface")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter found")]
    NoAdapter(#[source] wgpu::RequestAdapterError),
    #[error("failed to acquire graphics device")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("pipeline creation failed: {0}")]
    Pipeline(String),
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    light_config: LightConfig,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine, RenderInitError> {
        if width == 0 || height == 0 {
            return Err(RenderInitError::ZeroSizedSurface { width, height });
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(RenderInitError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            // One frame per display refresh
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        // Global uniforms: camera plus the fixed ambient/directional light
        let light_config = LightConfig::default();
        let global_ubo = GlobalUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);

        let transform_layout = transform_bind_group_layout(&device);

        // Borrow the material layout shape from a throwaway binding set so
        // pipelines and the material system always agree.
        let temp_material_bindings = MaterialBindings::new(&device);
        let material_layout = temp_material_bindings.bind_group_layouts().clone();

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("planet", include_str!("planet.wgsl"));
        pipeline_manager.load_shader("unlit", include_str!("unlit.wgsl"));
        pipeline_manager.load_shader("stars", include_str!("stars.wgsl"));

        let opaque_target = Some(wgpu::ColorTargetState {
            format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        });
        let blend_target = Some(wgpu::ColorTargetState {
            format,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            write_mask: wgpu::ColorWrites::ALL,
        });

        // Starfield: point list, position-only vertices, globals only
        pipeline_manager.register_pipeline(
            "Stars",
            PipelineConfig::default()
                .with_label("STARS")
                .with_shader("stars")
                .with_depth_stencil(depth_texture.texture.clone())
                .with_bind_group_layouts(vec![global_bindings.bind_group_layouts().clone()])
                .with_primitive_topology(wgpu::PrimitiveTopology::PointList)
                .with_vertex_layout(VertexLayout::Points)
                .with_color_targets(vec![opaque_target.clone()]),
        );

        // Sun and orbit guides: unlit, double-sided (rings are flat)
        pipeline_manager.register_pipeline(
            "Unlit",
            PipelineConfig::default()
                .with_label("UNLIT")
                .with_shader("unlit")
                .with_depth_stencil(depth_texture.texture.clone())
                .with_cull_mode(None)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layouts().clone(),
                    transform_layout.clone(),
                    material_layout.clone(),
                ])
                .with_color_targets(vec![opaque_target.clone()]),
        );

        // Planets: lit and textured
        pipeline_manager.register_pipeline(
            "Planet",
            PipelineConfig::default()
                .with_label("PLANET")
                .with_shader("planet")
                .with_depth_stencil(depth_texture.texture.clone())
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layouts().clone(),
                    transform_layout.clone(),
                    material_layout.clone(),
                ])
                .with_color_targets(vec![opaque_target]),
        );

        // Saturn's ring: translucent, drawn last, depth-tested but not
        // depth-written
        pipeline_manager.register_pipeline(
            "RingBlend",
            PipelineConfig::default()
                .with_label("RING_BLEND")
                .with_shader("unlit")
                .with_depth_stencil(depth_texture.texture.clone())
                .with_depth_write(false)
                .with_cull_mode(None)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layouts().clone(),
                    transform_layout,
                    material_layout,
                ])
                .with_color_targets(vec![blend_target]),
        );

        pipeline_manager
            .create_all_pipelines()
            .map_err(|errors| RenderInitError::Pipeline(errors.join("; ")))?;

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            light_config,
        })
    }

    /// Renders a frame with an optional UI overlay
    ///
    /// # Arguments
    /// * `scene` - Scene containing objects to render
    /// * `clear_color` - Background color for this frame (theme-dependent)
    /// * `ui_callback` - Optional function that renders UI elements
    pub fn render_frame<F>(&mut self, scene: &Scene, clear_color: wgpu::Color, ui_callback: Option<F>)
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Surface will be valid again after reconfiguration
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(err) => {
                log::warn!("skipping frame: {}", err);
                return;
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_groups(), &[]);

            if let (Some(pipeline), Some(buffer)) = (
                self.pipeline_manager.pipeline("Stars"),
                scene.starfield.buffer(),
            ) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..scene.starfield.vertex_count(), 0..1);
            }

            if let Some(pipeline) = self.pipeline_manager.pipeline("Unlit") {
                render_pass.set_pipeline(pipeline);
                Self::draw_object(&mut render_pass, scene, &scene.sun);
                for guide in &scene.orbit_guides {
                    Self::draw_object(&mut render_pass, scene, guide);
                }
            }

            if let Some(pipeline) = self.pipeline_manager.pipeline("Planet") {
                render_pass.set_pipeline(pipeline);
                for planet in &scene.planets {
                    Self::draw_object(&mut render_pass, scene, planet);
                }
            }

            // Translucent geometry last so everything behind it is resolved
            if let Some(pipeline) = self.pipeline_manager.pipeline("RingBlend") {
                render_pass.set_pipeline(pipeline);
                for (_, ring) in &scene.decor_rings {
                    Self::draw_object(&mut render_pass, scene, ring);
                }
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    fn draw_object<'a>(render_pass: &mut wgpu::RenderPass<'a>, scene: &'a Scene, object: &'a Object) {
        if !object.visible {
            return;
        }

        let material = scene.material_manager.material_for(&object.material_id);
        let (Some(transform_bind_group), Some(material_bind_group)) =
            (object.transform_bind_group(), material.get_bind_group())
        else {
            return;
        };

        render_pass.set_bind_group(1, transform_bind_group, &[]);
        render_pass.set_bind_group(2, material_bind_group, &[]);
        render_pass.draw_object(object);
    }

    /// Updates camera and light uniform buffers; call once per frame.
    pub fn update(&mut self, camera_uniform: CameraUniform) {
        update_global_ubo(
            &mut self.global_ubo,
            &self.queue,
            camera_uniform,
            self.light_config,
        );
    }

    /// Resizes the surface and recreates the depth buffer.
    ///
    /// Zero dimensions (minimized window) are ignored; the surface keeps its
    /// previous size until a real one arrives.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;

        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Returns current surface dimensions
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Returns reference to the wgpu device
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns reference to the wgpu command queue
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
