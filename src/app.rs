use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    error::EventLoopError,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::gfx::{
    camera::{
        camera_controller::CameraController, camera_utils::CameraManager, orbit_camera::OrbitCamera,
    },
    picking,
    scene::Scene,
    RenderEngine,
};
use crate::registry::PLANETS;
use crate::sim::OrbitSimulator;
use crate::ui::{control_panel, hover_tooltip, ControlState, UiManager};

pub struct OrreryApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    simulator: OrbitSimulator,
    controls: ControlState,
    texture_loader: crate::gfx::resources::TextureLoader,
    /// Last known cursor position in window coordinates.
    cursor: Option<(f32, f32)>,
    /// Planet currently under the cursor, as a registry index.
    hovered: Option<usize>,
}

impl OrreryApp {
    /// Builds the scene, spawns the texture loads, and prepares the event
    /// loop. The window and GPU resources are created once the loop starts.
    pub fn new() -> Result<Self, EventLoopError> {
        let event_loop = EventLoop::new()?;

        let camera = OrbitCamera::default();
        let controller = CameraController::new(0.005, 0.1);
        let camera_manager = CameraManager::new(camera, controller);

        let mut rng = rand::rng();
        let (scene, texture_requests) = Scene::build(camera_manager, &mut rng);
        let simulator = OrbitSimulator::new(&PLANETS, &mut rng);
        let controls = ControlState::new(&PLANETS);

        // Decoding starts immediately; results are drained once per frame
        let texture_loader = crate::gfx::resources::TextureLoader::spawn(texture_requests);

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                simulator,
                controls,
                texture_loader,
                cursor: None,
                hovered: None,
            },
        })
    }

    /// Run the viewer (consumes self and starts the event loop).
    ///
    /// The frame loop is owned by the event loop: every redraw requests the
    /// next one, and exiting the loop tears everything down. There is no
    /// detached frame callback to leak across a remount.
    pub fn run(mut self) -> Result<(), EventLoopError> {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop.run_app(&mut self.app_state)
    }
}

impl AppState {
    /// Re-resolves the planet under the cursor. Runs synchronously on every
    /// pointer move, independent of the frame cadence.
    fn repick(&mut self) {
        let (Some(render_engine), Some(cursor)) = (self.render_engine.as_ref(), self.cursor)
        else {
            self.hovered = None;
            return;
        };

        let (width, height) = render_engine.get_surface_size();
        let spheres = self.scene.planet_spheres(&self.simulator);
        self.hovered = picking::pick_planet(
            cursor,
            (width as f32, height as f32),
            &self.scene.camera_manager.camera,
            &spheres,
        )
        .map(|hit| hit.planet_index);
    }

    fn redraw(&mut self) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Install any textures whose decode finished since last frame
        for loaded in self.texture_loader.poll() {
            self.scene.material_manager.install_texture(
                render_engine.device(),
                render_engine.queue(),
                &loaded.material,
                loaded.width,
                loaded.height,
                &loaded.pixels,
            );
        }

        // Advance orbits with the speeds the sliders currently hold
        self.simulator.step(&self.controls.speeds);
        self.scene.sync_orbits(&self.simulator);
        self.scene.update();

        render_engine.update(self.scene.camera_manager.camera.uniform);
        self.scene.update_transforms(render_engine.queue());

        let clear_color = self.controls.theme.background();
        let hovered_name = self.hovered.map(|i| PLANETS[i].name);
        let cursor = self.cursor;

        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let window = window.clone();
            let controls = &mut self.controls;
            render_engine.render_frame(
                &self.scene,
                clear_color,
                Some(|device: &wgpu::Device,
                      queue: &wgpu::Queue,
                      encoder: &mut wgpu::CommandEncoder,
                      color_attachment: &wgpu::TextureView| {
                    ui_manager.draw(device, queue, encoder, &window, color_attachment, |ui| {
                        control_panel(ui, controls);
                        if let (Some(name), Some(position)) = (hovered_name, cursor) {
                            hover_tooltip(ui, name, position);
                        }
                    });
                }),
            );
        } else {
            render_engine.render_frame(
                &self.scene,
                clear_color,
                None::<fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView)>,
            );
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title("Orrery")
                .with_inner_size(winit::dpi::LogicalSize::new(1280, 800)),
        ) {
            Ok(window) => window,
            Err(err) => {
                log::error!("failed to create window: {}", err);
                event_loop.exit();
                return;
            }
        };

        let window_handle = Arc::new(window);
        let (width, height) = window_handle.inner_size().into();

        let window_clone = window_handle.clone();
        let render_engine =
            match pollster::block_on(RenderEngine::new(window_clone, width, height)) {
                Ok(engine) => engine,
                Err(err) => {
                    log::error!("renderer initialization failed: {}", err);
                    event_loop.exit();
                    return;
                }
            };

        self.scene
            .init_gpu_resources(render_engine.device(), render_engine.queue());
        self.scene
            .camera_manager
            .camera
            .resize_projection(width, height);

        let ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window_handle,
        );

        self.window = Some(window_handle);
        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(render_engine);

        log::info!("scene ready: {} planets, sun, starfield", self.scene.planets.len());
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref().cloned() else {
            return;
        };

        // UI gets first refusal on input events
        let ui_captured = match self.ui_manager.as_mut() {
            Some(ui_manager) => ui_manager.handle_window_event(&window, window_id, &event),
            None => false,
        };

        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some((position.x as f32, position.y as f32));
                if ui_captured {
                    // Pointer is over a panel; nothing in the scene is hovered
                    self.hovered = None;
                } else {
                    self.repick();
                }
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if let winit::keyboard::PhysicalKey::Code(key_code) = key_event.physical_key {
                    if matches!(key_code, winit::keyboard::KeyCode::Escape) {
                        event_loop.exit();
                        return;
                    }
                }
                if !ui_captured {
                    self.scene.camera_manager.process_keyboard_event(&key_event);
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                // Minimized windows report 0x0; keep the last real size
                if width == 0 || height == 0 {
                    return;
                }
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Don't move the camera while the UI owns the pointer
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            if ui_manager.wants_pointer() {
                return;
            }
        }

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
