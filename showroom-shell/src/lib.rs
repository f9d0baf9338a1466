//! Native shell for the showroom model viewer.
//!
//! Owns the winit event loop and the wgpu renderer, spawns the background
//! fetch worker, and drives the viewer core (`showroom`) from the frame
//! callback: drain load events, advance the orbit controller, render.

pub mod fetch;
mod renderer;

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use glam::Vec3;
use showroom::{FrameFit, LoadEvent, LoadPhase, ModelData, OrbitController, ViewerState};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use renderer::Renderer;

/// Default product asset, matching the original deployment.
pub const DEFAULT_MODEL_URL: &str =
    "https://storage.googleapis.com/showroom-demo-assets/exhibit.glb";

/// Orbit distance used until a model's bounding box replaces it.
const START_DISTANCE: f32 = 4.0;
const MOUSE_SENSITIVITY: f32 = 0.005;

#[derive(thiserror::Error, Debug)]
pub enum ShellError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("No suitable GPU adapter found: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("Failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

/// Viewer configuration from the CLI.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    /// Local path or http(s) URL of the model to display.
    pub source: String,
    pub width: u32,
    pub height: u32,
    pub near: f32,
    pub far: f32,
    pub auto_rotate: bool,
}

struct App {
    options: ViewerOptions,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    orbit: OrbitController,
    state: ViewerState,
    load_rx: Option<Receiver<LoadEvent>>,
    last_frame: Instant,
    mouse_pressed: bool,
    last_cursor: Option<(f32, f32)>,
    title: String,
}

impl App {
    fn new(options: ViewerOptions) -> Self {
        let mut orbit = OrbitController::new(Vec3::ZERO, START_DISTANCE);
        if !options.auto_rotate {
            orbit.stop_auto_rotate();
        }
        Self {
            options,
            window: None,
            renderer: None,
            orbit,
            state: ViewerState::new(),
            load_rx: None,
            last_frame: Instant::now(),
            mouse_pressed: false,
            last_cursor: None,
            title: String::new(),
        }
    }

    /// Start (or restart) loading a model, retiring any previous load and
    /// its scene. The old receiver is dropped here, which disconnects a
    /// superseded worker before the new one starts.
    fn load_model(&mut self, source: &str) {
        if let Some(renderer) = &mut self.renderer {
            renderer.clear_scene();
        }
        let (tx, rx) = mpsc::channel();
        self.load_rx = Some(rx);
        self.state.begin_load();
        fetch::spawn_load(source.to_string(), tx);
        log::info!("loading {source}");
    }

    fn drain_load_events(&mut self) {
        let mut events = Vec::new();
        if let Some(rx) = &self.load_rx {
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
        }
        for event in events {
            if let Some(model) = self.state.apply(event) {
                self.install_model(&model);
            }
        }
        self.update_title();
    }

    /// Frame the camera and light rig to the model's bounding box and hand
    /// the geometry to the renderer.
    fn install_model(&mut self, model: &ModelData) {
        let Some(bounds) = model.bounds() else {
            log::warn!("loaded model carries no geometry");
            return;
        };
        let fit = FrameFit::from_bounds(&bounds);
        log::info!(
            "model bounds {:?} -> {:?}, largest dimension {}",
            bounds.min,
            bounds.max,
            bounds.max_dimension()
        );
        self.orbit.set_limits(fit.min_distance, fit.max_distance);
        self.orbit.set_distance(fit.camera_distance);
        if let Some(renderer) = &mut self.renderer {
            renderer.set_scene(model, &fit);
        }
    }

    fn update_title(&mut self) {
        let title = match self.state.phase() {
            LoadPhase::Loading if self.state.percent() > 0.0 => {
                format!("showroom - loading {:.0}%", self.state.percent())
            }
            LoadPhase::Loading => "showroom - loading".to_string(),
            LoadPhase::Errored => "showroom - model load failed, check the asset source".to_string(),
            _ => "showroom".to_string(),
        };
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }

    /// Any button press permanently stops the turntable; only the left
    /// button drives drag rotation.
    fn on_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        match state {
            ElementState::Pressed => {
                self.orbit.stop_auto_rotate();
                if button == MouseButton::Left {
                    self.mouse_pressed = true;
                }
            }
            ElementState::Released => {
                if button == MouseButton::Left {
                    self.mouse_pressed = false;
                }
            }
        }
    }

    /// Tear down the active session: renderer, window, and load channel.
    fn dispose(&mut self) {
        self.renderer = None;
        self.window = None;
        self.load_rx = None;
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Re-initialization replaces any live session wholesale.
        self.dispose();

        let attrs = Window::default_attributes()
            .with_title("showroom")
            .with_inner_size(PhysicalSize::new(self.options.width, self.options.height));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(
            Arc::clone(&window),
            self.options.near,
            self.options.far,
        )) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("failed to initialize renderer: {e}");
                event_loop.exit();
                return;
            }
        };

        self.window = Some(Arc::clone(&window));
        self.renderer = Some(renderer);
        self.last_frame = Instant::now();

        let source = self.options.source.clone();
        self.load_model(&source);
        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.dispose();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.on_mouse_button(state, button);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                if let Some((last_x, last_y)) = self.last_cursor {
                    if self.mouse_pressed {
                        self.orbit.rotate(
                            -(x - last_x) * MOUSE_SENSITIVITY,
                            -(y - last_y) * MOUSE_SENSITIVITY,
                        );
                    }
                }
                self.last_cursor = Some((x, y));
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.orbit.zoom(-amount);
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32();
                self.last_frame = now;

                self.drain_load_events();
                self.orbit.update(dt);

                // An errored or still-loading session renders background
                // only; the scene is empty until a load succeeds.
                if let Some(renderer) = &mut self.renderer {
                    renderer.render(self.orbit.view_matrix());
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

/// Run the viewer until the window closes.
pub fn run(options: ViewerOptions) -> Result<(), ShellError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(options);
    event_loop.run_app(&mut app)?;

    Ok(())
}
