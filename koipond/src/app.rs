//! Application shell and event loop
//!
//! Window creation happens in `resumed`, as winit requires. The scene is
//! built from the real window aspect, texture downloads start immediately,
//! and the GPU initializes while they stream in. Each redraw installs any
//! finished textures, renders, then steps the animation, so the first
//! frames show the lit grey tubes and skins pop in as they land.

use std::sync::Arc;

use anyhow::Result;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::Config;
use crate::graphics::PondGraphics;
use crate::scene::Scene;
use crate::viewport::Viewport;

/// Scroll distance treated as one wheel notch when the platform reports
/// pixels instead of lines.
const PIXELS_PER_NOTCH: f32 = 50.0;

pub struct PondApp {
    config: Config,
    state: Option<AppState>,
}

/// Everything that only exists while the window does.
struct AppState {
    window: Arc<Window>,
    viewport: Viewport,
    scene: Scene,
    graphics: PondGraphics,
    cursor: Option<PhysicalPosition<f64>>,
}

impl PondApp {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }
}

impl ApplicationHandler for PondApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Koipond")
            .with_inner_size(LogicalSize::new(
                self.config.video.window_width,
                self.config.video.window_height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let viewport = Viewport::from_physical(window.inner_size(), window.scale_factor());
        let mut scene = Scene::new(viewport.aspect(), self.config.camera.auto_rotate);
        // Start the downloads before GPU init so they overlap
        scene.begin_texture_fetch();

        let graphics =
            match PondGraphics::new_blocking(window.clone(), &scene, self.config.video.vsync) {
                Ok(graphics) => graphics,
                Err(e) => {
                    tracing::error!("Failed to initialize graphics: {e:#}");
                    event_loop.exit();
                    return;
                }
            };

        self.state = Some(AppState {
            window,
            viewport,
            scene,
            graphics,
            cursor: None,
        });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                state.viewport = Viewport::from_physical(size, state.window.scale_factor());
                state.scene.camera.set_aspect(state.viewport.aspect());
                state.graphics.resize(size.width, size.height);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                // A Resized event with the new physical size follows
                tracing::debug!("Scale factor changed to {scale_factor}");
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => match button_state {
                ElementState::Pressed => state.scene.camera.begin_drag(),
                ElementState::Released => state.scene.camera.end_drag(),
            },
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(last) = state.cursor {
                    if state.scene.camera.is_dragging() {
                        let dx = (position.x - last.x) as f32;
                        let dy = (position.y - last.y) as f32;
                        state
                            .scene
                            .camera
                            .drag(dx, dy, state.viewport.physical_height() as f32);
                    }
                }
                state.cursor = Some(position);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_NOTCH,
                };
                state.scene.camera.dolly(notches);
            }
            WindowEvent::RedrawRequested => {
                while let Some(image) = state.scene.poll_texture() {
                    if let Err(e) = state.graphics.install_texture(&image) {
                        tracing::warn!("Failed to install texture: {e:#}");
                    }
                }
                if let Err(e) = state.graphics.render(&state.scene) {
                    tracing::error!("Render error: {e:#}");
                    event_loop.exit();
                    return;
                }
                state.scene.animate();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

/// Run the demo until the window closes.
pub fn run(config: Config) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PondApp::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
