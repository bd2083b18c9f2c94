//! Visualization sandbox - main entry point
//!
//! Opens a window, attaches a demo scene and drives the renderer once per
//! redraw with either the first-person camera or the trackball.
//!
//! Environment:
//! - `VIZ_CONFIG`: path to a JSON engine configuration
//! - `VIZ_SCENE`: initial demo scene (`two_spheres`, `heart_orbit`, `gallery`)

mod scenes;
mod shapes;

use anyhow::{Context, Result};
use glam::Vec2;
use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::WindowId;

use viz_core::{EngineConfig, Timer};
use viz_platform::{InputState, KeyCode, MouseButton, Window};
use viz_renderer::{FrameInput, Renderer};
use viz_scene::CameraMovement;

use crate::scenes::DemoScene;

/// Camera steps per second of held movement key.
const MOVE_STEPS_PER_SEC: f32 = 60.0;
/// Pixels of scroll that count as one wheel line.
const PIXELS_PER_LINE: f32 = 40.0;

const MOVEMENT_KEYS: [(KeyCode, CameraMovement); 4] = [
    (KeyCode::KeyW, CameraMovement::Forward),
    (KeyCode::KeyS, CameraMovement::Backward),
    (KeyCode::KeyA, CameraMovement::Left),
    (KeyCode::KeyD, CameraMovement::Right),
];

const SCENE_KEYS: [(KeyCode, DemoScene); 3] = [
    (KeyCode::Digit1, DemoScene::TwoSpheres),
    (KeyCode::Digit2, DemoScene::HeartOrbit),
    (KeyCode::Digit3, DemoScene::Gallery),
];

struct App {
    config: EngineConfig,
    initial_scene: DemoScene,
    window: Option<Window>,
    renderer: Renderer,
    input: InputState,
    timer: Timer,
}

impl App {
    fn new(config: EngineConfig, initial_scene: DemoScene) -> Self {
        let mut renderer = Renderer::new(&config);
        renderer.set_scene(initial_scene.build());
        Self {
            config,
            initial_scene,
            window: None,
            renderer,
            input: InputState::new(),
            timer: Timer::new(),
        }
    }

    fn window_size(&self) -> Vec2 {
        self.window
            .as_ref()
            .map(|w| Vec2::new(w.width() as f32, w.height() as f32))
            .unwrap_or_else(|| Vec2::new(self.config.width as f32, self.config.height as f32))
    }

    /// Window pixels have y growing downward; navigation expects it growing upward.
    fn flip_y(&self, (x, y): (f32, f32)) -> Vec2 {
        Vec2::new(x, self.window_size().y - y)
    }

    fn sync_cursor_capture(&self) {
        if let Some(window) = &self.window
            && let Err(e) = window.set_cursor_captured(!self.renderer.use_trackball())
        {
            warn!("Cursor capture unavailable: {}", e);
        }
    }

    fn handle_shortcuts(&mut self, event_loop: &ActiveEventLoop) {
        if self.input.is_key_just_pressed(KeyCode::Escape)
            || self.input.is_key_just_pressed(KeyCode::KeyQ)
        {
            info!("Quit requested");
            event_loop.exit();
            return;
        }

        if self.input.is_key_just_pressed(KeyCode::KeyT) {
            let use_trackball = !self.renderer.use_trackball();
            self.renderer.set_use_trackball(use_trackball);
            self.sync_cursor_capture();
            info!(
                "Navigation: {}",
                if use_trackball { "trackball" } else { "camera" }
            );
        }

        if self.input.is_key_just_pressed(KeyCode::KeyR) {
            self.renderer.camera_mut().reset();
            self.renderer.trackball_mut().reset();
            debug!("Navigation reset");
        }

        for (key, scene) in SCENE_KEYS {
            if self.input.is_key_just_pressed(key) {
                info!("Switching to scene '{}'", scene.name());
                self.renderer.set_scene(scene.build());
            }
        }
    }

    fn update_navigation(&mut self, dt: f32) {
        let window_size = self.window_size();

        if self.renderer.use_trackball() {
            if let Some((old, new)) = self.input.cursor_motion() {
                let (old, new) = (self.flip_y(old), self.flip_y(new));
                if self.input.is_mouse_pressed(MouseButton::Left) {
                    self.renderer.rotate_trackball(old, new, window_size);
                } else if self.input.is_mouse_pressed(MouseButton::Right) {
                    self.renderer.move_trackball(old, new);
                }
            }
            let scroll = self.input.scroll_delta();
            if scroll != 0.0 {
                self.renderer.zoom_trackball(scroll, window_size.y);
            }
        } else {
            for (key, direction) in MOVEMENT_KEYS {
                if self.input.is_key_pressed(key) {
                    self.renderer.move_camera(direction, dt * MOVE_STEPS_PER_SEC);
                }
            }
            let (dx, dy) = self.input.mouse_motion();
            if dx != 0.0 || dy != 0.0 {
                self.renderer.rotate_camera(Vec2::ZERO, Vec2::new(dx, -dy));
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.timer.delta_secs();

        self.handle_shortcuts(event_loop);
        self.update_navigation(dt);

        let Some(window) = &self.window else {
            self.input.end_frame();
            return;
        };
        let input = FrameInput {
            aspect_ratio: window.aspect_ratio(),
            window_size: Vec2::new(window.width() as f32, window.height() as f32),
            dt,
        };
        if let Err(e) = self.renderer.render(input) {
            error!("Render error: {}", e);
        }

        self.input.end_frame();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match Window::new(
            event_loop,
            self.config.width,
            self.config.height,
            "Visualization Sandbox",
        ) {
            Ok(window) => {
                self.window = Some(window);
                self.sync_cursor_capture();
                self.timer.reset();
                info!(
                    "Initialization complete, showing '{}'",
                    self.initial_scene.name()
                );
            }
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(ref mut window) = self.window {
                    window.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if event.state.is_pressed() {
                        self.input.on_key_pressed(key);
                    } else {
                        self.input.on_key_released(key);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if state.is_pressed() {
                    self.input.on_mouse_pressed(button.into());
                } else {
                    self.input.on_mouse_released(button.into());
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input
                    .on_cursor_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.input.on_scroll(lines);
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.input.on_mouse_motion(dx as f32, dy as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

fn load_config() -> Result<EngineConfig> {
    match std::env::var("VIZ_CONFIG") {
        Ok(path) => EngineConfig::load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path)),
        Err(_) => Ok(EngineConfig::default()),
    }
}

fn initial_scene() -> DemoScene {
    match std::env::var("VIZ_SCENE") {
        Ok(name) => DemoScene::from_name(&name).unwrap_or_else(|| {
            warn!("Unknown scene '{}', using '{}'", name, DemoScene::TwoSpheres.name());
            DemoScene::TwoSpheres
        }),
        Err(_) => DemoScene::TwoSpheres,
    }
}

fn main() -> Result<()> {
    viz_core::init_logging();
    info!("Starting visualization sandbox");

    let config = load_config()?;
    config.validate().context("Invalid engine configuration")?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, initial_scene());
    event_loop.run_app(&mut app)?;

    Ok(())
}
