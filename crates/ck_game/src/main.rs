//! Castle Keep -- window, event pump and frame presentation.
//!
//! winit drives the event loop via `ApplicationHandler`. Window events are
//! translated into `InputEvent`s and queued; each `RedrawRequested` drains the
//! queue into one `FrameLoop::tick` with the measured wall-clock delta, then
//! presents whatever the tick drew.
//!
//! Startup failures (window, GPU, font, scene setup) are logged and end the
//! process with exit code 1 once the event loop has shut down.

mod dialog;
mod frame_loop;
mod jumper;
mod patroller;
#[cfg(test)]
mod recording;
#[cfg(test)]
mod replay;
mod scene;

use std::path::Path;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use ck_core::config::SceneConfig;
use ck_core::input::{InputEvent, InputQueue, Key, MouseBtn};
use ck_core::time::FrameClock;
use ck_platform::window::PlatformConfig;
use ck_render::{FontFace, FrameCanvas, GpuContext, ScreenCamera};
use frame_loop::{FrameLoop, LoopControl};

const FONT_PATH: &str = "assets/fonts/dialog.ttf";
const FONT_POINT_SIZE: f32 = 24.0;

struct GameState {
    window: Arc<Window>,
    gpu: GpuContext,
    canvas: FrameCanvas,
    clock: FrameClock,
    input: InputQueue,
    frame_loop: FrameLoop,
}

impl GameState {
    fn new(
        window: Arc<Window>,
        platform: &PlatformConfig,
        scene: &SceneConfig,
    ) -> Result<Self, String> {
        let frame_loop = FrameLoop::new(scene, dialog::default_script())?;
        let gpu = GpuContext::new(window.clone(), (platform.width, platform.height))?;
        let font = FontFace::load(Path::new(FONT_PATH), FONT_POINT_SIZE)?;
        let camera = ScreenCamera::new(scene.width, scene.height);
        let canvas = FrameCanvas::new(&gpu, font, &camera);

        Ok(Self {
            window,
            gpu,
            canvas,
            clock: FrameClock::new(),
            input: InputQueue::new(),
            frame_loop,
        })
    }
}

struct App {
    platform: PlatformConfig,
    scene: SceneConfig,
    state: Option<GameState>,
    startup_error: Option<String>,
}

impl App {
    fn new() -> Self {
        Self {
            platform: PlatformConfig::default(),
            scene: SceneConfig::default(),
            state: None,
            startup_error: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<GameState, String> {
        let window = ck_platform::window::create_window(event_loop, &self.platform)?;
        log::info!(
            "Window created: {}x{}",
            self.platform.width,
            self.platform.height
        );
        GameState::new(window, &self.platform, &self.scene)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.startup_error.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("Startup failed: {e}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                // Quit goes through the queue so the pending frame still runs.
                state.input.push(InputEvent::Quit);
                state.window.request_redraw();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        state.input.push(InputEvent::KeyDown { key });
                    }
                }
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                if let Some(button) = map_mouse(button) {
                    state.input.push(InputEvent::MouseDown { button });
                }
            }

            WindowEvent::RedrawRequested => {
                let dt = state.clock.begin_frame();
                let control = state
                    .frame_loop
                    .tick(dt, state.input.drain(), &mut state.canvas);

                if state.gpu.size.0 > 0 && state.gpu.size.1 > 0 {
                    state.canvas.present(&state.gpu);
                }

                if control == LoopControl::Quit {
                    log::info!(
                        "Quit requested after {} frames ({:.1}s), exiting.",
                        state.clock.frame_count,
                        state.clock.total_time
                    );
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.state.take().is_some() {
            log::info!("Released font, renderer and window.");
        }
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        _ => None,
    }
}

fn map_mouse(button: MouseButton) -> Option<MouseBtn> {
    match button {
        MouseButton::Left => Some(MouseBtn::Left),
        MouseButton::Right => Some(MouseBtn::Right),
        MouseButton::Middle => Some(MouseBtn::Middle),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Castle Keep starting...");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {e}");
        std::process::exit(1);
    }

    let failed = app.startup_error.is_some();
    drop(app);
    if failed {
        std::process::exit(1);
    }
}
