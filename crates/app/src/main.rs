//! Orrery - Main Entry Point
//!
//! Builds one of the demo scenes and drives it through the render loop,
//! either inside a winit window or headless with a fixed time step.

mod config;
mod demos;
mod headless;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::WindowId;

use orrery_core::Timer;
use orrery_platform::{InputState, KeyCode, MouseButton, Window};
use orrery_renderer::{HeadlessRenderer, RenderLoop};
use orrery_scene::{Camera, OrbitControls};

use crate::config::{AppConfig, Arguments};

/// Pixels per line for pixel-based scroll deltas.
const PIXELS_PER_LINE: f32 = 40.0;

struct Viewer {
    window: Window,
    render_loop: RenderLoop<HeadlessRenderer>,
    controls: OrbitControls,
}

struct App {
    config: AppConfig,
    viewer: Option<Viewer>,
    input: InputState,
    timer: Timer,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            viewer: None,
            input: InputState::new(),
            timer: Timer::new(),
        }
    }

    fn create_viewer(&self, event_loop: &ActiveEventLoop) -> Result<Viewer> {
        let settings = &self.config.window;
        let window = Window::new(event_loop, settings.width, settings.height, &settings.title)?;

        let mut options = self.config.demo_options();
        options.aspect = Some(window.width().max(1) as f32 / window.height().max(1) as f32);
        let scene = demos::build(self.config.demo, options)?;
        let controls = OrbitControls::new(&scene.camera, scene.focus);

        let renderer = HeadlessRenderer::new(window.width(), window.height());
        let mut render_loop = RenderLoop::new(scene.graph, scene.camera, scene.driver, renderer)
            .with_time_scale(self.config.time_scale());
        render_loop.request_resize(window.width(), window.height());
        render_loop.start()?;

        Ok(Viewer {
            window,
            render_loop,
            controls,
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        let visible = !viewer.window.is_minimized();
        steer_camera(
            &mut self.input,
            &mut viewer.controls,
            viewer.render_loop.camera_mut(),
            visible,
        );
        if !visible {
            return;
        }

        if let Err(e) = viewer.render_loop.tick(self.timer.elapsed().as_secs_f32()) {
            error!("Render loop stopped: {}", e);
            event_loop.exit();
        }
    }
}

/// Feed this frame's drag and scroll into the orbit controls, then start a new
/// input frame. Input gathered while `active` is false is dropped.
fn steer_camera(
    input: &mut InputState,
    controls: &mut OrbitControls,
    camera: &mut Camera,
    active: bool,
) {
    if active {
        if let Some((dx, dy)) = input.drag_delta(MouseButton::Left) {
            controls.sync_from(camera);
            controls.rotate(dx, dy);
            controls.apply(camera);
        }
        let scroll = input.scroll();
        if scroll != 0.0 {
            controls.sync_from(camera);
            controls.dolly(scroll);
            controls.apply(camera);
        }
    }
    input.begin_frame();
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }
        match self.create_viewer(event_loop) {
            Ok(viewer) => {
                info!(demo = %self.config.demo, "Initialization complete, entering main loop");
                self.timer.reset();
                self.viewer = Some(viewer);
            }
            Err(e) => {
                error!("Failed to start: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.render_loop.shutdown();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.window.resize(size.width, size.height);
                    viewer.render_loop.request_resize(size.width, size.height);
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
                if self.input.is_key_just_pressed(KeyCode::Escape) {
                    event_loop.exit();
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = MouseButton::from_winit(button) {
                    match state {
                        ElementState::Pressed => self.input.on_mouse_pressed(button),
                        ElementState::Released => self.input.on_mouse_released(button),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.on_pointer_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::CursorLeft { .. } => self.input.on_pointer_left(),
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
                };
                self.input.on_scroll(lines);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = self.viewer.as_ref() {
            viewer.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    orrery_core::init_logging();

    let arguments = Arguments::parse();
    let config = AppConfig::resolve(&arguments)?;
    info!(demo = %config.demo, headless = config.headless, "Starting Orrery");

    if config.headless {
        headless::run(&config)?;
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
