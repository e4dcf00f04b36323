//! The render loop state machine.
//!
//! The loop owns the scene, the camera, the animation driver and the
//! renderer it was built with. The host calls [`RenderLoop::tick`] once per
//! display refresh; each tick applies any queued resize, runs the animation
//! pass, recomputes world transforms and hands the frame to the renderer.

use orrery_core::Clock;
use orrery_scene::{AnimationDriver, AnimationReport, Camera, SceneGraph};

use crate::{Frame, LoopError, Renderer};

/// Lifecycle of a [`RenderLoop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub frame: u64,
    pub animation: AnimationReport,
    /// Whether a queued resize was applied before animating
    pub resized: bool,
}

pub struct RenderLoop<R: Renderer> {
    graph: SceneGraph,
    camera: Camera,
    driver: AnimationDriver,
    renderer: R,
    state: LoopState,
    has_run: bool,
    time_scale: f32,
    pending_resize: Option<(u32, u32)>,
    frame_index: u64,
}

impl<R: Renderer> RenderLoop<R> {
    pub fn new(graph: SceneGraph, camera: Camera, driver: AnimationDriver, renderer: R) -> Self {
        Self {
            graph,
            camera,
            driver,
            renderer,
            state: LoopState::Stopped,
            has_run: false,
            time_scale: 1.0,
            pending_resize: None,
            frame_index: 0,
        }
    }

    /// Scale applied to elapsed time before it reaches the animation driver.
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Number of frames drawn so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Enter the running state.
    ///
    /// Starting a running loop is a no-op. A loop that has stopped after
    /// running stays stopped.
    pub fn start(&mut self) -> Result<(), LoopError> {
        match self.state {
            LoopState::Running => Ok(()),
            LoopState::Stopped if self.has_run => Err(LoopError::Terminated),
            LoopState::Stopped => {
                self.state = LoopState::Running;
                self.has_run = true;
                tracing::info!("Render loop started");
                Ok(())
            }
        }
    }

    /// Stop between ticks. The loop cannot be restarted afterwards.
    pub fn shutdown(&mut self) {
        if self.state == LoopState::Running {
            tracing::info!(frames = self.frame_index, "Render loop shut down");
        }
        self.state = LoopState::Stopped;
    }

    /// Queue a viewport resize for the next tick. The latest size wins.
    pub fn request_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            tracing::debug!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.pending_resize = Some((width, height));
    }

    /// Run one frame at `elapsed` seconds since start.
    pub fn tick(&mut self, elapsed: f32) -> Result<TickReport, LoopError> {
        if self.state != LoopState::Running {
            return Err(LoopError::NotRunning);
        }

        let resized = match self.pending_resize.take() {
            Some((width, height)) => {
                self.camera.resize(width, height);
                self.renderer.resize(width, height);
                tracing::debug!("Applied resize: {}x{}", width, height);
                true
            }
            None => false,
        };

        let time = elapsed * self.time_scale;
        let animation = self.driver.apply(time, &mut self.graph, &mut self.camera);

        let world = self.graph.compute_world_transforms();

        let frame = Frame {
            graph: &self.graph,
            world: &world,
            camera: &self.camera,
            index: self.frame_index,
            time,
        };
        if let Err(e) = self.renderer.render(&frame) {
            tracing::error!("Render error, stopping loop: {}", e);
            self.state = LoopState::Stopped;
            return Err(e.into());
        }

        let report = TickReport {
            frame: self.frame_index,
            animation,
            resized,
        };
        self.frame_index += 1;
        Ok(report)
    }

    /// Run one frame at the clock's current time.
    pub fn tick_with(&mut self, clock: &impl Clock) -> Result<TickReport, LoopError> {
        self.tick(clock.elapsed_secs())
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Mutable scene access for the host between ticks.
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access for controls between ticks.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn driver_mut(&mut self) -> &mut AnimationDriver {
        &mut self.driver
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use orrery_core::ManualClock;

    use super::*;
    use crate::{HeadlessRenderer, RenderError};

    fn headless_loop() -> RenderLoop<HeadlessRenderer> {
        RenderLoop::new(
            SceneGraph::new(),
            Camera::new(),
            AnimationDriver::new(),
            HeadlessRenderer::new(640, 480),
        )
    }

    #[test]
    fn test_tick_requires_start() {
        let mut render_loop = headless_loop();
        assert_eq!(render_loop.state(), LoopState::Stopped);
        assert_eq!(render_loop.tick(0.0), Err(LoopError::NotRunning));

        render_loop.start().unwrap();
        assert!(render_loop.is_running());
        assert_eq!(render_loop.tick(0.0).unwrap().frame, 0);
        assert_eq!(render_loop.tick(0.1).unwrap().frame, 1);
        assert_eq!(render_loop.frame_index(), 2);
    }

    #[test]
    fn test_shutdown_is_terminal() {
        let mut render_loop = headless_loop();
        render_loop.start().unwrap();
        render_loop.start().unwrap();
        render_loop.shutdown();

        assert_eq!(render_loop.start(), Err(LoopError::Terminated));
        assert_eq!(render_loop.tick(1.0), Err(LoopError::NotRunning));
    }

    #[test]
    fn test_resize_is_applied_at_tick_boundary() {
        let mut render_loop = headless_loop();
        render_loop.start().unwrap();

        render_loop.request_resize(800, 600);
        render_loop.request_resize(1000, 500);
        render_loop.request_resize(1000, 0);
        // Nothing changes until the next tick
        assert!((render_loop.camera().aspect() - 1.0).abs() < 1e-6);

        let report = render_loop.tick(0.0).unwrap();
        assert!(report.resized);
        assert!((render_loop.camera().aspect() - 2.0).abs() < 1e-6);
        assert_eq!(render_loop.renderer().viewport(), (1000, 500));

        assert!(!render_loop.tick(0.1).unwrap().resized);
    }

    #[test]
    fn test_tick_with_clock_scales_time() {
        let mut render_loop = headless_loop().with_time_scale(0.5);
        render_loop.start().unwrap();

        let mut clock = ManualClock::new();
        clock.advance(3.0);
        render_loop.tick_with(&clock).unwrap();

        let stats = render_loop.renderer().last_frame().unwrap();
        assert_eq!(stats.time, 1.5);
        assert_eq!(stats.index, 0);
    }

    struct BrokenRenderer;

    impl Renderer for BrokenRenderer {
        fn render(&mut self, _frame: &Frame<'_>) -> Result<(), RenderError> {
            Err(RenderError::ContextLost("gone".to_string()))
        }
    }

    #[test]
    fn test_renderer_error_stops_loop() {
        let mut render_loop = RenderLoop::new(
            SceneGraph::new(),
            Camera::new(),
            AnimationDriver::new(),
            BrokenRenderer,
        );
        render_loop.start().unwrap();

        assert_eq!(
            render_loop.tick(0.0),
            Err(LoopError::Renderer(RenderError::ContextLost("gone".to_string())))
        );
        assert_eq!(render_loop.state(), LoopState::Stopped);
        assert_eq!(render_loop.frame_index(), 0);
        assert_eq!(render_loop.start(), Err(LoopError::Terminated));
    }
}
