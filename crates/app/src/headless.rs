//! Fixed-step host that runs the loop without a window.

use anyhow::Result;
use tracing::info;

use orrery_core::ManualClock;
use orrery_renderer::{HeadlessRenderer, RenderLoop};

use crate::config::AppConfig;
use crate::demos::{self, DemoScene};

const FRAME_TIME: f32 = 1.0 / 60.0;

/// What a headless run did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub meshes: usize,
    pub lights: usize,
    pub skipped_rules: usize,
}

pub fn run(config: &AppConfig) -> Result<RunSummary> {
    let scene = demos::build(config.demo, config.demo_options())?;
    run_scene(scene, config)
}

pub fn run_scene(scene: DemoScene, config: &AppConfig) -> Result<RunSummary> {
    let DemoScene {
        kind,
        graph,
        camera,
        driver,
        ..
    } = scene;
    let renderer = HeadlessRenderer::new(config.window.width, config.window.height);
    let mut render_loop =
        RenderLoop::new(graph, camera, driver, renderer).with_time_scale(config.time_scale());
    render_loop.request_resize(config.window.width, config.window.height);
    render_loop.start()?;

    info!(demo = %kind, frames = config.frames, "Running headless");

    let mut clock = ManualClock::new();
    let mut skipped_rules = 0;
    for _ in 0..config.frames {
        let report = render_loop.tick_with(&clock)?;
        skipped_rules += report.animation.skipped;
        clock.advance(FRAME_TIME);
    }
    render_loop.shutdown();

    let renderer = render_loop.renderer();
    let (meshes, lights) = renderer
        .last_frame()
        .map(|stats| (stats.meshes, stats.lights))
        .unwrap_or_default();
    let summary = RunSummary {
        frames: renderer.frames_rendered(),
        meshes,
        lights,
        skipped_rules,
    };

    info!(
        frames = summary.frames,
        meshes = summary.meshes,
        lights = summary.lights,
        skipped_rules = summary.skipped_rules,
        "Headless run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::DemoKind;

    #[test]
    fn test_solar_system_runs_headless() {
        let config = AppConfig {
            demo: DemoKind::SolarSystem,
            headless: true,
            frames: 30,
            ..Default::default()
        };
        let summary = run(&config).unwrap();
        assert_eq!(summary.frames, 30);
        assert_eq!(summary.meshes, 3);
        assert_eq!(summary.lights, 1);
        assert_eq!(summary.skipped_rules, 0);
    }

    #[test]
    fn test_missing_rule_target_is_skipped_not_fatal() {
        let config = AppConfig {
            demo: DemoKind::Lights,
            frames: 5,
            ..Default::default()
        };
        let mut scene = demos::build(config.demo, config.demo_options()).unwrap();
        let pivot = scene.graph.find_by_name("smallSpherePivot").unwrap();
        scene.graph.detach(pivot).unwrap();

        let summary = run_scene(scene, &config).unwrap();
        assert_eq!(summary.frames, 5);
        assert_eq!(summary.skipped_rules, 5);
    }
}
