//! Integration tests driving a full scene through the render loop.

use glam::Vec3;
use orrery_renderer::{Frame, LoopError, RenderError, RenderLoop, Renderer};
use orrery_resources::{AssetRegistry, Geometry, Material};
use orrery_scene::{
    AnimationDriver, AnimationRule, Axis, Camera, NodeId, Renderable, SceneGraph, SceneLight,
    ShadowSettings, Sink,
};

/// Records what it was asked to draw.
#[derive(Default)]
struct RecordingRenderer {
    sphere: Option<NodeId>,
    sphere_positions: Vec<Vec3>,
    spot_targets: Vec<Option<Vec3>>,
    mesh_order: Vec<Vec<NodeId>>,
    shadow_casters: usize,
    fail_on_frame: Option<u64>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        if self.fail_on_frame == Some(frame.index) {
            return Err(RenderError::Backend("simulated failure".to_string()));
        }

        let list = frame.draw_list();
        if let Some(sphere) = self.sphere {
            let model = frame.world.get(sphere).expect("sphere is in the scene");
            self.sphere_positions.push(model.transform_point3(Vec3::ZERO));
        }
        self.spot_targets
            .push(list.shadow_lights().next().and_then(|l| l.light.target()));
        self.mesh_order
            .push(list.meshes.iter().map(|m| m.node).collect());
        self.shadow_casters = list.shadow_casters().count();
        Ok(())
    }
}

struct ShadowScene {
    graph: SceneGraph,
    driver: AnimationDriver,
    ground: NodeId,
    sphere: NodeId,
}

fn shadow_scene() -> ShadowScene {
    let mut assets = AssetRegistry::new();
    let plane = assets.add_geometry(Geometry::plane(10.0, 10.0)).unwrap();
    let ball = assets.add_geometry(Geometry::sphere(0.3, 32, 32)).unwrap();
    let floor = assets
        .add_material(Material::standard(0x2c3e5a, 0.5, 0.5))
        .unwrap();
    let red = assets
        .add_material(Material::standard(0xe74c3c, 0.2, 0.5))
        .unwrap();

    let mut graph = SceneGraph::new();
    let root = graph.root();

    let ground = graph.spawn(root, Some("ground")).unwrap();
    graph.transform_mut(ground).unwrap().rotation.x = (-90f32).to_radians();
    graph
        .set_renderable(ground, Renderable::new(plane, floor).receiving_shadows())
        .unwrap();

    let pivot = graph.spawn(root, Some("smallSpherePivot")).unwrap();
    let sphere = graph.spawn(pivot, Some("smallSphere")).unwrap();
    graph.transform_mut(sphere).unwrap().position = Vec3::new(3.0, 0.5, 0.0);
    graph
        .set_renderable(sphere, Renderable::new(ball, red).with_shadows())
        .unwrap();

    let spot = graph.spawn(root, Some("spot")).unwrap();
    graph.transform_mut(spot).unwrap().position = Vec3::new(0.0, 5.0, 0.0);
    let mut light = SceneLight::spot(Vec3::ONE, 0.7, 30f32.to_radians(), 0.2);
    light
        .enable_shadows(ShadowSettings::default().with_extent(6.0).with_map_size(2048))
        .unwrap();
    graph.set_light(spot, light).unwrap();

    let mut driver = AnimationDriver::new();
    driver
        .add("orbit", AnimationRule::spin("smallSpherePivot", Axis::Y, std::f32::consts::FRAC_PI_2))
        .add("aim", AnimationRule::track("smallSphere", Sink::LightTarget("spot".into())));

    ShadowScene {
        graph,
        driver,
        ground,
        sphere,
    }
}

#[test]
fn test_renderer_sees_animated_pose_of_same_tick() {
    let scene = shadow_scene();
    let renderer = RecordingRenderer {
        sphere: Some(scene.sphere),
        ..Default::default()
    };
    let mut render_loop = RenderLoop::new(scene.graph, Camera::new(), scene.driver, renderer);
    render_loop.start().unwrap();

    render_loop.tick(0.0).unwrap();
    render_loop.tick(1.0).unwrap();

    let recorded = render_loop.renderer();
    assert_eq!(recorded.sphere_positions.len(), 2);
    assert!((recorded.sphere_positions[0] - Vec3::new(3.0, 0.5, 0.0)).length() < 1e-4);
    assert!((recorded.sphere_positions[1] - Vec3::new(0.0, 0.5, -3.0)).length() < 1e-4);

    // The spot light's target follows the sphere within the same frame
    for (target, position) in recorded.spot_targets.iter().zip(&recorded.sphere_positions) {
        assert!((target.unwrap() - *position).length() < 1e-4);
    }
}

#[test]
fn test_draw_list_follows_traversal_order() {
    let scene = shadow_scene();
    let (ground, sphere) = (scene.ground, scene.sphere);
    let mut render_loop = RenderLoop::new(
        scene.graph,
        Camera::new(),
        scene.driver,
        RecordingRenderer::default(),
    );
    render_loop.start().unwrap();
    render_loop.tick(0.5).unwrap();

    assert_eq!(render_loop.renderer().mesh_order[0], vec![ground, sphere]);
    assert_eq!(render_loop.renderer().shadow_casters, 1);
}

#[test]
fn test_scene_teardown_does_not_stop_loop() {
    let scene = shadow_scene();
    let sphere = scene.sphere;
    let mut render_loop = RenderLoop::new(
        scene.graph,
        Camera::new(),
        scene.driver,
        RecordingRenderer::default(),
    );
    render_loop.start().unwrap();

    render_loop.graph_mut().destroy(sphere).unwrap();
    let report = render_loop.tick(1.0).unwrap();

    assert_eq!(report.animation.applied, 1);
    assert_eq!(report.animation.skipped, 1);
    assert!(render_loop.is_running());
}

#[test]
fn test_failure_mid_run_is_fatal() {
    let scene = shadow_scene();
    let renderer = RecordingRenderer {
        fail_on_frame: Some(2),
        ..Default::default()
    };
    let mut render_loop = RenderLoop::new(scene.graph, Camera::new(), scene.driver, renderer);
    render_loop.start().unwrap();

    assert!(render_loop.tick(0.0).is_ok());
    assert!(render_loop.tick(0.1).is_ok());
    assert!(matches!(
        render_loop.tick(0.2),
        Err(LoopError::Renderer(RenderError::Backend(_)))
    ));
    assert!(!render_loop.is_running());
    assert_eq!(render_loop.tick(0.3), Err(LoopError::NotRunning));
}
