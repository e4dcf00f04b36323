//! The shared stage: ground, centrepiece, a ring of tori and a small sphere
//! orbiting through them. Used by the lights, camera-tracking and shadows
//! demos.

use std::f32::consts::PI;

use anyhow::Result;
use glam::Vec3;

use orrery_resources::{AssetRegistry, Geometry, Material, Side, material::rgb};
use orrery_scene::{
    AnimationDriver, AnimationRule, Axis, Camera, Channel, Curve, NodeRef, Renderable, SceneGraph,
    SceneLight, ShadowSettings, Sink, Transform,
};

use super::{DemoKind, DemoScene, LightSetup};

const TORUS_COUNT: usize = 12;
const LIGHT_HEIGHT: f32 = 5.0;
/// Orbit radius and height of everything that circles the centrepiece.
const RING_OFFSET: Vec3 = Vec3::new(3.0, 0.5, 0.0);

/// Degrees per second the small sphere travels around the ring.
const ORBIT_RATE: f32 = 50.0;
/// How far ahead of the sphere the camera target leads, in degrees.
const TARGET_LEAD: f32 = 10.0;

pub(super) fn build(kind: DemoKind, light: LightSetup, camera: Camera) -> Result<DemoScene> {
    let mut graph = SceneGraph::new();
    let mut assets = AssetRegistry::new();
    let mut driver = AnimationDriver::new();
    let root = graph.root();
    let shadows = kind == DemoKind::Shadows;

    let mut ground_material = Material::standard(0x2c3e5a, 0.5, 0.5);
    if let Material::Standard(standard) = &mut ground_material {
        standard.side = Side::Double;
    }
    let ground = graph.spawn(root, Some("ground"))?;
    let mut renderable = Renderable::new(
        assets.add_geometry(Geometry::plane(10.0, 10.0))?,
        assets.add_material(ground_material)?,
    );
    if shadows {
        renderable = renderable.receiving_shadows();
    }
    graph.set_renderable(ground, renderable)?;
    graph.transform_mut(ground)?.rotation.x = (-90.0f32).to_radians();

    // Half dome on the lit stages, a torus knot when shadows are on.
    let centrepiece = graph.spawn(root, Some("bigSphere"))?;
    let material = assets.add_material(Material::standard(0xffffff, 0.1, 0.2))?;
    if shadows {
        let geometry = assets.add_geometry(Geometry::torus_knot(1.0, 0.3, 128, 64, 2, 3))?;
        graph.set_renderable(centrepiece, Renderable::new(geometry, material).with_shadows())?;
        graph.transform_mut(centrepiece)?.position.y = 1.6;
    } else {
        let geometry = assets.add_geometry(Geometry::partial_sphere(1.5, 64, 64, 0.0, PI))?;
        graph.set_renderable(centrepiece, Renderable::new(geometry, material))?;
        graph.transform_mut(centrepiece)?.rotation.x = (-90.0f32).to_radians();
    }

    let torus_geometry = assets.add_geometry(Geometry::torus(0.4, 0.1, 32, 32))?;
    let torus_material = assets.add_material(Material::standard(0x9b59b6, 0.5, 0.9))?;
    for i in 0..TORUS_COUNT {
        let pivot = graph.spawn(root, None)?;
        graph.transform_mut(pivot)?.rotation.y = (30.0 * i as f32).to_radians();

        let torus = graph.spawn(pivot, None)?;
        let mut renderable = Renderable::new(torus_geometry, torus_material);
        if shadows {
            renderable = renderable.with_shadows();
        }
        graph.set_renderable(torus, renderable)?;
        graph.transform_mut(torus)?.position = RING_OFFSET;
    }

    let sphere_pivot = graph.spawn(root, Some("smallSpherePivot"))?;
    let sphere = graph.spawn(sphere_pivot, Some("smallSphere"))?;
    let mut renderable = Renderable::new(
        assets.add_geometry(Geometry::sphere(0.3, 32, 32))?,
        assets.add_material(Material::standard(0xe74c3c, 0.2, 0.5))?,
    );
    if shadows {
        renderable = renderable.with_shadows();
    }
    graph.set_renderable(sphere, renderable)?;
    graph.transform_mut(sphere)?.position = RING_OFFSET;

    driver.add(
        "orbit",
        AnimationRule::Absolute {
            node: "smallSpherePivot".into(),
            channel: Channel::Rotation(Axis::Y),
            curve: Curve::degrees(ORBIT_RATE, 0.0),
        },
    );
    let small_sphere = NodeRef::name("smallSpherePivot").child(0);

    if shadows {
        let aux = graph.spawn(root, Some("auxLight"))?;
        graph.set_light(aux, SceneLight::directional(Vec3::ONE, 0.5))?;
        graph.transform_mut(aux)?.position = Vec3::Y * LIGHT_HEIGHT;
    }

    let light_node = graph.spawn(root, Some("light"))?;
    let (mut scene_light, transform) = stage_light(light, shadows);
    if shadows {
        scene_light.enable_shadows(
            ShadowSettings::default()
                .with_extent(6.0)
                .with_map_size(2048)
                .with_radius(1.0),
        )?;
    }
    let aims = scene_light.target().is_some();
    graph.set_light(light_node, scene_light)?;
    *graph.transform_mut(light_node)? = transform;

    if aims {
        driver.add(
            "light-target",
            AnimationRule::track(small_sphere.clone(), Sink::LightTarget(light_node.into())),
        );
    } else if light == LightSetup::Point && shadows {
        driver.add(
            "light-follow",
            AnimationRule::track(small_sphere.clone(), Sink::NodePosition(light_node.into())),
        );
    }

    let camera = camera.positioned(Vec3::new(7.0, 7.0, 0.0), Vec3::ZERO);
    if kind == DemoKind::CameraTracking {
        let target_pivot = graph.spawn(root, Some("targetPivot"))?;
        let target = graph.spawn(target_pivot, Some("target"))?;
        graph.transform_mut(target)?.position = RING_OFFSET;

        driver
            .add(
                "target-orbit",
                AnimationRule::Absolute {
                    node: "targetPivot".into(),
                    channel: Channel::Rotation(Axis::Y),
                    curve: Curve::degrees(ORBIT_RATE, TARGET_LEAD),
                },
            )
            .add(
                "camera-ride",
                AnimationRule::track(small_sphere, Sink::CameraPosition),
            )
            .add(
                "camera-aim",
                AnimationRule::track(NodeRef::name("targetPivot").child(0), Sink::CameraLookAt),
            );
    }

    Ok(DemoScene {
        kind,
        graph,
        camera,
        driver,
        assets,
        focus: Vec3::ZERO,
    })
}

/// The main light for a setup and its node transform.
fn stage_light(setup: LightSetup, shadows: bool) -> (SceneLight, Transform) {
    let overhead = Transform::new().with_position(Vec3::Y * LIGHT_HEIGHT);
    match setup {
        LightSetup::Ambient => (SceneLight::ambient(Vec3::ONE, 1.0), Transform::IDENTITY),
        LightSetup::Hemisphere => (
            SceneLight::hemisphere(rgb(0xff0000), rgb(0xbb7a1c), 5.0),
            Transform::IDENTITY,
        ),
        LightSetup::Directional if shadows => (SceneLight::directional(Vec3::ONE, 0.5), overhead),
        LightSetup::Directional => (SceneLight::directional(Vec3::ONE, 1.0), overhead),
        LightSetup::Point if shadows => (SceneLight::point(Vec3::ONE, 0.7), overhead),
        LightSetup::Point => (SceneLight::point(Vec3::ONE, 2.0), overhead),
        LightSetup::Spot if shadows => (
            SceneLight::spot(Vec3::ONE, 0.7, 30.0f32.to_radians(), 0.2),
            overhead,
        ),
        LightSetup::Spot => (
            SceneLight::spot(Vec3::ONE, 1.0, 40.0f32.to_radians(), 0.0),
            overhead,
        ),
        LightSetup::RectArea => (
            SceneLight::rect_area(Vec3::ONE, 10.0, 6.0, 1.0),
            overhead.with_rotation(Vec3::new((-90.0f32).to_radians(), 0.0, 0.0)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use orrery_scene::{LightKind, Payload};

    use super::*;
    use crate::demos::CameraSetup;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    fn stage(kind: DemoKind, light: LightSetup) -> DemoScene {
        build(kind, light, CameraSetup::Perspective.camera(1.0)).expect("stage builds")
    }

    #[test]
    fn test_torus_ring_layout() {
        let scene = stage(DemoKind::Lights, LightSetup::RectArea);
        let world = scene.graph.compute_world_transforms();
        let tori: Vec<_> = world
            .iter()
            .filter(|(id, _)| {
                scene.graph.node(*id).ok().and_then(|n| n.renderable()).is_some()
                    && scene.graph.node(*id).ok().and_then(|n| n.name()).is_none()
            })
            .map(|(_, m)| m.w_axis.truncate())
            .collect();
        assert_eq!(tori.len(), TORUS_COUNT);
        for position in tori {
            let flat = Vec3::new(position.x, 0.0, position.z);
            assert!((flat.length() - 3.0).abs() < 1e-4);
            assert!((position.y - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_small_sphere_orbits_at_fifty_degrees_per_second() {
        let mut scene = stage(DemoKind::Lights, LightSetup::RectArea);
        scene.driver.apply(1.8, &mut scene.graph, &mut scene.camera);

        let sphere = scene.graph.find_by_name("smallSphere").unwrap();
        let position = scene.graph.world_position(sphere).unwrap();
        let angle = 90.0f32.to_radians();
        let expected = Vec3::new(3.0 * angle.cos(), 0.5, -3.0 * angle.sin());
        assert!(approx_eq(position, expected), "{position}");
    }

    #[test]
    fn test_spot_light_aims_at_small_sphere() {
        let mut scene = stage(DemoKind::Lights, LightSetup::Spot);
        scene.driver.apply(3.0, &mut scene.graph, &mut scene.camera);

        let sphere = scene.graph.find_by_name("smallSphere").unwrap();
        let sphere_position = scene.graph.world_position(sphere).unwrap();
        let light = scene.graph.find_by_name("light").unwrap();
        let target = scene.graph.node(light).unwrap().light().unwrap().target();
        assert!(approx_eq(target.unwrap(), sphere_position));
    }

    #[test]
    fn test_shadow_point_light_rides_small_sphere() {
        let mut scene = stage(DemoKind::Shadows, LightSetup::Point);
        scene.driver.apply(2.5, &mut scene.graph, &mut scene.camera);

        let sphere = scene.graph.find_by_name("smallSphere").unwrap();
        let light = scene.graph.find_by_name("light").unwrap();
        assert!(approx_eq(
            scene.graph.world_position(light).unwrap(),
            scene.graph.world_position(sphere).unwrap()
        ));
        assert!(scene.graph.node(light).unwrap().light().unwrap().casts_shadow());
    }

    #[test]
    fn test_lights_point_light_stays_overhead() {
        let mut scene = stage(DemoKind::Lights, LightSetup::Point);
        scene.driver.apply(2.5, &mut scene.graph, &mut scene.camera);

        let light = scene.graph.find_by_name("light").unwrap();
        assert!(approx_eq(
            scene.graph.world_position(light).unwrap(),
            Vec3::Y * LIGHT_HEIGHT
        ));
        assert_eq!(scene.driver.rule_names().collect::<Vec<_>>(), vec!["orbit"]);
    }

    #[test]
    fn test_rect_area_light_points_down() {
        let scene = stage(DemoKind::Lights, LightSetup::RectArea);
        let light = scene.graph.find_by_name("light").unwrap();
        assert!(matches!(
            scene.graph.node(light).unwrap().payload(),
            Some(Payload::Light(SceneLight { kind: LightKind::RectArea { .. }, .. }))
        ));
        let forward = scene.graph.transform(light).unwrap().forward();
        assert!(approx_eq(forward, Vec3::NEG_Y), "{forward}");
    }

    #[test]
    fn test_camera_rides_sphere_and_looks_ahead() {
        let mut scene = stage(DemoKind::CameraTracking, LightSetup::RectArea);
        scene.driver.apply(4.0, &mut scene.graph, &mut scene.camera);

        let sphere = scene.graph.find_by_name("smallSphere").unwrap();
        let target = scene.graph.find_by_name("target").unwrap();
        let sphere_position = scene.graph.world_position(sphere).unwrap();
        let target_position = scene.graph.world_position(target).unwrap();

        assert!(approx_eq(scene.camera.position, sphere_position));
        let expected = (target_position - sphere_position).normalize();
        assert!(approx_eq(scene.camera.forward(), expected));
    }

    #[test]
    fn test_shadow_stage_flags() {
        let scene = stage(DemoKind::Shadows, LightSetup::Spot);
        let graph = &scene.graph;

        let ground = graph.find_by_name("ground").unwrap();
        let ground = graph.node(ground).unwrap().renderable().unwrap();
        assert!(ground.receive_shadow && !ground.cast_shadow);

        let knot = graph.find_by_name("bigSphere").unwrap();
        let knot = graph.node(knot).unwrap().renderable().unwrap();
        assert!(knot.receive_shadow && knot.cast_shadow);

        let light = graph.find_by_name("light").unwrap();
        let shadow = graph.node(light).unwrap().light().unwrap().shadow().copied().unwrap();
        assert_eq!(shadow.map_size, 2048);
        assert_eq!(shadow.frustum, [-6.0, 6.0, 6.0, -6.0]);

        let aux = graph.find_by_name("auxLight").unwrap();
        assert!(!graph.node(aux).unwrap().light().unwrap().casts_shadow());
    }
}
