//! Sun, earth and moon, each carried by its own orbit pivot.

use anyhow::Result;
use glam::Vec3;

use orrery_resources::{AssetRegistry, Geometry, Material};
use orrery_scene::{
    AnimationDriver, AnimationRule, Axis, Camera, Renderable, SceneGraph, SceneLight,
};

use super::{DemoKind, DemoScene};

pub(super) fn build(camera: Camera) -> Result<DemoScene> {
    let mut graph = SceneGraph::new();
    let mut assets = AssetRegistry::new();
    let root = graph.root();

    let light = graph.spawn(root, Some("sunlight"))?;
    graph.set_light(light, SceneLight::directional(Vec3::ONE, 1.0))?;
    graph.transform_mut(light)?.position = Vec3::new(-1.0, 2.0, 4.0);

    let sphere = assets.add_geometry(Geometry::sphere(1.0, 12, 12))?;
    let sun_material = assets.add_material(Material::phong(0xffff00, 0x000000, true))?;
    let earth_material = assets.add_material(Material::phong(0x2233ff, 0x112244, true))?;
    let moon_material = assets.add_material(Material::phong(0x888888, 0x222222, true))?;

    let solar_system = graph.spawn(root, Some("solarSystem"))?;

    let sun = graph.spawn(solar_system, Some("sun"))?;
    graph.set_renderable(sun, Renderable::new(sphere, sun_material))?;
    graph.transform_mut(sun)?.scale = Vec3::splat(3.0);

    let earth_orbit = graph.spawn(solar_system, Some("earthOrbit"))?;
    graph.transform_mut(earth_orbit)?.position.x = 10.0;
    let earth = graph.spawn(earth_orbit, Some("earth"))?;
    graph.set_renderable(earth, Renderable::new(sphere, earth_material))?;

    let moon_orbit = graph.spawn(earth_orbit, Some("moonOrbit"))?;
    graph.transform_mut(moon_orbit)?.position.x = 2.0;
    let moon = graph.spawn(moon_orbit, Some("moon"))?;
    graph.set_renderable(moon, Renderable::new(sphere, moon_material))?;
    graph.transform_mut(moon)?.scale = Vec3::splat(0.5);

    let mut driver = AnimationDriver::new();
    driver
        .add("solar-system", AnimationRule::spin(solar_system, Axis::Y, 0.5))
        .add("earth-orbit", AnimationRule::spin(earth_orbit, Axis::Y, 2.0))
        .add("moon-orbit", AnimationRule::spin(moon_orbit, Axis::Y, 5.0));

    let camera = camera.positioned(Vec3::new(0.0, 0.0, 25.0), Vec3::ZERO);

    Ok(DemoScene {
        kind: DemoKind::SolarSystem,
        graph,
        camera,
        driver,
        assets,
        focus: Vec3::ZERO,
    })
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;
    use crate::demos::CameraSetup;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_earth_position_after_one_second() {
        let mut scene = build(CameraSetup::Perspective.camera(1.0)).unwrap();
        scene.driver.apply(1.0, &mut scene.graph, &mut scene.camera);

        // The whole system has turned 0.5 rad; the earth sits on the orbit pivot.
        let earth = scene.graph.find_by_name("earth").unwrap();
        let expected = Quat::from_rotation_y(0.5) * Vec3::new(10.0, 0.0, 0.0);
        assert!(approx_eq(scene.graph.world_position(earth).unwrap(), expected));
    }

    #[test]
    fn test_moon_rides_the_earth_orbit() {
        let mut scene = build(CameraSetup::Perspective.camera(1.0)).unwrap();
        scene.driver.apply(2.0, &mut scene.graph, &mut scene.camera);

        let outer = Quat::from_rotation_y(1.0);
        let earth_turn = Quat::from_rotation_y(4.0);
        let expected = outer * (Vec3::new(10.0, 0.0, 0.0) + earth_turn * Vec3::new(2.0, 0.0, 0.0));

        let moon = scene.graph.find_by_name("moon").unwrap();
        assert!(approx_eq(scene.graph.world_position(moon).unwrap(), expected));
    }

    #[test]
    fn test_sun_stays_centred_and_scaled() {
        let mut scene = build(CameraSetup::Perspective.camera(1.0)).unwrap();
        scene.driver.apply(7.3, &mut scene.graph, &mut scene.camera);

        let sun = scene.graph.find_by_name("sun").unwrap();
        let world = scene.graph.world_transform(sun).unwrap();
        let (scale, _, translation) = world.to_scale_rotation_translation();
        assert!(approx_eq(translation, Vec3::ZERO));
        assert!(approx_eq(scale, Vec3::splat(3.0)));
    }
}
