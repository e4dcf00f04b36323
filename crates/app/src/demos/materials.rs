//! Textured material demos: a box and a sphere side by side.

use anyhow::Result;
use glam::{Vec2, Vec3};

use orrery_resources::{
    AssetRegistry, Filter, Geometry, Material, MaterialMaps, Side, StandardMaterial, Texture,
    TextureSettings, Wrap,
};
use orrery_scene::{
    AnimationDriver, AnimationRule, Camera, NodeRef, Renderable, SceneGraph, SceneLight,
};

use super::{DemoKind, DemoScene};

const TEXTURE_DIR: &str = "assets/textures";
const KEY_LIGHT_POSITION: Vec3 = Vec3::new(-1.0, 2.0, 4.0);

/// UV grid texture with nearest filtering on a single, untextured light.
pub(super) fn build_textured(camera: Camera) -> Result<DemoScene> {
    let mut graph = SceneGraph::new();
    let mut assets = AssetRegistry::new();
    let root = graph.root();

    let light = graph.spawn(root, Some("keyLight"))?;
    graph.set_light(light, SceneLight::directional(Vec3::ONE, 1.0))?;
    graph.transform_mut(light)?.position = KEY_LIGHT_POSITION;

    let grid = assets.add_texture(
        Texture::new(format!("{TEXTURE_DIR}/uv_grid_opengl.jpg")).with_settings(TextureSettings {
            wrap_s: Wrap::ClampToEdge,
            wrap_t: Wrap::ClampToEdge,
            center: Vec2::splat(0.5),
            mag_filter: Filter::Nearest,
            min_filter: Filter::NearestMipmapLinear,
            ..Default::default()
        }),
    );
    let mut material = StandardMaterial::default();
    material.maps.color = Some(grid);
    let material = assets.add_material(Material::Standard(material))?;

    let box_geometry = assets.add_geometry(Geometry::cuboid(1.0, 1.0, 1.0))?;
    let sphere_geometry = assets.add_geometry(Geometry::sphere(0.7, 32, 32))?;
    spawn_pair(
        &mut graph,
        Renderable::new(box_geometry, material),
        Renderable::new(sphere_geometry, material),
    )?;

    Ok(DemoScene {
        kind: DemoKind::Materials,
        graph,
        camera: camera.positioned(Vec3::new(0.0, 0.0, 7.0), Vec3::ZERO),
        driver: AnimationDriver::new(),
        assets,
        focus: Vec3::ZERO,
    })
}

/// Every PBR map at once, lit by a directional light carried by the camera.
pub(super) fn build_stack(camera: Camera) -> Result<DemoScene> {
    let mut graph = SceneGraph::new();
    let mut assets = AssetRegistry::new();
    let root = graph.root();

    let ambient = graph.spawn(root, Some("ambient"))?;
    graph.set_light(ambient, SceneLight::ambient(Vec3::ONE, 0.2))?;

    let rig = graph.spawn(root, Some("cameraRig"))?;
    let light = graph.spawn(rig, Some("keyLight"))?;
    graph.set_light(light, SceneLight::directional(Vec3::ONE, 1.0))?;
    graph.transform_mut(light)?.position = KEY_LIGHT_POSITION;

    let mut load = |name: &str| assets.add_texture(Texture::new(format!("{TEXTURE_DIR}/{name}")));
    let maps = MaterialMaps {
        color: Some(load("Glass_Window_002_basecolor.jpg")),
        normal: Some(load("Glass_Window_002_normal.jpg")),
        displacement: Some(load("Glass_Window_002_height.png")),
        displacement_scale: 0.2,
        displacement_bias: -0.15,
        ambient_occlusion: Some(load("Glass_Window_002_ambientOcclusion.jpg")),
        ao_intensity: 1.0,
        roughness: Some(load("Glass_Window_002_roughness.jpg")),
        metalness: Some(load("Glass_Window_002_metallic.jpg")),
        alpha: None,
        light: Some(load("Light.png")),
        light_intensity: 2.0,
    };

    let material = assets.add_material(Material::Standard(StandardMaterial {
        roughness: 0.5,
        metalness: 0.5,
        maps,
        side: Side::Double,
        transparent: true,
        ..Default::default()
    }))?;

    let box_geometry = assets.add_geometry(Geometry::Box {
        width: 1.0,
        height: 1.0,
        depth: 1.0,
        segments: [256; 3],
    })?;
    let sphere_geometry = assets.add_geometry(Geometry::sphere(0.7, 512, 512))?;
    spawn_pair(
        &mut graph,
        Renderable::new(box_geometry, material),
        Renderable::new(sphere_geometry, material),
    )?;

    let mut driver = AnimationDriver::new();
    driver.add(
        "light-rig",
        AnimationRule::FollowCamera {
            node: NodeRef::name("cameraRig"),
        },
    );

    Ok(DemoScene {
        kind: DemoKind::MaterialStack,
        graph,
        camera: camera.positioned(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO),
        driver,
        assets,
        focus: Vec3::ZERO,
    })
}

fn spawn_pair(graph: &mut SceneGraph, left: Renderable, right: Renderable) -> Result<()> {
    let root = graph.root();
    for (name, renderable, x) in [("box", left, -1.0), ("sphere", right, 1.0)] {
        let node = graph.spawn(root, Some(name))?;
        graph.set_renderable(node, renderable)?;
        graph.transform_mut(node)?.position.x = x;
    }
    Ok(())
}
