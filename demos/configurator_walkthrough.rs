//! Configurator Walkthrough
//!
//! Drives a configurator session the way a viewer front-end would, without
//! a renderer: a small chair model is "loaded" into the scene, a seat part is
//! picked, group mode is toggled, and the seat group is recolored and
//! retextured with a static swatch.
//!
//! Run with `RUST_LOG=debug` to see every selection recomputation.

use std::io::Cursor;
use std::time::Duration;

use anyhow::Result;
use atelier::assets::MemoryAssetReader;
use atelier::interaction::LoadedModel;
use atelier::resources::{BoundingBox, Material, Mesh, Texture};
use atelier::{Configurator, ConfiguratorConfig};
use glam::{Affine3A, Vec3};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::json;

fn swatch_png(color: [u8; 3]) -> Result<Vec<u8>> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb(color)));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ConfiguratorConfig::default();
    let reader = MemoryAssetReader::new();
    for (i, url) in config.static_swatch_urls().iter().enumerate() {
        let shade = 60 + (i as u8) * 25;
        reader.insert(url, swatch_png([shade, shade / 2, 40])?);
    }

    let mut session = Configurator::with_reader(config, reader);
    let ticket = session.begin_load();

    // The loader fills the scene, then reports what belongs to the model.
    let scene = session.scene_mut();
    let fabric = scene.add_material(Material::new("fabric", Vec3::ONE));
    let oak = scene.add_material(Material::new("oak", Vec3::new(0.6, 0.4, 0.2)));
    let part = BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5));

    let parts = [
        ("seat__1", fabric, Vec3::new(0.0, 0.5, 0.0)),
        ("seat__2", fabric, Vec3::new(0.0, 1.2, -0.5)),
        ("wood__1", oak, Vec3::new(-0.5, 0.0, 0.0)),
        ("wood__2", oak, Vec3::new(0.5, 0.0, 0.0)),
    ];
    let mut meshes = Vec::new();
    for (name, material, offset) in parts {
        let mesh = Mesh::new(name, material, part)
            .with_metadata(json!({ "customizable": true }))
            .with_world_matrix(Affine3A::from_translation(offset));
        meshes.push(scene.add_mesh(mesh));
    }
    let floor = scene.add_mesh(Mesh::new("floor", oak, BoundingBox::new(Vec3::splat(-3.0), Vec3::splat(3.0))));
    meshes.push(floor);

    let embedded = scene.add_texture(
        Texture::embedded("leather", swatch_png([120, 30, 20])?).with_metadata(json!({ "swatch": true })),
    );

    let report = session.on_model_loaded(
        ticket,
        LoadedModel { root_mesh: meshes.first().copied(), meshes: meshes.clone(), textures: vec![embedded] },
    );
    println!("load: {report:?}");
    println!(
        "camera: radius {:.3}, limits {:?}..{:?}, pinch precision {:.2}",
        session.camera().radius,
        session.camera().lower_radius_limit,
        session.camera().upper_radius_limit,
        session.camera().pinch_precision
    );
    println!("swatches: {:#?}", session.swatch_urls());

    let selected = session.on_pick_mesh(meshes[0]);
    println!("picked seat__1 -> {} selected", selected.len());

    let selected = session.on_toggle_group_mode(true);
    println!("group mode on -> {} selected ({:?})", selected.len(), session.selection_phase());

    let written = session.on_choose_color("#3366cc");
    println!("recolored {written} material(s)");

    let swatch = session.config().static_swatch_urls()[1].clone();
    let written = session.on_choose_texture(&swatch);
    println!("textured {written} material(s) with {swatch}");

    let floor_pick = session.on_pick_mesh(floor);
    println!("picked floor -> {} selected", floor_pick.len());

    session.update(Duration::from_millis(16));
    println!("highlighted meshes: {}", session.highlight_layer().len());

    Ok(())
}
