//! Configurator Session Tests
//!
//! Tests for:
//! - Load lifecycle (framing, swatches, reload disposal, stale loads)
//! - Pick / group mode callbacks and highlight consistency
//! - Color, reset and texture callbacks with contained failures
//! - Presentation swatch list

use std::io::Cursor;

use glam::Vec3;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::json;

use atelier::assets::MemoryAssetReader;
use atelier::config::{ConfiguratorConfig, TilingProfile};
use atelier::interaction::{FramingOutcome, LoadedModel, SelectionPhase};
use atelier::resources::{BoundingBox, Material, Mesh, Texture};
use atelier::scene::{MaterialKey, MeshKey};
use atelier::{Configurator, LoadReport};

const EPSILON: f32 = 1e-3;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn jpg_stand_in() -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([10, 20, 30])));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

fn session() -> Configurator {
    let config = ConfiguratorConfig::default();
    let reader = MemoryAssetReader::new();
    for url in config.static_swatch_urls() {
        reader.insert(&url, jpg_stand_in());
    }
    Configurator::with_reader(config, reader)
}

struct Chair {
    model: LoadedModel,
    fabric: MaterialKey,
    oak: MaterialKey,
    seat_1: MeshKey,
    seat_2: MeshKey,
    wood_1: MeshKey,
}

/// Adds a chair to the session scene the way a loader would.
fn add_chair(session: &mut Configurator, with_root: bool) -> Chair {
    let scene = session.scene_mut();
    let fabric = scene.add_material(Material::new("fabric", Vec3::ONE));
    let oak = scene.add_material(Material::new("oak", Vec3::ONE));
    let part = BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let seat_1 = scene.add_mesh(Mesh::new("seat__1", fabric, part).with_metadata(json!(true)));
    let seat_2 = scene.add_mesh(Mesh::new("seat__2", fabric, part).with_metadata(json!(true)));
    let wood_1 = scene.add_mesh(Mesh::new("wood__1", oak, part).with_metadata(json!(true)));
    let leather = scene.add_texture(Texture::embedded("leather", jpg_stand_in()).with_metadata(json!(true)));
    let normal = scene.add_texture(Texture::embedded("normal", vec![0_u8; 8]));

    let meshes = vec![seat_1, seat_2, wood_1];
    let model = LoadedModel {
        root_mesh: with_root.then_some(seat_1),
        meshes,
        textures: vec![leather, normal],
    };
    Chair { model, fabric, oak, seat_1, seat_2, wood_1 }
}

fn load_chair(session: &mut Configurator) -> Chair {
    let ticket = session.begin_load();
    let chair = add_chair(session, true);
    let report = session.on_model_loaded(ticket, chair.model.clone());
    assert!(matches!(report, LoadReport::Applied { .. }));
    chair
}

fn highlight_matches_selection(session: &Configurator) -> bool {
    let mut selected = session.selected_meshes();
    let mut highlighted: Vec<_> = session.highlight_layer().meshes().collect();
    selected.sort();
    highlighted.sort();
    selected == highlighted
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn load_frames_camera_and_extracts_swatches() {
    let mut session = session();
    let ticket = session.begin_load();
    let chair = add_chair(&mut session, true);

    let report = session.on_model_loaded(ticket, chair.model.clone());

    let LoadReport::Applied { framing, mesh_count, swatch_count, .. } = report else {
        panic!("load should apply, got {report:?}");
    };
    assert_eq!(mesh_count, 3);
    assert_eq!(swatch_count, 1);
    assert!(framing.is_framed());

    let camera = session.camera();
    assert_eq!(camera.lower_radius_limit, None);
    assert!(approx(camera.upper_radius_limit.unwrap(), 5.0 * camera.radius));
    assert!(approx(camera.pinch_precision, 200.0 / camera.radius));
    assert_eq!(session.current_model().map(|m| m.meshes.len()), Some(3));
}

#[test]
fn load_without_root_mesh_keeps_camera_limits() {
    let mut session = session();
    let ticket = session.begin_load();
    let chair = add_chair(&mut session, false);

    let report = session.on_model_loaded(ticket, chair.model);

    assert!(matches!(report, LoadReport::Applied { framing: FramingOutcome::Unframeable, .. }));
    let camera = session.camera();
    assert_eq!(camera.lower_radius_limit, Some(25.0));
    assert_eq!(camera.upper_radius_limit, Some(75.0));
    assert!(approx(camera.radius, 2.0));
    // The model is still usable.
    assert_eq!(session.on_pick_mesh(chair.seat_1), vec![chair.seat_1]);
}

#[test]
fn stale_load_completion_is_dropped_and_disposed() {
    let mut session = session();
    let first = session.begin_load();
    let old = add_chair(&mut session, true);
    let second = session.begin_load();

    let report = session.on_model_loaded(first, old.model.clone());

    assert_eq!(report, LoadReport::Stale { ticket: first });
    assert!(!session.scene().contains_mesh(old.seat_1));
    assert!(session.current_model().is_none());
    assert!(approx(session.camera().radius, 2.0));

    let fresh = add_chair(&mut session, true);
    let report = session.on_model_loaded(second, fresh.model.clone());
    assert!(matches!(report, LoadReport::Applied { ticket, .. } if ticket == second));
}

#[test]
fn reload_disposes_previous_model_and_clears_selection() {
    let mut session = session();
    let old = load_chair(&mut session);
    session.on_toggle_group_mode(true);
    session.on_pick_mesh(old.seat_1);
    assert_eq!(session.highlight_layer().len(), 2);

    let new = load_chair(&mut session);

    assert!(!session.scene().contains_mesh(old.seat_1));
    assert!(session.scene().material(old.fabric).is_none());
    assert_eq!(session.scene().mesh_count(), 3);
    assert!(!session.has_selection());
    assert!(session.highlight_layer().is_empty());
    assert_eq!(session.selection_phase(), SelectionPhase::NoSelection);
    // Group mode survives the reload.
    assert!(session.selection().group_select);
    assert_eq!(session.on_pick_mesh(new.seat_2), vec![new.seat_1, new.seat_2]);
}

#[test]
fn reload_replaces_embedded_swatches() {
    let mut session = session();
    load_chair(&mut session);
    let first = session.embedded_swatches()[0].source_url.clone();

    load_chair(&mut session);

    assert_eq!(session.embedded_swatches().len(), 1);
    assert_ne!(session.embedded_swatches()[0].source_url, first);
    // Object URLs are never revoked during the session.
    assert!(session.blobs().contains(&first));
}

#[test]
fn reload_releases_swatch_textures_of_the_previous_model() {
    let mut session = session();
    let chair = load_chair(&mut session);
    session.on_pick_mesh(chair.seat_1);
    session.on_choose_texture("/models/bt/seat__1.jpg");
    let swatch = session.scene().material(chair.fabric).unwrap().albedo_texture.unwrap().texture;

    load_chair(&mut session);

    assert!(session.scene().texture(swatch).is_none());
    // Only the new model's own textures remain.
    assert_eq!(session.scene().textures().count(), 2);
}

#[test]
fn stale_completion_keeps_swatch_textures_in_use() {
    let mut session = session();
    let chair = load_chair(&mut session);
    session.on_pick_mesh(chair.wood_1);
    session.on_choose_texture("/models/bt/wood__1.jpg");
    let swatch = session.scene().material(chair.oak).unwrap().albedo_texture.unwrap().texture;

    let stale = session.begin_load();
    let _latest = session.begin_load();
    let late = add_chair(&mut session, true);
    session.on_model_loaded(stale, late.model);

    assert!(session.scene().texture(swatch).is_some());
    assert!(session.scene().material(chair.oak).unwrap().albedo_texture.is_some());
}

// ============================================================================
// Selection Callbacks
// ============================================================================

#[test]
fn pick_then_group_mode_expands_to_group() {
    let mut session = session();
    let chair = load_chair(&mut session);

    assert_eq!(session.on_pick_mesh(chair.seat_1), vec![chair.seat_1]);
    assert!(highlight_matches_selection(&session));

    assert_eq!(session.on_toggle_group_mode(true), vec![chair.seat_1, chair.seat_2]);
    assert!(highlight_matches_selection(&session));

    assert_eq!(session.on_toggle_group_mode(false), vec![chair.seat_1]);
    assert!(highlight_matches_selection(&session));
    assert!(!session.highlight_layer().contains(chair.seat_2));
}

#[test]
fn pick_on_non_pickable_mesh_keeps_selection() {
    let mut session = session();
    let chair = load_chair(&mut session);
    session.on_pick_mesh(chair.seat_1);
    let floor = session.scene_mut().add_mesh(
        Mesh::new("floor", chair.oak, BoundingBox::default())
            .with_metadata(json!(true))
            .with_pickable(false),
    );

    assert_eq!(session.on_pick_mesh(floor), vec![chair.seat_1]);
    assert_eq!(session.selection_phase(), SelectionPhase::SingleSelected("seat__1".into()));
    assert!(highlight_matches_selection(&session));
}

#[test]
fn pick_on_unflagged_part_in_group_mode_selects_its_group() {
    let mut session = session();
    let chair = load_chair(&mut session);
    let frame = session
        .scene_mut()
        .add_mesh(Mesh::new("seat__frame", chair.oak, BoundingBox::default()));
    session.on_toggle_group_mode(true);

    assert_eq!(session.on_pick_mesh(frame), vec![chair.seat_1, chair.seat_2]);
    assert!(!session.highlight_layer().contains(frame));
    assert!(highlight_matches_selection(&session));
}

#[test]
fn pick_on_unknown_mesh_clears_selection() {
    let mut session = session();
    let chair = load_chair(&mut session);
    session.on_pick_mesh(chair.wood_1);

    let stale = {
        let scene = session.scene_mut();
        let key = scene.add_mesh(Mesh::new("ghost", chair.oak, BoundingBox::default()));
        scene.remove_meshes(&[key]);
        key
    };

    assert!(session.on_pick_mesh(stale).is_empty());
    assert!(!session.has_selection());
    assert!(session.highlight_layer().is_empty());
}

// ============================================================================
// Customization Callbacks
// ============================================================================

#[test]
fn color_without_selection_does_nothing() {
    let mut session = session();
    let chair = load_chair(&mut session);

    assert_eq!(session.on_choose_color("#ff0000"), 0);
    assert_eq!(session.on_choose_texture("/models/bt/seat__1.jpg"), 0);

    let fabric = session.scene().material(chair.fabric).unwrap();
    assert_eq!(fabric.base_color, Vec3::ONE);
    assert!(fabric.albedo_texture.is_none());
}

#[test]
fn invalid_color_is_contained() {
    let mut session = session();
    let chair = load_chair(&mut session);
    session.on_pick_mesh(chair.seat_1);

    assert_eq!(session.on_choose_color("#zzzzzz"), 0);

    assert_eq!(session.scene().material(chair.fabric).unwrap().base_color, Vec3::ONE);
    assert!(highlight_matches_selection(&session));
}

#[test]
fn color_then_reset() {
    let mut session = session();
    let chair = load_chair(&mut session);
    session.on_pick_mesh(chair.wood_1);

    assert_eq!(session.on_choose_color("#102030"), 1);
    assert_ne!(session.scene().material(chair.oak).unwrap().base_color, Vec3::ONE);

    assert_eq!(session.on_reset_color(), 1);
    assert_eq!(session.scene().material(chair.oak).unwrap().base_color, Vec3::ONE);
}

#[test]
fn static_swatch_textures_the_group() {
    let mut session = session();
    let chair = load_chair(&mut session);
    session.on_toggle_group_mode(true);
    session.on_pick_mesh(chair.seat_2);

    assert_eq!(session.on_choose_texture("/models/bt/wood__2.jpg"), 1);

    let slot = session.scene().material(chair.fabric).unwrap().albedo_texture.unwrap();
    let scale = TilingProfile::Triple.scale();
    assert_eq!((slot.transform.u_scale(), slot.transform.v_scale()), (scale, scale));
    assert!(session.scene().material(chair.oak).unwrap().albedo_texture.is_none());
}

#[test]
fn embedded_swatch_textures_the_selection() {
    let mut session = session();
    let chair = load_chair(&mut session);
    session.on_pick_mesh(chair.wood_1);
    let url = session.embedded_swatches()[0].source_url.clone();

    assert_eq!(session.on_choose_texture(&url), 1);

    assert!(session.scene().material(chair.oak).unwrap().albedo_texture.is_some());
}

#[test]
fn unresolvable_swatch_leaves_materials_unchanged() {
    let mut session = session();
    let chair = load_chair(&mut session);
    session.on_pick_mesh(chair.seat_1);
    session.on_choose_color("#abcdef");
    let before = session.scene().material(chair.fabric).unwrap().base_color;

    assert_eq!(session.on_choose_texture("https://cdn.example.com/seat.jpg"), 0);
    assert_eq!(session.on_choose_texture("/models/bt/unknown.jpg"), 0);

    let fabric = session.scene().material(chair.fabric).unwrap();
    assert!(fabric.albedo_texture.is_none());
    assert_eq!(fabric.base_color, before);
}

// ============================================================================
// Swatch List
// ============================================================================

#[test]
fn swatch_urls_list_static_then_embedded() {
    let mut session = session();
    assert_eq!(session.swatch_urls(), session.config().static_swatch_urls());

    load_chair(&mut session);
    let urls = session.swatch_urls();

    assert_eq!(urls.len(), 8);
    assert_eq!(urls[..7], session.config().static_swatch_urls()[..]);
    assert!(urls[7].starts_with("blob:"));
}

#[test]
fn swatch_urls_are_deduplicated() {
    let mut config = ConfiguratorConfig::default();
    config.static_swatches.push("seat__1.jpg".to_string());
    let mut session = Configurator::with_reader(config, MemoryAssetReader::new());

    let ticket = session.begin_load();
    let texture = session
        .scene_mut()
        .add_texture(Texture::from_url("/models/bt/wood__1.jpg").with_metadata(json!(true)));
    session.on_model_loaded(ticket, LoadedModel { root_mesh: None, meshes: Vec::new(), textures: vec![texture] });

    let urls = session.swatch_urls();
    assert_eq!(urls.len(), 7);
    assert_eq!(urls.iter().filter(|u| u.ends_with("seat__1.jpg")).count(), 1);
}
