//! Configurator session
//!
//! [`Configurator`] is the explicit context of one viewing session. It owns
//! the scene, the camera, the highlight layer and the selection state, and
//! exposes the event callbacks of the presentation layer:
//!
//! | Event                     | Callback                                  |
//! |---------------------------|-------------------------------------------|
//! | model load started        | [`Configurator::begin_load`]              |
//! | model load completed      | [`Configurator::on_model_loaded`]         |
//! | pointer pick              | [`Configurator::on_pick_mesh`]            |
//! | group mode switch         | [`Configurator::on_toggle_group_mode`]    |
//! | color picker              | [`Configurator::on_choose_color`]         |
//! | "reset color" button      | [`Configurator::on_reset_color`]          |
//! | swatch thumbnail          | [`Configurator::on_choose_texture`]       |
//!
//! Callbacks never fail. Errors are logged and reported as "nothing
//! changed", and the highlight layer is resynchronized after every event that
//! can change the selection.

use std::time::Duration;

use glam::Vec3;
use rustc_hash::FxHashSet;

use crate::assets::{AssetReader, BlobStore, FileAssetReader, TextureResolver, TextureSwatch, extract_swatches};
use crate::config::ConfiguratorConfig;
use crate::errors::Result;
use crate::interaction::{
    FramingOutcome, LoadTicket, LoadTracker, LoadedModel, SelectionPhase, SelectionState, apply_color,
    apply_texture, frame_loaded_model, selected_meshes, sync_highlights,
};
use crate::scene::{ArcRotateCamera, HighlightLayer, MeshKey, Scene};

/// Logs a failed customization and reports it as "nothing changed".
fn contain(what: &str, result: Result<usize>) -> usize {
    result.unwrap_or_else(|err| {
        log::warn!("Failed to apply {what}: {err}");
        0
    })
}

/// Result of a load-completion event.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadReport {
    Applied {
        ticket: LoadTicket,
        framing: FramingOutcome,
        mesh_count: usize,
        swatch_count: usize,
    },
    /// A newer load was started; the completed model was discarded.
    Stale { ticket: LoadTicket },
}

pub struct Configurator {
    config: ConfiguratorConfig,

    scene: Scene,
    camera: ArcRotateCamera,
    highlight: HighlightLayer,
    selection: SelectionState,

    blobs: BlobStore,
    resolver: TextureResolver,
    swatches: Vec<TextureSwatch>,

    loads: LoadTracker,
    current_model: Option<LoadedModel>,
}

impl Configurator {
    /// Creates a session reading static swatches from `config.asset_root`.
    #[must_use]
    pub fn new(config: ConfiguratorConfig) -> Self {
        let reader = FileAssetReader::new(&config.asset_root);
        Self::with_reader(config, reader)
    }

    pub fn with_reader(config: ConfiguratorConfig, reader: impl AssetReader + 'static) -> Self {
        let blobs = BlobStore::new();
        let [r, g, b] = config.highlight_color;
        Self {
            scene: Scene::new(),
            camera: ArcRotateCamera::from_config(&config.camera),
            highlight: HighlightLayer::new("selection", Vec3::new(r, g, b)),
            selection: SelectionState::new(config.group_delimiter.clone()),
            resolver: TextureResolver::new(blobs.clone(), reader),
            blobs,
            swatches: Vec::new(),
            loads: LoadTracker::new(),
            current_model: None,
            config,
        }
    }

    // ========================================================================
    // Model loading
    // ========================================================================

    /// Starts a model load. Completions of earlier loads are dropped from now on.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.loads.begin()
    }

    /// Applies a completed load: disposes the previous model, clears the
    /// selection, frames the camera and extracts the embedded swatches.
    ///
    /// The loader is expected to have added `model`'s meshes and textures to
    /// [`Configurator::scene_mut`] already.
    pub fn on_model_loaded(&mut self, ticket: LoadTicket, model: LoadedModel) -> LoadReport {
        if !self.loads.is_current(ticket) {
            log::warn!(
                "Dropping completion of superseded load #{} (latest is #{})",
                ticket.generation(),
                self.loads.latest().map_or(0, LoadTicket::generation)
            );
            self.dispose(&model);
            return LoadReport::Stale { ticket };
        }

        if let Some(previous) = self.current_model.take() {
            self.dispose(&previous);
        }
        self.selection.clear();
        sync_highlights(&self.scene, &self.selection, &mut self.highlight);

        let framing = frame_loaded_model(&self.scene, &mut self.camera, &model, &self.config.camera);

        self.swatches = extract_swatches(&self.scene, &self.blobs);

        let mesh_count = model.meshes.len();
        let swatch_count = self.swatches.len();
        log::info!(
            "Model #{} loaded: {mesh_count} meshes, {swatch_count} embedded swatches, camera radius {:.3}",
            ticket.generation(),
            self.camera.settled_radius()
        );

        self.current_model = Some(model);
        LoadReport::Applied { ticket, framing, mesh_count, swatch_count }
    }

    fn dispose(&mut self, model: &LoadedModel) {
        let meshes = self.scene.remove_meshes(&model.meshes);
        let textures = self.scene.remove_textures(&model.textures);
        let swatches = self.resolver.release_unbound(&mut self.scene);
        log::debug!("Disposed {meshes} meshes, {textures} textures and {swatches} resolved swatches");
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Pointer pick on `mesh`. Returns the new selection.
    ///
    /// Picks on meshes that are not pickable leave the selection untouched.
    pub fn on_pick_mesh(&mut self, mesh: MeshKey) -> Vec<MeshKey> {
        match self.scene.mesh(mesh) {
            Some(picked) if !picked.pickable => {
                log::debug!("Ignoring pick on non-pickable mesh '{}'", picked.name);
            }
            Some(picked) => {
                self.selection.pick(picked);
            }
            None => {
                log::warn!("Pick on unknown mesh {mesh:?}; clearing the selection");
                self.selection.clear();
            }
        }
        sync_highlights(&self.scene, &self.selection, &mut self.highlight)
    }

    /// Switches group mode. The last pick is kept and reinterpreted.
    pub fn on_toggle_group_mode(&mut self, enabled: bool) -> Vec<MeshKey> {
        self.selection.set_group_mode(enabled);
        sync_highlights(&self.scene, &self.selection, &mut self.highlight)
    }

    #[must_use]
    pub fn selected_meshes(&self) -> Vec<MeshKey> {
        selected_meshes(&self.scene, &self.selection)
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.selected_meshes().is_empty()
    }

    #[must_use]
    pub fn selection_phase(&self) -> SelectionPhase {
        self.selection.phase()
    }

    // ========================================================================
    // Customization
    // ========================================================================

    /// Recolors the selection. Returns the number of materials changed.
    pub fn on_choose_color(&mut self, hex: &str) -> usize {
        let selection = self.selected_meshes();
        contain("color", apply_color(&mut self.scene, &selection, hex))
    }

    /// Applies the configured reset color to the selection.
    pub fn on_reset_color(&mut self) -> usize {
        let reset = self.config.reset_color.clone();
        self.on_choose_color(&reset)
    }

    /// Textures the selection with the swatch at `url`. Returns the number of
    /// materials changed.
    pub fn on_choose_texture(&mut self, url: &str) -> usize {
        let selection = self.selected_meshes();
        if selection.is_empty() {
            return 0;
        }
        let tiling = self.config.tiling;
        let result = self
            .resolver
            .resolve(&mut self.scene, url)
            .and_then(|texture| apply_texture(&mut self.scene, &selection, texture, tiling));
        contain("texture", result)
    }

    // ========================================================================
    // Swatches
    // ========================================================================

    /// Swatch URLs for the picker: static swatches first, then the ones
    /// embedded in the current model. Duplicates are dropped.
    #[must_use]
    pub fn swatch_urls(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        self.config
            .static_swatch_urls()
            .into_iter()
            .chain(self.swatches.iter().map(|swatch| swatch.source_url.clone()))
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }

    /// Swatches extracted from the current model.
    #[must_use]
    pub fn embedded_swatches(&self) -> &[TextureSwatch] {
        &self.swatches
    }

    // ========================================================================
    // Frame loop & accessors
    // ========================================================================

    /// Advances camera animations.
    pub fn update(&mut self, dt: Duration) {
        self.camera.update(dt);
    }

    #[must_use]
    pub fn config(&self) -> &ConfiguratorConfig {
        &self.config
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[must_use]
    pub fn camera(&self) -> &ArcRotateCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut ArcRotateCamera {
        &mut self.camera
    }

    #[must_use]
    pub fn highlight_layer(&self) -> &HighlightLayer {
        &self.highlight
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    #[must_use]
    pub fn current_model(&self) -> Option<&LoadedModel> {
        self.current_model.as_ref()
    }
}
