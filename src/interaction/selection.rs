//! Selection state machine
//!
//! [`SelectionState`] only stores the raw inputs of a selection: the name of
//! the last picked mesh, its group key and the group-mode flag. The set of
//! selected meshes is never stored; [`selected_meshes`] derives it from the
//! state and the current scene every time, and [`sync_highlights`] makes the
//! highlight layer match that derivation exactly.
//!
//! Transitions:
//! - pick with group mode off: `SingleSelected(name)`
//! - pick with group mode on: `GroupSelected(key)`
//! - group mode toggle: switches between single and group for the same pick
//! - `clear` (model reload): `NoSelection`
//!
//! Group membership uses name-substring matching (`name.contains(key)`),
//! while single selection uses exact name equality. Every pick is recorded;
//! meshes that are not selectable are filtered out when the selection is
//! derived, so picking one in group mode still selects its flagged siblings.

use rustc_hash::FxHashSet;

use crate::config::DEFAULT_GROUP_DELIMITER;
use crate::interaction::grouping::group_key_of;
use crate::resources::Mesh;
use crate::scene::{HighlightLayer, MeshKey, Scene};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPhase {
    NoSelection,
    SingleSelected(String),
    GroupSelected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub clicked_mesh_name: Option<String>,
    pub group_key: Option<String>,
    pub group_select: bool,
    delimiter: String,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(DEFAULT_GROUP_DELIMITER)
    }
}

impl SelectionState {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            clicked_mesh_name: None,
            group_key: None,
            group_select: false,
            delimiter: delimiter.into(),
        }
    }

    /// Records a pick: the mesh name and its group key.
    pub fn pick(&mut self, mesh: &Mesh) -> SelectionPhase {
        self.group_key = Some(group_key_of(&mesh.name, &self.delimiter).to_string());
        self.clicked_mesh_name = Some(mesh.name.clone());
        self.phase()
    }

    /// Changes how the last pick is interpreted; the pick itself is kept.
    pub fn set_group_mode(&mut self, enabled: bool) -> SelectionPhase {
        self.group_select = enabled;
        self.phase()
    }

    /// Forgets the last pick. The group-mode flag survives.
    pub fn clear(&mut self) {
        self.clicked_mesh_name = None;
        self.group_key = None;
    }

    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        match (&self.clicked_mesh_name, &self.group_key) {
            (Some(_), Some(group)) if self.group_select => SelectionPhase::GroupSelected(group.clone()),
            (Some(name), _) => SelectionPhase::SingleSelected(name.clone()),
            _ => SelectionPhase::NoSelection,
        }
    }

    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

/// Meshes selected by `state` in the current scene, in scene order.
///
/// Pure: derived from the scene and the state on every call.
#[must_use]
pub fn selected_meshes(scene: &Scene, state: &SelectionState) -> Vec<MeshKey> {
    let phase = state.phase();
    if phase == SelectionPhase::NoSelection {
        return Vec::new();
    }

    scene
        .meshes()
        .filter(|(_, mesh)| {
            mesh.is_selectable()
                && match &phase {
                    SelectionPhase::SingleSelected(name) => mesh.name == *name,
                    SelectionPhase::GroupSelected(group) => mesh.name.contains(group.as_str()),
                    SelectionPhase::NoSelection => false,
                }
        })
        .map(|(key, _)| key)
        .collect()
}

/// Recomputes the selection and makes `layer` hold exactly the selected
/// meshes. Returns the selection.
pub fn sync_highlights(scene: &Scene, state: &SelectionState, layer: &mut HighlightLayer) -> Vec<MeshKey> {
    let selected = selected_meshes(scene, state);
    let wanted: FxHashSet<MeshKey> = selected.iter().copied().collect();

    let stale: Vec<MeshKey> = layer.meshes().filter(|key| !wanted.contains(key)).collect();
    for key in stale {
        layer.remove_mesh(key);
    }
    for &key in &selected {
        layer.add_mesh(key);
    }

    log::debug!(
        "Selection {:?}: {} selected, {} highlighted",
        state.phase(),
        selected.len(),
        layer.len()
    );
    selected
}
