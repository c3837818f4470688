use glam::Vec3;
use rustc_hash::FxHashSet;

use crate::scene::MeshKey;

/// Outline marker set rendered around highlighted meshes.
///
/// The layer only stores membership; the renderer draws an outline of
/// `color` around every member.
#[derive(Debug, Clone)]
pub struct HighlightLayer {
    pub name: String,
    pub color: Vec3,
    meshes: FxHashSet<MeshKey>,
}

impl HighlightLayer {
    pub fn new(name: impl Into<String>, color: Vec3) -> Self {
        Self {
            name: name.into(),
            color,
            meshes: FxHashSet::default(),
        }
    }

    /// Returns `true` if the mesh was not highlighted before.
    pub fn add_mesh(&mut self, mesh: MeshKey) -> bool {
        self.meshes.insert(mesh)
    }

    /// Returns `true` if the mesh was highlighted.
    pub fn remove_mesh(&mut self, mesh: MeshKey) -> bool {
        self.meshes.remove(&mesh)
    }

    #[must_use]
    pub fn contains(&self, mesh: MeshKey) -> bool {
        self.meshes.contains(&mesh)
    }

    pub fn meshes(&self) -> impl Iterator<Item = MeshKey> + '_ {
        self.meshes.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl Default for HighlightLayer {
    fn default() -> Self {
        Self::new("highlight", Vec3::ONE)
    }
}
