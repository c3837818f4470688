use std::sync::atomic::{AtomicU32, Ordering};

use rustc_hash::FxHashSet;
use slotmap::SlotMap;

use crate::resources::{BoundingBox, Material, Mesh, Texture};
use crate::scene::{MaterialKey, MeshKey, TextureKey};

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Scene container.
///
/// Holds the meshes, materials and textures of everything currently loaded.
/// Keys are generational: a key of a removed mesh never matches a mesh added
/// later, even when the slot is reused. That gives load-completion handling
/// reference identity instead of name matching.
///
/// Iteration follows insertion order for meshes and registration order for
/// textures; removals keep the relative order of the remaining entries.
pub struct Scene {
    pub id: u32,

    meshes: SlotMap<MeshKey, Mesh>,
    materials: SlotMap<MaterialKey, Material>,
    textures: SlotMap<TextureKey, Texture>,

    mesh_order: Vec<MeshKey>,
    texture_order: Vec<TextureKey>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),
            meshes: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            textures: SlotMap::with_key(),
            mesh_order: Vec::new(),
            texture_order: Vec::new(),
        }
    }

    // ========================================================================
    // Meshes
    // ========================================================================

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshKey {
        let key = self.meshes.insert(mesh);
        self.mesh_order.push(key);
        key
    }

    #[must_use]
    pub fn mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    #[must_use]
    pub fn contains_mesh(&self, key: MeshKey) -> bool {
        self.meshes.contains_key(key)
    }

    /// All meshes in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = (MeshKey, &Mesh)> {
        self.mesh_order
            .iter()
            .filter_map(move |&key| self.meshes.get(key).map(|mesh| (key, mesh)))
    }

    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Removes meshes and disposes the materials only they referenced.
    ///
    /// Returns the number of meshes actually removed; stale keys are skipped.
    pub fn remove_meshes(&mut self, keys: &[MeshKey]) -> usize {
        let mut orphan_candidates = FxHashSet::default();
        let mut removed = 0;

        for &key in keys {
            if let Some(mesh) = self.meshes.remove(key) {
                orphan_candidates.insert(mesh.material);
                removed += 1;
            }
        }
        if removed == 0 {
            return 0;
        }

        self.mesh_order.retain(|key| self.meshes.contains_key(*key));

        let still_used: FxHashSet<MaterialKey> =
            self.meshes.values().map(|mesh| mesh.material).collect();
        for material in orphan_candidates {
            if !still_used.contains(&material) {
                self.materials.remove(material);
            }
        }

        removed
    }

    /// World-space extents of every mesh accepted by `predicate`.
    ///
    /// Returns `None` when no mesh matches.
    pub fn world_extends<F>(&self, mut predicate: F) -> Option<BoundingBox>
    where
        F: FnMut(MeshKey, &Mesh) -> bool,
    {
        self.meshes()
            .filter(|&(key, mesh)| predicate(key, mesh))
            .map(|(_, mesh)| mesh.world_bounds())
            .reduce(|acc, bounds| acc.union(&bounds))
    }

    // ========================================================================
    // Materials
    // ========================================================================

    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    #[must_use]
    pub fn material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    pub fn material_mut(&mut self, key: MaterialKey) -> Option<&mut Material> {
        self.materials.get_mut(key)
    }

    /// Textures currently bound to a material slot.
    #[must_use]
    pub fn bound_textures(&self) -> FxHashSet<TextureKey> {
        self.materials
            .values()
            .filter_map(|material| material.albedo_texture.map(|slot| slot.texture))
            .collect()
    }

    // ========================================================================
    // Textures
    // ========================================================================

    pub fn add_texture(&mut self, texture: Texture) -> TextureKey {
        let key = self.textures.insert(texture);
        self.texture_order.push(key);
        key
    }

    #[must_use]
    pub fn texture(&self, key: TextureKey) -> Option<&Texture> {
        self.textures.get(key)
    }

    /// All textures in registration order.
    pub fn textures(&self) -> impl Iterator<Item = (TextureKey, &Texture)> {
        self.texture_order
            .iter()
            .filter_map(move |&key| self.textures.get(key).map(|texture| (key, texture)))
    }

    /// Removes textures, detaching them from any material still bound to them.
    pub fn remove_textures(&mut self, keys: &[TextureKey]) -> usize {
        let mut removed = 0;
        for &key in keys {
            if self.textures.remove(key).is_some() {
                removed += 1;
            }
        }
        if removed == 0 {
            return 0;
        }

        self.texture_order.retain(|key| self.textures.contains_key(*key));
        for material in self.materials.values_mut() {
            if let Some(slot) = material.albedo_texture
                && !self.textures.contains_key(slot.texture)
            {
                material.albedo_texture = None;
            }
        }

        removed
    }
}
