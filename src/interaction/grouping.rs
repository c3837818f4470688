//! Mesh group index
//!
//! Parts of one product component share a name prefix: `seat__1`, `seat__2`
//! and `seat__cushion` all belong to the `seat` group. The group key is the
//! name up to the first delimiter; a name without delimiter is its own group.
//!
//! Only selectable meshes (flagged through their metadata) take part. The
//! index is a snapshot of the scene and is rebuilt on every query, so it
//! never outlives a model reload.

use crate::scene::{MeshKey, Scene};

/// Prefix of `name` before the first `delimiter`, or the whole name.
#[must_use]
pub fn group_key_of<'a>(name: &'a str, delimiter: &str) -> &'a str {
    if delimiter.is_empty() {
        return name;
    }
    name.split_once(delimiter).map_or(name, |(prefix, _)| prefix)
}

/// Selectable meshes in scene order.
#[must_use]
pub fn selectable_meshes(scene: &Scene) -> Vec<MeshKey> {
    scene
        .meshes()
        .filter(|(_, mesh)| mesh.is_selectable())
        .map(|(key, _)| key)
        .collect()
}

/// Group key -> members, both in first-seen scene order.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    groups: Vec<(String, Vec<MeshKey>)>,
}

impl GroupIndex {
    #[must_use]
    pub fn build(scene: &Scene, delimiter: &str) -> Self {
        let mut groups: Vec<(String, Vec<MeshKey>)> = Vec::new();
        for (key, mesh) in scene.meshes().filter(|(_, mesh)| mesh.is_selectable()) {
            let group = group_key_of(&mesh.name, delimiter);
            match groups.iter_mut().find(|(name, _)| name == group) {
                Some((_, members)) => members.push(key),
                None => groups.push((group.to_string(), vec![key])),
            }
        }
        Self { groups }
    }

    /// Members of `group`; empty for unknown keys.
    #[must_use]
    pub fn members(&self, group: &str) -> &[MeshKey] {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, members)| members.as_slice())
            .unwrap_or_default()
    }

    /// Group key of a selectable mesh.
    #[must_use]
    pub fn group_of(&self, mesh: MeshKey) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, members)| members.contains(&mesh))
            .map(|(name, _)| name.as_str())
    }

    pub fn group_keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
