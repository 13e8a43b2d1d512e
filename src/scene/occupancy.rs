use std::collections::HashMap;

use crate::math::Voxel;

use super::MeshId;

/// Voxel occupancy cache: which meshes, and which of their polygons, cross
/// each grid cell.
#[derive(Debug, Default)]
pub struct OccupancyCache {
    meshes: HashMap<Voxel, Vec<MeshId>>,
    polygons: HashMap<(MeshId, Voxel), Vec<usize>>,
}

impl OccupancyCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that polygon `polygon` of `mesh` crosses `voxel`.
    ///
    /// Meshes are listed per voxel in first-insertion order, without repeats.
    pub fn insert(&mut self, mesh: MeshId, voxel: Voxel, polygon: usize) {
        let meshes = self.meshes.entry(voxel).or_default();
        if !meshes.contains(&mesh) {
            meshes.push(mesh);
        }
        self.polygons.entry((mesh, voxel)).or_default().push(polygon);
    }

    /// Meshes crossing `voxel`.
    #[must_use]
    pub fn meshes_at(&self, voxel: &Voxel) -> &[MeshId] {
        self.meshes.get(voxel).map(Vec::as_slice).unwrap_or_default()
    }

    /// Polygon indices of `mesh` crossing `voxel`, in mesh order.
    #[must_use]
    pub fn polygons_at(&self, mesh: MeshId, voxel: &Voxel) -> &[usize] {
        self.polygons
            .get(&(mesh, *voxel))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of occupied voxels.
    #[must_use]
    pub fn occupied_voxels(&self) -> usize {
        self.meshes.len()
    }
}
