mod mesh;
mod occupancy;
mod voxel_scene;

pub use mesh::SceneMesh;
pub use occupancy::OccupancyCache;
pub use voxel_scene::{MeshId, VoxelScene};

use std::fmt::Debug;

use crate::math::{Point3, Vector3, Voxel, VoxelBox};

/// A triangular polygon, identified by three vertex indices into its mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Polygon {
    /// Vertex indices, in the mesh's winding order.
    pub indices: [u32; 3],
}

impl Polygon {
    /// Creates a polygon from three vertex indices.
    #[must_use]
    pub fn new(v0: u32, v1: u32, v2: u32) -> Self {
        Self {
            indices: [v0, v1, v2],
        }
    }
}

/// The closest polygon of one mesh to a query point, restricted to one voxel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonHit {
    /// Distance from the query point to the polygon.
    pub distance: f32,
    /// The closest polygon.
    pub polygon: Polygon,
    /// The closest point on that polygon.
    pub point: Point3,
}

/// Read-only view of a voxelised scene of polygon meshes.
///
/// This is everything the node mapper needs from the scene: mesh and polygon
/// enumeration, the uniform grid, the voxel occupancy cache and a
/// per-mesh closest-polygon query. Implementations must be safe to read from
/// several threads at once.
pub trait SceneModel: Sync {
    /// Handle identifying one mesh of the scene.
    type Mesh: Copy + Eq + Debug + Send + Sync;

    /// Number of meshes in the scene.
    fn mesh_count(&self) -> usize;

    /// Handle of the mesh at `index` in scene order.
    fn mesh(&self, index: usize) -> Option<Self::Mesh>;

    /// Number of polygons in `mesh`.
    fn polygon_count(&self, mesh: Self::Mesh) -> usize;

    /// Polygon `index` of `mesh`, in the mesh's internal order.
    fn polygon(&self, mesh: Self::Mesh, index: usize) -> Option<Polygon>;

    /// Voxel containing `point`. Points outside the scene map to voxels
    /// outside [`SceneModel::integer_bounding_box`].
    fn point_to_voxel(&self, point: &Point3) -> Voxel;

    /// Grid cell size along each axis.
    fn resolution(&self) -> Vector3;

    /// Range of valid voxels.
    fn integer_bounding_box(&self) -> VoxelBox;

    /// Meshes crossing `voxel`, in a stable order.
    fn meshes_at(&self, voxel: &Voxel) -> &[Self::Mesh];

    /// Closest polygon of `mesh` to `point` among the polygons crossing
    /// `voxel`, or `None` if the mesh has no polygon there.
    fn closest_polygon_at_voxel(
        &self,
        mesh: Self::Mesh,
        point: &Point3,
        voxel: &Voxel,
    ) -> Option<PolygonHit>;

    /// Smallest cell size over the three axes.
    fn minimum_resolution(&self) -> f32 {
        let r = self.resolution();
        r.x.min(r.y).min(r.z)
    }
}
