use slotmap::SlotMap;
use tracing::trace;

use crate::error::SceneError;
use crate::math::{point_triangle_distance, Aabb, Point3, Vector3, Voxel, VoxelBox};

use super::{OccupancyCache, Polygon, PolygonHit, SceneMesh, SceneModel};

slotmap::new_key_type! {
    /// Unique identifier for a mesh in a [`VoxelScene`].
    pub struct MeshId;
}

/// In-memory scene: meshes laid over a uniform voxel grid with an occupancy
/// cache.
///
/// Polygons are binned into every voxel their bounding box overlaps, so the
/// occupancy is conservative. Meshes keep the order they were added in.
#[derive(Debug)]
pub struct VoxelScene {
    bounds: Aabb,
    resolution: Vector3,
    integer_bounds: VoxelBox,
    meshes: SlotMap<MeshId, SceneMesh>,
    order: Vec<MeshId>,
    cache: OccupancyCache,
}

impl VoxelScene {
    /// Creates an empty scene covering `bounds` with cells of `resolution`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidResolution`] if any axis of `resolution`
    /// is not finite and strictly positive, and [`SceneError::InvalidBounds`]
    /// if `bounds` is not finite or has `min > max` on some axis.
    pub fn new(bounds: Aabb, resolution: Vector3) -> Result<Self, SceneError> {
        for (axis, value) in ["x", "y", "z"].into_iter().zip(resolution.iter()) {
            if !(value.is_finite() && *value > 0.0) {
                return Err(SceneError::InvalidResolution {
                    axis,
                    value: *value,
                });
            }
        }
        let finite = bounds.min.iter().chain(bounds.max.iter()).all(|c| c.is_finite());
        if !finite || !bounds.is_valid() {
            return Err(SceneError::InvalidBounds(format!(
                "min {:?} max {:?}",
                bounds.min, bounds.max
            )));
        }

        let cells = bounds.extent().component_div(&resolution);
        #[allow(clippy::cast_possible_truncation)]
        let upper = cells.map(|c| (c.ceil() as i32).max(1) - 1);

        Ok(Self {
            bounds,
            resolution,
            integer_bounds: VoxelBox::new(Voxel::origin(), Voxel::from(upper)),
            meshes: SlotMap::with_key(),
            order: Vec::new(),
            cache: OccupancyCache::new(),
        })
    }

    /// Builds a scene around `meshes`, with bounds grown by `padding`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidBounds`] if the meshes have no vertices,
    /// and any error of [`VoxelScene::new`].
    pub fn from_meshes(
        meshes: Vec<SceneMesh>,
        resolution: Vector3,
        padding: f32,
    ) -> Result<Self, SceneError> {
        let bounds = Aabb::from_points(meshes.iter().flat_map(SceneMesh::vertices))
            .ok_or_else(|| SceneError::InvalidBounds("scene has no vertices".into()))?
            .padded(padding);
        let mut scene = Self::new(bounds, resolution)?;
        for mesh in meshes {
            scene.add_mesh(mesh);
        }
        Ok(scene)
    }

    /// Adds a mesh and bins its polygons into the occupancy cache.
    pub fn add_mesh(&mut self, mesh: SceneMesh) -> MeshId {
        let polygon_count = mesh.polygons().len();
        let bins: Vec<_> = (0..polygon_count)
            .filter_map(|p| mesh.polygon_bounds(p).map(|aabb| (p, aabb)))
            .collect();

        let id = self.meshes.insert(mesh);
        self.order.push(id);

        let mut binned = 0usize;
        for (p, aabb) in bins {
            let lo = self.point_to_voxel(&aabb.min);
            let hi = self.point_to_voxel(&aabb.max);
            if !self.overlaps_grid(&lo, &hi) {
                continue;
            }
            let lo = self.integer_bounds.clamp(&lo);
            let hi = self.integer_bounds.clamp(&hi);
            for x in lo.x..=hi.x {
                for y in lo.y..=hi.y {
                    for z in lo.z..=hi.z {
                        self.cache.insert(id, Voxel::new(x, y, z), p);
                        binned += 1;
                    }
                }
            }
        }
        trace!(?id, polygon_count, binned, "mesh added to scene");
        id
    }

    fn overlaps_grid(&self, lo: &Voxel, hi: &Voxel) -> bool {
        let b = &self.integer_bounds;
        hi.x >= b.lower.x
            && lo.x <= b.upper.x
            && hi.y >= b.lower.y
            && lo.y <= b.upper.y
            && hi.z >= b.lower.z
            && lo.z <= b.upper.z
    }

    /// World-space bounds of the grid.
    #[must_use]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Mesh data for `id`.
    #[must_use]
    pub fn scene_mesh(&self, id: MeshId) -> Option<&SceneMesh> {
        self.meshes.get(id)
    }

    /// Mesh ids in scene order.
    #[must_use]
    pub fn mesh_ids(&self) -> &[MeshId] {
        &self.order
    }

    /// The voxel occupancy cache.
    #[must_use]
    pub fn occupancy(&self) -> &OccupancyCache {
        &self.cache
    }
}

impl SceneModel for VoxelScene {
    type Mesh = MeshId;

    fn mesh_count(&self) -> usize {
        self.order.len()
    }

    fn mesh(&self, index: usize) -> Option<MeshId> {
        self.order.get(index).copied()
    }

    fn polygon_count(&self, mesh: MeshId) -> usize {
        self.meshes.get(mesh).map_or(0, |m| m.polygons().len())
    }

    fn polygon(&self, mesh: MeshId, index: usize) -> Option<Polygon> {
        self.meshes.get(mesh)?.polygons().get(index).copied()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn point_to_voxel(&self, point: &Point3) -> Voxel {
        let cell = (point - self.bounds.min).component_div(&self.resolution);
        Voxel::new(
            cell.x.floor() as i32,
            cell.y.floor() as i32,
            cell.z.floor() as i32,
        )
    }

    fn resolution(&self) -> Vector3 {
        self.resolution
    }

    fn integer_bounding_box(&self) -> VoxelBox {
        self.integer_bounds
    }

    fn meshes_at(&self, voxel: &Voxel) -> &[MeshId] {
        self.cache.meshes_at(voxel)
    }

    fn closest_polygon_at_voxel(
        &self,
        mesh: MeshId,
        point: &Point3,
        voxel: &Voxel,
    ) -> Option<PolygonHit> {
        let scene_mesh = self.meshes.get(mesh)?;
        let mut best: Option<PolygonHit> = None;
        for &p in self.cache.polygons_at(mesh, voxel) {
            let Some([a, b, c]) = scene_mesh.triangle(p) else {
                continue;
            };
            let (distance, closest) = point_triangle_distance(point, &a, &b, &c);
            if best.is_none_or(|hit| distance < hit.distance) {
                best = Some(PolygonHit {
                    distance,
                    polygon: scene_mesh.polygons()[p],
                    point: closest,
                });
            }
        }
        best
    }
}
