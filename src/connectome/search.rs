use tracing::trace;

use crate::math::{Point3, Voxel, VoxelBox, VoxelOffset};
use crate::scene::{Polygon, SceneModel};

/// Result of a successful nearest-polygon search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPolygon<M> {
    /// Distance from the query point to the polygon.
    pub distance: f32,
    /// Mesh owning the polygon.
    pub mesh: M,
    /// The closest polygon.
    pub polygon: Polygon,
    /// The closest point on the polygon.
    pub point: Point3,
}

/// Finds the polygon closest to a point, within a distance limit.
///
/// The search scans a cube of voxels around the point's voxel, growing the
/// cube by one voxel per side each round until a polygon is found or the
/// accumulated search radius exceeds the limit. Every round rescans the part
/// of the cube that overlaps the grid; within a round voxels are visited in
/// x, y, z order and meshes in occupancy order, and a candidate only
/// replaces the current best when it is strictly closer, so the first of
/// several equidistant polygons wins.
#[derive(Debug, Clone, Copy)]
pub struct NearestPolygonSearch {
    point: Point3,
    distance_limit: f32,
    upper_bound: f32,
}

impl NearestPolygonSearch {
    /// Creates a new search around `point`, accepting polygons at most
    /// `distance_limit` away.
    #[must_use]
    pub fn new(point: Point3, distance_limit: f32) -> Self {
        Self {
            point,
            distance_limit,
            upper_bound: f32::INFINITY,
        }
    }

    /// Only accepts polygons strictly closer than `bound`.
    #[must_use]
    pub fn with_upper_bound(mut self, bound: f32) -> Self {
        self.upper_bound = bound;
        self
    }

    /// Executes the search against `scene`.
    ///
    /// Returns `None` if the scene is empty or no polygon lies within the
    /// limit.
    pub fn execute<S: SceneModel>(&self, scene: &S) -> Option<NearestPolygon<S::Mesh>> {
        if scene.mesh_count() == 0 || self.distance_limit.is_nan() {
            return None;
        }

        let center = scene.point_to_voxel(&self.point);
        let bounds = scene.integer_bounding_box();
        let minimum_resolution = scene.minimum_resolution();
        // Once the cube spans the whole grid, further rounds revisit the same
        // voxels and cannot change the outcome.
        let max_stride = reach(&center, &bounds);

        let mut best_distance = self.upper_bound;
        let mut best: Option<NearestPolygon<S::Mesh>> = None;
        let mut search_radius = minimum_resolution;
        let mut stride: i32 = 1;
        loop {
            let [xs, ys, zs] =
                [0, 1, 2].map(|axis| clipped_span(stride, &center, &bounds, axis));
            for x in xs {
                for y in ys.clone() {
                    for z in zs.clone() {
                        let voxel = offset(&center, &VoxelOffset::new(x, y, z));
                        if !bounds.contains(&voxel) {
                            continue;
                        }
                        for &mesh in scene.meshes_at(&voxel) {
                            let Some(hit) =
                                scene.closest_polygon_at_voxel(mesh, &self.point, &voxel)
                            else {
                                continue;
                            };
                            if hit.distance < best_distance && hit.distance <= self.distance_limit
                            {
                                best_distance = hit.distance;
                                best = Some(NearestPolygon {
                                    distance: hit.distance,
                                    mesh,
                                    polygon: hit.polygon,
                                    point: hit.point,
                                });
                            }
                        }
                    }
                }
            }
            search_radius += minimum_resolution;
            stride += 1;

            if best.is_some()
                || search_radius > self.distance_limit
                || i64::from(stride) > max_stride
            {
                break;
            }
        }

        trace!(
            point = ?self.point,
            found = best.is_some(),
            distance = best.map_or(f32::INFINITY, |b| b.distance),
            rounds = stride - 1,
            "nearest polygon search"
        );
        best
    }
}

/// Voxel at `center + delta`, saturating at the `i32` range.
fn offset(center: &Voxel, delta: &VoxelOffset) -> Voxel {
    Voxel::new(
        center.x.saturating_add(delta.x),
        center.y.saturating_add(delta.y),
        center.z.saturating_add(delta.z),
    )
}

/// Offsets in `-stride..=stride` along `axis` that land inside `bounds`,
/// ascending. Empty when the cube does not reach the box on that axis.
fn clipped_span(
    stride: i32,
    center: &Voxel,
    bounds: &VoxelBox,
    axis: usize,
) -> std::ops::RangeInclusive<i32> {
    let low = bounds.lower[axis].saturating_sub(center[axis]).max(-stride);
    let high = bounds.upper[axis].saturating_sub(center[axis]).min(stride);
    low..=high
}

/// Chebyshev distance from `center` to the farthest corner of `bounds`.
fn reach(center: &Voxel, bounds: &VoxelBox) -> i64 {
    (0..3)
        .map(|i| {
            let c = i64::from(center[i]);
            let below = (c - i64::from(bounds.lower[i])).abs();
            let above = (i64::from(bounds.upper[i]) - c).abs();
            below.max(above)
        })
        .max()
        .unwrap_or(0)
}
