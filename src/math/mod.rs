pub mod aabb;
pub mod triangle;

pub use aabb::{Aabb, VoxelBox};
pub use triangle::{closest_point_on_triangle, point_triangle_distance};

/// 3D point type.
///
/// Single precision matches the precision streamline files are stored in.
pub type Point3 = nalgebra::Point3<f32>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f32>;

/// Integer cell coordinate of the scene's uniform grid.
pub type Voxel = nalgebra::Point3<i32>;

/// Integer offset between two voxels.
pub type VoxelOffset = nalgebra::Vector3<i32>;
