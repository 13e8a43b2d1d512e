use thiserror::Error;

use crate::connectome::PolygonKey;

/// Top-level error type for the mesh node mapper.
#[derive(Debug, Error)]
pub enum MeshNodeError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised while building or querying a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("resolution along {axis} axis must be finite and positive, got {value}")]
    InvalidResolution { axis: &'static str, value: f32 },

    #[error("invalid bounding box: {0}")]
    InvalidBounds(String),

    #[error("polygon {polygon} references vertex {index}, but the mesh has {vertex_count} vertices")]
    PolygonIndexOutOfRange {
        polygon: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("scene reports {count} meshes but has no mesh at index {index}")]
    MeshNotFound { index: usize, count: usize },

    #[error("mesh reports {count} polygons but has no polygon at index {index}")]
    PolygonNotFound { index: usize, count: usize },
}

/// Errors related to the polygon registry.
///
/// These signal a disagreement between the registry and the search, which is
/// an internal invariant failure rather than a user error.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("polygon {key} is not registered")]
    UnregisteredPolygon { key: PolygonKey },
}

/// Errors related to mapper operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`MeshNodeError`].
pub type Result<T> = std::result::Result<T, MeshNodeError>;
