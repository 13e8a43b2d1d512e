pub mod connectome;
pub mod error;
pub mod math;
pub mod scene;

pub use connectome::{
    MapperConfig, NearestPolygon, NearestPolygonSearch, NodeId, NodePair, Point2MeshMapper,
    PolygonKey, PolygonRegistry, Streamline,
};
pub use error::{MeshNodeError, Result};
pub use scene::{MeshId, Polygon, PolygonHit, SceneMesh, SceneModel, VoxelScene};
