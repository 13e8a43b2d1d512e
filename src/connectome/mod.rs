//! Endpoint-to-node mapping for structural connectomes.
//!
//! A [`PolygonRegistry`] numbers every polygon of a scene once.
//! [`NearestPolygonSearch`] finds the polygon closest to a streamline
//! endpoint, and [`Point2MeshMapper`] combines the two to turn a streamline
//! into a [`NodePair`].

mod mapper;
mod node;
mod registry;
mod search;

pub use mapper::{MapperConfig, Point2MeshMapper};
pub use node::{NodeId, NodePair, Streamline};
pub use registry::{PolygonKey, PolygonRegistry};
pub use search::{NearestPolygon, NearestPolygonSearch};
