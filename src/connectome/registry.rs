use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::error::{OperationError, RegistryError, Result, SceneError};
use crate::scene::{Polygon, SceneModel};

use super::NodeId;

/// Registry key of a polygon: its raw vertex-index triplet.
///
/// Keys carry no mesh identity, so equal triplets from different meshes
/// share one entry and the later registration wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolygonKey(pub [u32; 3]);

impl PolygonKey {
    /// Degenerate key the unmatched node is registered under.
    pub const SENTINEL: Self = Self([0, 0, 0]);
}

impl From<Polygon> for PolygonKey {
    fn from(polygon: Polygon) -> Self {
        Self(polygon.indices)
    }
}

impl fmt::Display for PolygonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "({a}, {b}, {c})")
    }
}

/// Immutable bijection between polygon keys and dense node ids.
///
/// Ids are handed out in scene order: mesh 0's polygons first, each mesh in
/// its internal polygon order, starting at 1.
#[derive(Debug, Clone)]
pub struct PolygonRegistry {
    lut: HashMap<PolygonKey, NodeId>,
    max_node_id: NodeId,
    collisions: usize,
}

impl PolygonRegistry {
    /// Registers every polygon of every mesh in `scene`.
    ///
    /// # Errors
    ///
    /// Returns a [`SceneError`] if the scene enumerates a mesh or polygon it
    /// cannot produce, and [`OperationError::InvalidInput`] if the scene has
    /// more polygons than node ids.
    pub fn build<S: SceneModel>(scene: &S) -> Result<Self> {
        let mesh_count = scene.mesh_count();
        let registry = (0..mesh_count).try_fold(Self::seed(), |registry, m| -> Result<Self> {
            let mesh = scene.mesh(m).ok_or(SceneError::MeshNotFound {
                index: m,
                count: mesh_count,
            })?;
            let polygon_count = scene.polygon_count(mesh);
            (0..polygon_count).try_fold(registry, |registry, p| -> Result<Self> {
                let polygon = scene.polygon(mesh, p).ok_or(SceneError::PolygonNotFound {
                    index: p,
                    count: polygon_count,
                })?;
                registry.register(polygon.into())
            })
        })?;

        debug!(
            meshes = mesh_count,
            nodes = registry.len(),
            max_node_id = registry.max_node_id.0,
            "polygon registry built"
        );
        if registry.collisions > 0 {
            warn!(
                collisions = registry.collisions,
                "polygons with identical vertex indices share a registry entry"
            );
        }
        Ok(registry)
    }

    fn seed() -> Self {
        Self {
            lut: HashMap::from([(PolygonKey::SENTINEL, NodeId::UNMATCHED)]),
            max_node_id: NodeId::UNMATCHED,
            collisions: 0,
        }
    }

    fn register(mut self, key: PolygonKey) -> Result<Self> {
        let next = self.max_node_id.0.checked_add(1).ok_or_else(|| {
            OperationError::InvalidInput("scene has more polygons than node ids".into())
        })?;
        self.max_node_id = NodeId(next);
        if self.lut.insert(key, self.max_node_id).is_some() {
            self.collisions += 1;
        }
        Ok(self)
    }

    /// Node id registered for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnregisteredPolygon`] if `key` was never
    /// registered.
    pub fn lookup(&self, key: &PolygonKey) -> std::result::Result<NodeId, RegistryError> {
        self.get(key)
            .ok_or(RegistryError::UnregisteredPolygon { key: *key })
    }

    /// Node id registered for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &PolygonKey) -> Option<NodeId> {
        self.lut.get(key).copied()
    }

    /// Number of distinct entries, the unmatched node included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lut.len()
    }

    /// Always `false`: the unmatched node is registered from the start.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lut.is_empty()
    }

    /// Highest id handed out. Exceeds `len() - 1` when keys collided.
    #[must_use]
    pub fn max_node_id(&self) -> NodeId {
        self.max_node_id
    }

    /// Number of registrations that replaced an existing key.
    #[must_use]
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}
