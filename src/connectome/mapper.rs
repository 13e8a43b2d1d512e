use rayon::prelude::*;
use tracing::debug;

use crate::error::{OperationError, Result, SceneError};
use crate::math::Point3;
use crate::scene::SceneModel;

use super::{
    NearestPolygon, NearestPolygonSearch, NodeId, NodePair, PolygonKey, PolygonRegistry,
    Streamline,
};

/// Parameters controlling endpoint-to-node mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapperConfig {
    /// Maximum distance between an endpoint and the polygon it is assigned
    /// to. Endpoints farther than this from every polygon map to
    /// [`NodeId::UNMATCHED`].
    pub distance_limit: f32,
}

impl MapperConfig {
    /// Creates a configuration with the given distance limit.
    #[must_use]
    pub fn new(distance_limit: f32) -> Self {
        Self { distance_limit }
    }

    /// Checks that the distance limit is a non-negative number.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for a NaN or negative limit.
    pub fn validate(&self) -> Result<()> {
        if self.distance_limit.is_nan() || self.distance_limit < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "distance limit must be non-negative, got {}",
                self.distance_limit
            ))
            .into());
        }
        Ok(())
    }
}

/// Maps streamline endpoints onto scene polygons to produce connectome node
/// pairs.
///
/// The polygon registry is built once on construction and never changes, so
/// a mapper can be shared freely between threads.
#[derive(Debug)]
pub struct Point2MeshMapper<'s, S: SceneModel> {
    scene: &'s S,
    registry: PolygonRegistry,
    config: MapperConfig,
}

impl<'s, S: SceneModel> Point2MeshMapper<'s, S> {
    /// Creates a mapper over `scene`, registering all of its polygons.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid, if the scene's minimum
    /// resolution is not finite and positive, or if the registry cannot be
    /// built.
    pub fn new(scene: &'s S, config: MapperConfig) -> Result<Self> {
        config.validate()?;
        let minimum_resolution = scene.minimum_resolution();
        if !(minimum_resolution.is_finite() && minimum_resolution > 0.0) {
            return Err(SceneError::InvalidResolution {
                axis: "minimum",
                value: minimum_resolution,
            }
            .into());
        }

        let registry = PolygonRegistry::build(scene)?;
        debug!(
            distance_limit = config.distance_limit,
            nodes = registry.len(),
            "point-to-mesh mapper ready"
        );
        Ok(Self {
            scene,
            registry,
            config,
        })
    }

    /// Finds the polygon closest to `point` within the distance limit.
    #[must_use]
    pub fn find_nearest(&self, point: &Point3) -> Option<NearestPolygon<S::Mesh>> {
        NearestPolygonSearch::new(*point, self.config.distance_limit).execute(self.scene)
    }

    /// Node of the polygon closest to `point`, or [`NodeId::UNMATCHED`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::RegistryError::UnregisteredPolygon`] if the
    /// search lands on a polygon the registry does not know, which means the
    /// scene changed since the mapper was built.
    pub fn find_node(&self, point: &Point3) -> Result<NodeId> {
        match self.find_nearest(point) {
            Some(nearest) => Ok(self.registry.lookup(&PolygonKey::from(nearest.polygon))?),
            None => Ok(NodeId::UNMATCHED),
        }
    }

    /// Canonical node pair for two endpoints.
    ///
    /// # Errors
    ///
    /// See [`Point2MeshMapper::find_node`].
    pub fn resolve(&self, front: &Point3, back: &Point3) -> Result<NodePair> {
        let a = self.find_node(front)?;
        let b = self.find_node(back)?;
        Ok(NodePair::new(a, b))
    }

    /// Canonical node pair for the two ends of `streamline`.
    ///
    /// A single-point streamline maps both ends from that point.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for an empty streamline, and
    /// the errors of [`Point2MeshMapper::find_node`].
    pub fn find_node_pair(&self, streamline: &Streamline) -> Result<NodePair> {
        let (Some(front), Some(back)) = (streamline.front(), streamline.back()) else {
            return Err(OperationError::InvalidInput("streamline has no points".into()).into());
        };
        self.resolve(front, back)
    }

    /// Node pairs for many streamlines, computed in parallel.
    ///
    /// Output order follows input order.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`Point2MeshMapper::find_node_pair`].
    pub fn find_node_pairs(&self, streamlines: &[Streamline]) -> Result<Vec<NodePair>> {
        streamlines
            .par_iter()
            .map(|s| self.find_node_pair(s))
            .collect()
    }

    /// Number of registry entries; the size of one side of the connectivity
    /// matrix.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    /// The polygon registry built on construction.
    #[must_use]
    pub fn registry(&self) -> &PolygonRegistry {
        &self.registry
    }

    /// The configuration the mapper was built with.
    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// The scene being mapped onto.
    #[must_use]
    pub fn scene(&self) -> &'s S {
        self.scene
    }
}
