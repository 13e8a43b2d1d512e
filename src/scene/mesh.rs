use crate::error::SceneError;
use crate::math::{Aabb, Point3};

use super::Polygon;

/// A triangle mesh taking part in a scene.
#[derive(Debug, Clone, Default)]
pub struct SceneMesh {
    vertices: Vec<Point3>,
    polygons: Vec<Polygon>,
}

impl SceneMesh {
    /// Creates a mesh, checking that every polygon refers to an existing vertex.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::PolygonIndexOutOfRange`] for the first polygon
    /// with an index past the end of `vertices`.
    pub fn new(vertices: Vec<Point3>, polygons: Vec<Polygon>) -> Result<Self, SceneError> {
        for (p, polygon) in polygons.iter().enumerate() {
            if let Some(&index) = polygon
                .indices
                .iter()
                .find(|&&i| i as usize >= vertices.len())
            {
                return Err(SceneError::PolygonIndexOutOfRange {
                    polygon: p,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self { vertices, polygons })
    }

    /// Vertex positions.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Polygons, in mesh order.
    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Corner positions of polygon `index`.
    #[must_use]
    pub fn triangle(&self, index: usize) -> Option<[Point3; 3]> {
        let polygon = self.polygons.get(index)?;
        let [a, b, c] = polygon.indices;
        Some([
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ])
    }

    /// Bounding box of polygon `index`.
    #[must_use]
    pub fn polygon_bounds(&self, index: usize) -> Option<Aabb> {
        self.triangle(index).and_then(|t| Aabb::from_points(&t))
    }

    /// Bounding box of all vertices, `None` for a mesh without vertices.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.vertices)
    }
}
