use super::{Point3, Vector3, Voxel};

/// An axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Creates a bounding box from its two corners.
    #[must_use]
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing all `points`, or `None` if there are none.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut aabb = Self::new(first, first);
        for p in iter {
            aabb.expand_point(p);
        }
        Some(aabb)
    }

    /// Expands this box to include `p`.
    pub fn expand_point(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Returns a copy grown by `padding` on every side.
    #[must_use]
    pub fn padded(&self, padding: f32) -> Self {
        let pad = Vector3::repeat(padding);
        Self::new(self.min - pad, self.max + pad)
    }

    /// Size of the box along each axis.
    #[must_use]
    pub fn extent(&self) -> Vector3 {
        self.max - self.min
    }

    /// `true` if `min <= max` on all axes.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }
}

/// Inclusive integer box over voxel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelBox {
    /// Lowest voxel (inclusive).
    pub lower: Voxel,
    /// Highest voxel (inclusive).
    pub upper: Voxel,
}

impl VoxelBox {
    /// Creates a voxel box from its inclusive corners.
    #[must_use]
    pub fn new(lower: Voxel, upper: Voxel) -> Self {
        Self { lower, upper }
    }

    /// Checks whether `voxel` lies inside the box, boundaries included.
    #[inline]
    #[must_use]
    pub fn contains(&self, voxel: &Voxel) -> bool {
        voxel.x >= self.lower.x
            && voxel.x <= self.upper.x
            && voxel.y >= self.lower.y
            && voxel.y <= self.upper.y
            && voxel.z >= self.lower.z
            && voxel.z <= self.upper.z
    }

    /// Clamps `voxel` component-wise into the box.
    #[must_use]
    pub fn clamp(&self, voxel: &Voxel) -> Voxel {
        Voxel::new(
            voxel.x.clamp(self.lower.x, self.upper.x),
            voxel.y.clamp(self.lower.y, self.upper.y),
            voxel.z.clamp(self.lower.z, self.upper.z),
        )
    }
}
