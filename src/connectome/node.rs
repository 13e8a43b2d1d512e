use std::fmt;

use crate::math::Point3;

/// Dense identifier of a connectome node.
///
/// Node `0` is reserved for endpoints that could not be matched to any
/// polygon; real polygons are numbered from `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The "no polygon within reach" node.
    pub const UNMATCHED: Self = Self(0);

    /// `true` for [`NodeId::UNMATCHED`].
    #[must_use]
    pub fn is_unmatched(self) -> bool {
        self == Self::UNMATCHED
    }

    /// The id as a matrix index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unordered pair of nodes, stored with `first <= second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodePair {
    first: NodeId,
    second: NodeId,
}

impl NodePair {
    /// Builds the canonical pair of `a` and `b`.
    #[must_use]
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// The smaller node.
    #[must_use]
    pub fn first(&self) -> NodeId {
        self.first
    }

    /// The larger node.
    #[must_use]
    pub fn second(&self) -> NodeId {
        self.second
    }

    /// `true` if either end is [`NodeId::UNMATCHED`].
    #[must_use]
    pub fn has_unmatched(&self) -> bool {
        self.first.is_unmatched()
    }
}

/// A tractography streamline: an ordered polyline of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Streamline {
    points: Vec<Point3>,
}

impl Streamline {
    /// Creates a streamline from its points, in tracking order.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// First point.
    #[must_use]
    pub fn front(&self) -> Option<&Point3> {
        self.points.first()
    }

    /// Last point.
    #[must_use]
    pub fn back(&self) -> Option<&Point3> {
        self.points.last()
    }

    /// All points, in tracking order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` for a streamline without points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<Point3>> for Streamline {
    fn from(points: Vec<Point3>) -> Self {
        Self::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_canonical() {
        let p = NodePair::new(NodeId(7), NodeId(3));
        assert_eq!(p.first(), NodeId(3));
        assert_eq!(p.second(), NodeId(7));
        assert_eq!(p, NodePair::new(NodeId(3), NodeId(7)));
    }

    #[test]
    fn pair_unmatched_end() {
        assert!(NodePair::new(NodeId(4), NodeId::UNMATCHED).has_unmatched());
        assert!(!NodePair::new(NodeId(4), NodeId(1)).has_unmatched());
    }

    #[test]
    fn streamline_ends() {
        let s = Streamline::from(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ]);
        assert_eq!(s.front(), Some(&Point3::new(0.0, 0.0, 0.0)));
        assert_eq!(s.back(), Some(&Point3::new(2.0, 0.0, 0.0)));
        assert!(Streamline::default().front().is_none());
        assert_eq!(s.len(), 3);
        assert_eq!(s.points()[1], Point3::new(1.0, 0.0, 0.0));
        assert!(!s.is_empty());
        assert!(Streamline::default().is_empty());
    }

    #[test]
    fn node_index_is_its_number() {
        assert_eq!(NodeId::UNMATCHED.index(), 0);
        assert_eq!(NodeId(12).index(), 12);
    }
}
