//! Polygon with holes, used for a domain's effective free space.
use glam::DVec2;

use super::Polygon;

/// An outer contour with interior hole contours.
#[derive(Clone, Debug, PartialEq)]
pub struct ExPolygon {
    /// The outer boundary.
    pub contour: Polygon,
    /// Interior boundaries excluded from the area.
    pub holes: Vec<Polygon>,
}

impl ExPolygon {
    /// Create an ExPolygon with only a contour and no holes.
    pub fn new(contour: Polygon) -> Self {
        Self {
            contour,
            holes: Vec::new(),
        }
    }

    /// Create an ExPolygon with a contour and holes.
    pub fn with_holes(contour: Polygon, holes: Vec<Polygon>) -> Self {
        Self { contour, holes }
    }

    /// Number of holes.
    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// Contour area minus the area of every hole.
    ///
    /// Holes are assumed disjoint and inside the contour.
    pub fn area(&self) -> f64 {
        self.contour.area() - self.holes.iter().map(Polygon::area).sum::<f64>()
    }

    /// Whether `p` is in the contour and not strictly inside any hole.
    pub fn contains_point(&self, p: DVec2) -> bool {
        self.contour.contains_point(p) && !self.holes.iter().any(|h| h.contains_point_strictly(p))
    }
}
