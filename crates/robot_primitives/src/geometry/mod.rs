//! Planar geometry primitives shared by regions, fields, and heuristics.
//!
//! This module groups the simple [`Polygon`] type and its queries, polygons with holes
//! ([`ExPolygon`]), boundary offsetting ([`JoinStyle`], [`BufferOptions`]), and segment
//! overlap results ([`Overlap`]). Heavy lifting is delegated to `geo` (predicates,
//! segment intersection) and `geo-clipper` (offsetting and polygon clipping).
use geo::{Coord, Line};
use glam::DVec2;

pub mod expolygon;
pub mod offset;
pub mod overlap;
pub mod polygon;

pub use expolygon::ExPolygon;
pub use offset::{BufferOptions, JoinStyle};
pub use overlap::Overlap;
pub use polygon::Polygon;

/// Tolerance used when comparing parameters and coordinates produced by intersections.
pub const GEOMETRY_EPS: f64 = 1e-9;

/// A directed line segment between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Start point of the segment.
    pub start: DVec2,
    /// End point of the segment.
    pub end: DVec2,
}

impl Segment {
    /// Creates a segment from `start` to `end`.
    pub fn new(start: impl Into<DVec2>, end: impl Into<DVec2>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Displacement from start to end.
    #[inline]
    pub fn vector(&self) -> DVec2 {
        self.end - self.start
    }

    /// Euclidean length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.vector().length()
    }

    /// Point at parameter `t`, where `t = 0` is the start and `t = 1` the end.
    #[inline]
    pub fn point_at(&self, t: f64) -> DVec2 {
        self.start + self.vector() * t
    }

    /// Midpoint of the segment.
    #[inline]
    pub fn midpoint(&self) -> DVec2 {
        (self.start + self.end) * 0.5
    }

    /// Projection parameter of `p` onto the supporting line (unclamped).
    #[inline]
    pub fn parameter_of(&self, p: DVec2) -> f64 {
        let v = self.vector();
        (p - self.start).dot(v) / v.length_squared()
    }

    pub(crate) fn to_geo(self) -> Line<f64> {
        Line::new(to_coord(self.start), to_coord(self.end))
    }
}

impl<A: Into<DVec2>, B: Into<DVec2>> From<(A, B)> for Segment {
    fn from((start, end): (A, B)) -> Self {
        Segment::new(start, end)
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Lower-left corner.
    pub min: DVec2,
    /// Upper-right corner.
    pub max: DVec2,
}

impl BoundingBox {
    /// Smallest box enclosing all `points`, or `None` for an empty input.
    pub fn from_points(points: &[DVec2]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Some(Self { min, max })
    }

    /// Extent along X.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along Y.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Extent as `(width, height)`.
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// Length of the box diagonal.
    pub fn diagonal(&self) -> f64 {
        self.size().length()
    }

    /// Whether `p` lies inside or on the box.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Bounds as `(min_x, min_y, max_x, max_y)`.
    pub fn to_tuple(&self) -> (f64, f64, f64, f64) {
        (self.min.x, self.min.y, self.max.x, self.max.y)
    }
}

#[inline]
pub(crate) fn to_coord(p: DVec2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

#[inline]
pub(crate) fn from_coord(c: Coord<f64>) -> DVec2 {
    DVec2::new(c.x, c.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_point_at_interpolates() {
        let s = Segment::new((0.0, 0.0), (4.0, 2.0));
        assert_eq!(s.point_at(0.5), DVec2::new(2.0, 1.0));
        assert_eq!(s.midpoint(), DVec2::new(2.0, 1.0));
        assert!((s.length() - 20.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn segment_parameter_of_projects_onto_line() {
        let s = Segment::new((0.0, 0.0), (10.0, 0.0));
        assert!((s.parameter_of(DVec2::new(2.5, 7.0)) - 0.25).abs() < 1e-12);
        assert!((s.parameter_of(DVec2::new(-5.0, 0.0)) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn bounding_box_from_points() {
        let points = [
            DVec2::new(1.0, 3.0),
            DVec2::new(-2.0, 5.0),
            DVec2::new(4.0, -1.0),
        ];
        let bb = BoundingBox::from_points(&points).expect("non-empty");
        assert_eq!(bb.to_tuple(), (-2.0, -1.0, 4.0, 5.0));
        assert_eq!(bb.size(), DVec2::new(6.0, 6.0));
        assert!(bb.contains(DVec2::new(0.0, 0.0)));
        assert!(!bb.contains(DVec2::new(5.0, 0.0)));
    }

    #[test]
    fn bounding_box_of_nothing_is_none() {
        assert!(BoundingBox::from_points(&[]).is_none());
    }
}
