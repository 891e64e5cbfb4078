//! Simple polygon type backing every region.
//!
//! A [`Polygon`] stores its vertices without a repeated closing vertex and keeps a `geo`
//! representation alongside for predicates. Construction rejects degenerate input so that
//! downstream field models never divide by a zero extent.
use geo::{Area, Contains, Intersects, LineString};
use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{from_coord, to_coord, BoundingBox, Segment};
use crate::error::{Error, Result};

/// Simple (non-self-intersecting) polygon.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<DVec2>", into = "Vec<DVec2>"))]
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<DVec2>,
    shape: geo::Polygon<f64>,
}

impl Polygon {
    /// Builds a polygon from an ordered vertex list.
    ///
    /// A trailing vertex equal to the first one is dropped, as are consecutive duplicates.
    /// Fails with [`Error::DegenerateGeometry`] for fewer than three vertices, non-finite
    /// coordinates, or zero enclosed area.
    pub fn new<I, P>(vertices: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<DVec2>,
    {
        let mut ring: Vec<DVec2> = Vec::new();
        for v in vertices.into_iter().map(Into::into) {
            if !v.is_finite() {
                return Err(Error::DegenerateGeometry(format!(
                    "polygon vertex {v} is not finite"
                )));
            }
            if ring.last() != Some(&v) {
                ring.push(v);
            }
        }
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(Error::DegenerateGeometry(format!(
                "polygon needs at least 3 distinct vertices, got {}",
                ring.len()
            )));
        }

        let shape = geo::Polygon::new(
            LineString::new(ring.iter().copied().map(to_coord).collect()),
            Vec::new(),
        );
        if shape.unsigned_area() <= 0.0 {
            return Err(Error::DegenerateGeometry(
                "polygon encloses zero area".into(),
            ));
        }

        Ok(Self {
            vertices: ring,
            shape,
        })
    }

    /// Axis-aligned rectangle spanned by two opposite corners.
    pub fn rectangle(corner1: impl Into<DVec2>, corner2: impl Into<DVec2>) -> Result<Self> {
        let (a, b) = (corner1.into(), corner2.into());
        let (min, max) = (a.min(b), a.max(b));
        Self::new([
            DVec2::new(max.x, min.y),
            DVec2::new(max.x, max.y),
            DVec2::new(min.x, max.y),
            DVec2::new(min.x, min.y),
        ])
    }

    /// Builds a polygon from the exterior ring of a `geo` polygon (holes are ignored).
    pub(crate) fn from_geo(shape: &geo::Polygon<f64>) -> Result<Self> {
        Self::new(shape.exterior().coords().copied().map(from_coord))
    }

    #[inline]
    pub(crate) fn as_geo(&self) -> &geo::Polygon<f64> {
        &self.shape
    }

    /// Ordered vertices, closing vertex not repeated.
    #[inline]
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    /// Number of boundary segments (equal to the vertex count).
    #[inline]
    pub fn num_sides(&self) -> usize {
        self.vertices.len()
    }

    /// The `index`-th boundary segment, from vertex `index` to its successor.
    pub fn side(&self, index: usize) -> Result<Segment> {
        let n = self.num_sides();
        if index >= n {
            return Err(Error::IndexOutOfRange { index, len: n });
        }
        Ok(Segment::new(self.vertices[index], self.vertices[(index + 1) % n]))
    }

    /// Iterates over all boundary segments in vertex order.
    pub fn sides(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Angle in degrees at every vertex between the edges to its neighbours, indexed by vertex.
    ///
    /// The angle is unsigned and lies in `[0, 180]`; a reflex corner reports `360 - θ`.
    pub fn interior_angles(&self) -> Vec<f64> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                let curr = self.vertices[i];
                let a = self.vertices[(i + n - 1) % n] - curr;
                let b = self.vertices[(i + 1) % n] - curr;
                let cos_angle = a.dot(b) / (a.length() * b.length());
                cos_angle.clamp(-1.0, 1.0).acos().to_degrees()
            })
            .collect()
    }

    /// Whether `p` lies inside the polygon or on its boundary.
    #[inline]
    pub fn contains_point(&self, p: DVec2) -> bool {
        p.is_finite() && self.shape.intersects(&to_coord(p))
    }

    /// Whether `p` lies strictly inside the polygon.
    #[inline]
    pub fn contains_point_strictly(&self, p: DVec2) -> bool {
        p.is_finite() && self.shape.contains(&to_coord(p))
    }

    /// Whether the whole segment lies within the polygon.
    pub fn contains_segment(&self, segment: &Segment) -> bool {
        self.shape.contains(&segment.to_geo())
    }

    /// Whether the segment touches the polygon anywhere, boundary included.
    pub fn intersects_segment(&self, segment: &Segment) -> bool {
        segment.to_geo().intersects(&self.shape)
    }

    /// Axis-aligned bounding box.
    pub fn bounds(&self) -> BoundingBox {
        let first = self.vertices[0];
        let (min, max) = self
            .vertices
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        BoundingBox { min, max }
    }

    /// Enclosed area (unsigned).
    pub fn area(&self) -> f64 {
        self.shape.unsigned_area()
    }

    /// Length of the bounding-box diagonal.
    ///
    /// This over-approximates the true polygon diameter, which is all callers need to size
    /// rays that must leave the polygon.
    pub fn diameter(&self) -> f64 {
        self.bounds().diagonal()
    }
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }
}

impl TryFrom<Vec<DVec2>> for Polygon {
    type Error = Error;

    fn try_from(vertices: Vec<DVec2>) -> Result<Self> {
        Polygon::new(vertices)
    }
}

impl From<Polygon> for Vec<DVec2> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Polygon {
        Polygon::new([(5.0, 0.0), (10.0, 5.0), (5.0, 10.0), (0.0, 5.0)]).expect("valid diamond")
    }

    #[test]
    fn closing_vertex_is_dropped() {
        let p = Polygon::new([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]).expect("triangle");
        assert_eq!(p.vertices().len(), 3);
        assert_eq!(p.num_sides(), 3);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(matches!(
            Polygon::new([(0.0, 0.0), (1.0, 0.0)]),
            Err(Error::DegenerateGeometry(_))
        ));
        assert!(matches!(
            Polygon::new([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]),
            Err(Error::DegenerateGeometry(_))
        ));
        assert!(matches!(
            Polygon::new([(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0)]),
            Err(Error::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn side_wraps_and_rejects_out_of_range() {
        let p = diamond();
        let last = p.side(3).expect("last side");
        assert_eq!(last.start, DVec2::new(0.0, 5.0));
        assert_eq!(last.end, DVec2::new(5.0, 0.0));
        assert!(matches!(
            p.side(4),
            Err(Error::IndexOutOfRange { index: 4, len: 4 })
        ));
        assert_eq!(p.sides().count(), 4);
    }

    #[test]
    fn interior_angles_of_square_and_triangle() {
        let square = Polygon::rectangle((0.0, 0.0), (2.0, 2.0)).expect("square");
        for angle in square.interior_angles() {
            assert!((angle - 90.0).abs() < 1e-9);
        }

        let tri = Polygon::new([(0.0, 0.0), (1.0, 0.0), (0.5, 3.0_f64.sqrt() / 2.0)])
            .expect("equilateral");
        let angles = tri.interior_angles();
        assert_eq!(angles.len(), 3);
        assert!(angles.iter().all(|a| (a - 60.0).abs() < 1e-9));
    }

    #[test]
    fn interior_angles_fold_reflex_corners() {
        let u = Polygon::new([
            (0.0, 0.0),
            (6.0, 0.0),
            (6.0, 4.0),
            (4.0, 4.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 4.0),
            (0.0, 4.0),
        ])
        .expect("u-shape");
        // The notch corners at indices 4 and 5 are 270 degrees inside the polygon.
        for angle in u.interior_angles() {
            assert!((angle - 90.0).abs() < 1e-9, "{angle}");
        }

        let chevron =
            Polygon::new([(0.0, 0.0), (4.0, 2.0), (0.0, 4.0), (1.0, 2.0)]).expect("chevron");
        let angles = chevron.interior_angles();
        let reflex = 360.0 - (-0.6_f64).acos().to_degrees();
        assert!(reflex > 180.0);
        assert!((angles[3] - (360.0 - reflex)).abs() < 1e-9, "{}", angles[3]);
        let sum: f64 = angles.iter().sum();
        // Folding the reflex corner loses 2 * (reflex - 180) from the 360 degree total.
        assert!((sum - (360.0 - 2.0 * (reflex - 180.0))).abs() < 1e-9, "{sum}");
    }

    #[test]
    fn contains_point_counts_boundary() {
        let p = diamond();
        assert!(p.contains_point(DVec2::new(5.0, 5.0)));
        assert!(p.contains_point(DVec2::new(5.0, 0.0)));
        assert!(p.contains_point(DVec2::new(7.5, 2.5)));
        assert!(!p.contains_point(DVec2::new(1.0, 1.0)));
        assert!(!p.contains_point(DVec2::new(f64::NAN, 5.0)));
        assert!(!p.contains_point_strictly(DVec2::new(7.5, 2.5)));
    }

    #[test]
    fn bounds_area_and_diameter() {
        let p = diamond();
        assert_eq!(p.bounds().to_tuple(), (0.0, 0.0, 10.0, 10.0));
        assert!((p.area() - 50.0).abs() < 1e-9);
        assert!((p.diameter() - 200.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn rectangle_orders_corners() {
        let r = Polygon::rectangle((20.0, 10.0), (0.0, 0.0)).expect("rect");
        assert_eq!(r.bounds().to_tuple(), (0.0, 0.0, 20.0, 10.0));
        assert!((r.area() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn segment_containment() {
        let r = Polygon::rectangle((0.0, 0.0), (10.0, 10.0)).expect("rect");
        assert!(r.contains_segment(&Segment::new((1.0, 1.0), (9.0, 9.0))));
        assert!(!r.contains_segment(&Segment::new((1.0, 1.0), (11.0, 9.0))));
        assert!(r.intersects_segment(&Segment::new((-1.0, 5.0), (1.0, 5.0))));
        assert!(!r.intersects_segment(&Segment::new((-3.0, 5.0), (-1.0, 5.0))));
    }
}
