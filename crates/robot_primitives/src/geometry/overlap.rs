//! Overlap between a segment and a polygon.
use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use glam::DVec2;

use super::{from_coord, Polygon, Segment, GEOMETRY_EPS};

/// Geometry shared by a segment and a polygon.
#[derive(Clone, Debug, PartialEq)]
pub enum Overlap {
    /// The segment misses the polygon.
    Empty,
    /// The segment touches the polygon at a single point.
    Point(DVec2),
    /// The segment touches the polygon at several isolated points.
    Points(Vec<DVec2>),
    /// Pieces of the segment lying inside or on the polygon, ordered from the segment start.
    Segments(Vec<Segment>),
}

impl Overlap {
    /// Whether nothing is shared.
    pub fn is_empty(&self) -> bool {
        matches!(self, Overlap::Empty)
    }

    /// Flattened coordinates in segment order; shared piece endpoints appear once.
    pub fn coords(&self) -> Vec<DVec2> {
        match self {
            Overlap::Empty => Vec::new(),
            Overlap::Point(p) => vec![*p],
            Overlap::Points(points) => points.clone(),
            Overlap::Segments(pieces) => {
                let mut out: Vec<DVec2> = Vec::with_capacity(pieces.len() * 2);
                for piece in pieces {
                    for p in [piece.start, piece.end] {
                        if out.last() != Some(&p) {
                            out.push(p);
                        }
                    }
                }
                out
            }
        }
    }

    /// The piece whose span contains the point at `t` along the source segment.
    pub(crate) fn piece_containing(&self, source: &Segment, t: f64) -> Option<Segment> {
        let Overlap::Segments(pieces) = self else {
            return None;
        };
        pieces.iter().copied().find(|piece| {
            let t0 = source.parameter_of(piece.start);
            let t1 = source.parameter_of(piece.end);
            t >= t0 - GEOMETRY_EPS && t <= t1 + GEOMETRY_EPS
        })
    }
}

impl Polygon {
    /// Intersects `segment` with this polygon (interior and boundary).
    ///
    /// The segment is split at every crossing with a polygon side; each sub-interval whose
    /// midpoint lies in the polygon is kept, and touching intervals are merged.
    pub fn intersect_segment(&self, segment: &Segment) -> Overlap {
        let dir = segment.vector();
        let len2 = dir.length_squared();
        if len2 == 0.0 {
            return if self.contains_point(segment.start) {
                Overlap::Point(segment.start)
            } else {
                Overlap::Empty
            };
        }

        let line = segment.to_geo();
        let param = |p: DVec2| ((p - segment.start).dot(dir) / len2).clamp(0.0, 1.0);

        let mut ts = vec![0.0, 1.0];
        for side in self.sides() {
            match line_intersection(line, side.to_geo()) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    ts.push(param(from_coord(intersection)));
                }
                Some(LineIntersection::Collinear { intersection }) => {
                    ts.push(param(from_coord(intersection.start)));
                    ts.push(param(from_coord(intersection.end)));
                }
                None => {}
            }
        }
        ts.sort_by(f64::total_cmp);
        ts.dedup_by(|a, b| (*a - *b).abs() <= GEOMETRY_EPS);

        let mut spans: Vec<(f64, f64)> = Vec::new();
        for w in ts.windows(2) {
            let (t0, t1) = (w[0], w[1]);
            if !self.contains_point(segment.point_at(0.5 * (t0 + t1))) {
                continue;
            }
            match spans.last_mut() {
                Some(last) if (last.1 - t0).abs() <= GEOMETRY_EPS => last.1 = t1,
                _ => spans.push((t0, t1)),
            }
        }

        if !spans.is_empty() {
            return Overlap::Segments(
                spans
                    .into_iter()
                    .map(|(t0, t1)| Segment::new(segment.point_at(t0), segment.point_at(t1)))
                    .collect(),
            );
        }

        let mut touches: Vec<DVec2> = ts
            .iter()
            .map(|&t| segment.point_at(t))
            .filter(|p| self.contains_point(*p))
            .collect();
        match touches.len() {
            0 => Overlap::Empty,
            1 => Overlap::Point(touches.remove(0)),
            _ => Overlap::Points(touches),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::rectangle((0.0, 0.0), (10.0, 10.0)).expect("square")
    }

    fn assert_close(a: DVec2, b: DVec2) {
        assert!(a.abs_diff_eq(b, 1e-9), "{a} != {b}");
    }

    #[test]
    fn crossing_segment_is_clipped_to_polygon() {
        let seg = Segment::new((-5.0, 5.0), (15.0, 5.0));
        let overlap = square().intersect_segment(&seg);
        let coords = overlap.coords();
        assert_eq!(coords.len(), 2);
        assert_close(coords[0], DVec2::new(0.0, 5.0));
        assert_close(coords[1], DVec2::new(10.0, 5.0));
    }

    #[test]
    fn segment_starting_inside_keeps_its_start() {
        let seg = Segment::new((5.0, 5.0), (5.0, 20.0));
        let coords = square().intersect_segment(&seg).coords();
        assert_eq!(coords.len(), 2);
        assert_close(coords[0], DVec2::new(5.0, 5.0));
        assert_close(coords[1], DVec2::new(5.0, 10.0));
    }

    #[test]
    fn disjoint_segment_is_empty() {
        let seg = Segment::new((20.0, 0.0), (30.0, 10.0));
        assert!(square().intersect_segment(&seg).is_empty());
    }

    #[test]
    fn corner_touch_is_a_single_point() {
        // y = x + 10 only grazes the corner (0, 10).
        let graze = square().intersect_segment(&Segment::new((-5.0, 5.0), (5.0, 15.0)));
        match graze {
            Overlap::Point(p) => assert_close(p, DVec2::new(0.0, 10.0)),
            other => panic!("expected a point, got {other:?}"),
        }
    }

    #[test]
    fn concave_polygon_yields_two_pieces() {
        // U shape open at the top: the horizontal cut at y = 8 crosses both arms.
        let u = Polygon::new([
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (7.0, 10.0),
            (7.0, 3.0),
            (3.0, 3.0),
            (3.0, 10.0),
            (0.0, 10.0),
        ])
        .expect("u shape");
        let seg = Segment::new((-1.0, 8.0), (11.0, 8.0));
        let overlap = u.intersect_segment(&seg);
        let Overlap::Segments(pieces) = &overlap else {
            panic!("expected pieces, got {overlap:?}");
        };
        assert_eq!(pieces.len(), 2);
        assert_close(pieces[0].start, DVec2::new(0.0, 8.0));
        assert_close(pieces[0].end, DVec2::new(3.0, 8.0));
        assert_close(pieces[1].start, DVec2::new(7.0, 8.0));
        assert_close(pieces[1].end, DVec2::new(10.0, 8.0));
        assert_eq!(overlap.coords().len(), 4);

        let second = overlap
            .piece_containing(&seg, seg.parameter_of(DVec2::new(8.0, 8.0)))
            .expect("piece around x = 8");
        assert_close(second.start, DVec2::new(7.0, 8.0));
    }

    #[test]
    fn segment_along_edge_is_kept() {
        let seg = Segment::new((2.0, 0.0), (8.0, 0.0));
        let coords = square().intersect_segment(&seg).coords();
        assert_eq!(coords.len(), 2);
        assert_close(coords[0], DVec2::new(2.0, 0.0));
        assert_close(coords[1], DVec2::new(8.0, 0.0));
    }

    #[test]
    fn zero_length_segment_inside_is_a_point() {
        let seg = Segment::new((3.0, 3.0), (3.0, 3.0));
        assert_eq!(
            square().intersect_segment(&seg),
            Overlap::Point(DVec2::new(3.0, 3.0))
        );
    }
}
