//! Regions of the plane: the planning [`Domain`] and the [`Obstacle`]s inside it.
//!
//! Both share behaviour through the [`Region`] trait, which is implemented by composition
//! over a [`Polygon`]. Field constructors and heuristics accept any `Region`, including a
//! bare polygon.
use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{BoundingBox, Polygon, Segment};

pub mod domain;
pub mod obstacle;

pub use domain::{ConfigurationSpace, Domain, IntersectionPoint, DOMAIN_ID};
pub use obstacle::{Obstacle, ObstacleIdGenerator};

/// Identifier of a region. The domain is always `0`; obstacles are positive.
pub type AreaId = u32;

/// Role of a region in a planning problem.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AreaType {
    Free,
    Obstacle,
    Undefined,
}

/// Geometry provider consumed by field constructors and planners.
///
/// Implementors only supply identity and the backing polygon; every query defaults to the
/// polygon's own implementation.
pub trait Region {
    fn id(&self) -> AreaId;

    fn area_type(&self) -> AreaType;

    fn polygon(&self) -> &Polygon;

    fn vertices(&self) -> &[DVec2] {
        self.polygon().vertices()
    }

    fn num_sides(&self) -> usize {
        self.polygon().num_sides()
    }

    /// Fails with [`crate::error::Error::IndexOutOfRange`] when `index >= num_sides()`.
    fn side(&self, index: usize) -> Result<Segment> {
        self.polygon().side(index)
    }

    fn interior_angles(&self) -> Vec<f64> {
        self.polygon().interior_angles()
    }

    fn contains_point(&self, p: DVec2) -> bool {
        self.polygon().contains_point(p)
    }

    fn bounds(&self) -> BoundingBox {
        self.polygon().bounds()
    }

    fn area(&self) -> f64 {
        self.polygon().area()
    }

    fn diameter(&self) -> f64 {
        self.polygon().diameter()
    }

    /// Ordered coordinates where `segment` overlaps the region's polygon.
    fn compute_intersection(&self, segment: &Segment) -> Vec<DVec2> {
        self.polygon().intersect_segment(segment).coords()
    }
}

impl Region for Polygon {
    fn id(&self) -> AreaId {
        0
    }

    fn area_type(&self) -> AreaType {
        AreaType::Undefined
    }

    fn polygon(&self) -> &Polygon {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_polygon_is_an_undefined_region() {
        let p = Polygon::rectangle((0.0, 0.0), (4.0, 2.0)).expect("rect");
        let region: &dyn Region = &p;
        assert_eq!(region.id(), 0);
        assert_eq!(region.area_type(), AreaType::Undefined);
        assert_eq!(region.num_sides(), 4);
        assert!((region.area() - 8.0).abs() < 1e-12);
        assert!(region.contains_point(DVec2::new(1.0, 1.0)));
    }

    #[test]
    fn compute_intersection_defaults_to_polygon_overlap() {
        let p = Polygon::rectangle((0.0, 0.0), (4.0, 2.0)).expect("rect");
        let coords = Region::compute_intersection(&p, &Segment::new((-1.0, 1.0), (5.0, 1.0)));
        assert_eq!(coords.len(), 2);
        assert!(coords[0].abs_diff_eq(DVec2::new(0.0, 1.0), 1e-9));
        assert!(coords[1].abs_diff_eq(DVec2::new(4.0, 1.0), 1e-9));
    }
}
