//! The planning domain: an outer free-space boundary with obstacles inside.
use std::collections::BTreeMap;

use glam::DVec2;
use tracing::debug;

use super::{AreaId, AreaType, Obstacle, ObstacleIdGenerator, Region};
use crate::error::{Error, Result};
use crate::geometry::{ExPolygon, JoinStyle, Overlap, Polygon, Segment};

/// Identifier of every domain.
pub const DOMAIN_ID: AreaId = 0;

/// An intersection coordinate tagged with the region it was found on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionPoint {
    pub point: DVec2,
    pub area_id: AreaId,
}

/// Free space available to a disk-shaped vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigurationSpace {
    /// Outer boundary eroded by the vehicle radius.
    pub boundary: Polygon,
    /// Obstacles dilated by the vehicle radius.
    pub obstacles: Vec<Polygon>,
}

impl ConfigurationSpace {
    /// Eroded boundary with the dilated obstacles as holes.
    pub fn free_space(&self) -> ExPolygon {
        ExPolygon::with_holes(self.boundary.clone(), self.obstacles.clone())
    }

    /// Whether the vehicle center may sit at `p`.
    pub fn contains_point(&self, p: DVec2) -> bool {
        self.boundary.contains_point(p)
            && !self.obstacles.iter().any(|o| o.contains_point_strictly(p))
    }
}

/// The region over which planning occurs. Its id is always [`DOMAIN_ID`] and its type
/// [`AreaType::Free`].
#[derive(Clone, Debug)]
pub struct Domain {
    polygon: Polygon,
    obstacles: BTreeMap<AreaId, Obstacle>,
    ingress_point: Option<DVec2>,
    egress_point: Option<DVec2>,
    ids: ObstacleIdGenerator,
}

impl Domain {
    /// Creates a domain bounded by `polygon`, without obstacles.
    pub fn new(polygon: Polygon, ingress_point: Option<DVec2>, egress_point: Option<DVec2>) -> Self {
        Self {
            polygon,
            obstacles: BTreeMap::new(),
            ingress_point,
            egress_point,
            ids: ObstacleIdGenerator::new(),
        }
    }

    /// Domain bounded by the given vertices; ingress and egress stay unset.
    pub fn from_vertices<I, P>(vertices: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<DVec2>,
    {
        Ok(Self::new(Polygon::new(vertices)?, None, None))
    }

    /// Axis-aligned box domain with ingress and egress at `corner1`.
    pub fn from_box(corner1: impl Into<DVec2>, corner2: impl Into<DVec2>) -> Result<Self> {
        Self::from_box_with_access(corner1, corner2, None, None)
    }

    /// Axis-aligned box domain. A missing ingress or egress point copies the other one; when
    /// both are missing they default to `corner1`.
    pub fn from_box_with_access(
        corner1: impl Into<DVec2>,
        corner2: impl Into<DVec2>,
        ingress_point: Option<DVec2>,
        egress_point: Option<DVec2>,
    ) -> Result<Self> {
        let corner1 = corner1.into();
        let (ingress, egress) = match (ingress_point, egress_point) {
            (None, None) => (corner1, corner1),
            (Some(i), None) => (i, i),
            (None, Some(e)) => (e, e),
            (Some(i), Some(e)) => (i, e),
        };
        Ok(Self::new(
            Polygon::rectangle(corner1, corner2)?,
            Some(ingress),
            Some(egress),
        ))
    }

    /// Sets the ingress point.
    pub fn with_ingress_point(mut self, p: impl Into<DVec2>) -> Self {
        self.ingress_point = Some(p.into());
        self
    }

    /// Sets the egress point.
    pub fn with_egress_point(mut self, p: impl Into<DVec2>) -> Self {
        self.egress_point = Some(p.into());
        self
    }

    pub fn ingress_point(&self) -> Option<DVec2> {
        self.ingress_point
    }

    pub fn egress_point(&self) -> Option<DVec2> {
        self.egress_point
    }

    /// Registers `obstacle` under its id.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> Result<()> {
        let id = obstacle.id();
        if self.obstacles.contains_key(&id) {
            return Err(Error::DuplicateObstacle { id });
        }
        self.ids.reserve(id);
        debug!(
            "Added obstacle {} with {} vertices to domain.",
            id,
            obstacle.num_sides()
        );
        self.obstacles.insert(id, obstacle);
        Ok(())
    }

    /// Registers several obstacles. Nothing is added if any id collides.
    pub fn add_obstacles(&mut self, obstacles: impl IntoIterator<Item = Obstacle>) -> Result<()> {
        let batch: Vec<Obstacle> = obstacles.into_iter().collect();
        for (i, o) in batch.iter().enumerate() {
            let id = o.id();
            if self.obstacles.contains_key(&id) || batch[..i].iter().any(|p| p.id() == id) {
                return Err(Error::DuplicateObstacle { id });
            }
        }
        for o in batch {
            self.add_obstacle(o)?;
        }
        Ok(())
    }

    /// Builds an obstacle from `vertices` with the next generated id and registers it.
    pub fn create_obstacle<I, P>(&mut self, vertices: I) -> Result<AreaId>
    where
        I: IntoIterator<Item = P>,
        P: Into<DVec2>,
    {
        let polygon = Polygon::new(vertices)?;
        let id = self.ids.next_id()?;
        self.add_obstacle(Obstacle::new(id, polygon)?)?;
        Ok(id)
    }

    /// The id the next [`Domain::create_obstacle`] call will assign, or `None` once ids are
    /// exhausted.
    pub fn next_obstacle_id(&self) -> Option<AreaId> {
        self.ids.peek()
    }

    pub fn obstacle(&self, id: AreaId) -> Option<&Obstacle> {
        self.obstacles.get(&id)
    }

    /// Obstacles in ascending id order.
    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.values()
    }

    pub fn num_obstacles(&self) -> usize {
        self.obstacles.len()
    }

    /// Boundary vertices followed by the vertices of every obstacle.
    pub fn all_vertices(&self) -> Vec<DVec2> {
        let mut out = self.polygon.vertices().to_vec();
        for o in self.obstacles.values() {
            out.extend_from_slice(o.vertices());
        }
        out
    }

    /// Outer boundary with each obstacle as a hole.
    pub fn effective_polygon(&self) -> ExPolygon {
        ExPolygon::with_holes(
            self.polygon.clone(),
            self.obstacles.values().map(|o| o.polygon().clone()).collect(),
        )
    }

    /// Whether the straight segment `p1 -> p2` stays inside the boundary and touches no
    /// obstacle.
    pub fn line_of_sight(&self, p1: impl Into<DVec2>, p2: impl Into<DVec2>) -> bool {
        let segment = Segment::new(p1, p2);
        if !self.polygon.contains_segment(&segment) {
            return false;
        }
        !self
            .obstacles
            .values()
            .any(|o| o.polygon().intersects_segment(&segment))
    }

    /// Free space for a disk-shaped vehicle of `vehicle_radius`.
    ///
    /// The boundary is eroded with mitered joins and obstacles are dilated with rounded joins.
    /// If erosion splits the boundary, the largest part is kept.
    pub fn configuration_space(&self, vehicle_radius: f64) -> Result<ConfigurationSpace> {
        check_offset_distance(vehicle_radius)?;
        let boundary = largest_part(
            self.polygon.buffer(-vehicle_radius, JoinStyle::miter())?,
            "eroded domain boundary",
        )?;
        let obstacles = self
            .obstacles
            .values()
            .map(|o| {
                largest_part(
                    o.polygon().buffer(vehicle_radius, JoinStyle::round())?,
                    "dilated obstacle",
                )
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ConfigurationSpace {
            boundary,
            obstacles,
        })
    }

    /// Outer-boundary intersections followed by each obstacle's, tagged with the region id.
    ///
    /// An obstacle touched at a single point reports that point twice so obstacle
    /// intersections always come in entry/exit pairs.
    pub fn compute_intersection_with_obstacles(&self, segment: &Segment) -> Vec<IntersectionPoint> {
        let boundary = self.polygon.intersect_segment(segment);
        if boundary.is_empty() {
            return Vec::new();
        }

        let mut points: Vec<IntersectionPoint> = boundary
            .coords()
            .into_iter()
            .map(|point| IntersectionPoint {
                point,
                area_id: DOMAIN_ID,
            })
            .collect();

        for o in self.obstacles.values() {
            let overlap = o.polygon().intersect_segment(segment);
            let mut coords = match overlap {
                Overlap::Empty => continue,
                other => other.coords(),
            };
            if coords.len() == 1 {
                coords.push(coords[0]);
            }
            points.extend(coords.into_iter().map(|point| IntersectionPoint {
                point,
                area_id: o.id(),
            }));
        }
        points
    }

    /// New domain with the boundary eroded and every obstacle dilated by `distance`.
    ///
    /// Obstacle ids, ingress, and egress are preserved.
    pub fn offset(&self, distance: f64) -> Result<Domain> {
        let space = self.configuration_space(distance)?;
        let mut domain = Domain::new(space.boundary, self.ingress_point, self.egress_point);
        for (o, grown) in self.obstacles.values().zip(space.obstacles) {
            domain.add_obstacle(Obstacle::new(o.id(), grown)?)?;
        }
        domain.ids = self.ids.clone();
        Ok(domain)
    }
}

impl Region for Domain {
    fn id(&self) -> AreaId {
        DOMAIN_ID
    }

    fn area_type(&self) -> AreaType {
        AreaType::Free
    }

    fn polygon(&self) -> &Polygon {
        &self.polygon
    }
}

fn check_offset_distance(distance: f64) -> Result<()> {
    if !distance.is_finite() || distance < 0.0 {
        return Err(Error::InvalidConfig(format!(
            "offset distance must be finite and >= 0, got {distance}"
        )));
    }
    Ok(())
}

fn largest_part(parts: Vec<Polygon>, what: &str) -> Result<Polygon> {
    if parts.len() > 1 {
        debug!("Offset split {} into {} parts; keeping the largest.", what, parts.len());
    }
    parts
        .into_iter()
        .max_by(|a, b| a.area().total_cmp(&b.area()))
        .ok_or_else(|| Error::DegenerateGeometry(format!("{what} vanished after offsetting")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_domain() -> Domain {
        Domain::from_box((0.0, 0.0), (20.0, 10.0)).expect("box domain")
    }

    fn domain_with_block() -> Domain {
        let mut d = box_domain();
        d.create_obstacle([(8.0, 4.0), (12.0, 4.0), (12.0, 6.0), (8.0, 6.0)])
            .expect("block");
        d
    }

    #[test]
    fn from_box_defaults_access_points_to_first_corner() {
        let d = box_domain();
        assert_eq!(d.id(), DOMAIN_ID);
        assert_eq!(d.area_type(), AreaType::Free);
        assert_eq!(d.ingress_point(), Some(DVec2::ZERO));
        assert_eq!(d.egress_point(), Some(DVec2::ZERO));
    }

    #[test]
    fn from_box_copies_single_access_point() {
        let p = DVec2::new(1.0, 2.0);
        let d = Domain::from_box_with_access((0.0, 0.0), (5.0, 5.0), Some(p), None).expect("d");
        assert_eq!(d.egress_point(), Some(p));
        let d = Domain::from_box_with_access((0.0, 0.0), (5.0, 5.0), None, Some(p)).expect("d");
        assert_eq!(d.ingress_point(), Some(p));
    }

    #[test]
    fn from_vertices_leaves_access_points_unset() {
        let d = Domain::from_vertices([(5.0, 0.0), (10.0, 5.0), (5.0, 10.0), (0.0, 5.0)])
            .expect("diamond");
        assert!(d.ingress_point().is_none());
        assert!(d.egress_point().is_none());
        assert_eq!(d.vertices().len(), 4);
    }

    #[test]
    fn obstacle_ids_are_generated_and_unique() {
        let mut d = box_domain();
        let a = d
            .create_obstacle([(1.0, 1.0), (2.0, 1.0), (2.0, 2.0)])
            .expect("a");
        let b = d
            .create_obstacle([(3.0, 1.0), (4.0, 1.0), (4.0, 2.0)])
            .expect("b");
        assert_eq!((a, b), (1, 2));

        let dup = Obstacle::from_vertices(2, [(5.0, 1.0), (6.0, 1.0), (6.0, 2.0)]).expect("o");
        assert!(matches!(
            d.add_obstacle(dup),
            Err(Error::DuplicateObstacle { id: 2 })
        ));

        let explicit = Obstacle::from_vertices(9, [(5.0, 1.0), (6.0, 1.0), (6.0, 2.0)]).expect("o");
        d.add_obstacle(explicit).expect("explicit id");
        assert_eq!(d.next_obstacle_id(), Some(10));
        assert_eq!(d.num_obstacles(), 3);
        assert_eq!(d.all_vertices().len(), 4 + 9);
    }

    #[test]
    fn add_obstacles_is_all_or_nothing() {
        let mut d = box_domain();
        let batch = vec![
            Obstacle::from_vertices(1, [(1.0, 1.0), (2.0, 1.0), (2.0, 2.0)]).expect("o"),
            Obstacle::from_vertices(1, [(3.0, 1.0), (4.0, 1.0), (4.0, 2.0)]).expect("o"),
        ];
        assert!(d.add_obstacles(batch).is_err());
        assert_eq!(d.num_obstacles(), 0);
    }

    #[test]
    fn effective_polygon_has_obstacle_holes() {
        let d = domain_with_block();
        let ex = d.effective_polygon();
        assert_eq!(ex.hole_count(), 1);
        assert!((ex.area() - (200.0 - 8.0)).abs() < 1e-9);
        assert!(!ex.contains_point(DVec2::new(10.0, 5.0)));
    }

    #[test]
    fn line_of_sight_respects_boundary_and_obstacles() {
        let d = domain_with_block();
        assert!(d.line_of_sight((1.0, 1.0), (19.0, 1.0)));
        assert!(!d.line_of_sight((1.0, 5.0), (19.0, 5.0)));
        assert!(!d.line_of_sight((1.0, 1.0), (25.0, 1.0)));
    }

    #[test]
    fn configuration_space_shrinks_boundary_and_grows_obstacles() {
        let d = domain_with_block();
        let space = d.configuration_space(0.5).expect("space");
        assert!(space.boundary.area() < d.area());
        assert!((space.boundary.area() - 19.0 * 9.0).abs() < 1e-2);
        assert_eq!(space.obstacles.len(), 1);
        assert!(space.obstacles[0].area() > 8.0);
        assert!(space.contains_point(DVec2::new(1.0, 1.0)));
        assert!(!space.contains_point(DVec2::new(0.2, 5.0)));
        assert!(!space.contains_point(DVec2::new(7.7, 5.0)));
        assert!(space.free_space().area() < d.effective_polygon().area());
    }

    #[test]
    fn configuration_space_rejects_vanishing_boundary_and_bad_radius() {
        let d = box_domain();
        assert!(matches!(
            d.configuration_space(6.0),
            Err(Error::DegenerateGeometry(_))
        ));
        assert!(matches!(
            d.configuration_space(-1.0),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn compute_intersection_uses_outer_boundary_only() {
        let d = domain_with_block();
        let coords = d.compute_intersection(&Segment::new((-5.0, 5.0), (25.0, 5.0)));
        assert_eq!(coords.len(), 2);
        assert!(coords[0].abs_diff_eq(DVec2::new(0.0, 5.0), 1e-9));
        assert!(coords[1].abs_diff_eq(DVec2::new(20.0, 5.0), 1e-9));
        assert!(d
            .compute_intersection(&Segment::new((30.0, 5.0), (40.0, 5.0)))
            .is_empty());
    }

    #[test]
    fn obstacle_aware_intersection_tags_points() {
        let d = domain_with_block();
        let points = d.compute_intersection_with_obstacles(&Segment::new((-5.0, 5.0), (25.0, 5.0)));
        let ids: Vec<AreaId> = points.iter().map(|p| p.area_id).collect();
        assert_eq!(ids, vec![0, 0, 1, 1]);
        assert!(points[2].point.abs_diff_eq(DVec2::new(8.0, 5.0), 1e-9));
        assert!(points[3].point.abs_diff_eq(DVec2::new(12.0, 5.0), 1e-9));

        // Grazing the obstacle corner yields a duplicated point.
        let graze = d.compute_intersection_with_obstacles(&Segment::new((8.0, 0.0), (16.0, 8.0)));
        let corner: Vec<_> = graze.iter().filter(|p| p.area_id == 1).collect();
        assert_eq!(corner.len(), 2);
        assert_eq!(corner[0].point, corner[1].point);
    }

    #[test]
    fn offset_preserves_ids_and_access_points() {
        let d = domain_with_block().with_ingress_point((2.0, 2.0));
        let shrunk = d.offset(1.0).expect("offset");
        assert_eq!(shrunk.ingress_point(), Some(DVec2::new(2.0, 2.0)));
        assert_eq!(shrunk.num_obstacles(), 1);
        assert!(shrunk.obstacle(1).is_some());
        assert!(shrunk.area() < d.area());
        assert!(shrunk.next_obstacle_id() >= Some(2));
    }
}
