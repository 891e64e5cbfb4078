//! Obstacles and the id generator that numbers them.
use glam::DVec2;

use super::{AreaId, AreaType, Region};
use crate::error::{Error, Result};
use crate::geometry::Polygon;

/// Hands out monotonically increasing obstacle ids, starting at `1`.
///
/// Each [`super::Domain`] owns one; callers that build obstacles outside a domain keep their
/// own and pass ids explicitly. Once `AreaId::MAX` has been handed out or reserved the
/// generator is exhausted.
#[derive(Clone, Debug)]
pub struct ObstacleIdGenerator {
    next: Option<AreaId>,
}

impl Default for ObstacleIdGenerator {
    fn default() -> Self {
        Self { next: Some(1) }
    }
}

impl ObstacleIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id and advances the counter.
    pub fn next_id(&mut self) -> Result<AreaId> {
        let id = self.next.ok_or_else(|| {
            Error::InvalidConfig(format!("obstacle ids exhausted after {}", AreaId::MAX))
        })?;
        self.next = id.checked_add(1);
        Ok(id)
    }

    /// The id the next call to [`ObstacleIdGenerator::next_id`] will return, or `None` once
    /// exhausted.
    pub fn peek(&self) -> Option<AreaId> {
        self.next
    }

    /// Marks `id` as used so generated ids never collide with it.
    pub fn reserve(&mut self, id: AreaId) {
        if let Some(next) = self.next {
            if id >= next {
                self.next = id.checked_add(1);
            }
        }
    }
}

/// An excluded polygon inside a domain.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    id: AreaId,
    polygon: Polygon,
}

impl Obstacle {
    /// Wraps `polygon` as obstacle `id`. Id `0` is reserved for the domain.
    pub fn new(id: AreaId, polygon: Polygon) -> Result<Self> {
        if id == 0 {
            return Err(Error::InvalidConfig(
                "obstacle id 0 is reserved for the domain".into(),
            ));
        }
        Ok(Self { id, polygon })
    }

    /// Builds obstacle `id` from its vertex list.
    pub fn from_vertices<I, P>(id: AreaId, vertices: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<DVec2>,
    {
        Self::new(id, Polygon::new(vertices)?)
    }
}

impl Region for Obstacle {
    fn id(&self) -> AreaId {
        self.id
    }

    fn area_type(&self) -> AreaType {
        AreaType::Obstacle
    }

    fn polygon(&self) -> &Polygon {
        &self.polygon
    }
}
