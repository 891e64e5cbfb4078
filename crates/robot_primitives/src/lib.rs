#![forbid(unsafe_code)]
//! robot_primitives: Planning primitives for robots moving through flows.
//!
//! Modules:
//! - geometry: polygons, segments, segment overlap, and clipper-backed offsetting
//! - area: planning domains with obstacles, line of sight, and configuration space
//! - field: closed-form flow models, unbounded and bounded to a region
//! - path: paths with named per-point attributes
//! - heuristic: edge costs, including energy spent against a flow field
//! - persist: JSON persistence for domains and paths (feature `serde`)
pub mod area;
pub mod error;
pub mod field;
pub mod geometry;
pub mod heuristic;
pub mod path;
#[cfg(feature = "serde")]
pub mod persist;

/// Convenient re-exports for common types. Import with `use robot_primitives::prelude::*;`.
pub mod prelude {
    pub use crate::area::{
        AreaId, AreaType, ConfigurationSpace, Domain, IntersectionPoint, Obstacle,
        ObstacleIdGenerator, Region, DOMAIN_ID,
    };
    pub use crate::error::{Error, Result};
    pub use crate::field::{BoundedVectorField, Field, FlowAxis, FlowModel, VectorField};
    pub use crate::geometry::{
        BoundingBox, BufferOptions, ExPolygon, JoinStyle, Overlap, Polygon, Segment,
    };
    pub use crate::heuristic::{
        DirectedDistance, EuclideanDistance, FlowEnergyConfig, Heuristic, OpposingFlowEnergy,
    };
    pub use crate::path::ConstrainedPath;
}
