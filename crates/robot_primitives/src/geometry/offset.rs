//! Boundary offsetting (erosion and dilation) and polygon clipping.
//!
//! Both operations run through `geo-clipper`, which works on integer coordinates; the
//! [`BufferOptions::scale`] factor controls the precision of that conversion.
use geo_clipper::{Clipper, EndType, JoinType};
use tracing::debug;

use super::Polygon;
use crate::error::{Error, Result};

/// Default miter limit, as a multiple of the offset distance.
pub const DEFAULT_MITER_LIMIT: f64 = 5.0;
/// Default arc tolerance handed to clipper for rounded joins.
pub const DEFAULT_ARC_TOLERANCE: f64 = 0.25;
/// Default float-to-integer scaling factor used by clipper.
pub const DEFAULT_CLIPPER_SCALE: f64 = 1000.0;

/// Corner treatment for offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JoinStyle {
    /// Sharp corners, squared off once they exceed `limit` times the offset distance.
    Miter { limit: f64 },
    /// Circular arcs around convex corners.
    Round { arc_tolerance: f64 },
}

impl JoinStyle {
    /// Mitered joins with the default limit.
    pub fn miter() -> Self {
        JoinStyle::Miter {
            limit: DEFAULT_MITER_LIMIT,
        }
    }

    /// Rounded joins with the default arc tolerance.
    pub fn round() -> Self {
        JoinStyle::Round {
            arc_tolerance: DEFAULT_ARC_TOLERANCE,
        }
    }

    /// Validates the join parameter, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let (name, value) = match *self {
            JoinStyle::Miter { limit } => ("miter limit", limit),
            JoinStyle::Round { arc_tolerance } => ("arc tolerance", arc_tolerance),
        };
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "{name} must be finite and > 0, got {value}"
            )));
        }
        Ok(())
    }
}

impl From<JoinStyle> for JoinType {
    fn from(style: JoinStyle) -> Self {
        match style {
            JoinStyle::Miter { limit } => JoinType::Miter(limit),
            JoinStyle::Round { arc_tolerance } => JoinType::Round(arc_tolerance),
        }
    }
}

/// Options for clipper-backed operations.
#[derive(Clone, Copy, Debug)]
pub struct BufferOptions {
    /// Scaling factor applied before integer conversion.
    pub scale: f64,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_CLIPPER_SCALE,
        }
    }
}

impl BufferOptions {
    /// Sets the clipper scaling factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Validates the options, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::InvalidConfig("clipper scale must be finite and > 0".into()));
        }
        Ok(())
    }
}

impl Polygon {
    /// Offsets the boundary outward (`distance > 0`) or inward (`distance < 0`).
    ///
    /// Returns every resulting outer ring; erosion may split the polygon into several parts
    /// or consume it entirely, in which case the result is empty.
    pub fn buffer(&self, distance: f64, style: JoinStyle) -> Result<Vec<Polygon>> {
        self.buffer_with(distance, style, BufferOptions::default())
    }

    /// [`Polygon::buffer`] with explicit clipper options.
    pub fn buffer_with(
        &self,
        distance: f64,
        style: JoinStyle,
        options: BufferOptions,
    ) -> Result<Vec<Polygon>> {
        options.validate()?;
        style.validate()?;
        if !distance.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "offset distance must be finite, got {distance}"
            )));
        }
        if distance == 0.0 {
            return Ok(vec![self.clone()]);
        }

        let result = self
            .as_geo()
            .offset(distance, style.into(), EndType::ClosedPolygon, options.scale);
        let parts: Vec<Polygon> = result
            .0
            .iter()
            .filter_map(|p| Polygon::from_geo(p).ok())
            .collect();
        debug!(
            "Buffered polygon by {}: kept {} of {} rings.",
            distance,
            parts.len(),
            result.0.len()
        );
        Ok(parts)
    }

    /// Overlap of two polygons as zero or more polygons.
    pub fn intersect_polygon(&self, other: &Polygon) -> Vec<Polygon> {
        self.as_geo()
            .intersection(other.as_geo(), DEFAULT_CLIPPER_SCALE)
            .0
            .iter()
            .filter_map(|p| Polygon::from_geo(p).ok())
            .collect()
    }
}
