//! Flow model definitions.
//!
//! Each [`FlowModel`] variant carries a parameter struct with everything its closed-form rule
//! needs; [`FlowModel::evaluate`] is the single dispatch point. Parameters are validated by the
//! constructors on [`super::VectorField`] and [`super::BoundedVectorField`], so evaluation only
//! has to handle per-sample degeneracies (reported as `None`).
use glam::DVec2;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::profile::{channel_speed, Polynomial, QuadraticProfile};
use crate::error::{Error, Result};
use crate::geometry::{Polygon, Segment, GEOMETRY_EPS};

/// A directed axis a flow is aligned with.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowAxis {
    /// First axis point.
    pub origin: DVec2,
    /// Axis vector from the first to the second point.
    pub vector: DVec2,
    /// Length of `vector`.
    pub length: f64,
}

impl FlowAxis {
    /// Axis through the two segment endpoints. Fails for a zero-length or non-finite axis.
    pub fn from_segment(segment: &Segment) -> Result<Self> {
        let vector = segment.vector();
        let length = vector.length();
        if !segment.start.is_finite() || !length.is_finite() || length <= 0.0 {
            return Err(Error::DegenerateGeometry(format!(
                "flow axis {} -> {} has no direction",
                segment.start, segment.end
            )));
        }
        Ok(Self {
            origin: segment.start,
            vector,
            length,
        })
    }

    /// Unit vector along the axis.
    #[inline]
    pub fn direction(&self) -> DVec2 {
        self.vector / self.length
    }

    /// Signed perpendicular distance of `p` from the axis line (positive on the left).
    #[inline]
    pub fn signed_offset(&self, p: DVec2) -> f64 {
        self.vector.perp_dot(p - self.origin) / self.length
    }

    /// Smallest and largest signed offsets of `points`.
    pub fn offset_range(&self, points: &[DVec2]) -> Option<(f64, f64)> {
        points
            .iter()
            .map(|p| self.signed_offset(*p))
            .fold(None, |acc, s| match acc {
                None => Some((s, s)),
                Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
            })
    }
}

/// Parameters for a constant flow.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct UniformParams {
    pub vector: DVec2,
}

/// Parameters for an axis-aligned parabolic channel: walls parallel to Y, flow along Y.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelParams {
    pub channel_width: f64,
    pub max_velocity: f64,
    /// Position of the wall the cross-channel coordinate is measured from (only `x` is used).
    pub offset: DVec2,
}

/// Parameters for an axis-aligned channel with a pylon wake between two X positions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PylonParams {
    pub channel_width: f64,
    pub max_velocity: f64,
    pub pylon_start: f64,
    pub pylon_end: f64,
}

impl PylonParams {
    /// Speed at cross-channel position `x`.
    ///
    /// Inside the pylon span the speed falls linearly from the channel speed at the near
    /// pylon edge to zero at the pylon midpoint, then rises linearly to the channel speed at
    /// the far edge.
    pub fn speed_at(&self, x: f64) -> f64 {
        let (w, v) = (self.channel_width, self.max_velocity);
        if x < self.pylon_start || x > self.pylon_end {
            return channel_speed(x, w, v);
        }
        let half = 0.5 * (self.pylon_end - self.pylon_start);
        let s = x - self.pylon_start;
        if s < half {
            channel_speed(self.pylon_start, w, v) * (1.0 - s / half)
        } else {
            channel_speed(self.pylon_end, w, v) * (s - half) / half
        }
    }
}

/// Parameters for a parabolic channel centered on an arbitrary axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CenterlineChannelParams {
    pub axis: FlowAxis,
    pub channel_width: f64,
    pub max_velocity: f64,
}

/// Parameters for a channel whose speed follows a quadratic from the centerline to the banks.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ExtendedChannelParams {
    pub axis: FlowAxis,
    pub channel_width: f64,
    pub profile: QuadraticProfile,
}

/// Parameters for a flow whose speed varies linearly across the flow axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct LinearParams {
    pub axis: FlowAxis,
    /// Signed offset where the speed equals `v1`.
    pub near_offset: f64,
    /// Signed offset where the speed equals `v2`.
    pub far_offset: f64,
    pub v1: f64,
    pub v2: f64,
}

/// Parameters for a flow whose speed is a polynomial of the offset across the flow axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialParams {
    pub axis: FlowAxis,
    pub polynomial: Polynomial,
}

/// Parameters for a circulating flow through radial cross-sections of a boundary.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct RadialChannelParams {
    pub origin: DVec2,
    pub boundary: Polygon,
    pub max_velocity: f64,
    pub min_velocity: f64,
    /// Cached boundary diameter used to size cross-section rays.
    pub reach: f64,
}

impl RadialChannelParams {
    /// Cross-section of the boundary along the ray from the origin through `p`, ordered from
    /// the bank nearer the origin.
    pub fn cross_section(&self, p: DVec2) -> Option<Segment> {
        let radius = p - self.origin;
        let dist = radius.length();
        if dist <= 0.0 {
            return None;
        }
        let ray_length = dist + self.reach;
        let ray = Segment::new(self.origin, self.origin + radius / dist * ray_length);
        let section = self
            .boundary
            .intersect_segment(&ray)
            .piece_containing(&ray, dist / ray_length)?;
        if section.length() <= GEOMETRY_EPS {
            trace!("Degenerate radial cross-section at {}.", p);
            return None;
        }
        Some(section)
    }

    fn evaluate(&self, p: DVec2) -> Option<DVec2> {
        let section = self.cross_section(p)?;
        let profile =
            QuadraticProfile::fit(self.max_velocity, self.min_velocity, 0.5 * section.length())
                .ok()?;
        let speed = profile.eval(p.distance(section.midpoint()));
        Some(clockwise_tangent(p - self.origin) * speed)
    }
}

/// Parameters for a radial channel whose center line is shifted toward one bank.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct AsymmetricRadialParams {
    pub radial: RadialChannelParams,
    /// Center position ratios along the X and Y directions, blended by the sample angle.
    pub center_ratios: DVec2,
}

impl AsymmetricRadialParams {
    /// Fraction of the cross-section, measured from the inner bank, where the center sits for
    /// a sample at polar angle `theta`.
    #[inline]
    pub fn center_ratio(&self, theta: f64) -> f64 {
        DVec2::new(
            self.center_ratios.x * theta.cos(),
            self.center_ratios.y * theta.sin(),
        )
        .length()
    }

    fn evaluate(&self, p: DVec2) -> Option<DVec2> {
        let radial = &self.radial;
        let section = radial.cross_section(p)?;
        let radius = p - radial.origin;
        let ratio = self.center_ratio(radius.y.atan2(radius.x));

        let (inner, outer) = (section.start, section.end);
        let center = inner + (outer - inner) * ratio;
        let half_width = if radius.length() < center.distance(radial.origin) {
            center.distance(inner)
        } else {
            outer.distance(center)
        };
        let profile =
            QuadraticProfile::fit(radial.max_velocity, radial.min_velocity, half_width).ok()?;
        let speed = profile.eval(p.distance(center));
        Some(clockwise_tangent(radius) * speed)
    }
}

/// Unit vector of `radius` rotated by -90 degrees.
#[inline]
fn clockwise_tangent(radius: DVec2) -> DVec2 {
    DVec2::new(radius.y, -radius.x).normalize()
}

/// Closed-form flow rules.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum FlowModel {
    Uniform {
        params: UniformParams,
    },
    Channel {
        params: ChannelParams,
    },
    ChannelWithPylon {
        params: PylonParams,
    },
    CenterlineChannel {
        params: CenterlineChannelParams,
    },
    ExtendedChannel {
        params: ExtendedChannelParams,
    },
    Linear {
        params: LinearParams,
    },
    Polynomial {
        params: PolynomialParams,
    },
    RadialChannel {
        params: RadialChannelParams,
    },
    AsymmetricRadialChannel {
        params: AsymmetricRadialParams,
    },
}

impl FlowModel {
    /// Short name of the model kind, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FlowModel::Uniform { .. } => "uniform",
            FlowModel::Channel { .. } => "channel",
            FlowModel::ChannelWithPylon { .. } => "channel_with_pylon",
            FlowModel::CenterlineChannel { .. } => "centerline_channel",
            FlowModel::ExtendedChannel { .. } => "extended_channel",
            FlowModel::Linear { .. } => "linear",
            FlowModel::Polynomial { .. } => "polynomial",
            FlowModel::RadialChannel { .. } => "radial_channel",
            FlowModel::AsymmetricRadialChannel { .. } => "asymmetric_radial_channel",
        }
    }

    /// Velocity at `p`, or `None` where the rule is undefined (e.g. a degenerate radial
    /// cross-section).
    pub fn evaluate(&self, p: DVec2) -> Option<DVec2> {
        match self {
            FlowModel::Uniform { params } => Some(params.vector),
            FlowModel::Channel { params } => Some(DVec2::new(
                0.0,
                channel_speed(
                    p.x - params.offset.x,
                    params.channel_width,
                    params.max_velocity,
                ),
            )),
            FlowModel::ChannelWithPylon { params } => Some(DVec2::new(0.0, params.speed_at(p.x))),
            FlowModel::CenterlineChannel { params } => {
                let w = params.channel_width;
                let u = params.axis.signed_offset(p) + 0.5 * w;
                Some(params.axis.direction() * channel_speed(u, w, params.max_velocity))
            }
            FlowModel::ExtendedChannel { params } => {
                let d = params.axis.signed_offset(p).abs();
                Some(params.axis.direction() * params.profile.eval(d))
            }
            FlowModel::Linear { params } => {
                let s = params.axis.signed_offset(p);
                let t = (s - params.near_offset) / (params.far_offset - params.near_offset);
                Some(params.axis.direction() * (params.v1 + t * (params.v2 - params.v1)))
            }
            FlowModel::Polynomial { params } => {
                let s = params.axis.signed_offset(p);
                Some(params.axis.direction() * params.polynomial.eval(s))
            }
            FlowModel::RadialChannel { params } => params.evaluate(p),
            FlowModel::AsymmetricRadialChannel { params } => params.evaluate(p),
        }
    }
}
