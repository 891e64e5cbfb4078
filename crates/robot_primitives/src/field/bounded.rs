//! Fields restricted to a region.
use glam::DVec2;
use tracing::debug;

use super::model::{
    AsymmetricRadialParams, CenterlineChannelParams, ExtendedChannelParams, FlowAxis, FlowModel,
    LinearParams, PolynomialParams, RadialChannelParams,
};
use super::profile::{Polynomial, QuadraticProfile};
use super::{check_channel, Field, VectorField};
use crate::area::Region;
use crate::error::{Error, Result};
use crate::geometry::{Polygon, Segment};

/// A [`VectorField`] evaluated only inside a region.
///
/// Outside the region's outer polygon (obstacles are not consulted) sampling returns
/// `undefined_value`, which defaults to the zero vector. Points where the model itself is
/// undefined, such as a degenerate radial cross-section, also return `undefined_value`.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundedVectorField {
    field: VectorField,
    region: Polygon,
    undefined_value: DVec2,
}

impl BoundedVectorField {
    /// Bounds `field` to the polygon of `region`.
    pub fn new(field: VectorField, region: &impl Region) -> Self {
        Self {
            field,
            region: region.polygon().clone(),
            undefined_value: DVec2::ZERO,
        }
    }

    /// Replaces the out-of-region sentinel.
    pub fn with_undefined_value(mut self, value: impl Into<DVec2>) -> Self {
        self.undefined_value = value.into();
        self
    }

    pub fn region(&self) -> &Polygon {
        &self.region
    }

    pub fn undefined_value(&self) -> DVec2 {
        self.undefined_value
    }

    pub fn model(&self) -> &FlowModel {
        self.field.model()
    }

    /// Constant `vector` inside `region`.
    pub fn uniform(region: &impl Region, vector: impl Into<DVec2>) -> Self {
        Self::new(VectorField::from_uniform_vector(vector), region)
    }

    /// Parabolic channel centered on `axis`.
    ///
    /// Without an explicit `channel_width` the width is the spread of the region's vertices
    /// across the axis. Velocity points along the axis direction.
    pub fn channel_flow_model(
        region: &impl Region,
        axis: impl Into<Segment>,
        max_velocity: f64,
        channel_width: Option<f64>,
    ) -> Result<Self> {
        let axis = FlowAxis::from_segment(&axis.into())?;
        let channel_width = resolve_width(region, &axis, channel_width)?;
        check_channel(channel_width, max_velocity)?;
        let model = FlowModel::CenterlineChannel {
            params: CenterlineChannelParams {
                axis,
                channel_width,
                max_velocity,
            },
        };
        Ok(Self::new(VectorField::new(model), region))
    }

    /// Channel whose speed falls quadratically from `max_velocity` on the axis to
    /// `min_velocity` at half the channel width, on either side.
    pub fn extended_channel_flow_model(
        region: &impl Region,
        axis: impl Into<Segment>,
        max_velocity: f64,
        min_velocity: f64,
        channel_width: Option<f64>,
    ) -> Result<Self> {
        check_velocities(max_velocity, min_velocity)?;
        let axis = FlowAxis::from_segment(&axis.into())?;
        let channel_width = resolve_width(region, &axis, channel_width)?;
        let profile = QuadraticProfile::fit(max_velocity, min_velocity, 0.5 * channel_width)?;
        let model = FlowModel::ExtendedChannel {
            params: ExtendedChannelParams {
                axis,
                channel_width,
                profile,
            },
        };
        Ok(Self::new(VectorField::new(model), region))
    }

    /// Speed interpolated linearly across `axis`, from `v1` at the region extreme nearer the
    /// axis line to `v2` at the opposite extreme.
    pub fn linear_flow_model(
        region: &impl Region,
        axis: impl Into<Segment>,
        v1: f64,
        v2: f64,
    ) -> Result<Self> {
        check_velocities(v1, v2)?;
        let axis = FlowAxis::from_segment(&axis.into())?;
        let (lo, hi) = offset_extremes(region, &axis)?;
        let (near_offset, far_offset) = if lo.abs() <= hi.abs() {
            (lo, hi)
        } else {
            (hi, lo)
        };
        debug!(
            "Linear flow spans offsets {} to {} across the axis.",
            near_offset, far_offset
        );
        let model = FlowModel::Linear {
            params: LinearParams {
                axis,
                near_offset,
                far_offset,
                v1,
                v2,
            },
        };
        Ok(Self::new(VectorField::new(model), region))
    }

    /// Speed given by a least-squares polynomial of the signed offset across `axis`, fitted
    /// through `(position, measured speed)` calibration pairs.
    pub fn polynomial_flow_model(
        region: &impl Region,
        axis: impl Into<Segment>,
        calibration: &[(DVec2, f64)],
        degree: usize,
    ) -> Result<Self> {
        let axis = FlowAxis::from_segment(&axis.into())?;
        let samples: Vec<(f64, f64)> = calibration
            .iter()
            .map(|(p, speed)| (axis.signed_offset(*p), *speed))
            .collect();
        let polynomial = Polynomial::fit(&samples, degree)?;
        debug!(
            "Fitted degree {} flow polynomial from {} samples.",
            degree,
            samples.len()
        );
        let model = FlowModel::Polynomial {
            params: PolynomialParams { axis, polynomial },
        };
        Ok(Self::new(VectorField::new(model), region))
    }

    /// Circulating flow around `origin`.
    ///
    /// Each sample is projected onto the region cross-section along the ray from `origin`
    /// through it; speed is `max_velocity` at the cross-section midpoint and `min_velocity`
    /// at its ends. Velocity is the radius rotated by -90 degrees.
    pub fn radial_channel_flow_model(
        region: &impl Region,
        origin: impl Into<DVec2>,
        max_velocity: f64,
        min_velocity: f64,
    ) -> Result<Self> {
        let params = radial_params(region, origin.into(), max_velocity, min_velocity)?;
        let model = FlowModel::RadialChannel { params };
        Ok(Self::new(VectorField::new(model), region))
    }

    /// Radial channel whose center line sits at an angle-dependent fraction of each
    /// cross-section, blended from `center_ratios` along X and Y.
    pub fn asymmetric_radial_channel_flow_model(
        region: &impl Region,
        origin: impl Into<DVec2>,
        max_velocity: f64,
        min_velocity: f64,
        center_ratios: (f64, f64),
    ) -> Result<Self> {
        let center_ratios = DVec2::from(center_ratios);
        if !(0.0..=1.0).contains(&center_ratios.x) || !(0.0..=1.0).contains(&center_ratios.y) {
            return Err(Error::InvalidConfig(format!(
                "center ratios must lie in [0, 1], got {center_ratios}"
            )));
        }
        let radial = radial_params(region, origin.into(), max_velocity, min_velocity)?;
        let model = FlowModel::AsymmetricRadialChannel {
            params: AsymmetricRadialParams {
                radial,
                center_ratios,
            },
        };
        Ok(Self::new(VectorField::new(model), region))
    }
}

impl Field for BoundedVectorField {
    fn sample(&self, p: DVec2) -> DVec2 {
        if !self.region.contains_point(p) {
            return self.undefined_value;
        }
        self.field.model().evaluate(p).unwrap_or(self.undefined_value)
    }
}

fn offset_extremes(region: &impl Region, axis: &FlowAxis) -> Result<(f64, f64)> {
    axis.offset_range(region.vertices())
        .ok_or_else(|| Error::DegenerateGeometry("region has no vertices".into()))
}

fn resolve_width(region: &impl Region, axis: &FlowAxis, width: Option<f64>) -> Result<f64> {
    if let Some(width) = width {
        return Ok(width);
    }
    let (lo, hi) = offset_extremes(region, axis)?;
    let width = hi - lo;
    debug!("Derived channel width {} from region vertices.", width);
    if width <= 0.0 {
        return Err(Error::DegenerateGeometry(
            "region has no extent across the flow axis".into(),
        ));
    }
    Ok(width)
}

fn check_velocities(a: f64, b: f64) -> Result<()> {
    if !a.is_finite() || !b.is_finite() {
        return Err(Error::InvalidConfig(format!(
            "velocities must be finite, got {a} and {b}"
        )));
    }
    Ok(())
}

fn radial_params(
    region: &impl Region,
    origin: DVec2,
    max_velocity: f64,
    min_velocity: f64,
) -> Result<RadialChannelParams> {
    check_velocities(max_velocity, min_velocity)?;
    if !origin.is_finite() {
        return Err(Error::InvalidConfig(format!(
            "radial origin must be finite, got {origin}"
        )));
    }
    Ok(RadialChannelParams {
        origin,
        boundary: region.polygon().clone(),
        max_velocity,
        min_velocity,
        reach: region.diameter(),
    })
}
