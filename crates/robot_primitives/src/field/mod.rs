//! Closed-form 2D flow fields.
//!
//! This module defines how flow models are sampled:
//! - Implement [`Field`] for anything that maps a position to a velocity.
//! - Use [`VectorField`] for an unbounded analytic model.
//! - Use [`BoundedVectorField`] to restrict a model to a region with a sentinel outside it.
//!
//! Models are plain data ([`FlowModel`]) so their formulas can be tested independently of any
//! region. Sampling is total and never fails; fields are immutable after construction and
//! may be shared across threads.
use std::sync::Arc;

use glam::DVec2;

use crate::error::{Error, Result};

pub mod bounded;
pub mod model;
pub mod profile;

pub use bounded::BoundedVectorField;
pub use model::{
    AsymmetricRadialParams, CenterlineChannelParams, ChannelParams, ExtendedChannelParams,
    FlowAxis, FlowModel, LinearParams, PolynomialParams, PylonParams, RadialChannelParams,
    UniformParams,
};
pub use profile::{channel_speed, Polynomial, QuadraticProfile};

/// Trait for velocity fields sampled at a position in domain coordinates.
pub trait Field: Send + Sync {
    fn sample(&self, p: DVec2) -> DVec2;

    /// Tuple form of [`Field::sample`].
    fn sample_xy(&self, x: f64, y: f64) -> (f64, f64) {
        self.sample(DVec2::new(x, y)).into()
    }
}

impl<F: Field + ?Sized> Field for &F {
    fn sample(&self, p: DVec2) -> DVec2 {
        (**self).sample(p)
    }
}

impl<F: Field + ?Sized> Field for Arc<F> {
    fn sample(&self, p: DVec2) -> DVec2 {
        (**self).sample(p)
    }
}

impl<F: Field + ?Sized> Field for Box<F> {
    fn sample(&self, p: DVec2) -> DVec2 {
        (**self).sample(p)
    }
}

/// An unbounded field evaluating one [`FlowModel`] everywhere.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorField {
    model: FlowModel,
}

impl VectorField {
    pub fn new(model: FlowModel) -> Self {
        Self { model }
    }

    /// Constant `vector` everywhere.
    pub fn from_uniform_vector(vector: impl Into<DVec2>) -> Self {
        Self::new(FlowModel::Uniform {
            params: UniformParams {
                vector: vector.into(),
            },
        })
    }

    /// Parabolic channel between walls at `offset.x` and `offset.x + channel_width`, flowing
    /// along +Y (or -Y for a negative `max_velocity`).
    pub fn from_channel_flow_model(
        channel_width: f64,
        max_velocity: f64,
        offset: impl Into<DVec2>,
    ) -> Result<Self> {
        check_channel(channel_width, max_velocity)?;
        Ok(Self::new(FlowModel::Channel {
            params: ChannelParams {
                channel_width,
                max_velocity,
                offset: offset.into(),
            },
        }))
    }

    /// Parabolic channel between walls at `x = 0` and `x = channel_width` with a pylon wake
    /// over `pylon_bounds`.
    pub fn from_channel_flow_with_pylon(
        channel_width: f64,
        max_velocity: f64,
        pylon_bounds: (f64, f64),
    ) -> Result<Self> {
        check_channel(channel_width, max_velocity)?;
        let (pylon_start, pylon_end) = pylon_bounds;
        if !pylon_start.is_finite() || !pylon_end.is_finite() || pylon_start >= pylon_end {
            return Err(Error::InvalidConfig(format!(
                "pylon bounds must satisfy start < end, got ({pylon_start}, {pylon_end})"
            )));
        }
        Ok(Self::new(FlowModel::ChannelWithPylon {
            params: PylonParams {
                channel_width,
                max_velocity,
                pylon_start,
                pylon_end,
            },
        }))
    }

    pub fn model(&self) -> &FlowModel {
        &self.model
    }
}

impl Field for VectorField {
    fn sample(&self, p: DVec2) -> DVec2 {
        self.model.evaluate(p).unwrap_or(DVec2::ZERO)
    }
}

pub(crate) fn check_channel(channel_width: f64, max_velocity: f64) -> Result<()> {
    if !channel_width.is_finite() || channel_width <= 0.0 {
        return Err(Error::DegenerateGeometry(format!(
            "channel width must be finite and > 0, got {channel_width}"
        )));
    }
    if !max_velocity.is_finite() {
        return Err(Error::InvalidConfig(format!(
            "max velocity must be finite, got {max_velocity}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_field_is_constant() {
        let f = VectorField::from_uniform_vector((1.5, -0.5));
        assert_eq!(f.sample(DVec2::new(-100.0, 3.0)), DVec2::new(1.5, -0.5));
        assert_eq!(f.sample_xy(7.0, 7.0), (1.5, -0.5));
    }

    #[test]
    fn channel_field_is_zero_at_walls_and_symmetric() {
        let f = VectorField::from_channel_flow_model(10.0, 3.0, (0.0, 0.0)).expect("channel");
        assert_eq!(f.sample(DVec2::new(0.0, 1.0)), DVec2::ZERO);
        assert!(f.sample(DVec2::new(10.0, 1.0)).length() < 1e-12);
        assert!((f.sample(DVec2::new(5.0, 1.0)).y - 3.0).abs() < 1e-12);
        let left = f.sample(DVec2::new(2.5, 0.0));
        let right = f.sample(DVec2::new(7.5, 0.0));
        assert!((left - right).length() < 1e-12);
    }

    #[test]
    fn pylon_field_matches_piecewise_profile() {
        let f = VectorField::from_channel_flow_with_pylon(20.0, -2.0, (8.0, 12.0)).expect("pylon");
        assert_eq!(f.sample(DVec2::new(0.0, 0.0)), DVec2::ZERO);
        assert!((f.sample(DVec2::new(6.0, 0.0)).y + 1.68).abs() < 1e-12);
        assert!((f.sample(DVec2::new(8.0, 0.0)).y + 1.92).abs() < 1e-12);
        assert!(f.sample(DVec2::new(10.0, 0.0)).y.abs() < 1e-12);
        assert!((f.sample(DVec2::new(12.0, 0.0)).y + 1.92).abs() < 1e-12);
        assert!((f.sample(DVec2::new(11.0, 0.0)).y + 0.96).abs() < 1e-12);
    }

    #[test]
    fn invalid_channel_parameters_fail_fast() {
        assert!(matches!(
            VectorField::from_channel_flow_model(0.0, 1.0, (0.0, 0.0)),
            Err(Error::DegenerateGeometry(_))
        ));
        assert!(matches!(
            VectorField::from_channel_flow_with_pylon(20.0, 1.0, (12.0, 8.0)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn fields_work_behind_shared_pointers() {
        let f: Arc<dyn Field> = Arc::new(VectorField::from_uniform_vector((0.0, 1.0)));
        let by_ref = &f;
        assert_eq!(by_ref.sample(DVec2::ZERO), DVec2::Y);
    }
}
