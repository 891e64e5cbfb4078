//! Scalar speed profiles shared by the flow models.
use glam::{DMat2, DVec2};
use nalgebra::{DMatrix, DVector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Parabolic channel speed at distance `u` from one wall of a channel `width` wide.
///
/// Zero at both walls (`u = 0`, `u = width`) and `max_velocity` on the centerline.
#[inline]
pub fn channel_speed(u: f64, width: f64, max_velocity: f64) -> f64 {
    (4.0 * u / width - 4.0 * u * u / (width * width)) * max_velocity
}

/// Quadratic speed profile `a·d² + b·d + c` over a distance from a channel center.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadraticProfile {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl QuadraticProfile {
    /// Fits the profile with `q(0) = max_velocity` and `q(±half_width) = min_velocity`.
    pub fn fit(max_velocity: f64, min_velocity: f64, half_width: f64) -> Result<Self> {
        if !half_width.is_finite() || half_width <= 0.0 {
            return Err(Error::DegenerateGeometry(format!(
                "profile half-width must be finite and > 0, got {half_width}"
            )));
        }
        let h = half_width;
        let system = DMat2::from_cols(DVec2::new(h * h, h * h), DVec2::new(h, -h));
        let ab = system.inverse() * DVec2::splat(min_velocity - max_velocity);
        Ok(Self {
            a: ab.x,
            b: ab.y,
            c: max_velocity,
        })
    }

    #[inline]
    pub fn eval(&self, d: f64) -> f64 {
        (self.a * d + self.b) * d + self.c
    }
}

/// Polynomial with coefficients in ascending powers.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// Least-squares fit of the given degree through `(x, y)` samples.
    ///
    /// Needs at least `degree + 1` distinct `x` values.
    pub fn fit(samples: &[(f64, f64)], degree: usize) -> Result<Self> {
        if samples.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(Error::InvalidConfig(
                "polynomial samples must be finite".into(),
            ));
        }
        let mut xs: Vec<f64> = samples.iter().map(|s| s.0).collect();
        xs.sort_by(f64::total_cmp);
        xs.dedup();
        if xs.len() <= degree {
            return Err(Error::InvalidConfig(format!(
                "degree {degree} fit needs {} distinct positions, got {}",
                degree + 1,
                xs.len()
            )));
        }

        let vandermonde =
            DMatrix::from_fn(samples.len(), degree + 1, |i, j| samples[i].0.powi(j as i32));
        let y = DVector::from_iterator(samples.len(), samples.iter().map(|s| s.1));
        let coefficients = vandermonde
            .svd(true, true)
            .solve(&y, 1e-12)
            .map_err(|e| Error::DegenerateGeometry(format!("polynomial fit failed: {e}")))?;
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(Error::DegenerateGeometry(
                "polynomial fit produced non-finite coefficients".into(),
            ));
        }

        Ok(Self {
            coefficients: coefficients.iter().copied().collect(),
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_speed_is_zero_at_walls_and_max_at_center() {
        assert_eq!(channel_speed(0.0, 10.0, 2.0), 0.0);
        assert!(channel_speed(10.0, 10.0, 2.0).abs() < 1e-12);
        assert!((channel_speed(5.0, 10.0, 2.0) - 2.0).abs() < 1e-12);
        assert!((channel_speed(2.0, 10.0, 2.0) - channel_speed(8.0, 10.0, 2.0)).abs() < 1e-12);
    }

    #[test]
    fn quadratic_profile_hits_boundary_conditions() {
        let q = QuadraticProfile::fit(3.0, 1.0, 4.0).expect("fit");
        assert!((q.eval(0.0) - 3.0).abs() < 1e-12);
        assert!((q.eval(4.0) - 1.0).abs() < 1e-12);
        assert!((q.eval(-4.0) - 1.0).abs() < 1e-12);
        assert!(q.b.abs() < 1e-12);
        assert!(q.eval(1.0) > q.eval(2.0));
    }

    #[test]
    fn quadratic_profile_rejects_zero_width() {
        assert!(QuadraticProfile::fit(1.0, 0.0, 0.0).is_err());
        assert!(QuadraticProfile::fit(1.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn polynomial_fit_recovers_exact_quadratic() {
        let samples: Vec<(f64, f64)> = (-3..=3)
            .map(|i| {
                let x = i as f64;
                (x, 1.0 - 0.5 * x + 0.25 * x * x)
            })
            .collect();
        let p = Polynomial::fit(&samples, 2).expect("fit");
        assert_eq!(p.degree(), 2);
        let c = p.coefficients();
        assert!((c[0] - 1.0).abs() < 1e-9);
        assert!((c[1] + 0.5).abs() < 1e-9);
        assert!((c[2] - 0.25).abs() < 1e-9);
        assert!((p.eval(10.0) - (1.0 - 5.0 + 25.0)).abs() < 1e-6);
    }

    #[test]
    fn polynomial_fit_least_squares_line() {
        let p = Polynomial::fit(&[(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 2.0)], 1).expect("fit");
        // Closed-form OLS: slope 0.6, intercept 0.1.
        assert!((p.coefficients()[1] - 0.6).abs() < 1e-9);
        assert!((p.coefficients()[0] - 0.1).abs() < 1e-9);
    }

    #[test]
    fn polynomial_fit_needs_enough_distinct_positions() {
        let err = Polynomial::fit(&[(1.0, 0.0), (1.0, 2.0), (2.0, 1.0)], 2);
        assert!(matches!(err, Err(Error::InvalidConfig(_))));
    }
}
