//! Edge cost heuristics for planners.
//!
//! [`EuclideanDistance`] and [`DirectedDistance`] are purely geometric.
//! [`OpposingFlowEnergy`] integrates against a [`Field`] along the straight edge.
use glam::DVec2;

use crate::error::{Error, Result};
use crate::field::Field;

/// Cost of travelling straight from `start` to `end`.
pub trait Heuristic: Send + Sync {
    fn compute_cost(&self, start: DVec2, end: DVec2) -> f64;
}

/// Straight-line distance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EuclideanDistance;

impl Heuristic for EuclideanDistance {
    fn compute_cost(&self, start: DVec2, end: DVec2) -> f64 {
        start.distance(end)
    }
}

/// Absolute displacement along a fixed direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectedDistance {
    direction: DVec2,
}

impl DirectedDistance {
    pub fn new(direction: impl Into<DVec2>) -> Result<Self> {
        let direction = direction.into();
        let direction = direction.try_normalize().ok_or_else(|| {
            Error::DegenerateGeometry(format!("direction {direction} cannot be normalized"))
        })?;
        Ok(Self { direction })
    }

    /// Measures displacement perpendicular to `vector` (rotated +90 degrees).
    pub fn perpendicular(vector: impl Into<DVec2>) -> Result<Self> {
        Self::new(vector.into().perp())
    }

    /// Unit direction costs are measured along.
    pub fn direction(&self) -> DVec2 {
        self.direction
    }
}

impl Heuristic for DirectedDistance {
    fn compute_cost(&self, start: DVec2, end: DVec2) -> f64 {
        self.direction.dot(end - start).abs()
    }
}

/// Configuration for [`OpposingFlowEnergy`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowEnergyConfig {
    /// Speed through the water (or air) the vehicle holds along the edge.
    pub nominal_speed: f64,
    /// Integration time step.
    pub delta: f64,
}

impl Default for FlowEnergyConfig {
    fn default() -> Self {
        Self {
            nominal_speed: 0.5,
            delta: 0.01,
        }
    }
}

impl FlowEnergyConfig {
    pub fn with_nominal_speed(mut self, nominal_speed: f64) -> Self {
        self.nominal_speed = nominal_speed;
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        check_speed(self.nominal_speed)?;
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(Error::InvalidConfig("delta must be finite and > 0".into()));
        }
        Ok(())
    }
}

/// Energy spent holding a straight course against a flow field.
///
/// The edge is walked in steps of `nominal_speed * delta`; each step adds
/// `|v_nominal - avg(v_flow(step start), v_flow(step end))| * delta`.
pub struct OpposingFlowEnergy<F: Field> {
    field: F,
    config: FlowEnergyConfig,
}

impl<F: Field> OpposingFlowEnergy<F> {
    pub fn new(field: F, config: FlowEnergyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { field, config })
    }

    pub fn config(&self) -> &FlowEnergyConfig {
        &self.config
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// Cost at an explicit `nominal_speed` instead of the configured one.
    pub fn compute_cost_at_speed(&self, start: DVec2, end: DVec2, nominal_speed: f64) -> Result<f64> {
        check_speed(nominal_speed)?;
        Ok(self.integrate(start, end, nominal_speed))
    }

    fn integrate(&self, start: DVec2, end: DVec2, nominal_speed: f64) -> f64 {
        let diff = end - start;
        let length = diff.length();
        if length == 0.0 {
            return 0.0;
        }
        let delta = self.config.delta;
        let nominal_vel = diff / length * nominal_speed;
        let step = nominal_vel * delta;

        // Steps too small to move the position would otherwise never reach `length`.
        let max_steps = (length / step.length()).ceil() as usize;

        let mut segment_end = start + step;
        let mut start_vel = self.field.sample(start);
        let mut end_vel = self.field.sample(segment_end);
        let mut total = 0.0;
        for _ in 0..max_steps {
            if segment_end.distance(start) >= length {
                break;
            }
            let avg_vel = (start_vel + end_vel) * 0.5;
            total += (nominal_vel - avg_vel).length() * delta;

            segment_end += step;
            start_vel = end_vel;
            end_vel = self.field.sample(segment_end);
        }
        total
    }
}

impl<F: Field> Heuristic for OpposingFlowEnergy<F> {
    fn compute_cost(&self, start: DVec2, end: DVec2) -> f64 {
        self.integrate(start, end, self.config.nominal_speed)
    }
}

fn check_speed(nominal_speed: f64) -> Result<()> {
    if !nominal_speed.is_finite() || nominal_speed <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "nominal speed must be finite and > 0, got {nominal_speed}"
        )));
    }
    Ok(())
}
