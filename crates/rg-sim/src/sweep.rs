//! Gain sweeps.
//!
//! Runs one simulation per gain value. Every point builds its own controller,
//! so the points execute in parallel on the rayon pool with nothing shared but
//! the read-only plant.

use rayon::prelude::*;
use rg_core::max_abs;
use rg_plant::Plant;

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::sim::simulate;
use crate::trajectory::Trajectory;

/// Gain varied by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gain {
    Kp,
    Ki,
    Kd,
}

impl Gain {
    pub fn label(&self) -> &'static str {
        match self {
            Gain::Kp => "Kp",
            Gain::Ki => "Ki",
            Gain::Kd => "Kd",
        }
    }

    fn apply(&self, config: &mut SimConfig, value: f64) {
        match self {
            Gain::Kp => config.gains.kp = value,
            Gain::Ki => config.gains.ki = value,
            Gain::Kd => config.gains.kd = value,
        }
    }
}

/// Linear sweep of one gain.
#[derive(Debug, Clone, PartialEq)]
pub struct GainSweep {
    pub gain: Gain,
    pub start: f64,
    pub end: f64,
    /// Number of points, at least 2
    pub points: usize,
}

impl GainSweep {
    pub fn new(gain: Gain, start: f64, end: f64, points: usize) -> SimResult<Self> {
        if points < 2 {
            return Err(SimError::InvalidArg {
                what: "sweep must have at least 2 points",
            });
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(SimError::InvalidArg {
                what: "sweep bounds must be finite",
            });
        }
        if start == end {
            return Err(SimError::InvalidArg {
                what: "sweep start and end must differ",
            });
        }
        Ok(Self {
            gain,
            start,
            end,
            points,
        })
    }

    /// Uniformly spaced values, endpoint exact.
    pub fn values(&self) -> Vec<f64> {
        let delta = (self.end - self.start) / (self.points - 1) as f64;
        let mut values: Vec<f64> = (0..self.points)
            .map(|i| self.start + i as f64 * delta)
            .collect();
        if let Some(last) = values.last_mut() {
            *last = self.end;
        }
        values
    }
}

/// One simulated point of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    /// Value of the swept gain
    pub value: f64,
    /// Output at the last sample
    pub final_output: f64,
    /// Largest output magnitude over the run, NaN samples ignored
    pub peak_magnitude: f64,
    pub trajectory: Trajectory,
}

/// Simulate every point of `sweep`, in sweep order.
pub fn run_gain_sweep<P: Plant>(
    config: &SimConfig,
    plant: &P,
    sweep: &GainSweep,
) -> SimResult<Vec<SweepPoint>> {
    config.validate()?;

    let values = sweep.values();
    tracing::info!(
        gain = sweep.gain.label(),
        points = values.len(),
        plant = plant.name(),
        "running gain sweep"
    );

    values
        .par_iter()
        .map(|&value| -> SimResult<SweepPoint> {
            let mut point_config = config.clone();
            sweep.gain.apply(&mut point_config, value);
            let trajectory = simulate(&point_config, plant)?;
            let final_output = trajectory.last().map(|(_, y)| y).unwrap_or(f64::NAN);
            Ok(SweepPoint {
                value,
                final_output,
                peak_magnitude: max_abs(trajectory.y()),
                trajectory,
            })
        })
        .collect()
}
