//! Simulation run configuration.

use rg_controls::PidGains;

use crate::error::{SimError, SimResult};

/// Upper bound on the step count accepted by [`SimConfig::validate`].
pub const MAX_STEPS: usize = 100_000_000;

/// Controller and time-axis settings for one run.
///
/// The plant is supplied separately so the same configuration can drive any
/// [`rg_plant::Plant`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Target value for the plant output
    pub setpoint: f64,
    /// PID gains
    pub gains: PidGains,
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Number of steps beyond the initial sample, as supplied by the caller.
    ///
    /// Fractional values are truncated toward zero.
    pub steps: f64,
}

impl SimConfig {
    pub fn new(setpoint: f64, gains: PidGains, dt: f64, steps: f64) -> Self {
        Self {
            setpoint,
            gains,
            dt,
            steps,
        }
    }

    /// Check the time axis and return the integer step count.
    ///
    /// # Errors
    ///
    /// - `dt` not strictly positive or not finite
    /// - `steps` negative, not finite, or above [`MAX_STEPS`]
    pub fn validate(&self) -> SimResult<usize> {
        if !self.dt.is_finite() {
            return Err(SimError::NonFinite {
                what: "dt",
                value: self.dt,
            });
        }
        if self.dt <= 0.0 {
            return Err(SimError::Configuration {
                what: "dt must be positive",
            });
        }
        if !self.steps.is_finite() {
            return Err(SimError::NonFinite {
                what: "N",
                value: self.steps,
            });
        }
        if self.steps < 0.0 {
            return Err(SimError::Configuration {
                what: "N must be non-negative",
            });
        }
        let steps = self.steps.trunc();
        if steps > MAX_STEPS as f64 {
            return Err(SimError::Configuration {
                what: "N exceeds the maximum step count",
            });
        }
        Ok(steps as usize)
    }

    /// Simulated end time, `steps * dt` (before accumulation rounding).
    pub fn t_end(&self) -> f64 {
        self.steps.trunc() * self.dt
    }
}
