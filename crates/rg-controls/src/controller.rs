//! PID controller.
//!
//! One controller, one contract: `compute(setpoint, current_value, dt)`.
//! Each call performs, in order:
//! 1. `error = setpoint - current_value`
//! 2. proportional term `kp * error`
//! 3. `integral += error * dt`, integral term `ki * integral`
//! 4. derivative term `kd * (error - previous_error) / dt`
//! 5. `previous_error = error`
//!
//! No clamping, filtering or anti-windup is applied.

use serde::{Deserialize, Serialize};

/// PID gains. Immutable for the lifetime of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    /// True when every gain is exactly zero (no actuation).
    pub fn is_zero(&self) -> bool {
        self.kp == 0.0 && self.ki == 0.0 && self.kd == 0.0
    }
}

/// Mutable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidState {
    /// Accumulated `error * dt`.
    pub integral: f64,
    /// Error seen on the previous call.
    pub previous_error: f64,
}

/// Per-term breakdown of one compute step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidTerms {
    pub error: f64,
    pub proportional: f64,
    pub integral: f64,
    pub derivative: f64,
}

impl PidTerms {
    /// Sum of the three terms, i.e. the controller output.
    pub fn output(&self) -> f64 {
        self.proportional + self.integral + self.derivative
    }
}

/// Stateful discrete PID controller.
///
/// Construct one per simulation run. The state is not synchronized; share
/// it across threads only behind external locking.
///
/// # Example
///
/// ```
/// use rg_controls::PidController;
///
/// let mut pid = PidController::new(2.0, 0.0, 0.0);
/// assert_eq!(pid.compute(10.0, 4.0, 0.1), 12.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PidController {
    gains: PidGains,
    state: PidState,
}

impl PidController {
    /// Create a controller with zeroed state.
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self::from_gains(PidGains::new(kp, ki, kd))
    }

    pub fn from_gains(gains: PidGains) -> Self {
        Self {
            gains,
            state: PidState::default(),
        }
    }

    pub fn gains(&self) -> PidGains {
        self.gains
    }

    pub fn state(&self) -> PidState {
        self.state
    }

    /// Zero the integral and the remembered error.
    pub fn reset(&mut self) {
        self.state = PidState::default();
    }

    /// Advance the controller one step and return the per-term breakdown.
    ///
    /// `dt` must be positive; callers validate it before the first step.
    pub fn compute_terms(&mut self, setpoint: f64, current_value: f64, dt: f64) -> PidTerms {
        let error = setpoint - current_value;

        let proportional = self.gains.kp * error;

        self.state.integral += error * dt;
        let integral = self.gains.ki * self.state.integral;

        let derivative = self.gains.kd * (error - self.state.previous_error) / dt;
        self.state.previous_error = error;

        PidTerms {
            error,
            proportional,
            integral,
            derivative,
        }
    }

    /// Advance the controller one step and return the correction.
    pub fn compute(&mut self, setpoint: f64, current_value: f64, dt: f64) -> f64 {
        self.compute_terms(setpoint, current_value, dt).output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_creation() {
        let pid = PidController::new(1.0, 2.0, 0.5);
        assert_eq!(pid.gains().kp, 1.0);
        assert_eq!(pid.gains().ki, 2.0);
        assert_eq!(pid.gains().kd, 0.5);
        assert_eq!(pid.state(), PidState::default());
    }

    #[test]
    fn proportional_only() {
        let mut pid = PidController::new(2.0, 0.0, 0.0);
        let out = pid.compute(1.0, 0.5, 0.1);
        assert!((out - 1.0).abs() < 1e-12);
    }

    #[test]
    fn integral_accumulates_error_times_dt() {
        let mut pid = PidController::new(0.0, 1.0, 0.0);
        for _ in 0..10 {
            pid.compute(1.0, 0.0, 0.1);
        }
        assert!((pid.state().integral - 1.0).abs() < 1e-12);
    }

    #[test]
    fn derivative_uses_previous_error() {
        let mut pid = PidController::new(0.0, 0.0, 1.0);
        // First call differentiates against the zero initial error.
        let first = pid.compute(1.0, 0.0, 0.5);
        assert_eq!(first, 2.0);
        // Same error again: derivative vanishes.
        let second = pid.compute(1.0, 0.0, 0.5);
        assert_eq!(second, 0.0);
    }

    #[test]
    fn previous_error_updates_even_without_derivative_gain() {
        let mut pid = PidController::new(1.0, 0.0, 0.0);
        pid.compute(3.0, 1.0, 0.1);
        assert_eq!(pid.state().previous_error, 2.0);
    }

    #[test]
    fn zero_gains_output_zero() {
        let mut pid = PidController::new(0.0, 0.0, 0.0);
        assert!(pid.gains().is_zero());
        for k in 0..20 {
            let out = pid.compute(10.0, k as f64, 0.01);
            assert_eq!(out, 0.0);
        }
    }

    #[test]
    fn unit_step_matches_unscaled_recurrence() {
        let (kp, ki, kd) = (1.5, 0.3, 0.7);
        let mut pid = PidController::new(kp, ki, kd);
        let measurements = [0.0, 0.4, 1.1, 1.6, 1.9];
        let mut sum = 0.0;
        let mut prev = 0.0;
        for pv in measurements {
            let e = 2.0 - pv;
            sum += e;
            let expected = kp * e + ki * sum + kd * (e - prev);
            prev = e;
            assert_eq!(pid.compute(2.0, pv, 1.0), expected);
        }
    }

    #[test]
    fn small_step_scales_integral_and_derivative() {
        let dt = 1e-3;
        let mut pid = PidController::new(0.0, 2.0, 0.5);
        let terms = pid.compute_terms(1.0, 0.0, dt);
        assert!((terms.integral - 2.0 * dt).abs() < 1e-15);
        assert!((terms.derivative - 0.5 / dt).abs() < 1e-9);
        assert_eq!(terms.output(), terms.integral + terms.derivative);
    }

    #[test]
    fn reset_clears_state() {
        let mut pid = PidController::new(1.0, 1.0, 1.0);
        pid.compute(5.0, 0.0, 0.1);
        pid.reset();
        assert_eq!(pid.state(), PidState::default());
    }
}
