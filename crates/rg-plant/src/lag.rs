//! First-order lag plant.

use crate::error::PlantResult;
use crate::traits::Plant;
use rg_core::{ensure_finite, ensure_nonzero};

/// First-order lag `tau * dy/dt = k*u - y`, discretized with forward Euler:
///
/// `y_next = y_prev + (dt / tau) * (k * u - y_prev)`
///
/// No bound on `dt / tau` is enforced. For `dt / tau > 2` the open-loop
/// recurrence is unstable and the output diverges; that divergence is
/// reported as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstOrderLag {
    /// Time constant (seconds), nonzero
    pub tau: f64,
    /// Static gain
    pub k: f64,
    /// Output at t = 0
    pub initial: f64,
}

impl FirstOrderLag {
    /// Create a lag plant starting from rest.
    ///
    /// # Errors
    ///
    /// Returns error if `tau` is zero or if any parameter is not finite.
    pub fn new(tau: f64, k: f64) -> PlantResult<Self> {
        ensure_finite(tau, "tau")?;
        ensure_finite(k, "k")?;
        ensure_nonzero(tau, "tau must be nonzero")?;
        Ok(Self {
            tau,
            k,
            initial: 0.0,
        })
    }

    /// Start from a nonzero output.
    pub fn with_initial_output(mut self, y0: f64) -> Self {
        self.initial = y0;
        self
    }

    /// Steady-state output for a constant input.
    pub fn steady_state(&self, u: f64) -> f64 {
        self.k * u
    }
}

impl Plant for FirstOrderLag {
    fn name(&self) -> &str {
        "first_order_lag"
    }

    fn initial_output(&self) -> f64 {
        self.initial
    }

    fn step(&self, u: f64, y_prev: f64, dt: f64) -> f64 {
        y_prev + (dt / self.tau) * (self.k * u - y_prev)
    }
}
