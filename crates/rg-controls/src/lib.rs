//! Controller primitives for regulation.
//!
//! The only controller is a discrete PID operating on a scalar `f64` error
//! signal. Integral and derivative terms are always scaled by the step size
//! passed to [`PidController::compute`]; a step of `1.0` reproduces the
//! unscaled textbook recurrence.

pub mod controller;

pub use controller::{PidController, PidGains, PidState, PidTerms};
