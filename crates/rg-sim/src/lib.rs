//! Closed-loop simulation driver for regulation.
//!
//! Provides:
//! - [`SimConfig`]: setpoint, PID gains, step size and step count
//! - [`simulate`]: the fixed-step loop `u = pid(sp, y); y = plant(u, y)`
//! - [`Trajectory`]: the `(t, y)` record of one run
//! - gain sweeps running independent simulations in parallel
//! - step-response metrics

pub mod config;
pub mod error;
pub mod metrics;
pub mod sim;
pub mod sweep;
pub mod trajectory;

// Re-exports for public API
pub use config::{MAX_STEPS, SimConfig};
pub use error::{SimError, SimResult};
pub use metrics::{LoopMetrics, compute_loop_metrics};
pub use sim::{simulate, simulate_first_order, simulate_reactive_power};
pub use sweep::{Gain, GainSweep, SweepPoint, run_gain_sweep};
pub use trajectory::Trajectory;
