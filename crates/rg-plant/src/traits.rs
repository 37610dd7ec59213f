//! Core trait for plant models.

/// A discrete-time plant advanced by the simulation driver.
///
/// Plants are deterministic functions of the control input, the previous
/// output and the step size. They hold no mutable state of their own; the
/// driver threads the output from one step into the next. This keeps a plant
/// shareable between independent runs.
pub trait Plant: Send + Sync {
    /// Short name for logging and manifests.
    fn name(&self) -> &str;

    /// Output sample at `t = 0`.
    fn initial_output(&self) -> f64 {
        0.0
    }

    /// Compute the next output from control input `u` and previous output `y_prev`.
    fn step(&self, u: f64, y_prev: f64, dt: f64) -> f64;
}

impl<P: Plant + ?Sized> Plant for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn initial_output(&self) -> f64 {
        (**self).initial_output()
    }

    fn step(&self, u: f64, y_prev: f64, dt: f64) -> f64 {
        (**self).step(u, y_prev, dt)
    }
}
