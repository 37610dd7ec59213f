//! Simulation record.

use crate::error::{SimError, SimResult};

/// Output of one run: `N + 1` samples of `(t, y)` plus the `N` controller
/// outputs that produced samples `1..=N`.
///
/// `t[0] = 0` and `t[k] = t[k-1] + dt`. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    t: Vec<f64>,
    y: Vec<f64>,
    u: Vec<f64>,
}

impl Trajectory {
    pub(crate) fn with_capacity(steps: usize) -> Self {
        Self {
            t: Vec::with_capacity(steps + 1),
            y: Vec::with_capacity(steps + 1),
            u: Vec::with_capacity(steps),
        }
    }

    pub(crate) fn push_initial(&mut self, y0: f64) {
        self.t.push(0.0);
        self.y.push(y0);
    }

    pub(crate) fn push_step(&mut self, t: f64, u: f64, y: f64) {
        self.t.push(t);
        self.u.push(u);
        self.y.push(y);
    }

    /// Rebuild a trajectory from stored series.
    ///
    /// # Errors
    ///
    /// Returns error if the series are empty, if `t` and `y` differ in length,
    /// or if `u` is not exactly one shorter than `t`.
    pub fn from_parts(t: Vec<f64>, y: Vec<f64>, u: Vec<f64>) -> SimResult<Self> {
        if t.is_empty() {
            return Err(SimError::InvalidTrajectory {
                what: "trajectory has no samples".to_string(),
            });
        }
        if t.len() != y.len() {
            return Err(SimError::InvalidTrajectory {
                what: format!("t has {} samples but y has {}", t.len(), y.len()),
            });
        }
        if u.len() + 1 != t.len() {
            return Err(SimError::InvalidTrajectory {
                what: format!(
                    "expected {} control samples, found {}",
                    t.len() - 1,
                    u.len()
                ),
            });
        }
        Ok(Self { t, y, u })
    }

    /// Time axis.
    pub fn t(&self) -> &[f64] {
        &self.t
    }

    /// Plant output.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Controller outputs; `control()[k-1]` produced `y()[k]`.
    pub fn control(&self) -> &[f64] {
        &self.u
    }

    /// Number of samples (`N + 1`).
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Always false for a trajectory produced by the driver.
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Number of steps taken (`N`).
    pub fn steps(&self) -> usize {
        self.u.len()
    }

    /// Iterate `(t, y)` pairs in time order.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.t.iter().copied().zip(self.y.iter().copied())
    }

    /// Final `(t, y)` sample.
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.t.last()?, *self.y.last()?))
    }

    /// True if any output sample is NaN or infinite.
    pub fn has_non_finite(&self) -> bool {
        self.y.iter().any(|v| !v.is_finite())
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.t, self.y, self.u)
    }
}
