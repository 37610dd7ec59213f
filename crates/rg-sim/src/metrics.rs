//! Step-response performance metrics.
//!
//! Computes standard control metrics (rise time, settling time, overshoot,
//! steady-state error) from a trajectory driven toward a constant setpoint.

use crate::trajectory::Trajectory;

/// Standard control loop performance metrics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoopMetrics {
    /// Time for the output to cover 10% of the initial-to-setpoint distance (seconds)
    pub rise_time_10_s: Option<f64>,
    /// Time for the output to cover 90% of the initial-to-setpoint distance (seconds)
    pub rise_time_90_s: Option<f64>,
    /// Time for the output to enter the ±2% band around the setpoint and stay there (seconds)
    pub settling_time_2pct_s: Option<f64>,
    /// Peak overshoot past the setpoint, in percent of the setpoint change
    pub overshoot_pct: Option<f64>,
    /// Final output minus setpoint
    pub steady_state_error: Option<f64>,
    /// Output contains NaN or infinite samples
    pub diverged: bool,
}

impl LoopMetrics {
    /// Returns true if at least some metrics were computed
    pub fn has_data(&self) -> bool {
        self.rise_time_10_s.is_some()
            || self.rise_time_90_s.is_some()
            || self.settling_time_2pct_s.is_some()
            || self.overshoot_pct.is_some()
            || self.steady_state_error.is_some()
    }
}

/// Compute metrics for a trajectory driven toward `setpoint`.
///
/// A diverged trajectory only reports `diverged = true`.
pub fn compute_loop_metrics(trajectory: &Trajectory, setpoint: f64) -> LoopMetrics {
    let mut metrics = LoopMetrics {
        diverged: trajectory.has_non_finite(),
        ..LoopMetrics::default()
    };
    if metrics.diverged {
        return metrics;
    }

    let series: Vec<(f64, f64)> = trajectory.samples().collect();
    let (Some(&(_, initial)), Some(&(_, final_value))) = (series.first(), series.last()) else {
        return metrics;
    };

    metrics.steady_state_error = Some(final_value - setpoint);

    let change = setpoint - initial;
    if change.abs() < 1e-12 {
        return metrics;
    }

    metrics.rise_time_10_s = time_to_fraction(&series, initial, change, 0.1);
    metrics.rise_time_90_s = time_to_fraction(&series, initial, change, 0.9);

    // Peak past the setpoint, in the direction of travel
    let peak_excess = series
        .iter()
        .map(|&(_, v)| (v - setpoint) * change.signum())
        .fold(f64::NEG_INFINITY, f64::max);
    if peak_excess > 0.0 {
        metrics.overshoot_pct = Some(100.0 * peak_excess / change.abs());
    }

    metrics.settling_time_2pct_s = settling_time(&series, setpoint, 0.02 * change.abs());

    metrics
}

/// Time at which the output first covers `fraction` of `change`, linearly
/// interpolated between samples.
fn time_to_fraction(
    series: &[(f64, f64)],
    initial: f64,
    change: f64,
    fraction: f64,
) -> Option<f64> {
    let target = initial + fraction * change;
    let reached = |v: f64| {
        if change > 0.0 {
            v >= target
        } else {
            v <= target
        }
    };

    for (i, &(time, val)) in series.iter().enumerate() {
        if !reached(val) {
            continue;
        }
        if i == 0 {
            return Some(time);
        }
        let (prev_time, prev_val) = series[i - 1];
        let delta_v = val - prev_val;
        if delta_v.abs() > 1e-12 {
            let frac = (target - prev_val) / delta_v;
            return Some(prev_time + frac * (time - prev_time));
        }
        return Some(time);
    }

    None
}

/// First time after which every sample stays strictly within `band` of `target`.
fn settling_time(series: &[(f64, f64)], target: f64, band: f64) -> Option<f64> {
    let mut entry: Option<f64> = None;
    for &(time, val) in series {
        let in_band = (val - target).abs() < band;
        match (in_band, entry) {
            (true, None) => entry = Some(time),
            (false, Some(_)) => entry = None,
            _ => {}
        }
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traj(y: Vec<f64>) -> Trajectory {
        let t: Vec<f64> = (0..y.len()).map(|k| k as f64).collect();
        let u = vec![0.0; y.len() - 1];
        Trajectory::from_parts(t, y, u).unwrap()
    }

    #[test]
    fn overshoot_and_settling() {
        let m = compute_loop_metrics(&traj(vec![0.0, 5.0, 11.0, 10.5, 10.1, 10.0]), 10.0);
        assert!((m.overshoot_pct.unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(m.settling_time_2pct_s, Some(4.0));
        assert_eq!(m.steady_state_error, Some(0.0));
        // 10% of 10 is reached between t=0 and t=1
        assert!((m.rise_time_10_s.unwrap() - 0.2).abs() < 1e-9);
        assert!(m.has_data());
    }

    #[test]
    fn no_overshoot_for_monotone_response() {
        let m = compute_loop_metrics(&traj(vec![0.0, 5.0, 8.0, 9.9]), 10.0);
        assert_eq!(m.overshoot_pct, None);
    }

    #[test]
    fn downward_step() {
        let m = compute_loop_metrics(&traj(vec![10.0, 4.0, -1.0, 0.0]), 0.0);
        assert!((m.overshoot_pct.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn diverged_trajectory_reports_only_divergence() {
        let m = compute_loop_metrics(&traj(vec![0.0, f64::INFINITY, f64::NAN]), 1.0);
        assert!(m.diverged);
        assert!(!m.has_data());
    }
}
