//! Query helpers for extracting data from loaded runs.

use rg_sim::Trajectory;

use crate::error::{AppError, AppResult};

/// Summary of a run's time range and data.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub time_range: (f64, f64),
    pub sample_count: usize,
    pub final_output: f64,
    pub peak_magnitude: f64,
    pub diverged: bool,
}

/// Get run summary from a trajectory.
pub fn get_run_summary(trajectory: &Trajectory) -> AppResult<RunSummary> {
    let (Some(&t_min), Some((t_max, final_output))) = (trajectory.t().first(), trajectory.last())
    else {
        return Err(AppError::InvalidInput("No samples in run".to_string()));
    };

    Ok(RunSummary {
        time_range: (t_min, t_max),
        sample_count: trajectory.len(),
        final_output,
        peak_magnitude: rg_core::max_abs(trajectory.y()),
        diverged: trajectory.has_non_finite(),
    })
}

/// Series that can be pulled out of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    /// Plant output `y`, one value per sample
    Output,
    /// Controller output `u`, stamped with the time of the sample it produced
    Control,
}

impl Variable {
    pub fn parse(name: &str) -> AppResult<Self> {
        match name {
            "y" | "output" => Ok(Self::Output),
            "u" | "control" => Ok(Self::Control),
            _ => Err(AppError::InvalidInput(format!(
                "Unknown variable: {} (expected 'output' or 'control')",
                name
            ))),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Output => "output",
            Self::Control => "control",
        }
    }
}

/// Extract a time series for one variable.
pub fn extract_series(trajectory: &Trajectory, variable: Variable) -> Vec<(f64, f64)> {
    match variable {
        Variable::Output => trajectory.samples().collect(),
        Variable::Control => trajectory
            .t()
            .iter()
            .skip(1)
            .copied()
            .zip(trajectory.control().iter().copied())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traj() -> Trajectory {
        Trajectory::from_parts(vec![0.0, 0.1, 0.2], vec![0.0, -3.0, 2.0], vec![5.0, 4.0]).unwrap()
    }

    #[test]
    fn summary_reports_range_and_peak() {
        let summary = get_run_summary(&traj()).unwrap();
        assert_eq!(summary.time_range, (0.0, 0.2));
        assert_eq!(summary.sample_count, 3);
        assert_eq!(summary.final_output, 2.0);
        assert_eq!(summary.peak_magnitude, 3.0);
        assert!(!summary.diverged);
    }

    #[test]
    fn control_series_starts_at_first_step() {
        let series = extract_series(&traj(), Variable::Control);
        assert_eq!(series, vec![(0.1, 5.0), (0.2, 4.0)]);
        assert_eq!(extract_series(&traj(), Variable::Output).len(), 3);
    }

    #[test]
    fn unknown_variable_rejected() {
        assert!(Variable::parse("pressure").is_err());
        assert_eq!(Variable::parse("u").unwrap(), Variable::Control);
    }
}
