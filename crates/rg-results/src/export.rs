//! Trajectory export formats.
//!
//! The wire form is `{"X": [...], "Y": [...]}` with time in `X` and plant
//! output in `Y`. Both arrays always have the same length.

use rg_sim::Trajectory;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::{ResultsError, ResultsResult};

pub const DEFAULT_CSV_HEADER: &str = "time_s,value";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesXY {
    #[serde(rename = "X")]
    x: Vec<f64>,
    #[serde(rename = "Y")]
    y: Vec<f64>,
}

impl SeriesXY {
    pub fn from_parts(x: Vec<f64>, y: Vec<f64>) -> ResultsResult<Self> {
        if x.len() != y.len() {
            return Err(ResultsError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

impl From<&Trajectory> for SeriesXY {
    fn from(traj: &Trajectory) -> Self {
        Self {
            x: traj.t().to_vec(),
            y: traj.y().to_vec(),
        }
    }
}

/// Encode the `(t, y)` series as a compact `{"X","Y"}` object.
///
/// NaN and infinite samples are not representable in JSON and encode as
/// `null`.
pub fn to_json(traj: &Trajectory) -> ResultsResult<String> {
    Ok(serde_json::to_string(&SeriesXY::from(traj))?)
}

pub fn to_json_pretty(traj: &Trajectory) -> ResultsResult<String> {
    Ok(serde_json::to_string_pretty(&SeriesXY::from(traj))?)
}

pub fn xy_pairs(traj: &Trajectory) -> Vec<(f64, f64)> {
    traj.samples().collect()
}

/// One row per sample. `header` of `None` uses [`DEFAULT_CSV_HEADER`].
pub fn to_csv(traj: &Trajectory, header: Option<&str>) -> String {
    let mut out = String::with_capacity(traj.len() * 24);
    out.push_str(header.unwrap_or(DEFAULT_CSV_HEADER));
    out.push('\n');
    for (t, y) in traj.samples() {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{t},{y}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trajectory {
        Trajectory::from_parts(vec![0.0, 0.5, 1.0], vec![0.0, 2.5, 4.0], vec![5.0, 3.0]).unwrap()
    }

    #[test]
    fn json_uses_upper_case_keys() {
        let json = to_json(&sample()).unwrap();
        assert_eq!(json, r#"{"X":[0.0,0.5,1.0],"Y":[0.0,2.5,4.0]}"#);
    }

    #[test]
    fn json_decodes_back_into_series() {
        let json = to_json_pretty(&sample()).unwrap();
        let series: SeriesXY = serde_json::from_str(&json).unwrap();
        assert_eq!(series.x(), &[0.0, 0.5, 1.0]);
        assert_eq!(series.y(), &[0.0, 2.5, 4.0]);
    }

    #[test]
    fn non_finite_samples_encode_as_null() {
        let traj =
            Trajectory::from_parts(vec![0.0, 1.0], vec![0.0, f64::NAN], vec![1.0]).unwrap();
        let json = to_json(&traj).unwrap();
        assert!(json.contains("null"));
    }

    #[test]
    fn pairs_follow_time_order() {
        assert_eq!(
            xy_pairs(&sample()),
            vec![(0.0, 0.0), (0.5, 2.5), (1.0, 4.0)]
        );
    }

    #[test]
    fn csv_rows() {
        let csv = to_csv(&sample(), None);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], DEFAULT_CSV_HEADER);
        assert_eq!(lines[1], "0,0");
        assert_eq!(lines[2], "0.5,2.5");
        assert_eq!(lines.len(), 4);

        let csv = to_csv(&sample(), Some("t,q_poc"));
        assert!(csv.starts_with("t,q_poc\n"));
    }

    #[test]
    fn mismatched_parts_rejected() {
        assert!(matches!(
            SeriesXY::from_parts(vec![0.0, 1.0], vec![0.0]),
            Err(ResultsError::LengthMismatch { x_len: 2, y_len: 1 })
        ));
    }
}
