//! Result data types.

use rg_project::{PlantDef, Scenario};
use rg_sim::{SimResult, Trajectory};
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_name: String,
    pub timestamp: String,
    pub run_type: RunType,
    pub engine_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RunType {
    FirstOrderLag { dt_s: f64, steps: usize },
    ReactivePower { dt_s: f64, steps: usize },
}

impl RunType {
    /// Describe a run of `scenario` that took `steps` steps.
    pub fn for_scenario(scenario: &Scenario, steps: usize) -> Self {
        let dt_s = scenario.dt_s;
        match scenario.plant {
            PlantDef::FirstOrderLag { .. } => RunType::FirstOrderLag { dt_s, steps },
            PlantDef::ReactivePower { .. } => RunType::ReactivePower { dt_s, steps },
        }
    }

    pub fn steps(&self) -> usize {
        match self {
            RunType::FirstOrderLag { steps, .. } | RunType::ReactivePower { steps, .. } => *steps,
        }
    }
}

/// On-disk form of a [`Trajectory`].
///
/// Non-finite samples from diverged runs are kept as the strings `"NaN"`,
/// `"inf"` and `"-inf"` so that a reloaded run matches the simulated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTrajectory {
    #[serde(with = "lossless_f64")]
    pub t: Vec<f64>,
    #[serde(with = "lossless_f64")]
    pub y: Vec<f64>,
    #[serde(default, with = "lossless_f64")]
    pub u: Vec<f64>,
}

impl From<&Trajectory> for StoredTrajectory {
    fn from(traj: &Trajectory) -> Self {
        Self {
            t: traj.t().to_vec(),
            y: traj.y().to_vec(),
            u: traj.control().to_vec(),
        }
    }
}

impl StoredTrajectory {
    pub fn into_trajectory(self) -> SimResult<Trajectory> {
        Trajectory::from_parts(self.t, self.y, self.u)
    }
}

mod lossless_f64 {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Sample {
        Finite(f64),
        Special(String),
    }

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let samples: Vec<Sample> = values
            .iter()
            .map(|&v| {
                if v.is_finite() {
                    Sample::Finite(v)
                } else {
                    Sample::Special(v.to_string())
                }
            })
            .collect();
        samples.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        Vec::<Sample>::deserialize(deserializer)?
            .into_iter()
            .map(|sample| match sample {
                Sample::Finite(v) => Ok(v),
                Sample::Special(s) => s
                    .parse::<f64>()
                    .map_err(|_| serde::de::Error::custom(format!("invalid sample '{s}'"))),
            })
            .collect()
    }
}
