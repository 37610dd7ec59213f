//! Content-based hashing for run IDs.

use rg_project::Scenario;
use sha2::{Digest, Sha256};

/// Run id for `scenario` simulated by engine `engine_version`.
///
/// The scenario name is part of the hash, so renaming a scenario yields a
/// fresh run.
pub fn compute_run_id(scenario: &Scenario, engine_version: &str) -> String {
    let mut hasher = Sha256::new();

    let scenario_json = serde_json::to_string(scenario).unwrap_or_default();
    hasher.update(scenario_json.as_bytes());

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rg_project::{ControllerDef, LATEST_VERSION, PlantDef};

    fn scenario(kp: f64) -> Scenario {
        Scenario {
            version: LATEST_VERSION,
            name: "Test".to_string(),
            setpoint: 10.0,
            controller: ControllerDef {
                kp,
                ki: 10.0,
                kd: 0.0,
            },
            dt_s: 0.001,
            steps: 1000.0,
            plant: PlantDef::FirstOrderLag {
                tau_s: 1.0,
                k: 1.0,
                initial_output: 0.0,
            },
        }
    }

    #[test]
    fn hash_stability() {
        let s = scenario(5.0);
        let hash1 = compute_run_id(&s, "v1");
        let hash2 = compute_run_id(&s, "v1");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        assert_ne!(
            compute_run_id(&scenario(5.0), "v1"),
            compute_run_id(&scenario(6.0), "v1")
        );
        assert_ne!(
            compute_run_id(&scenario(5.0), "v1"),
            compute_run_id(&scenario(5.0), "v2")
        );
    }
}
