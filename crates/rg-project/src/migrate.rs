//! Schema migration framework.

use crate::ProjectError;
use crate::schema::Scenario;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut scenario: Scenario) -> Result<Scenario, ProjectError> {
    while scenario.version < LATEST_VERSION {
        scenario = migrate_one_version(scenario)?;
    }
    Ok(scenario)
}

fn migrate_one_version(scenario: Scenario) -> Result<Scenario, ProjectError> {
    match scenario.version {
        0 => migrate_v0_to_v1(scenario),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files predate the version field; the layout is unchanged.
fn migrate_v0_to_v1(mut scenario: Scenario) -> Result<Scenario, ProjectError> {
    scenario.version = 1;
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ControllerDef, PlantDef};

    #[test]
    fn unversioned_scenario_migrates() {
        let scenario = Scenario {
            version: 0,
            name: "legacy".to_string(),
            setpoint: 1.0,
            controller: ControllerDef::default(),
            dt_s: 0.1,
            steps: 10.0,
            plant: PlantDef::FirstOrderLag {
                tau_s: 1.0,
                k: 1.0,
                initial_output: 0.0,
            },
        };
        let migrated = migrate_to_latest(scenario).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
    }
}
