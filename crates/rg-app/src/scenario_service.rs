//! Scenario loading, saving, and introspection.

use std::path::Path;

use rg_project::{PlantDef, Scenario};

use crate::error::{AppError, AppResult};

/// One-line description of a scenario for listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSummary {
    pub name: String,
    pub plant_kind: &'static str,
    pub setpoint: f64,
    pub dt_s: f64,
    pub steps: f64,
    pub t_end_s: f64,
}

/// Load, migrate, and validate a scenario file (YAML or JSON by extension).
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    if !path.exists() {
        return Err(AppError::ScenarioFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    let scenario = rg_project::load_path(path)?;
    tracing::debug!(name = %scenario.name, plant = scenario.plant.kind(), "loaded scenario");
    Ok(scenario)
}

/// Validate and write a scenario file (YAML or JSON by extension).
pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    rg_project::save_path(path, scenario)?;
    Ok(())
}

pub fn summarize(scenario: &Scenario) -> ScenarioSummary {
    ScenarioSummary {
        name: scenario.name.clone(),
        plant_kind: scenario.plant.kind(),
        setpoint: scenario.setpoint,
        dt_s: scenario.dt_s,
        steps: scenario.steps,
        t_end_s: scenario.dt_s * scenario.steps.trunc(),
    }
}

/// Describe the plant parameters in a human-readable line.
pub fn describe_plant(plant: &PlantDef) -> String {
    match plant {
        PlantDef::FirstOrderLag {
            tau_s,
            k,
            initial_output,
        } => format!("first-order lag: tau = {tau_s} s, K = {k}, y0 = {initial_output}"),
        PlantDef::ReactivePower {
            p_demand_w,
            electrical,
        } => format!(
            "reactive power at POC: P = {} W, L = {} H, C = {} F, R = {} Ohm, f = {} Hz, U = {} V",
            p_demand_w,
            electrical.inductance_h,
            electrical.capacitance_f,
            electrical.resistance_ohm,
            electrical.frequency_hz,
            electrical.u_poc_v
        ),
    }
}
