//! Scenario → runnable loop compilation.

use rg_controls::PidGains;
use rg_plant::{ElectricalSystem, FirstOrderLag, PlantModel, ReactivePowerLoop};
use rg_project::{ElectricalDef, PlantDef, Scenario};
use rg_sim::SimConfig;

use crate::error::AppResult;

/// Simulation settings and plant built from a scenario document.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledScenario {
    pub config: SimConfig,
    pub plant: PlantModel,
}

/// Build the loop described by `scenario`.
///
/// Plant parameters are checked here; the time axis is checked when the
/// simulation starts.
pub fn compile_scenario(scenario: &Scenario) -> AppResult<CompiledScenario> {
    let gains = PidGains::new(
        scenario.controller.kp,
        scenario.controller.ki,
        scenario.controller.kd,
    );
    let config = SimConfig::new(scenario.setpoint, gains, scenario.dt_s, scenario.steps);

    let plant = match &scenario.plant {
        PlantDef::FirstOrderLag {
            tau_s,
            k,
            initial_output,
        } => PlantModel::from(FirstOrderLag::new(*tau_s, *k)?.with_initial_output(*initial_output)),
        PlantDef::ReactivePower {
            p_demand_w,
            electrical,
        } => PlantModel::from(ReactivePowerLoop::new(
            build_electrical(electrical)?,
            *p_demand_w,
        )),
    };

    Ok(CompiledScenario { config, plant })
}

fn build_electrical(def: &ElectricalDef) -> AppResult<ElectricalSystem> {
    Ok(ElectricalSystem::from_si(
        def.inductance_h,
        def.capacitance_f,
        def.resistance_ohm,
        def.frequency_hz,
        def.u_poc_v,
    )?)
}
