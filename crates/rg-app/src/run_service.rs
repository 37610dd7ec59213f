//! Run execution and caching service.

use std::path::Path;
use std::time::Instant;

use rg_project::Scenario;
use rg_results::{RunManifest, RunStore, RunType};
use rg_sim::{GainSweep, SweepPoint, Trajectory};

use crate::error::AppResult;
use crate::scenario_compile::compile_scenario;
use crate::scenario_service;

/// Version string folded into every run id.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub engine_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            engine_version: ENGINE_VERSION.to_string(),
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub scenario_path: &'a Path,
    pub options: RunOptions,
}

/// Wall-clock breakdown of a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compile_time_s: f64,
    pub simulate_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub trajectory: Trajectory,
    pub loaded_from_cache: bool,
    pub timing: RunTimingSummary,
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    let scenario = scenario_service::load_scenario(request.scenario_path)?;
    let run_id = rg_results::compute_run_id(&scenario, &request.options.engine_version);
    let store = RunStore::for_scenario(request.scenario_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        let load_started = Instant::now();
        let manifest = store.load_manifest(&run_id)?;
        let trajectory = store.load_trajectory(&run_id)?;
        timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
        timing.total_time_s = started.elapsed().as_secs_f64();

        tracing::info!(run_id = %run_id, scenario = %scenario.name, "loaded cached run");

        return Ok(RunResponse {
            run_id,
            manifest,
            trajectory,
            loaded_from_cache: true,
            timing,
        });
    }

    let (manifest, trajectory) = execute_run(
        &scenario,
        &store,
        &run_id,
        &request.options.engine_version,
        &mut timing,
    )?;
    timing.total_time_s = started.elapsed().as_secs_f64();

    Ok(RunResponse {
        run_id,
        manifest,
        trajectory,
        loaded_from_cache: false,
        timing,
    })
}

fn execute_run(
    scenario: &Scenario,
    store: &RunStore,
    run_id: &str,
    engine_version: &str,
    timing: &mut RunTimingSummary,
) -> AppResult<(RunManifest, Trajectory)> {
    let compile_started = Instant::now();
    let compiled = compile_scenario(scenario)?;
    timing.compile_time_s = compile_started.elapsed().as_secs_f64();

    let simulate_started = Instant::now();
    let trajectory = rg_sim::simulate(&compiled.config, &compiled.plant)?;
    timing.simulate_time_s = simulate_started.elapsed().as_secs_f64();

    if trajectory.has_non_finite() {
        tracing::warn!(run_id, scenario = %scenario.name, "trajectory contains non-finite samples");
    }

    let manifest = RunManifest {
        run_id: run_id.to_string(),
        scenario_name: scenario.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        run_type: RunType::for_scenario(scenario, trajectory.steps()),
        engine_version: engine_version.to_string(),
    };

    let save_started = Instant::now();
    store.save_run(&manifest, &trajectory)?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();

    tracing::info!(
        run_id,
        scenario = %scenario.name,
        samples = trajectory.len(),
        "run completed"
    );

    Ok((manifest, trajectory))
}

/// Simulate a scenario without touching the run store.
pub fn run_scenario(scenario: &Scenario) -> AppResult<Trajectory> {
    let compiled = compile_scenario(scenario)?;
    Ok(rg_sim::simulate(&compiled.config, &compiled.plant)?)
}

/// Sweep one gain of a scenario's controller.
pub fn sweep_scenario(scenario: &Scenario, sweep: &GainSweep) -> AppResult<Vec<SweepPoint>> {
    let compiled = compile_scenario(scenario)?;
    Ok(rg_sim::run_gain_sweep(
        &compiled.config,
        &compiled.plant,
        sweep,
    )?)
}

/// List all runs stored next to a scenario, most recent first.
pub fn list_runs(scenario_path: &Path, scenario_name: Option<&str>) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_scenario(scenario_path)?;

    let mut runs = store.list_runs(scenario_name)?;
    runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)); // Most recent first
    Ok(runs)
}

/// Load a specific run.
pub fn load_run(scenario_path: &Path, run_id: &str) -> AppResult<(RunManifest, Trajectory)> {
    let store = RunStore::for_scenario(scenario_path)?;

    let manifest = store.load_manifest(run_id)?;
    let trajectory = store.load_trajectory(run_id)?;

    Ok((manifest, trajectory))
}
