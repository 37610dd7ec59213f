//! Shared application service layer for regulation.
//!
//! This crate provides the interface the CLI is built on: scenario loading,
//! compilation into a runnable loop, cached run execution, the `/sendData`
//! responder, result queries, and plotting.

pub mod error;
pub mod plot;
pub mod query;
pub mod responder;
pub mod run_service;
pub mod scenario_compile;
pub mod scenario_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use plot::{PlotFormat, PlotOptions, PlotSeries, line, multiple_lines};
pub use query::{RunSummary, Variable, extract_series, get_run_summary};
pub use responder::handle_simulation_request;
pub use run_service::{
    ENGINE_VERSION, RunOptions, RunRequest, RunResponse, RunTimingSummary, ensure_run,
    list_runs, load_run, run_scenario, sweep_scenario,
};
pub use scenario_compile::{CompiledScenario, compile_scenario};
pub use scenario_service::{
    ScenarioSummary, describe_plant, load_scenario, save_scenario, summarize,
};
