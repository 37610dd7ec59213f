//! `/sendData` request handling.
//!
//! The chart page posts `{Sp, Tau, K, P, Ki, Kd, dt, N}` and expects
//! `{"X": [...], "Y": [...]}` back. Every request gets a fresh controller, so
//! concurrent or repeated requests never share integral state.

use rg_project::{Scenario, SimulationRequest};

use crate::error::{AppError, AppResult};
use crate::run_service::run_scenario;

/// Decode a request body, simulate the first-order-lag loop, and encode the
/// response body.
///
/// # Errors
///
/// - [`AppError::BadRequest`] if the body is not a complete request record
/// - [`AppError::Plant`] / [`AppError::Simulation`] for invalid parameters
pub fn handle_simulation_request(body: &str) -> AppResult<String> {
    let request: SimulationRequest =
        serde_json::from_str(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    tracing::debug!(?request, "simulation request");

    let scenario = Scenario::from_request("sendData", &request);
    let trajectory = run_scenario(&scenario)?;

    Ok(rg_results::to_json(&trajectory)?)
}
