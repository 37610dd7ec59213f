//! Error types for the rg-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Failed to read scenario file: {path}")]
    ScenarioFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid plant configuration: {0}")]
    Plant(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rg-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<rg_project::ProjectError> for AppError {
    fn from(err: rg_project::ProjectError) -> Self {
        match err {
            rg_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Scenario(other.to_string()),
        }
    }
}

impl From<rg_project::ValidationError> for AppError {
    fn from(err: rg_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<rg_plant::PlantError> for AppError {
    fn from(err: rg_plant::PlantError) -> Self {
        AppError::Plant(err.to_string())
    }
}

impl From<rg_sim::SimError> for AppError {
    fn from(err: rg_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<rg_results::ResultsError> for AppError {
    fn from(err: rg_results::ResultsError) -> Self {
        match err {
            rg_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
