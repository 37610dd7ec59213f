//! rg-results: trajectory export and the on-disk run cache.

pub mod export;
pub mod hash;
pub mod store;
pub mod types;

pub use export::{SeriesXY, to_csv, to_json, to_json_pretty, xy_pairs};
pub use hash::compute_run_id;
pub use store::RunStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },

    #[error("Length mismatch: {x_len} x values vs {y_len} y values")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("Stored trajectory is corrupt: {0}")]
    Trajectory(#[from] rg_sim::SimError),
}
