//! Error types for simulation operations.

use rg_plant::PlantError;
use thiserror::Error;

/// Errors encountered before a simulation starts.
///
/// Once the loop runs it cannot fail: NaN or infinite samples produced by an
/// unstable configuration are part of the returned trajectory.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Configuration error: {what}")]
    Configuration { what: &'static str },

    #[error("Non-finite configuration value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid trajectory: {what}")]
    InvalidTrajectory { what: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    /// True for errors caused by the run configuration (plant or driver parameters).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SimError::Configuration { .. } | SimError::NonFinite { .. }
        )
    }
}

impl From<PlantError> for SimError {
    fn from(e: PlantError) -> Self {
        match e {
            PlantError::Configuration { what } => SimError::Configuration { what },
            PlantError::NonFinite { what, value } => SimError::NonFinite { what, value },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_errors_are_configuration_errors() {
        let err: SimError = PlantError::Configuration {
            what: "tau must be nonzero",
        }
        .into();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("tau"));
    }

    #[test]
    fn invalid_arg_is_not_configuration() {
        let err = SimError::InvalidArg { what: "points" };
        assert!(!err.is_configuration());
    }
}
