//! Error types for plant construction.

use rg_core::CoreError;
use thiserror::Error;

/// Errors raised while building a plant from its parameters.
///
/// Numeric blow-ups during stepping are not errors; they show up as
/// non-finite samples in the trajectory.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlantError {
    #[error("Invalid plant configuration: {what}")]
    Configuration { what: &'static str },

    #[error("Non-finite plant parameter {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

pub type PlantResult<T> = Result<T, PlantError>;

impl From<CoreError> for PlantError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, value } => PlantError::NonFinite { what, value },
            CoreError::InvalidArg { what } => PlantError::Configuration { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PlantError::Configuration {
            what: "tau must be nonzero",
        };
        assert!(err.to_string().contains("tau"));
    }

    #[test]
    fn error_conversion() {
        let core = CoreError::InvalidArg { what: "u_poc" };
        let plant: PlantError = core.into();
        assert!(matches!(plant, PlantError::Configuration { what: "u_poc" }));
    }
}
