//! Scenario validation logic.
//!
//! Rejects the configurations the simulation engine cannot start from. Values
//! that merely make the loop unstable are accepted.

use crate::schema::{ElectricalDef, PlantDef, Scenario};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    require_finite("dt_s", scenario.dt_s)?;
    if scenario.dt_s <= 0.0 {
        return Err(invalid("dt_s", scenario.dt_s, "must be positive"));
    }

    require_finite("steps", scenario.steps)?;
    if scenario.steps < 0.0 {
        return Err(invalid("steps", scenario.steps, "must be non-negative"));
    }

    match &scenario.plant {
        PlantDef::FirstOrderLag { tau_s, k, .. } => {
            require_finite("plant.tau_s", *tau_s)?;
            require_finite("plant.k", *k)?;
            if *tau_s == 0.0 {
                return Err(invalid("plant.tau_s", *tau_s, "must be nonzero"));
            }
        }
        PlantDef::ReactivePower {
            p_demand_w,
            electrical,
        } => {
            require_finite("plant.p_demand_w", *p_demand_w)?;
            validate_electrical(electrical)?;
        }
    }

    Ok(())
}

fn validate_electrical(e: &ElectricalDef) -> Result<(), ValidationError> {
    require_finite("electrical.inductance_h", e.inductance_h)?;
    require_finite("electrical.capacitance_f", e.capacitance_f)?;
    require_finite("electrical.resistance_ohm", e.resistance_ohm)?;
    require_finite("electrical.frequency_hz", e.frequency_hz)?;
    require_finite("electrical.u_poc_v", e.u_poc_v)?;

    if e.u_poc_v == 0.0 {
        return Err(invalid("electrical.u_poc_v", e.u_poc_v, "must be nonzero"));
    }
    if e.capacitance_f != 0.0 && e.frequency_hz == 0.0 {
        return Err(invalid(
            "electrical.frequency_hz",
            e.frequency_hz,
            "must be nonzero when a capacitance is present",
        ));
    }
    Ok(())
}
