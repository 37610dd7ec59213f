//! Scenario schema definitions.

use rg_core::units::constants::{GRID_FREQUENCY_HZ, REFERENCE_INDUCTANCE_H, REFERENCE_U_POC_V};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    #[serde(default)]
    pub version: u32,
    pub name: String,
    pub setpoint: f64,
    pub controller: ControllerDef,
    pub dt_s: f64,
    /// Steps beyond the initial sample; fractional values truncate.
    pub steps: f64,
    pub plant: PlantDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ControllerDef {
    #[serde(default)]
    pub kp: f64,
    #[serde(default)]
    pub ki: f64,
    #[serde(default)]
    pub kd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PlantDef {
    FirstOrderLag {
        tau_s: f64,
        k: f64,
        #[serde(default, skip_serializing_if = "is_zero")]
        initial_output: f64,
    },
    ReactivePower {
        p_demand_w: f64,
        #[serde(default)]
        electrical: ElectricalDef,
    },
}

impl PlantDef {
    pub fn kind(&self) -> &'static str {
        match self {
            PlantDef::FirstOrderLag { .. } => "FirstOrderLag",
            PlantDef::ReactivePower { .. } => "ReactivePower",
        }
    }
}

/// Series R-L-C branch behind the point of connection.
///
/// Every field defaults to the reference deployment
/// (2.8 mH, no capacitor, no resistance, 50 Hz, 6.7 kV).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElectricalDef {
    #[serde(default = "default_inductance_h")]
    pub inductance_h: f64,
    #[serde(default)]
    pub capacitance_f: f64,
    #[serde(default)]
    pub resistance_ohm: f64,
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: f64,
    #[serde(default = "default_u_poc_v")]
    pub u_poc_v: f64,
}

impl Default for ElectricalDef {
    fn default() -> Self {
        Self {
            inductance_h: default_inductance_h(),
            capacitance_f: 0.0,
            resistance_ohm: 0.0,
            frequency_hz: default_frequency_hz(),
            u_poc_v: default_u_poc_v(),
        }
    }
}

fn default_inductance_h() -> f64 {
    REFERENCE_INDUCTANCE_H
}

fn default_frequency_hz() -> f64 {
    GRID_FREQUENCY_HZ
}

fn default_u_poc_v() -> f64 {
    REFERENCE_U_POC_V
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

/// Request body accepted by the chart page's `/sendData` call.
///
/// All fields are required. `P` is the proportional gain; `N` is the step
/// count as a real number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimulationRequest {
    #[serde(rename = "Sp")]
    pub sp: f64,
    #[serde(rename = "Tau")]
    pub tau: f64,
    #[serde(rename = "K")]
    pub k: f64,
    #[serde(rename = "P")]
    pub kp: f64,
    #[serde(rename = "Ki")]
    pub ki: f64,
    #[serde(rename = "Kd")]
    pub kd: f64,
    #[serde(rename = "dt")]
    pub dt: f64,
    #[serde(rename = "N")]
    pub n: f64,
}

impl Scenario {
    /// Build a first-order-lag scenario from a wire request.
    pub fn from_request(name: impl Into<String>, request: &SimulationRequest) -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: name.into(),
            setpoint: request.sp,
            controller: ControllerDef {
                kp: request.kp,
                ki: request.ki,
                kd: request.kd,
            },
            dt_s: request.dt,
            steps: request.n,
            plant: PlantDef::FirstOrderLag {
                tau_s: request.tau,
                k: request.k,
                initial_output: 0.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_wire_field_names() {
        let body = r#"{"Sp":10,"Tau":1,"K":1,"P":5,"Ki":10,"Kd":0,"dt":0.001,"N":1000}"#;
        let req: SimulationRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.sp, 10.0);
        assert_eq!(req.kp, 5.0);
        assert_eq!(req.n, 1000.0);
    }

    #[test]
    fn request_requires_every_field() {
        let body = r#"{"Sp":10,"Tau":1,"K":1,"P":5,"Ki":10,"Kd":0,"dt":0.001}"#;
        assert!(serde_json::from_str::<SimulationRequest>(body).is_err());
    }

    #[test]
    fn electrical_defaults_to_reference() {
        let yaml = "type: ReactivePower\np_demand_w: 5.0e6\n";
        let plant: PlantDef = serde_yaml::from_str(yaml).unwrap();
        match plant {
            PlantDef::ReactivePower { electrical, .. } => {
                assert_eq!(electrical, ElectricalDef::default());
                assert_eq!(electrical.u_poc_v, 6_700.0);
            }
            other => panic!("unexpected plant {other:?}"),
        }
    }

    #[test]
    fn from_request_builds_lag_scenario() {
        let req = SimulationRequest {
            sp: 10.0,
            tau: 1.0,
            k: 2.0,
            kp: 5.0,
            ki: 10.0,
            kd: 0.0,
            dt: 0.001,
            n: 1000.0,
        };
        let scenario = Scenario::from_request("web", &req);
        assert_eq!(scenario.plant.kind(), "FirstOrderLag");
        assert_eq!(scenario.controller.kp, 5.0);
        assert_eq!(scenario.steps, 1000.0);
    }
}
