//! Tagged plant variant for configuration-driven simulations.

use crate::electrical::ReactivePowerLoop;
use crate::lag::FirstOrderLag;
use crate::traits::Plant;

/// Any plant the driver knows how to run.
///
/// Both variants go through the same [`Plant`] interface, so one driver loop
/// serves every configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum PlantModel {
    FirstOrderLag(FirstOrderLag),
    ReactivePower(ReactivePowerLoop),
}

impl From<FirstOrderLag> for PlantModel {
    fn from(p: FirstOrderLag) -> Self {
        Self::FirstOrderLag(p)
    }
}

impl From<ReactivePowerLoop> for PlantModel {
    fn from(p: ReactivePowerLoop) -> Self {
        Self::ReactivePower(p)
    }
}

impl Plant for PlantModel {
    fn name(&self) -> &str {
        match self {
            Self::FirstOrderLag(p) => p.name(),
            Self::ReactivePower(p) => p.name(),
        }
    }

    fn initial_output(&self) -> f64 {
        match self {
            Self::FirstOrderLag(p) => p.initial_output(),
            Self::ReactivePower(p) => p.initial_output(),
        }
    }

    fn step(&self, u: f64, y_prev: f64, dt: f64) -> f64 {
        match self {
            Self::FirstOrderLag(p) => p.step(u, y_prev, dt),
            Self::ReactivePower(p) => p.step(u, y_prev, dt),
        }
    }
}
