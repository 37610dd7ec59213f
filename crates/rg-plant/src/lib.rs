//! Plant models driven by the regulation loop.
//!
//! Provides:
//! - [`Plant`] trait: one explicit-Euler step from control input to output
//! - [`FirstOrderLag`]: `tau * dy/dt = k*u - y`
//! - [`ElectricalSystem`]: R-L-C branch seen from a point of connection (POC)
//! - [`ReactivePowerLoop`]: electrical system closed around a demanded active power
//! - [`PlantModel`]: tagged variant over the above, for configuration-driven runs

pub mod electrical;
pub mod error;
pub mod lag;
pub mod model;
pub mod traits;

pub use electrical::{ElectricalSystem, Impedance, OperatingPoint, ReactivePowerLoop};
pub use error::{PlantError, PlantResult};
pub use lag::FirstOrderLag;
pub use model::PlantModel;
pub use traits::Plant;
