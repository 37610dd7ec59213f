// rg-core/src/units.rs

use uom::si::f64::{
    Capacitance as UomCapacitance, ElectricPotential as UomElectricPotential,
    ElectricalResistance as UomElectricalResistance, Frequency as UomFrequency,
    Inductance as UomInductance,
};

// Public canonical unit types (SI, f64)
pub type Capacitance = UomCapacitance;
pub type Voltage = UomElectricPotential;
pub type Resistance = UomElectricalResistance;
pub type Frequency = UomFrequency;
pub type Inductance = UomInductance;

#[inline]
pub fn henry(v: f64) -> Inductance {
    use uom::si::inductance::henry;
    Inductance::new::<henry>(v)
}

#[inline]
pub fn millihenry(v: f64) -> Inductance {
    use uom::si::inductance::millihenry;
    Inductance::new::<millihenry>(v)
}

#[inline]
pub fn farad(v: f64) -> Capacitance {
    use uom::si::capacitance::farad;
    Capacitance::new::<farad>(v)
}

#[inline]
pub fn ohm(v: f64) -> Resistance {
    use uom::si::electrical_resistance::ohm;
    Resistance::new::<ohm>(v)
}

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

#[inline]
pub fn volt(v: f64) -> Voltage {
    use uom::si::electric_potential::volt;
    Voltage::new::<volt>(v)
}

pub mod constants {
    /// Nominal grid frequency of the reference deployment.
    pub const GRID_FREQUENCY_HZ: f64 = 50.0;
    /// Point-of-connection voltage of the reference deployment.
    pub const REFERENCE_U_POC_V: f64 = 6_700.0;
    /// Series inductance of the reference deployment.
    pub const REFERENCE_INDUCTANCE_H: f64 = 2.8e-3;
}
