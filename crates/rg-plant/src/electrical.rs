//! Electrical reactive-power plant.
//!
//! Models a series R-L-C branch between a converter and the point of
//! connection (POC). For a commanded (P, Q) pair at the converter terminals the
//! branch current is `I = S / U_poc` with `S = sqrt(P² + Q²)`, and the branch
//! itself absorbs `Q_sys = I² (X_L - X_C)`. The reactive power measured at the
//! POC is `Q_cmd + Q_sys`.

use std::f64::consts::PI;

use crate::error::{PlantError, PlantResult};
use crate::traits::Plant;
use rg_core::units::constants::{GRID_FREQUENCY_HZ, REFERENCE_INDUCTANCE_H, REFERENCE_U_POC_V};
use rg_core::units::{Capacitance, Frequency, Inductance, Resistance, Voltage};
use rg_core::{ensure_finite, ensure_nonzero};

/// Branch impedance magnitude and angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impedance {
    /// |Z| in ohm
    pub magnitude: f64,
    /// Angle in radians, `atan2(X_L - X_C, R)`
    pub theta: f64,
}

/// All intermediate quantities of one POC evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub active_power: f64,
    pub commanded_reactive_power: f64,
    pub apparent_power: f64,
    pub current: f64,
    pub system_reactive_power: f64,
    pub poc_reactive_power: f64,
}

/// R-L-C branch parameters, stored in SI units.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectricalSystem {
    inductance_h: f64,
    capacitance_f: f64,
    resistance_ohm: f64,
    frequency_hz: f64,
    u_poc_v: f64,
}

impl ElectricalSystem {
    /// Create a branch from typed quantities.
    ///
    /// A zero capacitance means "no capacitive branch".
    ///
    /// # Errors
    ///
    /// Returns error if `u_poc` is zero, if `f` is zero while a capacitance is
    /// present, or if any parameter is not finite.
    pub fn new(
        l: Inductance,
        c: Capacitance,
        r: Resistance,
        f: Frequency,
        u_poc: Voltage,
    ) -> PlantResult<Self> {
        use uom::si::capacitance::farad;
        use uom::si::electric_potential::volt;
        use uom::si::electrical_resistance::ohm;
        use uom::si::frequency::hertz;
        use uom::si::inductance::henry;

        Self::from_si(
            l.get::<henry>(),
            c.get::<farad>(),
            r.get::<ohm>(),
            f.get::<hertz>(),
            u_poc.get::<volt>(),
        )
    }

    /// Create a branch from raw SI values (H, F, Ω, Hz, V).
    pub fn from_si(
        inductance_h: f64,
        capacitance_f: f64,
        resistance_ohm: f64,
        frequency_hz: f64,
        u_poc_v: f64,
    ) -> PlantResult<Self> {
        ensure_finite(inductance_h, "inductance")?;
        ensure_finite(capacitance_f, "capacitance")?;
        ensure_finite(resistance_ohm, "resistance")?;
        ensure_finite(frequency_hz, "frequency")?;
        ensure_finite(u_poc_v, "u_poc")?;
        ensure_nonzero(u_poc_v, "u_poc must be nonzero")?;
        if capacitance_f != 0.0 && frequency_hz == 0.0 {
            return Err(PlantError::Configuration {
                what: "frequency must be nonzero when a capacitance is present",
            });
        }
        Ok(Self {
            inductance_h,
            capacitance_f,
            resistance_ohm,
            frequency_hz,
            u_poc_v,
        })
    }

    /// Purely inductive 2.8 mH branch at 50 Hz behind a 6.7 kV connection.
    pub fn reference() -> Self {
        Self {
            inductance_h: REFERENCE_INDUCTANCE_H,
            capacitance_f: 0.0,
            resistance_ohm: 0.0,
            frequency_hz: GRID_FREQUENCY_HZ,
            u_poc_v: REFERENCE_U_POC_V,
        }
    }

    pub fn inductance_h(&self) -> f64 {
        self.inductance_h
    }

    pub fn capacitance_f(&self) -> f64 {
        self.capacitance_f
    }

    pub fn resistance_ohm(&self) -> f64 {
        self.resistance_ohm
    }

    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }

    pub fn u_poc_v(&self) -> f64 {
        self.u_poc_v
    }

    /// `X_L = 2π f L`
    pub fn inductive_reactance(&self) -> f64 {
        2.0 * PI * self.frequency_hz * self.inductance_h
    }

    /// `X_C = 1 / (2π f C)`, or zero when there is no capacitive branch.
    pub fn capacitive_reactance(&self) -> f64 {
        if self.capacitance_f == 0.0 {
            0.0
        } else {
            1.0 / (2.0 * PI * self.frequency_hz * self.capacitance_f)
        }
    }

    pub fn impedance(&self) -> Impedance {
        let x = self.inductive_reactance() - self.capacitive_reactance();
        Impedance {
            magnitude: (self.resistance_ohm.powi(2) + x.powi(2)).sqrt(),
            theta: x.atan2(self.resistance_ohm),
        }
    }

    /// Reactive power absorbed by the branch for a current magnitude `i`.
    pub fn reactive_power_of_system(&self, i: f64) -> f64 {
        let q_l = i.powi(2) * self.inductive_reactance();
        let q_c = i.powi(2) * self.capacitive_reactance();
        q_l - q_c
    }

    /// `S = sqrt(P² + Q²)`
    pub fn apparent_power(&self, p: f64, q: f64) -> f64 {
        (p.powi(2) + q.powi(2)).sqrt()
    }

    /// Branch current magnitude `I = S / U_poc`.
    pub fn current(&self, p: f64, q: f64) -> f64 {
        self.apparent_power(p, q) / self.u_poc_v
    }

    /// Evaluate every intermediate quantity for one (P, Q) pair.
    pub fn operating_point(&self, p: f64, q_commanded: f64) -> OperatingPoint {
        let apparent_power = self.apparent_power(p, q_commanded);
        let current = apparent_power / self.u_poc_v;
        let system_reactive_power = self.reactive_power_of_system(current);
        let poc_reactive_power = q_commanded + system_reactive_power;
        tracing::trace!(
            s = apparent_power,
            i = current,
            q_poc = poc_reactive_power,
            "poc operating point"
        );
        OperatingPoint {
            active_power: p,
            commanded_reactive_power: q_commanded,
            apparent_power,
            current,
            system_reactive_power,
            poc_reactive_power,
        }
    }

    /// Reactive power seen at the POC for active power `p` and commanded `q_commanded`.
    pub fn reactive_power_at_poc(&self, p: f64, q_commanded: f64) -> f64 {
        self.operating_point(p, q_commanded).poc_reactive_power
    }
}

impl Default for ElectricalSystem {
    fn default() -> Self {
        Self::reference()
    }
}

/// Electrical system closed around a fixed active-power demand.
///
/// The control input is the commanded reactive power `Qond`; the output is the
/// reactive power at the POC. The previous output and the step size do not
/// enter: the branch is treated as quasi-static.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactivePowerLoop {
    pub system: ElectricalSystem,
    /// Demanded active power (W)
    pub p_demand: f64,
}

impl ReactivePowerLoop {
    pub fn new(system: ElectricalSystem, p_demand: f64) -> Self {
        Self { system, p_demand }
    }
}

impl Plant for ReactivePowerLoop {
    fn name(&self) -> &str {
        "reactive_power"
    }

    fn step(&self, u: f64, _y_prev: f64, _dt: f64) -> f64 {
        self.system.reactive_power_at_poc(self.p_demand, u)
    }
}
