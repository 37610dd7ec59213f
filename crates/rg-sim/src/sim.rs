//! Simulation runner.

use rg_controls::PidController;
use rg_plant::{ElectricalSystem, FirstOrderLag, Plant, ReactivePowerLoop};

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::trajectory::Trajectory;

/// Run a closed-loop simulation of `plant` under a fresh PID controller.
///
/// For `k = 1..=N`:
/// 1. `u = pid.compute(setpoint, y[k-1], dt)`
/// 2. `y[k] = plant.step(u, y[k-1], dt)`
/// 3. `t[k] = t[k-1] + dt`
///
/// The configuration is validated before the first step; on error nothing is
/// simulated. The result is bit-for-bit reproducible for a given input.
pub fn simulate<P: Plant>(config: &SimConfig, plant: &P) -> SimResult<Trajectory> {
    let steps = config.validate()?;
    let dt = config.dt;

    tracing::debug!(
        plant = plant.name(),
        steps,
        dt,
        setpoint = config.setpoint,
        "starting simulation"
    );

    let mut controller = PidController::from_gains(config.gains);
    let mut record = Trajectory::with_capacity(steps);

    let mut t = 0.0;
    let mut y = plant.initial_output();
    record.push_initial(y);

    for _ in 0..steps {
        let u = controller.compute(config.setpoint, y, dt);
        y = plant.step(u, y, dt);
        t += dt;
        record.push_step(t, u, y);
    }

    tracing::debug!(
        plant = plant.name(),
        t_end = t,
        y_end = y,
        "simulation finished"
    );

    Ok(record)
}

/// Simulate the first-order lag `tau * dy/dt = k*u - y` from rest.
pub fn simulate_first_order(config: &SimConfig, tau: f64, k: f64) -> SimResult<Trajectory> {
    config.validate()?;
    let plant = FirstOrderLag::new(tau, k)?;
    simulate(config, &plant)
}

/// Simulate the reactive-power loop: the setpoint is `Q_ref` at the POC and
/// the controller commands the converter reactive power for demand `p_demand`.
pub fn simulate_reactive_power(
    config: &SimConfig,
    system: ElectricalSystem,
    p_demand: f64,
) -> SimResult<Trajectory> {
    simulate(config, &ReactivePowerLoop::new(system, p_demand))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rg_controls::PidGains;

    #[test]
    fn zero_steps_returns_initial_sample() {
        let cfg = SimConfig::new(10.0, PidGains::new(1.0, 1.0, 1.0), 0.1, 0.0);
        let traj = simulate_first_order(&cfg, 1.0, 1.0).unwrap();
        assert_eq!(traj.t(), &[0.0]);
        assert_eq!(traj.y(), &[0.0]);
        assert!(traj.control().is_empty());
    }

    #[test]
    fn time_axis_accumulates_dt() {
        let cfg = SimConfig::new(1.0, PidGains::new(1.0, 0.0, 0.0), 0.1, 5.0);
        let traj = simulate_first_order(&cfg, 1.0, 1.0).unwrap();
        let mut t = 0.0;
        for (k, tk) in traj.t().iter().enumerate() {
            if k > 0 {
                t += 0.1;
            }
            assert_eq!(*tk, t);
        }
    }

    #[test]
    fn first_step_follows_recurrence() {
        let cfg = SimConfig::new(2.0, PidGains::new(3.0, 0.0, 0.0), 0.5, 1.0);
        let traj = simulate_first_order(&cfg, 1.0, 1.0).unwrap();
        // u = 3 * 2 = 6, y1 = 0 + 0.5 * (6 - 0) = 3
        assert_eq!(traj.control(), &[6.0]);
        assert_eq!(traj.y(), &[0.0, 3.0]);
    }

    #[test]
    fn zero_tau_is_configuration_error() {
        let cfg = SimConfig::new(1.0, PidGains::new(1.0, 0.0, 0.0), 0.1, 5.0);
        let err = simulate_first_order(&cfg, 0.0, 1.0).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn reactive_power_loop_starts_at_zero() {
        let cfg = SimConfig::new(1e6, PidGains::new(0.0, 5.0, 0.0), 0.01, 3.0);
        let traj = simulate_reactive_power(&cfg, ElectricalSystem::reference(), 2e6).unwrap();
        assert_eq!(traj.y()[0], 0.0);
        assert_eq!(traj.len(), 4);
    }
}
