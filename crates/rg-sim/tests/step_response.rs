//! Integration test: PID + first-order lag step response.
//!
//! Checks the trajectory shape, bit-for-bit agreement with the discrete
//! recurrence, reproducibility, and the configuration error paths.

use rg_controls::PidGains;
use rg_plant::FirstOrderLag;
use rg_sim::{SimConfig, compute_loop_metrics, simulate, simulate_first_order};

const SP: f64 = 10.0;
const TAU: f64 = 1.0;
const K: f64 = 1.0;
const KP: f64 = 5.0;
const KI: f64 = 10.0;
const KD: f64 = 0.0;
const DT: f64 = 0.001;
const N: f64 = 1000.0;

fn reference_config() -> SimConfig {
    SimConfig::new(SP, PidGains::new(KP, KI, KD), DT, N)
}

/// The loop written out by hand.
#[allow(clippy::too_many_arguments)]
fn recurrence(
    sp: f64,
    tau: f64,
    k: f64,
    kp: f64,
    ki: f64,
    kd: f64,
    dt: f64,
    n: usize,
) -> (Vec<f64>, Vec<f64>) {
    let mut t = vec![0.0];
    let mut y = vec![0.0];
    let mut integral = 0.0;
    let mut previous_error = 0.0;
    for _ in 0..n {
        let y_prev = *y.last().unwrap();
        let error = sp - y_prev;
        let p = kp * error;
        integral += error * dt;
        let i = ki * integral;
        let d = kd * (error - previous_error) / dt;
        previous_error = error;
        let u = p + i + d;
        y.push(y_prev + (dt / tau) * (k * u - y_prev));
        t.push(t.last().unwrap() + dt);
    }
    (t, y)
}

#[test]
fn trajectory_has_n_plus_one_samples() {
    let traj = simulate_first_order(&reference_config(), TAU, K).unwrap();
    assert_eq!(traj.t().len(), 1001);
    assert_eq!(traj.y().len(), 1001);
    assert_eq!(traj.control().len(), 1000);
    for w in traj.t().windows(2) {
        assert!(w[1] > w[0]);
        assert!((w[1] - w[0] - DT).abs() < 1e-12);
    }
}

#[test]
fn golden_against_recurrence() {
    let traj = simulate_first_order(&reference_config(), TAU, K).unwrap();
    let (t_ref, y_ref) = recurrence(SP, TAU, K, KP, KI, KD, DT, 1000);
    assert_eq!(traj.t(), t_ref.as_slice());
    assert_eq!(traj.y(), y_ref.as_slice());
}

#[test]
fn golden_with_derivative_action() {
    let cfg = SimConfig::new(3.0, PidGains::new(2.0, 1.5, 0.05), 0.01, 400.0);
    let traj = simulate_first_order(&cfg, 0.5, 2.0).unwrap();
    let (_, y_ref) = recurrence(3.0, 0.5, 2.0, 2.0, 1.5, 0.05, 0.01, 400);
    assert_eq!(traj.y(), y_ref.as_slice());
}

#[test]
fn unit_step_matches_unscaled_loop() {
    // dt = 1 is the unscaled PID form.
    let cfg = SimConfig::new(1.0, PidGains::new(0.2, 0.05, 0.1), 1.0, 60.0);
    let traj = simulate_first_order(&cfg, 4.0, 1.0).unwrap();

    let mut y = 0.0;
    let mut sum = 0.0;
    let mut prev = 0.0;
    let mut expected = vec![y];
    for _ in 0..60 {
        let e = 1.0 - y;
        sum += e;
        let u = 0.2 * e + 0.05 * sum + 0.1 * (e - prev);
        prev = e;
        y += (1.0 / 4.0) * (1.0 * u - y);
        expected.push(y);
    }
    assert_eq!(traj.y(), expected.as_slice());
}

#[test]
fn step_response_approaches_setpoint_with_bounded_overshoot() {
    let traj = simulate_first_order(&reference_config(), TAU, K).unwrap();
    let y = traj.y();
    assert_eq!(y[0], 0.0);
    assert!(y.iter().all(|v| v.is_finite()));
    // Rises toward the setpoint from below during the initial transient.
    assert!(y[1] > 0.0);
    assert!(y[100] > y[50]);
    // Overshoot from the PI zero stays under 10%.
    let peak = y.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert!(peak < SP * 1.1, "peak {peak}");
    let last = *y.last().unwrap();
    assert!((last - SP).abs() < 1.0, "last {last}");

    let metrics = compute_loop_metrics(&traj, SP);
    assert!(!metrics.diverged);
    assert!(metrics.overshoot_pct.unwrap() < 10.0);
}

#[test]
fn long_run_settles_at_setpoint() {
    let cfg = SimConfig::new(SP, PidGains::new(KP, KI, KD), DT, 10_000.0);
    let traj = simulate_first_order(&cfg, TAU, K).unwrap();
    let (_, last) = traj.last().unwrap();
    assert!((last - SP).abs() < 1e-6, "last {last}");
    let metrics = compute_loop_metrics(&traj, SP);
    assert!(metrics.settling_time_2pct_s.is_some());
}

#[test]
fn repeated_runs_are_identical() {
    let cfg = reference_config();
    let a = simulate_first_order(&cfg, TAU, K).unwrap();
    let b = simulate_first_order(&cfg, TAU, K).unwrap();
    assert_eq!(a, b);
}

#[test]
fn zero_gains_do_not_actuate() {
    let cfg = SimConfig::new(SP, PidGains::new(0.0, 0.0, 0.0), 0.01, 200.0);
    let traj = simulate_first_order(&cfg, TAU, K).unwrap();
    assert!(traj.control().iter().all(|&u| u == 0.0));
    assert!(traj.y().iter().all(|&y| y == 0.0));
}

#[test]
fn zero_gains_decay_geometrically_from_initial_output() {
    let cfg = SimConfig::new(SP, PidGains::new(0.0, 0.0, 0.0), 0.1, 100.0);
    let plant = FirstOrderLag::new(2.0, 1.0).unwrap().with_initial_output(4.0);
    let traj = simulate(&cfg, &plant).unwrap();
    let ratio = 1.0 - 0.1 / 2.0;
    for w in traj.y().windows(2) {
        assert!((w[1] - w[0] * ratio).abs() < 1e-12);
        assert!(w[1] < w[0]);
    }
    assert!(traj.y()[100] > 0.0);
    assert!(traj.y()[100] < 4.0 * 0.01);
}

#[test]
fn zero_steps_returns_single_sample() {
    let cfg = SimConfig::new(SP, PidGains::new(KP, KI, KD), DT, 0.0);
    let traj = simulate_first_order(&cfg, TAU, K).unwrap();
    assert_eq!(traj.len(), 1);
    assert_eq!(traj.last(), Some((0.0, 0.0)));
}

#[test]
fn zero_dt_is_rejected_before_running() {
    let cfg = SimConfig::new(SP, PidGains::new(KP, KI, KD), 0.0, N);
    let err = simulate_first_order(&cfg, TAU, K).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn negative_steps_rejected() {
    let cfg = SimConfig::new(SP, PidGains::new(KP, KI, KD), DT, -1.0);
    assert!(simulate_first_order(&cfg, TAU, K).is_err());
}

#[test]
fn zero_tau_rejected() {
    assert!(simulate_first_order(&reference_config(), 0.0, K).is_err());
}

#[test]
fn unstable_step_ratio_propagates_non_finite_values() {
    // dt / tau = 50: explicit Euler blows up; the engine reports it as data.
    let cfg = SimConfig::new(1.0, PidGains::new(1.0, 0.0, 0.0), 5.0, 400.0);
    let traj = simulate_first_order(&cfg, 0.1, 1.0).unwrap();
    assert_eq!(traj.len(), 401);
    assert!(traj.has_non_finite());
    assert!(compute_loop_metrics(&traj, 1.0).diverged);
}
