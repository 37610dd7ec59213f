//! Gain sweep: parallel runs must match sequential runs point for point.

use rg_controls::PidGains;
use rg_plant::FirstOrderLag;
use rg_sim::{Gain, GainSweep, SimConfig, run_gain_sweep, simulate};

#[test]
fn sweep_matches_individual_runs() {
    let base = SimConfig::new(1.0, PidGains::new(1.0, 2.0, 0.0), 0.01, 300.0);
    let plant = FirstOrderLag::new(0.5, 1.0).unwrap();
    let sweep = GainSweep::new(Gain::Kp, 0.5, 4.0, 8).unwrap();

    let points = run_gain_sweep(&base, &plant, &sweep).unwrap();
    assert_eq!(points.len(), 8);

    for (point, value) in points.iter().zip(sweep.values()) {
        assert_eq!(point.value, value);
        let mut cfg = base.clone();
        cfg.gains.kp = value;
        let expected = simulate(&cfg, &plant).unwrap();
        assert_eq!(point.trajectory, expected);
        assert_eq!(point.final_output, *expected.y().last().unwrap());
    }
}

#[test]
fn sweep_over_derivative_gain_keeps_order() {
    let base = SimConfig::new(2.0, PidGains::new(1.0, 1.0, 0.0), 0.01, 100.0);
    let plant = FirstOrderLag::new(1.0, 1.0).unwrap();
    let sweep = GainSweep::new(Gain::Kd, 0.0, 0.1, 4).unwrap();
    let points = run_gain_sweep(&base, &plant, &sweep).unwrap();
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    assert_eq!(values, sweep.values());
}

#[test]
fn sweep_rejects_bad_config_up_front() {
    let base = SimConfig::new(1.0, PidGains::default(), 0.0, 10.0);
    let plant = FirstOrderLag::new(1.0, 1.0).unwrap();
    let sweep = GainSweep::new(Gain::Ki, 0.0, 1.0, 3).unwrap();
    let err = run_gain_sweep(&base, &plant, &sweep).unwrap_err();
    assert!(err.is_configuration());
}
