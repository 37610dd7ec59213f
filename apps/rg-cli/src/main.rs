use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use rg_app::{
    AppError, AppResult, PlotOptions, PlotSeries, RunOptions, RunRequest, query, run_service,
    scenario_service,
};
use rg_core::units::constants::{GRID_FREQUENCY_HZ, REFERENCE_INDUCTANCE_H, REFERENCE_U_POC_V};
use rg_project::{ControllerDef, ElectricalDef, LATEST_VERSION, PlantDef, Scenario};
use rg_sim::{Gain, GainSweep, Trajectory, compute_loop_metrics};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "regulation")]
#[command(about = "Regulation CLI - closed-loop PID simulation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the first-order lag loop from command-line parameters
    Simulate {
        #[command(flatten)]
        controller: ControllerArgs,
        /// Plant time constant in seconds
        #[arg(long, default_value_t = 1.0)]
        tau: f64,
        /// Plant static gain
        #[arg(long, default_value_t = 1.0)]
        k: f64,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Simulate reactive power regulation at the point of connection
    Electrical {
        #[command(flatten)]
        controller: ControllerArgs,
        /// Active power demand in watts
        #[arg(long, default_value_t = 5.0e6)]
        p_demand: f64,
        /// Series inductance in henries
        #[arg(long, default_value_t = REFERENCE_INDUCTANCE_H)]
        inductance: f64,
        /// Capacitance in farads (0 = no capacitive branch)
        #[arg(long, default_value_t = 0.0)]
        capacitance: f64,
        /// Resistance in ohms
        #[arg(long, default_value_t = 0.0)]
        resistance: f64,
        /// Grid frequency in hertz
        #[arg(long, default_value_t = GRID_FREQUENCY_HZ)]
        frequency: f64,
        /// Voltage at the point of connection in volts
        #[arg(long, default_value_t = REFERENCE_U_POC_V)]
        u_poc: f64,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run a scenario file, reusing a cached run when available
    Run {
        /// Path to the scenario file (YAML or JSON)
        scenario_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// Validate scenario file syntax and parameters
    Validate {
        /// Path to the scenario file (YAML or JSON)
        scenario_path: PathBuf,
    },
    /// List cached runs stored next to a scenario
    Runs {
        /// Path to the scenario file (YAML or JSON)
        scenario_path: PathBuf,
        /// Include runs of every scenario in the same directory
        #[arg(long)]
        all: bool,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the scenario file (YAML or JSON)
        scenario_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export the output series of a cached run
    Export {
        /// Path to the scenario file (YAML or JSON)
        scenario_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Plot a cached run to PNG or SVG
    Plot {
        /// Path to the scenario file (YAML or JSON)
        scenario_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Image path; the extension selects PNG or SVG
        image: PathBuf,
        /// Variables to draw (output, control)
        #[arg(long, value_delimiter = ',', default_value = "output")]
        variables: Vec<String>,
    },
    /// Sweep one controller gain of a scenario
    Sweep {
        /// Path to the scenario file (YAML or JSON)
        scenario_path: PathBuf,
        /// Gain to vary
        #[arg(long, value_enum)]
        gain: GainArg,
        /// First gain value
        #[arg(long)]
        start: f64,
        /// Last gain value
        #[arg(long)]
        end: f64,
        /// Number of points, including both ends
        #[arg(long, default_value_t = 5)]
        points: usize,
        /// Optional image of all responses
        #[arg(long)]
        plot: Option<PathBuf>,
    },
    /// Answer a `/sendData` request body read from a file or stdin
    Respond {
        /// Request JSON file (defaults to stdin)
        input: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ControllerArgs {
    /// Setpoint
    #[arg(long, default_value_t = 10.0)]
    setpoint: f64,
    /// Proportional gain
    #[arg(long, default_value_t = 5.0)]
    kp: f64,
    /// Integral gain
    #[arg(long, default_value_t = 10.0)]
    ki: f64,
    /// Derivative gain
    #[arg(long, default_value_t = 0.0)]
    kd: f64,
    /// Time step in seconds
    #[arg(long, default_value_t = 0.001)]
    dt: f64,
    /// Number of steps (fractional values truncate)
    #[arg(long, default_value_t = 1000.0)]
    steps: f64,
}

#[derive(Args)]
struct OutputArgs {
    /// Write the trajectory to this file instead of printing a summary
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Trajectory format for --output
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    format: ExportFormat,
    /// Also write the scenario used to this file
    #[arg(long)]
    save_scenario: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
    Pairs,
}

#[derive(Clone, Copy, ValueEnum)]
enum GainArg {
    Kp,
    Ki,
    Kd,
}

impl From<GainArg> for Gain {
    fn from(arg: GainArg) -> Self {
        match arg {
            GainArg::Kp => Gain::Kp,
            GainArg::Ki => Gain::Ki,
            GainArg::Kd => Gain::Kd,
        }
    }
}

fn main() -> AppResult<()> {
    // Logs go to stderr so exported data on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            controller,
            tau,
            k,
            output,
        } => {
            let plant = PlantDef::FirstOrderLag {
                tau_s: tau,
                k,
                initial_output: 0.0,
            };
            cmd_simulate(scenario_from_args("cli step response", &controller, plant), &output)
        }
        Commands::Electrical {
            controller,
            p_demand,
            inductance,
            capacitance,
            resistance,
            frequency,
            u_poc,
            output,
        } => {
            let plant = PlantDef::ReactivePower {
                p_demand_w: p_demand,
                electrical: ElectricalDef {
                    inductance_h: inductance,
                    capacitance_f: capacitance,
                    resistance_ohm: resistance,
                    frequency_hz: frequency,
                    u_poc_v: u_poc,
                },
            };
            cmd_simulate(scenario_from_args("cli reactive power", &controller, plant), &output)
        }
        Commands::Run {
            scenario_path,
            no_cache,
        } => cmd_run(&scenario_path, !no_cache),
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Runs { scenario_path, all } => cmd_runs(&scenario_path, all),
        Commands::ShowRun {
            scenario_path,
            run_id,
        } => cmd_show_run(&scenario_path, &run_id),
        Commands::Export {
            scenario_path,
            run_id,
            format,
            output,
        } => cmd_export(&scenario_path, &run_id, format, output.as_deref()),
        Commands::Plot {
            scenario_path,
            run_id,
            image,
            variables,
        } => cmd_plot(&scenario_path, &run_id, &image, &variables),
        Commands::Sweep {
            scenario_path,
            gain,
            start,
            end,
            points,
            plot,
        } => cmd_sweep(&scenario_path, gain.into(), start, end, points, plot.as_deref()),
        Commands::Respond { input } => cmd_respond(input.as_deref()),
    }
}

fn scenario_from_args(name: &str, args: &ControllerArgs, plant: PlantDef) -> Scenario {
    Scenario {
        version: LATEST_VERSION,
        name: name.to_string(),
        setpoint: args.setpoint,
        controller: ControllerDef {
            kp: args.kp,
            ki: args.ki,
            kd: args.kd,
        },
        dt_s: args.dt,
        steps: args.steps,
        plant,
    }
}

fn cmd_simulate(scenario: Scenario, output: &OutputArgs) -> AppResult<()> {
    if let Some(path) = &output.save_scenario {
        scenario_service::save_scenario(path, &scenario)?;
        println!("✓ Scenario written to {}", path.display());
    }

    let trajectory = run_service::run_scenario(&scenario)?;

    match &output.output {
        Some(path) => {
            std::fs::write(path, render(&trajectory, output.format)?)?;
            println!(
                "✓ Exported {} samples to {}",
                trajectory.len(),
                path.display()
            );
        }
        None => print_response(&scenario, &trajectory)?,
    }
    Ok(())
}

fn cmd_run(scenario_path: &Path, use_cache: bool) -> AppResult<()> {
    let scenario = scenario_service::load_scenario(scenario_path)?;
    println!("Running scenario: {}", scenario.name);

    let request = RunRequest {
        scenario_path,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };
    let response = run_service::ensure_run(&request)?;

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Simulation completed: {}", response.run_id);
    }

    print_response(&scenario, &response.trajectory)?;
    print_timing_summary(&response.timing);
    Ok(())
}

fn print_response(scenario: &Scenario, trajectory: &Trajectory) -> AppResult<()> {
    let summary = query::get_run_summary(trajectory)?;
    println!("\nRun Summary:");
    println!("  Plant: {}", scenario_service::describe_plant(&scenario.plant));
    println!("  Samples: {}", summary.sample_count);
    println!(
        "  Time range: {:.3} - {:.3} s",
        summary.time_range.0, summary.time_range.1
    );
    println!("  Final output: {}", summary.final_output);
    println!("  Peak |output|: {}", summary.peak_magnitude);

    let metrics = compute_loop_metrics(trajectory, scenario.setpoint);
    if metrics.diverged {
        println!("  ⚠ Output diverged (non-finite samples)");
        return Ok(());
    }
    println!("\nLoop metrics (setpoint {}):", scenario.setpoint);
    print_metric("Rise time 10%", metrics.rise_time_10_s, "s");
    print_metric("Rise time 90%", metrics.rise_time_90_s, "s");
    print_metric("Settling time 2%", metrics.settling_time_2pct_s, "s");
    print_metric("Overshoot", metrics.overshoot_pct, "%");
    print_metric("Steady-state error", metrics.steady_state_error, "");
    Ok(())
}

fn print_metric(name: &str, value: Option<f64>, unit: &str) {
    match value {
        Some(v) => println!("  {:<20} {:.4} {}", format!("{}:", name), v, unit),
        None => println!("  {:<20} -", format!("{}:", name)),
    }
}

fn print_timing_summary(timing: &rg_app::RunTimingSummary) {
    println!("\nTiming summary:");
    if timing.load_cache_time_s > 0.0 {
        println!("  Cache load: {:.3}s", timing.load_cache_time_s);
    } else {
        println!("  Compile:  {:.3}s", timing.compile_time_s);
        println!("  Simulate: {:.3}s", timing.simulate_time_s);
        println!("  Save:     {:.3}s", timing.save_time_s);
    }
    println!("  Total:    {:.3}s", timing.total_time_s);
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = scenario_service::load_scenario(scenario_path)?;
    rg_app::compile_scenario(&scenario)?;
    let summary = scenario_service::summarize(&scenario);
    println!("✓ Scenario is valid");
    println!(
        "  {} ({}): {} steps of {} s, t_end = {} s",
        summary.name, summary.plant_kind, summary.steps, summary.dt_s, summary.t_end_s
    );
    Ok(())
}

fn cmd_runs(scenario_path: &Path, all: bool) -> AppResult<()> {
    let filter = if all {
        None
    } else {
        Some(scenario_service::load_scenario(scenario_path)?.name)
    };
    let runs = run_service::list_runs(scenario_path, filter.as_deref())?;

    if runs.is_empty() {
        println!("No cached runs found");
    } else {
        println!("Cached runs:");
        for manifest in runs {
            println!(
                "  {} {} ({}, {} steps)",
                manifest.run_id,
                manifest.scenario_name,
                manifest.timestamp,
                manifest.run_type.steps()
            );
        }
    }
    Ok(())
}

fn cmd_show_run(scenario_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, trajectory) = run_service::load_run(scenario_path, run_id)?;
    let summary = query::get_run_summary(&trajectory)?;

    println!("\nRun Summary:");
    println!("  Scenario: {}", manifest.scenario_name);
    println!("  Created: {}", manifest.timestamp);
    println!("  Engine: {}", manifest.engine_version);
    println!("  Samples: {}", summary.sample_count);
    println!(
        "  Time range: {:.3} - {:.3} s",
        summary.time_range.0, summary.time_range.1
    );
    println!("  Final output: {}", summary.final_output);
    println!("  Peak |output|: {}", summary.peak_magnitude);
    if summary.diverged {
        println!("  ⚠ Output diverged (non-finite samples)");
    }
    Ok(())
}

fn render(trajectory: &Trajectory, format: ExportFormat) -> AppResult<String> {
    let text = match format {
        ExportFormat::Json => rg_results::to_json(trajectory)?,
        ExportFormat::Csv => rg_results::to_csv(trajectory, None),
        ExportFormat::Pairs => serde_json::to_string(&rg_results::xy_pairs(trajectory))
            .map_err(|e| AppError::Results(e.to_string()))?,
    };
    Ok(text)
}

fn cmd_export(
    scenario_path: &Path,
    run_id: &str,
    format: ExportFormat,
    output: Option<&Path>,
) -> AppResult<()> {
    let (_manifest, trajectory) = run_service::load_run(scenario_path, run_id)?;
    let text = render(&trajectory, format)?;

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, text)?;
        println!(
            "✓ Exported {} data points to {}",
            trajectory.len(),
            path.display()
        );
    } else {
        println!("{}", text.trim_end());
    }
    Ok(())
}

fn cmd_plot(scenario_path: &Path, run_id: &str, image: &Path, variables: &[String]) -> AppResult<()> {
    let (manifest, trajectory) = run_service::load_run(scenario_path, run_id)?;

    let mut columns = Vec::with_capacity(variables.len());
    for name in variables {
        let variable = query::Variable::parse(name)?;
        let (x, y): (Vec<f64>, Vec<f64>) = query::extract_series(&trajectory, variable)
            .into_iter()
            .unzip();
        columns.push((variable.label(), x, y));
    }

    let series: Vec<PlotSeries<'_>> = columns
        .iter()
        .map(|(label, x, y)| PlotSeries { label, x, y })
        .collect();
    let options = PlotOptions {
        title: manifest.scenario_name.clone(),
        ..PlotOptions::default()
    };
    rg_app::multiple_lines(&series, image, &options)?;

    println!("✓ Plot written to {}", image.display());
    Ok(())
}

fn cmd_sweep(
    scenario_path: &Path,
    gain: Gain,
    start: f64,
    end: f64,
    points: usize,
    plot: Option<&Path>,
) -> AppResult<()> {
    let scenario = scenario_service::load_scenario(scenario_path)?;
    let sweep = GainSweep::new(gain, start, end, points)?;
    let results = run_service::sweep_scenario(&scenario, &sweep)?;

    println!("Sweep of {} for scenario: {}", gain.label(), scenario.name);
    println!(
        "  {:>12} {:>16} {:>16} {:>12}",
        gain.label(),
        "final",
        "peak |y|",
        "overshoot %"
    );
    for point in &results {
        let metrics = compute_loop_metrics(&point.trajectory, scenario.setpoint);
        let overshoot = metrics
            .overshoot_pct
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>12.4} {:>16.6} {:>16.6} {:>12}",
            point.value, point.final_output, point.peak_magnitude, overshoot
        );
    }

    if let Some(image) = plot {
        let labels: Vec<String> = results
            .iter()
            .map(|p| format!("{} = {}", gain.label(), p.value))
            .collect();
        let series: Vec<PlotSeries<'_>> = results
            .iter()
            .zip(&labels)
            .map(|(p, label)| PlotSeries {
                label,
                x: p.trajectory.t(),
                y: p.trajectory.y(),
            })
            .collect();
        let options = PlotOptions {
            title: format!("{} sweep: {}", gain.label(), scenario.name),
            ..PlotOptions::default()
        };
        rg_app::multiple_lines(&series, image, &options)?;
        println!("✓ Plot written to {}", image.display());
    }
    Ok(())
}

fn cmd_respond(input: Option<&Path>) -> AppResult<()> {
    let body = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    println!("{}", rg_app::handle_simulation_request(&body)?);
    Ok(())
}
