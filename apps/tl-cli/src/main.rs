use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tl_controls::SignalValue;
use tl_project::{ProjectError, ScenarioFile};
use tl_sim::{PlantSnapshot, ProcessModel, RunOptions, RunSummary, SimError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tl-cli")]
#[command(about = "TankLoop CLI - four-tank process simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario file
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// Write a scenario file with the default startup parameters
    Init {
        /// Output path (.json for JSON, anything else for YAML)
        scenario_path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Run the plant for a fixed number of steps
    Run {
        /// Scenario file; defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Time step in seconds (overrides the scenario)
        #[arg(long)]
        dt: Option<f64>,
        /// Number of steps (overrides the scenario)
        #[arg(long)]
        steps: Option<usize>,
        /// Pace steps against the wall clock
        #[arg(long)]
        realtime: bool,
        /// Write the trend history to this CSV file
        #[arg(long)]
        trend_csv: Option<PathBuf>,
        /// Print the final report as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Instrument tag to print at every trend sample, e.g. T3.TEMP (repeatable)
        #[arg(short, long = "watch")]
        watch: Vec<String>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown instrument tag: {tag}")]
    UnknownTag { tag: String },

    #[error("Refusing to overwrite {path} (use --force)")]
    Exists { path: String },
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Init {
            scenario_path,
            force,
        } => cmd_init(&scenario_path, force),
        Commands::Run {
            config,
            dt,
            steps,
            realtime,
            trend_csv,
            json,
            watch,
        } => {
            let scenario = match &config {
                Some(path) => {
                    let scenario = tl_project::load_scenario(path)?;
                    tracing::info!(path = %path.display(), name = %scenario.name, "scenario loaded");
                    scenario
                }
                None => {
                    tracing::debug!("no scenario file given, using defaults");
                    ScenarioFile::default()
                }
            };
            let opts = resolve_options(&scenario, dt, steps, realtime);
            cmd_run(&scenario, &opts, trend_csv.as_deref(), json, &watch)
        }
    }
}

fn cmd_validate(scenario_path: &Path) -> CliResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = tl_project::load_scenario(scenario_path)?;
    // Building the plant checks the constants against the model as well.
    tl_project::build_model(&scenario)?;
    println!("✓ Scenario '{}' is valid", scenario.name);
    Ok(())
}

fn cmd_init(scenario_path: &Path, force: bool) -> CliResult<()> {
    if scenario_path.exists() && !force {
        tracing::warn!(path = %scenario_path.display(), "scenario file already exists");
        return Err(CliError::Exists {
            path: scenario_path.display().to_string(),
        });
    }
    let scenario = ScenarioFile::default();
    let is_json = scenario_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        tl_project::save_json(scenario_path, &scenario)?;
    } else {
        tl_project::save_yaml(scenario_path, &scenario)?;
    }
    println!("✓ Wrote {}", scenario_path.display());
    Ok(())
}

/// Command-line flags win over the scenario's run section.
fn resolve_options(
    scenario: &ScenarioFile,
    dt: Option<f64>,
    steps: Option<usize>,
    realtime: bool,
) -> RunOptions {
    let mut opts = scenario.run.to_options();
    if let Some(dt) = dt {
        opts.dt = dt;
    }
    if let Some(steps) = steps {
        opts.steps = steps;
    }
    opts.realtime |= realtime;
    opts
}

#[derive(Serialize)]
struct RunReport<'a> {
    generated_at: String,
    scenario: &'a str,
    options: &'a RunOptions,
    summary: RunSummary,
    final_state: PlantSnapshot,
    watched: Vec<(String, SignalValue)>,
}

fn cmd_run(
    scenario: &ScenarioFile,
    opts: &RunOptions,
    trend_csv: Option<&Path>,
    json: bool,
    watch: &[String],
) -> CliResult<()> {
    let mut model = tl_project::build_model(scenario)?;
    for tag in watch {
        if model.read_tag(tag).is_none() {
            tracing::error!(tag = %tag, "watch tag does not resolve to an instrument");
            return Err(CliError::UnknownTag { tag: tag.clone() });
        }
    }

    if !json {
        println!("Running scenario: {}", scenario.name);
        println!(
            "  dt = {:.3} s, steps = {}, t_end = {:.3} s{}",
            opts.dt,
            opts.steps,
            opts.dt * opts.steps as f64,
            if opts.realtime { " (real time)" } else { "" }
        );
    }

    let started = Instant::now();
    let mut last_emit = Instant::now();
    let summary = tl_sim::run_with_observer(&mut model, opts, |model, report| {
        if json {
            return;
        }
        if report.sampled && !watch.is_empty() {
            clear_progress_line();
            println!("{}", watch_line(model, watch));
        }
        for change in &report.alarm_changes {
            clear_progress_line();
            let verb = if change.raised { "RAISED " } else { "cleared" };
            println!("  t={:>8.2}s  {} {}", report.time_s, verb, change.tag);
        }
        if last_emit.elapsed().as_millis() >= 100 {
            render_cli_progress(model.time(), opts, started);
            last_emit = Instant::now();
        }
    })?;

    if let Some(path) = trend_csv {
        tl_project::write_trend_csv(path, model.history())?;
    }

    if json {
        let report = RunReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            scenario: &scenario.name,
            options: opts,
            summary,
            final_state: model.snapshot(),
            watched: watch
                .iter()
                .filter_map(|tag| model.read_tag(tag).map(|v| (tag.clone(), v)))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    clear_progress_line();
    println!(
        "✓ Simulation completed in {:.3}s wall time",
        started.elapsed().as_secs_f64()
    );
    print_summary(&model, &summary);
    if let Some(path) = trend_csv {
        println!(
            "✓ Exported {} trend samples to {}",
            model.history().len(),
            path.display()
        );
    }
    Ok(())
}

fn watch_line(model: &ProcessModel, watch: &[String]) -> String {
    let mut line = format!("  t={:>8.2}s", model.time());
    for tag in watch {
        if let Some(value) = model.read_tag(tag) {
            line.push_str(&format!("  {}={}", tag, value));
        }
    }
    line
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(80));
    let _ = io::stdout().flush();
}

fn render_cli_progress(sim_time_s: f64, opts: &RunOptions, started: Instant) {
    let t_end = (opts.dt * opts.steps as f64).max(1.0e-12);
    let fraction = (sim_time_s / t_end).clamp(0.0, 1.0);
    let width = 28usize;
    let filled = ((fraction * width as f64).round() as usize).min(width);
    print!(
        "\r[{}{}] {:>6.2}%  t={:.2}/{:.2}s  elapsed={:.1}s",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled)),
        fraction * 100.0,
        sim_time_s,
        t_end,
        started.elapsed().as_secs_f64()
    );
    let _ = io::stdout().flush();
}

fn print_summary(model: &ProcessModel, summary: &RunSummary) {
    let snapshot = model.snapshot();

    println!("\nRun summary:");
    println!("  Steps:     {}", summary.steps);
    println!("  Sim time:  {:.3} s", summary.time_s);
    println!("  Pumped:    {:.2}", summary.pumped);
    println!("  Returned:  {:.2}", summary.returned);
    println!("  Lost:      {:.2}", summary.lost);
    println!(
        "  Alarms:    {} raised, {} cleared",
        summary.alarms_raised, summary.alarms_cleared
    );
    println!("  Samples:   {}", model.history().len());

    println!("\nTanks:");
    for tank in &snapshot.tanks {
        println!(
            "  {}  level={:>6.1}%  qty={:>6.2}  temp={:>6.2}°C",
            tank.name,
            tank.level * 100.0,
            tank.quantity,
            tank.temp_c
        );
    }

    println!(
        "\nPump {}: {}  speed={:.2}",
        snapshot.pump.name,
        if snapshot.pump.running { "RUN" } else { "STOP" },
        snapshot.pump.speed
    );
    println!(
        "Heater {}: {}  power={:.2}",
        snapshot.heater.name,
        if snapshot.heater.on { "ON" } else { "OFF" },
        snapshot.heater.power
    );

    let active: Vec<_> = snapshot.active_alarms().collect();
    if active.is_empty() {
        println!("\nNo active alarms");
    } else {
        println!("\nActive alarms:");
        for alarm in active {
            println!("  {:<8} {}", alarm.tag, alarm.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_scenario_run_section() {
        let scenario = ScenarioFile::default();
        let opts = resolve_options(&scenario, Some(0.05), None, true);
        assert_eq!(opts.dt, 0.05);
        assert_eq!(opts.steps, scenario.run.steps);
        assert!(opts.realtime);

        let opts = resolve_options(&scenario, None, Some(10), false);
        assert_eq!(opts.dt, scenario.run.dt_s);
        assert_eq!(opts.steps, 10);
        assert!(!opts.realtime);
    }

    #[test]
    fn cli_parses_repeated_watch() {
        let cli = Cli::try_parse_from([
            "tl-cli", "run", "--steps", "5", "--watch", "T1.LEVEL", "-w", "T3.HI",
        ])
        .unwrap();
        match cli.command {
            Commands::Run { steps, watch, .. } => {
                assert_eq!(steps, Some(5));
                assert_eq!(watch, vec!["T1.LEVEL", "T3.HI"]);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn watch_line_formats_values() {
        let model = ProcessModel::new().unwrap();
        let line = watch_line(&model, &["P1.RUN".to_string()]);
        assert!(line.contains("P1.RUN=ON"));
    }
}
