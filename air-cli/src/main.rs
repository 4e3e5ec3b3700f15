//! airguard - Air Quality Monitor
//! Command-line interface for running, checking and querying the monitor

mod presenters;

use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use colored::*;
use tokio::runtime::Runtime;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use air_actuator::{ActuatorBank, pins};
use air_core::prelude::*;
use air_engine::{Preset, Threshold, factory_threshold};
use air_environment::{ADC_MAX, AnalogChannel, DHT_PIN, PanelConfig, ScriptedSource, SimulatedPanel};
use air_orchestration::{
    CycleReport, MAX_PERIOD_MS, MIN_PERIOD_MS, Monitor, MonitorConfig, RunConfig, RunSummary,
    format_duration,
};

use presenters::{LcdPresenter, SerialPresenter, paint_band};

#[derive(Parser)]
#[command(name = "airguard")]
#[command(author = "Silvano Neto <dev@silvanoneto.com>")]
#[command(version = "2026.1.16")]
#[command(about = "airguard - Air Quality Monitor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Origem da configuração: arquivo TOML ou preset embutido
#[derive(Args, Debug, Clone, Default)]
struct ConfigArgs {
    /// Configuration file (airguard.toml)
    #[arg(short, long, value_name = "FILE", conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in preset: full, indoor or basic
    #[arg(short, long, value_name = "NAME")]
    preset: Option<Preset>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monitor loop against the simulated panel or a replay file
    Run {
        #[command(flatten)]
        source: ConfigArgs,

        /// Number of cycles (0 = until the source is exhausted or forever)
        #[arg(short = 'n', long, default_value_t = 0)]
        cycles: u64,

        /// Sampling period in milliseconds (overrides the configuration)
        #[arg(long, value_name = "MS")]
        period_ms: Option<u64>,

        /// Potentiometer position as ADC count (e.g., pm25=2048)
        #[arg(short, long = "knob", value_name = "PARAM=COUNT", value_parser = parse_assignment::<u16>)]
        knobs: Vec<(ParameterId, u16)>,

        /// Sweep every knob and the climate sensor
        #[arg(long)]
        sweep: bool,

        /// Make the climate sensor fail every N samples (0 = never)
        #[arg(long, value_name = "N", default_value_t = 0)]
        fault_every: u64,

        /// Also draw the 20x4 LCD
        #[arg(long)]
        lcd: bool,

        /// Replay raw samples from a JSON-lines file instead of the panel
        #[arg(short, long, value_name = "FILE")]
        replay: Option<PathBuf>,

        /// Restart the replay file when it ends
        #[arg(long, requires = "replay")]
        repeat: bool,

        /// Emit one JSON report per cycle instead of the serial block
        #[arg(long)]
        json: bool,

        /// Disable colored bands
        #[arg(long)]
        no_color: bool,
    },

    /// Classify hand-entered values once (e.g., pm25=80 co=12)
    Classify {
        #[command(flatten)]
        source: ConfigArgs,

        /// Parameter values
        #[arg(value_name = "PARAM=VALUE", required = true, value_parser = parse_assignment::<f32>)]
        values: Vec<(ParameterId, f32)>,

        /// Print the evaluation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a configuration file
    Check {
        /// Configuration file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print a preset as a configuration file
    Preset {
        /// Preset name: full, indoor or basic
        #[arg(value_name = "NAME")]
        name: Preset,
    },

    /// Show parameters, thresholds, presets and pins
    Info,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            source,
            cycles,
            period_ms,
            knobs,
            sweep,
            fault_every,
            lcd,
            replay,
            repeat,
            json,
            no_color,
        } => run_command(RunOptions {
            source,
            cycles,
            period_ms,
            knobs,
            sweep,
            fault_every,
            lcd,
            replay,
            repeat,
            json,
            color: !no_color,
        }),

        Commands::Classify {
            source,
            values,
            json,
        } => classify_command(&source, &values, json),

        Commands::Check { file } => check_command(&file),

        Commands::Preset { name } => preset_command(name),

        Commands::Info => {
            print_info();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Logs vão para stderr; stdout fica com os blocos do monitor
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airguard=info,air_orchestration=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

// ============================================================================
// Argument helpers
// ============================================================================

/// `param=valor`, com o parâmetro em qualquer grafia aceita
fn parse_assignment<T>(s: &str) -> Result<(ParameterId, T), String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PARAM=VALUE, got '{}'", s))?;

    let parameter = ParameterId::from_str(name).map_err(|e| e.to_string())?;
    let value = value
        .trim()
        .parse::<T>()
        .map_err(|e| format!("invalid value for {}: {}", parameter, e))?;

    Ok((parameter, value))
}

/// Arquivo validado ou preset (padrão `full`)
fn load_config(args: &ConfigArgs) -> anyhow::Result<MonitorConfig> {
    let config = match &args.config {
        Some(path) => MonitorConfig::from_file(path)?,
        None => MonitorConfig::from_preset(args.preset.unwrap_or_default()),
    };
    config.validate()?;
    Ok(config)
}

// ============================================================================
// run
// ============================================================================

struct RunOptions {
    source: ConfigArgs,
    cycles: u64,
    period_ms: Option<u64>,
    knobs: Vec<(ParameterId, u16)>,
    sweep: bool,
    fault_every: u64,
    lcd: bool,
    replay: Option<PathBuf>,
    repeat: bool,
    json: bool,
    color: bool,
}

fn run_command(options: RunOptions) -> anyhow::Result<()> {
    let mut config = load_config(&options.source)?;
    if let Some(period_ms) = options.period_ms {
        if !(MIN_PERIOD_MS..=MAX_PERIOD_MS).contains(&period_ms) {
            bail!(
                "--period-ms must be between {} and {} (got {})",
                MIN_PERIOD_MS,
                MAX_PERIOD_MS,
                period_ms
            );
        }
        config.monitor.period_ms = period_ms;
    }

    let engine = config.engine()?;
    let parameters = config.parameters();
    let run = RunConfig::cycles(options.cycles).with_scheduler(config.scheduler());

    if !options.json {
        println!(
            "{} {} ({} parameters, every {} ms)",
            "    Starting".green().bold(),
            config.monitor.name.cyan(),
            parameters.len(),
            config.monitor.period_ms
        );
    }

    match &options.replay {
        Some(path) => {
            if !options.knobs.is_empty() || options.sweep {
                bail!("--knob and --sweep only apply to the simulated panel");
            }
            let source = ScriptedSource::from_file(&parameters, path)?
                .with_repeat(options.repeat)
                .with_fallbacks(config.fallbacks.clone());
            let monitor = Monitor::new(&config.monitor.name, source, engine, ActuatorBank::leds())?;
            drive(monitor, &run, &options)
        }
        None => {
            let panel_config = PanelConfig::for_parameters(&parameters)
                .with_sweep(options.sweep)
                .with_climate_fault_every(options.fault_every)
                .with_fallbacks(config.fallbacks.clone());
            let mut panel = SimulatedPanel::with_config(panel_config)?;
            for (parameter, count) in &options.knobs {
                panel
                    .set_knob(*parameter, *count)
                    .with_context(|| format!("cannot set knob {}={}", parameter.key(), count))?;
            }
            let monitor = Monitor::new(&config.monitor.name, panel, engine, ActuatorBank::leds())?;
            drive(monitor, &run, &options)
        }
    }
}

fn drive<S: Sensor>(
    mut monitor: Monitor<S>,
    run: &RunConfig,
    options: &RunOptions,
) -> anyhow::Result<()> {
    if !options.json {
        monitor.add_presenter(Box::new(SerialPresenter::new(io::stdout(), options.color)));
        if options.lcd {
            monitor.add_presenter(Box::new(LcdPresenter::new(io::stdout())));
        }
    }

    let stop = Arc::new(AtomicBool::new(false));
    let signals = signal_runtime()?;
    stop_on(&signals, Arc::clone(&stop), shutdown_signal());

    let json = options.json;
    let summary = monitor.run_with(run, &stop, |report| {
        if json {
            print_json_report(report);
        } else if let Some(reason) = skipped_reason(report) {
            println!("{} cycle {}: {}", "warning:".yellow().bold(), report.cycle, reason);
        }
    })?;

    if json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

// ============================================================================
// Signals
// ============================================================================

/// Runtime só para os sinais; o loop do monitor fica na thread principal
fn signal_runtime() -> anyhow::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("airguard-signals")
        .enable_all()
        .build()
        .context("failed to start signal runtime")
}

/// Levanta `stop` quando `signal` completa
fn stop_on<F>(runtime: &Runtime, stop: Arc<AtomicBool>, signal: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    runtime.spawn(async move {
        signal.await;
        stop.store(true, Ordering::Relaxed);
    });
}

/// Ctrl-C ou SIGTERM encerram o loop no fim do ciclo corrente
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl-C, stopping monitor"),
        () = terminate => info!("received SIGTERM, stopping monitor"),
    }
}

fn print_json_report(report: &CycleReport) {
    match serde_json::to_string(report) {
        Ok(line) => println!("{}", line),
        Err(e) => error!(cycle = report.cycle, error = %e, "failed to encode cycle report"),
    }
}

fn skipped_reason(report: &CycleReport) -> Option<&str> {
    use air_orchestration::CycleOutcome;

    match &report.outcome {
        CycleOutcome::Skipped { reason } | CycleOutcome::ActuationFailed { reason, .. } => {
            Some(reason.as_str())
        }
        _ => None,
    }
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} {} after {} cycle(s)",
        "    Finished".green().bold(),
        summary.stop_reason,
        summary.stats.cycles
    );
    println!(
        "  completed: {}  skipped: {}  actuation failures: {}  output changes: {}",
        summary.stats.completed,
        summary.stats.skipped,
        summary.stats.actuation_failures,
        summary.stats.actuator_changes
    );
    println!("  final state: {}", summary.final_state);
    println!(
        "  cycle time: avg {} / max {}",
        format_duration(summary.scheduler.avg_execution_time),
        format_duration(summary.scheduler.max_execution_time)
    );
}

// ============================================================================
// classify / check / preset
// ============================================================================

fn classify_command(
    source: &ConfigArgs,
    values: &[(ParameterId, f32)],
    json: bool,
) -> anyhow::Result<()> {
    let config = load_config(source)?;
    let engine = config.engine()?;

    let reading = Reading::new(values.iter().copied())?;
    let evaluation = engine
        .evaluate(&reading)
        .context("every configured parameter needs a value")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }

    for (parameter, band) in evaluation.classification.iter() {
        let value = reading.get(parameter).unwrap_or(f32::NAN);
        println!(
            "  {:<9} {:>8.1} {:<6} {}",
            parameter.label(),
            value,
            parameter.unit(),
            paint_band(band, true)
        );
    }
    println!();
    for kind in ActuatorKind::ALL {
        let state = if evaluation.actuators.get(kind) {
            "ON".red().bold()
        } else {
            "OFF".dimmed()
        };
        println!("  {:<6} {}", kind.label(), state);
    }

    Ok(())
}

fn check_command(file: &Path) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "Checking".green().bold(),
        file.display().to_string().cyan()
    );

    let config = MonitorConfig::from_file(file)?;
    config.validate()?;

    for (parameter, threshold) in config.thresholds().iter() {
        println!(
            "  {} {:<9} {}",
            "✓".green(),
            parameter.label().cyan(),
            describe_threshold(threshold)
        );
    }

    println!(
        "{} No errors found ({} parameter(s), {} ms period)",
        "    Finished".green().bold(),
        config.parameters().len(),
        config.monitor.period_ms
    );
    Ok(())
}

fn preset_command(preset: Preset) -> anyhow::Result<()> {
    let text = MonitorConfig::from_preset(preset).to_toml_string()?;
    print!("{}", text);
    Ok(())
}

fn describe_threshold(threshold: &Threshold) -> String {
    match threshold {
        Threshold::Ceiling {
            safe_limit,
            hazard_limit,
        } => format!("MODERATE >= {}, HAZARD >= {}", safe_limit, hazard_limit),
        Threshold::Comfort {
            low_limit,
            high_limit,
        } => format!("MODERATE < {}, HAZARD >= {}", low_limit, high_limit),
    }
}

// ============================================================================
// info
// ============================================================================

fn print_info() {
    println!("{}", "airguard - Air Quality Monitor".bold());
    println!();
    println!("Classifies each reading into SAFE / MODERATE / HAZARD and drives");
    println!("alarm, fan and vent outputs from the bands.");
    println!();
    println!("{}", "Parameters:".bold());
    for parameter in ParameterId::ALL {
        let pin = match AnalogChannel::factory(parameter) {
            Some(channel) => format!("ADC pin {}", channel.pin),
            None => format!("DHT22 pin {}", DHT_PIN),
        };
        println!(
            "  {:<9} {:<6} {:<34} {}",
            parameter.label().cyan(),
            parameter.unit(),
            describe_threshold(&factory_threshold(parameter)),
            pin
        );
    }
    println!();
    println!("{}", "Presets:".bold());
    for preset in Preset::ALL {
        println!("  {:<7} {}", preset.name().cyan(), preset.description());
    }
    println!();
    println!("{}", "Outputs:".bold());
    println!("  ALARM  pin {}  any parameter HAZARD", pins::ALARM);
    println!("  FAN    pin {}  particulates not SAFE", pins::FAN);
    println!("  VENT   pin {}  gases not SAFE, climate HAZARD", pins::VENT);
    println!();
    println!("{}", "Commands:".bold());
    println!("  airguard run --preset basic -n 10        # Ten cycles on the simulated panel");
    println!("  airguard run --knob pm25=3000 --lcd      # Fixed knob, with LCD");
    println!("  airguard run --replay samples.jsonl      # Replay raw samples");
    println!("  airguard classify pm25=80 co=12 -p basic # One-shot evaluation");
    println!("  airguard check airguard.toml             # Validate a config");
    println!("  airguard preset indoor > airguard.toml   # Start a config from a preset");
    println!();
    println!("ADC resolution: 12 bits (0..={})", ADC_MAX);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment::<f32>("PM2.5=80").unwrap(),
            (ParameterId::Pm25, 80.0)
        );
        assert_eq!(
            parse_assignment::<u16>("temp = 2048").unwrap(),
            (ParameterId::Temperature, 2048)
        );
        assert!(parse_assignment::<f32>("pm25").is_err());
        assert!(parse_assignment::<f32>("radon=3").is_err());
        assert!(parse_assignment::<u16>("co=70000").is_err());
    }

    #[test]
    fn test_run_arguments() {
        let cli = Cli::try_parse_from([
            "airguard", "run", "-p", "basic", "-n", "3", "--knob", "pm25=4000", "--knob",
            "co=10", "--lcd",
        ])
        .unwrap();

        match cli.command {
            Commands::Run {
                source,
                cycles,
                knobs,
                lcd,
                ..
            } => {
                assert_eq!(source.preset, Some(Preset::Basic));
                assert_eq!(cycles, 3);
                assert_eq!(knobs, vec![(ParameterId::Pm25, 4000), (ParameterId::Co, 10)]);
                assert!(lcd);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_config_and_preset_conflict() {
        let result = Cli::try_parse_from([
            "airguard", "classify", "-c", "a.toml", "-p", "basic", "pm25=1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_repeat_requires_replay() {
        assert!(Cli::try_parse_from(["airguard", "run", "--repeat"]).is_err());
    }

    #[test]
    fn test_load_config_default_is_full() {
        let config = load_config(&ConfigArgs::default()).unwrap();
        assert_eq!(config.parameters().len(), 8);
    }

    #[test]
    fn test_load_config_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[monitor]\nperiod_ms = 0\n").unwrap();

        let args = ConfigArgs {
            config: Some(path),
            preset: None,
        };
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_describe_threshold() {
        assert_eq!(
            describe_threshold(&Threshold::ceiling(75.0, 150.0)),
            "MODERATE >= 75, HAZARD >= 150"
        );
        assert_eq!(
            describe_threshold(&Threshold::comfort(30.0, 70.0)),
            "MODERATE < 30, HAZARD >= 70"
        );
    }

    #[test]
    fn test_skipped_reason() {
        let report = CycleReport {
            cycle: 4,
            outcome: air_orchestration::CycleOutcome::Skipped {
                reason: "sensor read failed".into(),
            },
            actuators: ActuatorState::off(),
            elapsed: std::time::Duration::ZERO,
        };
        assert_eq!(skipped_reason(&report), Some("sensor read failed"));
    }

    fn wait_for(flag: &AtomicBool) -> bool {
        for _ in 0..200 {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_signal_sets_stop_flag() {
        let runtime = signal_runtime().unwrap();
        let stop = Arc::new(AtomicBool::new(false));
        stop_on(&runtime, Arc::clone(&stop), async {});
        assert!(wait_for(&stop));
    }

    #[test]
    fn test_pending_signal_leaves_loop_running() {
        let runtime = signal_runtime().unwrap();
        let stop = Arc::new(AtomicBool::new(false));
        stop_on(&runtime, Arc::clone(&stop), std::future::pending::<()>());

        std::thread::sleep(std::time::Duration::from_millis(20));
        assert!(!stop.load(Ordering::Relaxed));
    }

    #[test]
    fn test_signal_interrupts_monitor() {
        let runtime = signal_runtime().unwrap();
        let stop = Arc::new(AtomicBool::new(false));
        stop_on(&runtime, Arc::clone(&stop), async {});
        assert!(wait_for(&stop));

        let panel = SimulatedPanel::with_config(PanelConfig::default()).unwrap();
        let mut monitor = Monitor::new(
            "signal",
            panel,
            air_engine::Engine::from_preset(Preset::Full),
            ActuatorBank::leds(),
        )
        .unwrap();
        let summary = monitor.run(&RunConfig::default(), &stop).unwrap();
        assert_eq!(summary.stop_reason, air_orchestration::StopReason::Interrupted);
        assert_eq!(summary.stats.cycles, 0);
    }
}
