// M/M/1 Queue Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/mm1-queue-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/mm1-queue-simulator --arrival-rate 5 --service-rate 4 --horizon 200 --seed 7 --verbose
// ```

use anyhow::{Context, Result};
use clap::Parser;
use mm1_queue_simulator::analysis::{load_trace, summarize_trace};
use mm1_queue_simulator::simulation::{
    format_minutes, JsonlTraceWriter, LoggingConfig, RunReport, SimulationController, TraceSink,
};
use mm1_queue_simulator::types::config::CliArgs;
use mm1_queue_simulator::types::SimulationConfig;
use std::fs::File;
use std::io::BufWriter;
use std::process;
use std::thread;
use std::time::Duration;
use tracing::{error, info, Level};

/// Number of progress lines logged over a run at `info` level
const PROGRESS_STEPS: u64 = 10;

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags; keep the file guard alive until exit
    let level = if args.debug {
        Level::DEBUG
    } else if args.verbose {
        Level::INFO
    } else {
        Level::WARN
    };
    let mut logging = LoggingConfig::new().with_level(level);
    if args.debug || args.verbose {
        logging = logging.with_span_events();
    }
    if let Some(dir) = &args.log_dir {
        logging = logging.with_file_logging(dir.clone());
    }
    let _log_guard = match logging.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting M/M/1 queue simulator");

    // Load configuration from CLI arguments and optional config file
    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    if let Some(path) = &args.summarize_trace {
        if let Err(e) = print_trace_summary(path, config.horizon) {
            error!("Trace summary failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
        return;
    }

    // Handle dry run mode
    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    match run_simulation(&config) {
        Ok(report) => match report.render(config.output_format) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                error!("Failed to render report: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Simulation failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }

    info!("M/M/1 queue simulator completed successfully");
}

/// Drive the controller tick by tick until the horizon
fn run_simulation(config: &SimulationConfig) -> Result<RunReport> {
    let mut controller =
        SimulationController::from_config(config).context("Failed to create simulation controller")?;

    let mut sink: Option<JsonlTraceWriter<BufWriter<File>>> = match &config.trace_output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create trace output file {}", path))?;
            info!("Writing time series to {}", path);
            Some(JsonlTraceWriter::new(BufWriter::new(file)))
        }
        None => None,
    };

    let interval = Duration::from_millis(config.tick_interval_ms);
    let progress_every = (config.tick_count() / PROGRESS_STEPS).max(1);

    controller.start()?;
    eprintln!("Seed: {}", controller.seed());

    loop {
        let tick = controller.tick(config.tick_delta)?;

        if let Some(writer) = sink.as_mut() {
            for sample in &tick.samples {
                writer.record(sample).context("Failed to write trace sample")?;
            }
        }

        if controller.ticks() % progress_every == 0 || tick.is_complete() {
            info!(
                logical_time = tick.state.logical_time,
                in_system = tick.state.customers_in_system,
                queued = tick.state.customers_in_queue,
                arrived = tick.statistics.total_arrived,
                served = tick.statistics.total_served,
                "Progress"
            );
        }

        if tick.is_complete() {
            break;
        }
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }

    if let Some(mut writer) = sink {
        writer.flush().context("Failed to flush trace output")?;
        eprintln!("Trace samples written: {}", writer.written());
    }

    Ok(controller.report())
}

fn print_trace_summary(path: &str, horizon: f64) -> Result<()> {
    let samples = load_trace(path).with_context(|| format!("Failed to load trace {}", path))?;

    match summarize_trace(&samples, horizon) {
        Some(summary) => {
            println!("Trace:                 {}", path);
            println!("Samples:               {}", summary.sample_count);
            println!("First sample:          {}", format_minutes(summary.first_time));
            println!("Last sample:           {}", format_minutes(summary.last_time));
            println!("Peak in system:        {}", summary.peak_customers_in_system);
            println!("Mean in system (L):    {:.4}", summary.mean_customers_in_system);
        }
        None => println!("Trace {} contains no samples", path),
    }
    Ok(())
}

/// Print startup banner with configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("M/M/1 Queue Simulator v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("=====================================");
    print_configuration_summary(config);
    eprintln!();
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    let params = config.queue_parameters();
    eprintln!("Configuration:");
    eprintln!("  Arrival rate: {} {}", config.arrival_rate, config.rate_unit);
    eprintln!("  Service rate: {} {}", config.service_rate, config.rate_unit);
    eprintln!("  Offered load: {:.4}", params.offered_load());
    eprintln!("  Horizon: {}", format_minutes(config.horizon));
    eprintln!("  Tick delta: {} ({} ticks)", format_minutes(config.tick_delta), config.tick_count());
    match config.seed {
        Some(seed) => eprintln!("  Seed: {}", seed),
        None => eprintln!("  Seed: drawn at startup"),
    }
    if let Some(path) = &config.trace_output {
        eprintln!("  Trace output: {}", path);
    }
    eprintln!("  Report format: {}", config.output_format);
}
