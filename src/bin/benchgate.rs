use std::{path::PathBuf, process, time::Duration};

use benchgate::{
    GateConfig, RegressionGate, ThresholdTable,
    baseline::{DEFAULT_BASELINE_FILE, DEFAULT_FETCH_TIMEOUT},
    config::DEFAULT_REPORT_FILE,
    gate::EXIT_FAIL,
    thresholds::{DEFAULT_EXECUTION_TIME, DEFAULT_MEMORY_USAGE, DEFAULT_THROUGHPUT},
};
use clap::{Parser, error::ErrorKind};
use tracing_subscriber::EnvFilter;

/// Compare benchmark output against the stored baseline and fail on regressions.
#[derive(Parser, Debug)]
#[command(name = "benchgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File containing `go test -bench` output
    results: PathBuf,

    /// Local baseline file
    #[arg(long, env = "BENCHGATE_BASELINE_FILE", default_value = DEFAULT_BASELINE_FILE)]
    baseline: PathBuf,

    /// Remote baseline fetched before the local file
    #[arg(long, env = "BENCHGATE_BASELINE_URL")]
    baseline_url: Option<String>,

    /// Markdown report destination
    #[arg(long, env = "BENCHGATE_REPORT_FILE", default_value = DEFAULT_REPORT_FILE)]
    report: PathBuf,

    /// Seconds to wait for the remote baseline
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    fetch_timeout_secs: u64,

    /// Flag when current/baseline ns/op exceeds this ratio
    #[arg(long, default_value_t = DEFAULT_EXECUTION_TIME)]
    time_threshold: f64,

    /// Flag when current/baseline B/op exceeds this ratio
    #[arg(long, default_value_t = DEFAULT_MEMORY_USAGE)]
    memory_threshold: f64,

    /// Flag when current/baseline ops/s falls below this ratio
    #[arg(long, default_value_t = DEFAULT_THROUGHPUT)]
    throughput_threshold: f64,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            process::exit(EXIT_FAIL);
        }
    };
    init_logging(&cli.log_level);

    let config = match build_config(&cli) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(EXIT_FAIL);
        }
    };

    let gate = match RegressionGate::new(config) {
        Ok(gate) => gate,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(EXIT_FAIL);
        }
    };

    let run = match gate.run() {
        Ok(run) => run,
        Err(err) => {
            eprintln!("{err}");
            process::exit(EXIT_FAIL);
        }
    };

    println!("{}", run.report);
    if run.baseline_updated {
        println!("\n✅ Baseline updated with current results");
    }
    for err in &run.write_errors {
        eprintln!("{err}");
    }
    process::exit(run.exit_code());
}

fn build_config(cli: &Cli) -> Result<GateConfig, benchgate::BenchGateError> {
    let thresholds = ThresholdTable::new(
        cli.time_threshold,
        cli.memory_threshold,
        cli.throughput_threshold,
    )?;
    let mut config = GateConfig::new(&cli.results)
        .with_baseline_path(&cli.baseline)
        .with_report_path(&cli.report)
        .with_fetch_timeout(Duration::from_secs(cli.fetch_timeout_secs))
        .with_thresholds(thresholds);
    if let Some(url) = cli.baseline_url.as_deref().filter(|u| !u.is_empty()) {
        config = config.with_baseline_url(url);
    }
    Ok(config)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
