//! Poker Test CLI
//!
//! Runs the poker test over the built-in sample, a seeded or OS-seeded
//! ChaCha20 stream, or a file of numbers, and prints the result.
//!
//! Exit status: 0 when the sequence passes, 2 when the test rejects it,
//! 1 on any error.

use clap::{Args, Parser, Subcommand};
use poker_test::{
    analysis::{PassCriterion, PokerTest, ResultSummary, TestError},
    classify::{
        repetition_pattern, ClassificationError, DigitLength, ExtractionPolicy, InvalidDigitLength,
    },
    config::{ConfigError, FileConfig, OutputConfig, OutputFormat, SourceKind},
    metrics::{MetricsError, MetricsRegistry},
    report::{render_records, RunReport},
    source::SourceError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "poker-test", version, about = "Poker test for pseudo-random numbers")]
struct Cli {
    /// TOML configuration file; flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the test once and print the result.
    Run(TestArgs),
    /// Run the test on fresh batches until interrupted.
    Watch {
        #[command(flatten)]
        args: TestArgs,
        /// Pause between runs, in milliseconds.
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Serve metrics on this port (needs the `metrics` feature).
        #[arg(long)]
        metrics_port: Option<u16>,
    },
    /// Show the digits and hand of individual values.
    Classify {
        /// Digits per value (3, 4 or 5).
        #[arg(short, long, default_value_t = 5)]
        digits: u8,
        /// Digit extraction policy.
        #[arg(long, default_value_t = ExtractionPolicy::Truncate)]
        policy: ExtractionPolicy,
        /// Values in [0, 1).
        #[arg(required = true)]
        values: Vec<f64>,
    },
}

#[derive(Debug, Args)]
struct TestArgs {
    /// Digits per value (3, 4 or 5).
    #[arg(short, long)]
    digits: Option<u8>,
    /// Digit extraction policy: truncate or round.
    #[arg(long)]
    policy: Option<ExtractionPolicy>,
    /// Verdict boundary: strict (<) or inclusive (<=).
    #[arg(long)]
    criterion: Option<PassCriterion>,
    /// Number source: sample, random or file.
    #[arg(long)]
    source: Option<SourceKind>,
    /// Values per batch for the random source.
    #[arg(short = 'n', long)]
    count: Option<usize>,
    /// Seed for the random source.
    #[arg(long)]
    seed: Option<u64>,
    /// Input file for the file source (implies --source file).
    #[arg(long)]
    file: Option<PathBuf>,
    /// Output format: table, json or prometheus.
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Also print the per-value classification table.
    #[arg(long)]
    records: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    DigitLength(#[from] InvalidDigitLength),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Test(#[from] TestError),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to install Ctrl-C handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("value {0} is outside [0, 1)")]
    OutOfRange(f64),
    #[cfg(feature = "metrics")]
    #[error("failed to start metrics runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match execute(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<ExitCode, CliError> {
    let mut config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    match cli.command {
        Command::Run(args) => {
            args.apply(&mut config)?;
            run_once(&config)
        }
        Command::Watch {
            args,
            interval_ms,
            metrics_port,
        } => {
            args.apply(&mut config)?;
            if let Some(interval_ms) = interval_ms {
                config.output.interval_ms = interval_ms;
            }
            if let Some(port) = metrics_port {
                config.output.metrics_port = port;
            }
            config.output.validate()?;
            watch(&config)
        }
        Command::Classify {
            digits,
            policy,
            values,
        } => classify_values(DigitLength::try_from(digits)?, policy, &values),
    }
}

impl TestArgs {
    fn apply(&self, config: &mut FileConfig) -> Result<(), CliError> {
        if let Some(digits) = self.digits {
            config.test.digit_length = DigitLength::try_from(digits)?;
        }
        if let Some(policy) = self.policy {
            config.test.extraction = policy;
        }
        if let Some(criterion) = self.criterion {
            config.test.criterion = criterion;
        }
        if let Some(kind) = self.source {
            config.source.kind = kind;
        }
        if let Some(count) = self.count {
            config.source.count = count;
        }
        if let Some(seed) = self.seed {
            config.source.seed = Some(seed);
        }
        if let Some(path) = &self.file {
            config.source.path = Some(path.clone());
            if self.source.is_none() {
                config.source.kind = SourceKind::File;
            }
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.records {
            config.output.records = true;
        }
        config.source.validate()?;
        Ok(())
    }
}

fn run_once(config: &FileConfig) -> Result<ExitCode, CliError> {
    let mut source = config.source.build()?;
    let numbers = source.next_batch()?;
    let summary = config.test.run(&numbers)?;

    let registry = MetricsRegistry::new()?;
    registry.record(&summary);

    let report = RunReport::new(source.describe(), summary.clone());
    print_run(&config.output, report, &registry)?;

    Ok(verdict_code(&summary))
}

fn watch(config: &FileConfig) -> Result<ExitCode, CliError> {
    if config.source.kind == SourceKind::Sample {
        warn!("Watching the built-in sample repeats the same result every run");
    }

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))?;
    }

    let registry = MetricsRegistry::new()?;
    let exporter = start_exporter(config.output.metrics_port)?;

    let mut source = config.source.build()?;
    let interval = Duration::from_millis(config.output.interval_ms);
    let mut runs = 0u64;
    let mut failures = 0u64;
    let mut last = ExitCode::SUCCESS;

    info!(source = %source.describe(), "Watching; press Ctrl-C to stop");

    while running.load(Ordering::SeqCst) {
        let numbers = source.next_batch()?;
        let summary = config.test.run(&numbers)?;

        runs += 1;
        if !summary.passed {
            failures += 1;
            warn!(
                run = runs,
                chi_squared = summary.chi_squared,
                critical_value = summary.critical_value,
                "Sequence rejected"
            );
        }

        registry.record(&summary);
        exporter.record(&summary);
        last = verdict_code(&summary);

        let report = RunReport::new(source.describe(), summary);
        print_run(&config.output, report, &registry)?;
        std::thread::sleep(interval);
    }

    info!(runs, failures, "Stopped");
    Ok(last)
}

fn classify_values(
    length: DigitLength,
    policy: ExtractionPolicy,
    values: &[f64],
) -> Result<ExitCode, CliError> {
    let test = PokerTest::new(length).with_extraction(policy);

    for &value in values {
        if !(0.0..1.0).contains(&value) {
            return Err(CliError::OutOfRange(value));
        }
        let record = test.classify_value(value)?;
        println!(
            "{}\t{}\t{:?}\t{} ({})",
            record.value,
            record.digits,
            repetition_pattern(&record.digits),
            record.category.code(),
            record.category
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn print_run(
    output: &OutputConfig,
    report: RunReport,
    registry: &MetricsRegistry,
) -> Result<(), CliError> {
    match output.format {
        OutputFormat::Table => {
            if output.records {
                println!("{}", render_records(&report.summary));
            }
            println!("{}", report.render_text());
        }
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Prometheus => print!("{}", registry.encode()?),
    }
    Ok(())
}

fn verdict_code(summary: &ResultSummary) -> ExitCode {
    if summary.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

/// Handle to the optional HTTP exporter; a no-op when disabled.
struct Exporter {
    #[cfg(feature = "metrics")]
    inner: Option<(
        tokio::runtime::Runtime,
        Arc<tokio::sync::RwLock<poker_test::metrics::MetricsState>>,
    )>,
}

#[cfg(feature = "metrics")]
impl Exporter {
    fn record(&self, summary: &ResultSummary) {
        if let Some((_, state)) = &self.inner {
            state.blocking_write().record(summary);
        }
    }
}

#[cfg(not(feature = "metrics"))]
impl Exporter {
    fn record(&self, _summary: &ResultSummary) {}
}

#[cfg(feature = "metrics")]
fn start_exporter(port: u16) -> Result<Exporter, CliError> {
    use poker_test::metrics::{MetricsServer, MetricsServerConfig};

    if port == 0 {
        return Ok(Exporter { inner: None });
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let server = MetricsServer::new(
        MetricsServerConfig::with_port(port),
        MetricsRegistry::new()?,
    );
    let state = server.state();

    runtime.spawn(async move {
        if let Err(e) = server.run().await {
            tracing::error!(error = %e, "Metrics server stopped");
        }
    });

    Ok(Exporter {
        inner: Some((runtime, state)),
    })
}

#[cfg(not(feature = "metrics"))]
fn start_exporter(port: u16) -> Result<Exporter, CliError> {
    if port != 0 {
        warn!(port, "Built without the `metrics` feature; not serving metrics");
    }
    Ok(Exporter {})
}
