use check_jvm_gc::config::{CheckConfig, ThresholdSet};
use check_jvm_gc::evaluator::Status;
use check_jvm_gc::jstat_repo::JstatRepo;
use check_jvm_gc::{runner, version};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

/// JVM full-GC health check, monitoring-plugin conventions: one output
/// line on stdout, exit code OK=0 / WARNING=1 / CRITICAL=2 / UNKNOWN=3.
#[derive(Parser)]
#[command(name = "check_jvm_gc", version = version::VERSION)]
#[command(about = "Check JVM full-GC time and count against a ~1-interval-old baseline")]
struct Cli {
    /// Exit with WARNING if the full GC time delta reaches this value
    #[arg(short = 'w', long, value_name = "msec", default_value_t = 200)]
    time_warning: u64,

    /// Exit with CRITICAL if the full GC time delta reaches this value
    #[arg(short = 'c', long, value_name = "msec", default_value_t = 1000)]
    time_critical: u64,

    /// Exit with WARNING if the full GC count delta reaches this value
    #[arg(short = 'W', long, value_name = "count", default_value_t = 3)]
    count_warning: u64,

    /// Exit with CRITICAL if the full GC count delta reaches this value
    #[arg(short = 'C', long, value_name = "count", default_value_t = 10)]
    count_critical: u64,

    /// Java process name filter (jps substring match)
    #[arg(short = 'n', long, value_name = "name")]
    name: String,

    /// Monitoring interval in seconds
    #[arg(short = 'i', long, value_name = "sec", default_value_t = 600)]
    interval: u64,

    /// Directory for the two history slot files
    #[arg(short = 't', long, value_name = "path", default_value = "/tmp")]
    tempdir: PathBuf,

    /// JDK bin directory containing jps and jstat
    #[arg(short = 'b', long, value_name = "path", default_value = "/usr/bin")]
    bin: PathBuf,

    /// Debug-level logging on stderr
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            // clap's usual exit code 2 would read as CRITICAL to the
            // scheduler; bad usage is a configuration problem, so UNKNOWN.
            let reason = e.to_string();
            let first_line = reason.lines().next().unwrap_or("invalid arguments");
            println!("UNKNOWN: {}", first_line);
            std::process::exit(Status::Unknown.exit_code());
        }
    };

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Diagnostics go to stderr; stdout carries exactly the one plugin line.
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(name = version::NAME, version = version::VERSION, "starting check");

    let config = CheckConfig {
        process_name: cli.name,
        interval_secs: cli.interval,
        storage_dir: cli.tempdir,
        tool_dir: cli.bin.clone(),
        thresholds: ThresholdSet {
            time_warning: cli.time_warning,
            time_critical: cli.time_critical,
            count_warning: cli.count_warning,
            count_critical: cli.count_critical,
        },
    };

    let source = JstatRepo::new(cli.bin);
    let verdict = runner::run(&config, &source);
    println!("{}", verdict);
    std::process::exit(verdict.status.exit_code());
}
