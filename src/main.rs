//! Crucible CLI
//!
//! Command-line front end for the conformance harness: build (or accept) the
//! binary under test, discover fixtures, then check or capture.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crucible::build::{self, BuildConfig};
use crucible::term::Reporter;
use crucible::{FixtureStore, Runner, Session, SessionConfig};

/// Exit code when at least one fixture failed.
const EXIT_FIXTURES_FAILED: u8 = 1;
/// Exit code for harness-level errors (build, discovery, markers, spawn).
const EXIT_HARNESS_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "crucible")]
#[command(author, version, about = "Conformance test harness for compiled language toolchains", long_about = None)]
struct Cli {
    /// Path to the build directory
    #[arg(long, value_name = "DIR", default_value = "./build")]
    build_dir: PathBuf,

    /// Target name passed to the external build step; the binary under test
    /// resolves to <BUILD_DIR>/<NAME>
    #[arg(long, value_name = "NAME", required_unless_present = "binary")]
    target: Option<String>,

    /// Test an already-built binary, skipping the build step
    #[arg(long, value_name = "PATH", conflicts_with = "target")]
    binary: Option<PathBuf>,

    /// Directory recursively scanned for fixture files
    #[arg(long, value_name = "DIR", default_value = "./tests")]
    fixtures: PathBuf,

    /// Fixture file extension
    #[arg(long, value_name = "EXT", default_value = "t")]
    ext: String,

    /// Working directory handed to the binary under test
    #[arg(long, value_name = "DIR")]
    workdir: Option<PathBuf>,

    /// Per-fixture deadline in seconds; expired runs count as failures
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Regenerate expectation markers from actual output instead of checking
    #[arg(long)]
    capture: bool,

    /// Stop at the first failing fixture instead of running everything
    #[arg(long)]
    fail_fast: bool,

    /// Print succeeding and ignored fixtures individually
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging();

    let mut reporter = Reporter::stdout();
    match run(&cli, &mut reporter) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FIXTURES_FAILED),
        Err(err) => {
            let _ = reporter.error_line(&format!("{err:#}"));
            ExitCode::from(EXIT_HARNESS_ERROR)
        }
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `Ok(true)` when the session completed with zero failures.
fn run(cli: &Cli, reporter: &mut Reporter) -> anyhow::Result<bool> {
    let binary = match (&cli.binary, &cli.target) {
        (Some(path), _) => path.clone(),
        (None, Some(target)) => {
            let config = BuildConfig {
                build_dir: cli.build_dir.clone(),
                target: target.clone(),
            };
            let binary = build::build_target(&config)?;
            if cli.verbose {
                reporter.build_line(target)?;
            }
            binary
        }
        (None, None) => unreachable!("clap requires --target or --binary"),
    };

    let fixtures = FixtureStore::new(&cli.fixtures, &cli.ext).discover()?;

    let mut runner = Runner::new(&binary);
    if let Some(dir) = &cli.workdir {
        runner = runner.with_workdir(dir);
    }
    if let Some(secs) = cli.timeout {
        runner = runner.with_deadline(Duration::from_secs(secs));
    }

    let config = SessionConfig {
        verbose: cli.verbose,
        fail_fast: cli.fail_fast,
    };
    let mut session = Session::new(config, reporter);

    if cli.capture {
        let captured = session.capture(&fixtures, |fixture| runner.run(fixture.path()))?;
        reporter.info_line(&format!("captured {captured} expectation file(s)"))?;
        Ok(true)
    } else {
        let tally = session.check(&fixtures, |fixture| runner.run(fixture.path()))?;
        Ok(tally.all_passed())
    }
}
