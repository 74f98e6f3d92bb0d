//! External build step
//!
//! Builds the toolchain binary under test by driving the project's build
//! system (`cmake` generation followed by `make <target>`). The build system
//! is an opaque collaborator: any failure here is fatal and reported before
//! fixture discovery begins.
//!
//! Both steps run with `Command::current_dir` pointed at the build
//! directory; the harness's own working directory is never changed.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Configuration for the out-of-band build step.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding the build system's state and artifacts.
    pub build_dir: PathBuf,
    /// Symbolic target name passed to the build system.
    pub target: String,
}

/// Generate build files and build the target, returning the absolute path
/// of the produced binary (`<build_dir>/<target>`).
pub fn build_target(config: &BuildConfig) -> Result<PathBuf> {
    run_step(
        &config.build_dir,
        "cmake",
        &[".."],
        "unable to generate build files",
    )?;
    run_step(
        &config.build_dir,
        "make",
        &[&config.target],
        &format!("unable to build target {}", config.target),
    )?;
    info!(target = %config.target, "build step complete");

    let binary = config.build_dir.join(&config.target);
    binary.canonicalize().map_err(|e| {
        Error::build(format!(
            "built target {} not found at {}: {}",
            config.target,
            binary.display(),
            e
        ))
    })
}

fn run_step(dir: &Path, program: &str, args: &[&str], context: &str) -> Result<()> {
    debug!(program, ?args, dir = %dir.display(), "running build step");
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| Error::build(format!("{context}: failed to run {program}: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::build(format!("{context}: {}", stderr.trim())));
    }
    Ok(())
}
