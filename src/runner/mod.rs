//! Toolchain subprocess invocation
//!
//! The runner spawns the binary under test once per fixture, with the
//! fixture path as its sole argument, and captures stdout plus the exit
//! status. A non-zero exit is ordinary data for the comparator, never a
//! harness fault; only a failure to spawn at all is an error.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of executing one fixture: captured stdout plus exit status.
/// Produced once per fixture per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    stdout: Vec<u8>,
    status: Option<i32>,
    timed_out: bool,
}

impl RunOutcome {
    /// Outcome of a process that ran to completion.
    ///
    /// `status` is `None` when the process was terminated by a signal.
    pub fn completed(stdout: Vec<u8>, status: Option<i32>) -> Self {
        Self {
            stdout,
            status,
            timed_out: false,
        }
    }

    /// Outcome synthesized for a process killed at the deadline.
    pub fn timed_out(stdout: Vec<u8>) -> Self {
        Self {
            stdout,
            status: None,
            timed_out: true,
        }
    }

    /// Exit code, if the process terminated normally.
    pub fn status(&self) -> Option<i32> {
        self.status
    }

    /// True iff the process terminated with status zero.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// True iff this outcome was synthesized for a deadline kill.
    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }

    /// Captured stdout bytes.
    pub fn stdout_bytes(&self) -> &[u8] {
        &self.stdout
    }

    /// Captured stdout decoded as text (lossily, for comparison and capture).
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Human-readable exit status for diagnostics.
    pub fn status_label(&self) -> String {
        if self.timed_out {
            "killed (deadline exceeded)".to_string()
        } else {
            match self.status {
                Some(code) => format!("exit code {code}"),
                None => "killed by signal".to_string(),
            }
        }
    }
}

/// Invokes the binary under test against fixture files.
///
/// The working directory is an explicit parameter owned by the harness
/// configuration; the runner never mutates process-wide state.
#[derive(Debug, Clone)]
pub struct Runner {
    binary: PathBuf,
    workdir: Option<PathBuf>,
    deadline: Option<Duration>,
}

impl Runner {
    /// Create a runner for the given binary.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            workdir: None,
            deadline: None,
        }
    }

    /// Set the working directory handed to the binary under test.
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    /// Bound each invocation's wall-clock time. Off by default; when the
    /// deadline expires the child is killed and the outcome is synthesized
    /// as a timed-out failure instead of hanging the session.
    pub fn with_deadline(mut self, limit: Duration) -> Self {
        self.deadline = Some(limit);
        self
    }

    /// The binary this runner invokes.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Run the binary with `fixture` as its sole argument.
    pub fn run(&self, fixture: &Path) -> Result<RunOutcome> {
        debug!(
            binary = %self.binary.display(),
            fixture = %fixture.display(),
            "running fixture"
        );
        let mut command = Command::new(&self.binary);
        command
            .arg(fixture)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        match self.deadline {
            None => {
                let output = command
                    .output()
                    .map_err(|e| Error::execution(&self.binary, e))?;
                Ok(RunOutcome::completed(output.stdout, output.status.code()))
            }
            Some(limit) => self.run_bounded(command, limit),
        }
    }

    /// Spawn with a wall-clock bound, killing the child when it expires.
    ///
    /// Stdout is drained on its own thread so a child that fills the pipe
    /// cannot deadlock against the polling loop.
    fn run_bounded(&self, mut command: Command, limit: Duration) -> Result<RunOutcome> {
        let mut child = command
            .spawn()
            .map_err(|e| Error::execution(&self.binary, e))?;

        let mut stdout_pipe = child.stdout.take();
        let reader = thread::spawn(move || {
            let mut buffer = Vec::new();
            if let Some(ref mut pipe) = stdout_pipe {
                let _ = pipe.read_to_end(&mut buffer);
            }
            buffer
        });

        let started = Instant::now();
        let status = loop {
            match child.try_wait()? {
                Some(status) => break Some(status),
                None if started.elapsed() >= limit => {
                    let _ = child.kill();
                    let _ = child.wait();
                    break None;
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        };

        let stdout = reader.join().unwrap_or_default();
        Ok(match status {
            Some(status) => RunOutcome::completed(stdout, status.code()),
            None => RunOutcome::timed_out(stdout),
        })
    }
}
