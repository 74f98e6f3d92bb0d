//! Session loop
//!
//! Drives fixtures through decode → run → compare, records verdicts in the
//! [`Tally`], and renders per-test output through the reporter. Check mode
//! compares actual behavior to markers; capture mode regenerates the markers
//! from actual behavior instead.
//!
//! The subprocess is a seam: both modes take the run step as a closure, so
//! production wires in [`Runner::run`](crate::runner::Runner::run) while
//! tests can substitute a spy and count invocations.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::compare::{self, Verdict};
use crate::error::{Error, Result};
use crate::expectation::{self, Expectation};
use crate::fixture::Fixture;
use crate::runner::RunOutcome;
use crate::term::Reporter;

/// Aggregated counters for one session plus its failure records.
///
/// Invariant: `succeeding + failed + ignored` equals the number of fixtures
/// processed, independent of traversal order.
#[derive(Debug, Default)]
pub struct Tally {
    pub succeeding: usize,
    pub failed: usize,
    pub ignored: usize,
    /// Failing fixtures in the order they were processed.
    pub failures: Vec<FailureRecord>,
}

impl Tally {
    /// Total number of fixtures accounted for.
    pub fn total(&self) -> usize {
        self.succeeding + self.failed + self.ignored
    }

    /// True iff the session recorded no failing fixture.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// One failing fixture with the data needed for diagnosis.
#[derive(Debug)]
pub struct FailureRecord {
    pub path: PathBuf,
    pub expectation: Expectation,
    pub outcome: RunOutcome,
}

/// Session policy knobs.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Print succeeding and ignored fixtures individually.
    pub verbose: bool,
    /// Abort on the first failing fixture. Off by default: fail-soft runs
    /// every fixture so a session reports all regressions, not just the
    /// first one.
    pub fail_fast: bool,
}

/// Processes fixtures and maintains the session tally.
pub struct Session<'a> {
    config: SessionConfig,
    reporter: &'a mut Reporter,
}

impl<'a> Session<'a> {
    /// Create a session with the given policy and reporter.
    pub fn new(config: SessionConfig, reporter: &'a mut Reporter) -> Self {
        Self { config, reporter }
    }

    /// Check mode: compare every fixture's actual behavior to its marker.
    ///
    /// Ignored fixtures are filtered out here and never handed to `run`.
    /// A malformed or absent marker aborts the whole session: it means the
    /// corpus itself is corrupt, which neither a pass nor a fail should
    /// paper over.
    pub fn check<F>(&mut self, fixtures: &[Fixture], mut run: F) -> Result<Tally>
    where
        F: FnMut(&Fixture) -> Result<RunOutcome>,
    {
        let mut tally = Tally::default();

        for fixture in fixtures {
            let expectation = decode_marker(fixture)?;
            if expectation == Expectation::Ignore {
                tally.ignored += 1;
                if self.config.verbose {
                    self.reporter.ignored_line(fixture.path())?;
                }
                continue;
            }

            let outcome = run(fixture)?;
            match compare::compare(&expectation, outcome) {
                Verdict::Pass => {
                    tally.succeeding += 1;
                    if self.config.verbose {
                        self.reporter.success_line(fixture.path())?;
                    }
                }
                Verdict::Fail {
                    expectation,
                    outcome,
                } => {
                    tally.failed += 1;
                    self.reporter.failure_line(fixture.path())?;
                    self.reporter.failure_detail(&expectation, &outcome)?;
                    tally.failures.push(FailureRecord {
                        path: fixture.path().to_path_buf(),
                        expectation,
                        outcome,
                    });
                    if self.config.fail_fast {
                        break;
                    }
                }
                Verdict::Ignored => {
                    unreachable!("ignored fixtures are filtered before execution")
                }
            }
        }

        self.reporter
            .recap(tally.succeeding, tally.failed, tally.ignored)?;
        Ok(tally)
    }

    /// Capture mode: regenerate each fixture's marker from actual behavior.
    ///
    /// Fixtures whose existing marker decodes to `Ignore` keep their marker
    /// and never run. Each sidecar is written exactly once, after its own
    /// fixture's run completes, so writes never interleave with reads of the
    /// same file. Returns the number of sidecars written.
    pub fn capture<F>(&mut self, fixtures: &[Fixture], mut run: F) -> Result<usize>
    where
        F: FnMut(&Fixture) -> Result<RunOutcome>,
    {
        let mut captured = 0usize;

        for fixture in fixtures {
            let ignored = matches!(
                fixture.marker().map(expectation::decode),
                Some(Ok(Expectation::Ignore))
            );
            if ignored {
                if self.config.verbose {
                    self.reporter.ignored_line(fixture.path())?;
                }
                continue;
            }

            let outcome = run(fixture)?;
            let marker = expectation::encode(&outcome);
            debug!(
                fixture = %fixture.path().display(),
                sidecar = %fixture.expected_path().display(),
                "capturing expectation"
            );
            fs::write(fixture.expected_path(), &marker)?;
            captured += 1;

            if self.config.verbose {
                self.reporter
                    .captured_line(fixture.path(), fixture.expected_path())?;
            }
        }

        Ok(captured)
    }
}

fn decode_marker(fixture: &Fixture) -> Result<Expectation> {
    let marker = fixture.marker().ok_or_else(|| {
        Error::malformed(fixture.expected_path(), "expectation marker is absent")
    })?;
    expectation::decode(marker)
        .map_err(|e| Error::malformed(fixture.expected_path(), e.to_string()))
}
