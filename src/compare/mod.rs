//! Verdict derivation
//!
//! Reconciles an actual [`RunOutcome`] against a decoded [`Expectation`] and
//! returns a three-valued [`Verdict`] by value. Pass/fail is never signaled
//! through errors or panics: a failing fixture is data for the session
//! reporter, not exceptional control flow.

use crate::expectation::Expectation;
use crate::runner::RunOutcome;

/// Outcome of reconciling one fixture run with its expectation.
/// Derived once, never mutated; consumed by the session reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Actual behavior matched the expectation.
    Pass,
    /// Mismatch, carrying the data needed for diagnosis.
    Fail {
        expectation: Expectation,
        outcome: RunOutcome,
    },
    /// The fixture was marked ignore and never executed.
    Ignored,
}

impl Verdict {
    /// True iff this verdict is a pass.
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    /// True iff this verdict is a failure.
    pub fn is_fail(&self) -> bool {
        matches!(self, Verdict::Fail { .. })
    }
}

/// Reconcile an actual run against its decoded expectation.
///
/// `Expectation::Ignore` never reaches this function: ignored fixtures are
/// filtered out before execution, so there is no outcome to reconcile.
///
/// Text comparison is exact. No trimming, no normalization of trailing
/// whitespace or line endings: an approximate pass criterion would mask
/// real regressions.
pub fn compare(expectation: &Expectation, outcome: RunOutcome) -> Verdict {
    match expectation {
        Expectation::Ignore => {
            debug_assert!(false, "ignored fixtures are filtered before comparison");
            Verdict::Ignored
        }
        Expectation::Failure => {
            if outcome.success() {
                Verdict::Fail {
                    expectation: expectation.clone(),
                    outcome,
                }
            } else {
                Verdict::Pass
            }
        }
        Expectation::Text(expected) => {
            if outcome.stdout_text() == *expected {
                Verdict::Pass
            } else {
                Verdict::Fail {
                    expectation: expectation.clone(),
                    outcome,
                }
            }
        }
    }
}
