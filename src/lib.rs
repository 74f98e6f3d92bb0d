//! Crucible: a conformance test harness for compiled language toolchains
//!
//! Crucible builds a toolchain binary through an external build system,
//! discovers fixture files that pair source snippets with expected outcomes,
//! runs the binary against each fixture, and compares actual behavior to the
//! expectation. In capture mode it regenerates the expectations from actual
//! behavior instead.
//!
//! # Quick Start
//!
//! ```no_run
//! use crucible::term::Reporter;
//! use crucible::{FixtureStore, Runner, Session, SessionConfig};
//!
//! fn main() -> crucible::Result<()> {
//!     let fixtures = FixtureStore::new("./tests", "t").discover()?;
//!     let runner = Runner::new("./build/toolc");
//!     let mut reporter = Reporter::stdout();
//!     let mut session = Session::new(SessionConfig::default(), &mut reporter);
//!     let tally = session.check(&fixtures, |f| runner.run(f.path()))?;
//!     std::process::exit(if tally.all_passed() { 0 } else { 1 })
//! }
//! ```
//!
//! # Module Overview
//!
//! The session pipeline flows: [`fixture`] → [`expectation`] → [`runner`] →
//! [`compare`] → [`session`]/[`term`]. The [`build`] module produces the
//! binary under test before the pipeline starts.
//!
//! | Category | Modules |
//! |----------|---------|
//! | **Core** | [`expectation`], [`compare`], [`runner`], [`error`](Error) |
//! | **Session** | [`fixture`], [`session`] |
//! | **Collaborators** | [`build`], [`term`] |

pub mod build;
pub mod compare;
pub mod error;
pub mod expectation;
pub mod fixture;
pub mod runner;
pub mod session;
pub mod term;

pub use compare::{compare, Verdict};
pub use error::{Error, Result};
pub use expectation::Expectation;
pub use fixture::{Fixture, FixtureStore};
pub use runner::{RunOutcome, Runner};
pub use session::{FailureRecord, Session, SessionConfig, Tally};

/// Crate version, from Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
