//! Terminal presentation
//!
//! Pure presentation glue: colored per-test lines, failure diagnostics, and
//! the session recap. All comparison logic lives elsewhere; this module only
//! renders what it is handed.

use std::io::{self, Write};
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

use crate::expectation::Expectation;
use crate::runner::RunOutcome;

/// Report lines are padded with dots out to this column.
const LINE_WIDTH: usize = 80;

/// Writes the harness's user-facing output.
pub struct Reporter {
    out: Box<dyn WriteColor>,
}

impl Reporter {
    /// Reporter writing colored output to stdout.
    pub fn stdout() -> Self {
        Self {
            out: Box::new(StandardStream::stdout(ColorChoice::Auto)),
        }
    }

    /// Reporter that swallows all output. Used by tests.
    pub fn sink() -> Self {
        Self {
            out: Box::new(NoColor::new(io::sink())),
        }
    }

    /// Reporter writing uncolored output to an arbitrary writer.
    pub fn plain(writer: Box<dyn io::Write>) -> Self {
        Self {
            out: Box::new(NoColor::new(writer)),
        }
    }

    /// `[TEST] <path>......SUCCESS`
    pub fn success_line(&mut self, path: &Path) -> io::Result<()> {
        self.test_line(path, "SUCCESS", Color::Green)
    }

    /// `[TEST] <path>.......FAILED`
    pub fn failure_line(&mut self, path: &Path) -> io::Result<()> {
        self.test_line(path, "FAILED", Color::Red)
    }

    /// `[TEST] <path>......IGNORED`
    pub fn ignored_line(&mut self, path: &Path) -> io::Result<()> {
        self.test_line(path, "IGNORED", Color::Magenta)
    }

    fn test_line(&mut self, path: &Path, status: &str, color: Color) -> io::Result<()> {
        let left = format!("[TEST] {}", path.display());
        let width = LINE_WIDTH.saturating_sub(left.len());
        self.out.set_color(ColorSpec::new().set_fg(Some(color)))?;
        writeln!(self.out, "{left}{status:.>width$}")?;
        self.out.reset()
    }

    /// Actual-vs-expected payloads for one failing fixture.
    pub fn failure_detail(
        &mut self,
        expectation: &Expectation,
        outcome: &RunOutcome,
    ) -> io::Result<()> {
        self.out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        match expectation {
            Expectation::Text(expected) => {
                writeln!(self.out, "[NOTE] Got:      {:?}", outcome.stdout_text())?;
                writeln!(self.out, "[NOTE] Expected: {expected:?}")?;
            }
            Expectation::Failure => {
                writeln!(self.out, "[NOTE] Got:      {}", outcome.status_label())?;
                writeln!(self.out, "[NOTE] Expected: (fail)")?;
            }
            Expectation::Ignore => {}
        }
        if outcome.is_timeout() {
            writeln!(self.out, "[NOTE] Run was killed at the per-fixture deadline")?;
        }
        self.out.reset()
    }

    /// Final recap line with the session counters.
    pub fn recap(&mut self, succeeding: usize, failed: usize, ignored: usize) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(self.out, "\n[RECAP] ")?;
        self.out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(self.out, "succeeding: {succeeding}")?;
        self.out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        write!(self.out, ", failed: {failed}")?;
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        writeln!(self.out, ", ignored: {ignored}")?;
        self.out.reset()
    }

    /// `[BUILD] Built target <name>`
    pub fn build_line(&mut self, target: &str) -> io::Result<()> {
        self.out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(self.out, "[BUILD] Built target {target}")?;
        self.out.reset()
    }

    /// `[INFO] Ran <fixture> saved stdout -> <sidecar>`
    pub fn captured_line(&mut self, fixture: &Path, sidecar: &Path) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        writeln!(
            self.out,
            "[INFO] Ran {:<40} saved stdout -> {}",
            fixture.display(),
            sidecar.display()
        )?;
        self.out.reset()
    }

    /// General informational line.
    pub fn info_line(&mut self, message: &str) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        writeln!(self.out, "[INFO] {message}")?;
        self.out.reset()
    }

    /// Single-line fatal diagnostic.
    pub fn error_line(&mut self, message: &str) -> io::Result<()> {
        self.out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        writeln!(self.out, "[ERROR] {message}")?;
        self.out.reset()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::runner::RunOutcome;

    /// Writer capturing everything written through the reporter.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured(f: impl FnOnce(&mut Reporter)) -> String {
        let capture = Capture::default();
        let mut reporter = Reporter::plain(Box::new(capture.clone()));
        f(&mut reporter);
        let bytes = capture.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_line_is_dot_padded_to_eighty_columns() {
        let text = captured(|r| r.success_line(Path::new("tests/a.t")).unwrap());
        let line = text.lines().next().unwrap();
        assert_eq!(line.len(), 80);
        assert!(line.starts_with("[TEST] tests/a.t"));
        assert!(line.ends_with("...SUCCESS"));
    }

    #[test]
    fn failure_detail_shows_both_payloads() {
        let expectation = Expectation::Text("expected text".to_string());
        let outcome = RunOutcome::completed(b"actual text".to_vec(), Some(0));
        let text = captured(|r| r.failure_detail(&expectation, &outcome).unwrap());
        assert!(text.contains("Got:      \"actual text\""));
        assert!(text.contains("Expected: \"expected text\""));
    }

    #[test]
    fn failure_detail_for_expected_failure_shows_exit_status() {
        let outcome = RunOutcome::completed(Vec::new(), Some(0));
        let text = captured(|r| r.failure_detail(&Expectation::Failure, &outcome).unwrap());
        assert!(text.contains("Got:      exit code 0"));
        assert!(text.contains("Expected: (fail)"));
    }

    #[test]
    fn recap_prints_all_three_counters() {
        let text = captured(|r| r.recap(3, 1, 2).unwrap());
        assert!(text.contains("succeeding: 3"));
        assert!(text.contains("failed: 1"));
        assert!(text.contains("ignored: 2"));
    }
}
