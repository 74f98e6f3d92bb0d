//! Expectation marker codec
//!
//! Each fixture carries its expected outcome in a sidecar file whose first
//! line is a single marker. The marker grammar (format v1, fixed for the
//! whole corpus) is:
//!
//! ```text
//! marker      := ignore-line | "e:" WS* "'" payload "'"
//! ignore-line := any line containing the keyword "ignore" (case-insensitive)
//! payload     := "fail" | "(fail)"   -- the binary must exit non-zero
//!              | text                -- exact expected stdout, ':' = newline
//! ```
//!
//! [`decode`] turns a marker line into an [`Expectation`]; [`encode`] is its
//! left inverse used by capture mode, turning a [`RunOutcome`] back into a
//! marker line. `decode(encode(x))` reproduces `x` for any stdout text that
//! does not itself contain the reserved separator.
//!
//! Known limitations of the format, kept deliberately rather than patched
//! with an incompatible escaping scheme: a literal `:` or `'` in genuine
//! expected output, an output equal to `fail`/`(fail)`, and an output
//! containing the word `ignore` are ambiguous or lossy. Changing any of this
//! invalidates every existing fixture corpus.

use std::fmt;

use thiserror::Error;

use crate::runner::RunOutcome;

/// Reserved separator: a `:` in a marker payload stands for a newline.
pub const SEPARATOR: char = ':';

/// Prefix of every non-ignore marker line.
pub const MARKER_PREFIX: &str = "e:";

/// Keyword that marks a fixture as ignored, matched case-insensitively
/// anywhere on the marker line.
pub const IGNORE_KEYWORD: &str = "ignore";

const QUOTE: char = '\'';

/// Decoded intent for one fixture. Exactly one variant per fixture,
/// determined solely by the marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// Exact expected standard-output text.
    Text(String),
    /// The process must terminate with a non-zero status; output irrelevant.
    Failure,
    /// The fixture is skipped entirely and never executed.
    Ignore,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Text(text) => write!(f, "{:?}", text),
            Expectation::Failure => write!(f, "(fail)"),
            Expectation::Ignore => write!(f, "ignore"),
        }
    }
}

/// Error produced when a marker line cannot be decoded.
///
/// This is fatal for the session in check mode: a malformed marker means the
/// fixture corpus itself is corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct MalformedMarker(String);

impl MalformedMarker {
    fn new(message: impl Into<String>) -> Self {
        MalformedMarker(message.into())
    }
}

/// Decode a marker line into an [`Expectation`].
///
/// The ignore keyword wins over everything else, so a curator can disable a
/// fixture by prepending `ignore:` to its marker without deleting the old
/// payload.
pub fn decode(marker: &str) -> Result<Expectation, MalformedMarker> {
    if marker.to_ascii_lowercase().contains(IGNORE_KEYWORD) {
        return Ok(Expectation::Ignore);
    }

    let rest = marker.strip_prefix(MARKER_PREFIX).ok_or_else(|| {
        MalformedMarker::new(format!(
            "marker line does not start with `{MARKER_PREFIX}`: {marker:?}"
        ))
    })?;

    let payload = unquote(rest.trim_start())?;
    Ok(match payload {
        "fail" | "(fail)" => Expectation::Failure,
        text => Expectation::Text(expand_separators(text)),
    })
}

/// Encode a run's outcome as a marker line (capture mode).
pub fn encode(outcome: &RunOutcome) -> String {
    if outcome.success() {
        let payload = fold_newlines(&outcome.stdout_text());
        format!("{MARKER_PREFIX} {QUOTE}{payload}{QUOTE}")
    } else {
        format!("{MARKER_PREFIX} {QUOTE}(fail){QUOTE}")
    }
}

/// Expand the reserved separator into newlines (decode direction).
fn expand_separators(payload: &str) -> String {
    payload.replace(SEPARATOR, "\n")
}

/// Fold newlines into the reserved separator (encode direction).
fn fold_newlines(text: &str) -> String {
    text.replace('\n', &SEPARATOR.to_string())
}

/// Isolate the quoted payload of a marker line.
///
/// A single forward scan: opening quote, payload, closing quote, then
/// nothing but whitespace. Every other shape is a well-defined parse error
/// rather than a slicing fault.
fn unquote(s: &str) -> Result<&str, MalformedMarker> {
    let mut chars = s.char_indices();

    let start = match chars.next() {
        Some((idx, QUOTE)) => idx + QUOTE.len_utf8(),
        Some((_, other)) => {
            return Err(MalformedMarker::new(format!(
                "expected opening `{QUOTE}` before payload, found `{other}`"
            )))
        }
        None => return Err(MalformedMarker::new("marker line has no payload")),
    };

    let end = chars
        .find(|&(_, ch)| ch == QUOTE)
        .map(|(idx, _)| idx)
        .ok_or_else(|| MalformedMarker::new(format!("marker payload has no closing `{QUOTE}`")))?;

    let trailing = &s[end + QUOTE.len_utf8()..];
    if !trailing.trim().is_empty() {
        return Err(MalformedMarker::new(format!(
            "unexpected content after closing `{QUOTE}`: {:?}",
            trailing.trim()
        )));
    }

    Ok(&s[start..end])
}
