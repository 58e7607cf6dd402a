use std::fmt;

use serde::Serialize;

/// A non-fatal note about audit text the parser skipped.
///
/// Malformed audits are expected input, so nothing here aborts a parse; the
/// notes only make the skipped input visible. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// No taken-courses section was found: neither start marker appears, or
    /// the audit lacks `ACADEMIC RECORD UNIT TOTAL` and `UCLA COURSEWORK`
    /// (a bare `UCLA UNITS` is then not enough).
    MissingTakenSection,

    /// A line in the taken section starts with a term code but names no
    /// known department.
    UnrecognizedTakenLine {
        /// Line number in the audit text.
        line: usize,
        /// The trimmed line.
        text: String,
    },

    /// A `SELECT FROM:` block under a science-technology elective header was
    /// skipped.
    SkippedElectiveBlock {
        /// Line number of the `SELECT FROM:` marker.
        line: usize,
    },

    /// A fragment of a `SELECT FROM:` list produced no course.
    UnparsedFragment {
        /// Line number of the `SELECT FROM:` marker.
        line: usize,
        /// The fragment, after range expansion.
        text: String,
    },

    /// A `SELECT FROM:` block yielded no course options at all.
    EmptyRequirement {
        /// Line number of the `SELECT FROM:` marker.
        line: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingTakenSection => f.write_str("no taken-courses section found"),
            Self::UnrecognizedTakenLine { line, text } => {
                write!(f, "line {line}: no known department in '{text}'")
            }
            Self::SkippedElectiveBlock { line } => {
                write!(f, "line {line}: skipped science-technology elective block")
            }
            Self::UnparsedFragment { line, text } => {
                write!(f, "line {line}: no course found in '{text}'")
            }
            Self::EmptyRequirement { line } => {
                write!(f, "line {line}: requirement lists no course options")
            }
        }
    }
}
