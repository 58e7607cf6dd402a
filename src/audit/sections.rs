//! Locating the taken-courses section of an audit.
//!
//! Audits carry a `UCLA UNITS` summary (or a `UCLA COURSEWORK` listing)
//! followed by other sections. When the audit has an `ACADEMIC RECORD UNIT
//! TOTAL` aggregate, the section runs from the first start marker to the
//! nearest end marker; otherwise it runs from `UCLA COURSEWORK` to `LOWER
//! DIVISION COURSES`.

const AGGREGATE_MARKER: &str = "ACADEMIC RECORD UNIT TOTAL";
const PRIMARY_START: &str = "UCLA UNITS";
const SECONDARY_START: &str = "UCLA COURSEWORK";
const FALLBACK_END: &str = "LOWER DIVISION COURSES";
const END_MARKERS: &[&str] = &[
    "UCLA COURSEWORK",
    "LOWER DIVISION COURSES",
    "GRADED UNIV CALIF",
    "LOWER DIVISION NON-UC TRANSFER UNITS",
];

/// End markers are searched from this many bytes past the start, so the
/// start marker itself never ends the section.
const END_SEARCH_OFFSET: usize = 10;

/// A sub-range of the audit text holding taken-course lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TakenSection<'a> {
    /// The section text.
    pub text: &'a str,
    /// The 1-based line number of the section's first line.
    pub first_line: usize,
}

/// Finds the taken-courses section, or `None` when the audit has none.
#[must_use]
pub fn locate_taken_section(text: &str) -> Option<TakenSection<'_>> {
    let (start, end) = if text.contains(AGGREGATE_MARKER) {
        let start = text
            .find(PRIMARY_START)
            .or_else(|| text.find(SECONDARY_START))?;
        let end = END_MARKERS
            .iter()
            .filter_map(|marker| find_from(text, marker, start + END_SEARCH_OFFSET))
            .min()
            .unwrap_or(text.len());
        (start, end)
    } else {
        tracing::debug!("no '{AGGREGATE_MARKER}' marker, scanning '{SECONDARY_START}' only");
        let start = text.find(SECONDARY_START)?;
        let end = find_from(text, FALLBACK_END, start).unwrap_or(text.len());
        (start, end)
    };

    let first_line = text[..start].matches('\n').count() + 1;
    Some(TakenSection {
        text: &text[start..end],
        first_line,
    })
}

fn find_from(text: &str, needle: &str, from: usize) -> Option<usize> {
    text.get(from..)?.find(needle).map(|index| from + index)
}
