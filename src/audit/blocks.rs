//! Locating `SELECT FROM:` option lists and their `NEEDS:` context.

use std::{num::NonZeroU32, sync::LazyLock};

use regex::Regex;
use tracing::instrument;

use crate::domain::{Config, Diagnostic};

const SELECT_MARKER: &str = "SELECT FROM:";
const NEEDS_MARKER: &str = "NEEDS:";
const CONTROL_PREFIXES: &[&str] = &["->", "NEEDS", "ALTERNATE", "YOU", "WARNING"];

/// Longest line (in words) the continuation scan still treats as a header.
const CONTINUATION_HEADER_WORDS: usize = 6;
/// Longest line (in words) the elective scan still treats as a header.
const ELECTIVE_HEADER_WORDS: usize = 10;

static TERM_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(FA|WI|SP|SU)\d{2,4}\b").unwrap());
static ELECTIVE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SCI[-\s]?TECH").unwrap());
static COURSE_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s+COURSE(S)?").unwrap());

/// The raw text of one `SELECT FROM:` list and its stated course count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedBlock {
    /// 1-based line number of the `SELECT FROM:` marker.
    pub line: usize,
    /// The option list: text after the marker plus its continuation lines,
    /// joined with single spaces.
    pub text: String,
    /// The count from a `<N> COURSE(S)` phrase under the nearest `NEEDS:`.
    pub needs: Option<NonZeroU32>,
    /// The non-blank lines after the nearest `NEEDS:`, joined with `" | "`.
    pub needs_text: Option<String>,
}

/// Finds every `SELECT FROM:` block in `lines`.
///
/// Each marker line opens its own block. Blocks under a science-technology
/// elective header are skipped (and reported) when the configuration asks
/// for it.
#[instrument(level = "debug", skip_all, fields(lines = lines.len()))]
pub fn locate_blocks(
    lines: &[&str],
    config: &Config,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<LocatedBlock> {
    let mut blocks = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let Some((_, first)) = line.split_once(SELECT_MARKER) else {
            continue;
        };

        if config.skip_sci_tech_electives && is_under_elective_header(lines, index, config) {
            tracing::debug!(line = index + 1, "skipping science-technology elective block");
            diagnostics.push(Diagnostic::SkippedElectiveBlock { line: index + 1 });
            continue;
        }

        let text = collect_option_text(lines, index, first);
        let (needs, needs_text) = find_needs(lines, index, config)
            .map_or((None, None), |(needs, text)| (needs, Some(text)));

        tracing::trace!(line = index + 1, ?needs, "block '{text}'");
        blocks.push(LocatedBlock {
            line: index + 1,
            text,
            needs,
            needs_text,
        });
    }

    blocks
}

/// Joins the marker line's remainder with the list lines that follow it.
fn collect_option_text(lines: &[&str], index: usize, first: &str) -> String {
    let mut collected = Vec::new();
    let first = first.trim();
    if !first.is_empty() {
        collected.push(first);
    }

    for line in lines.iter().skip(index + 1).map(|line| line.trim()) {
        if line.is_empty() {
            continue;
        }
        if CONTROL_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
            || TERM_LINE.is_match(line)
            || looks_like_header(line, CONTINUATION_HEADER_WORDS)
        {
            break;
        }
        collected.push(line);
    }

    collected.join(" ")
}

/// Line indices searched backwards from `index`, nearest first.
fn lookback(index: usize, config: &Config) -> impl Iterator<Item = usize> {
    let floor = (index + 1).saturating_sub(config.lookback_lines());
    (floor..index).rev()
}

fn is_under_elective_header(lines: &[&str], index: usize, config: &Config) -> bool {
    for k in lookback(index, config) {
        let line = lines[k].trim();
        if line.is_empty() {
            continue;
        }
        if ELECTIVE_HEADER.is_match(line) && is_upper(line) {
            return true;
        }
        if looks_like_header(line, ELECTIVE_HEADER_WORDS)
            && !line.contains(NEEDS_MARKER)
            && !line.contains(SELECT_MARKER)
            && !line.contains("->")
        {
            return false;
        }
        if line.contains(SELECT_MARKER) {
            return false;
        }
    }
    false
}

/// The count and description under the nearest preceding `NEEDS:` marker.
fn find_needs(
    lines: &[&str],
    index: usize,
    config: &Config,
) -> Option<(Option<NonZeroU32>, String)> {
    let needs_index = lookback(index, config).find(|&k| lines[k].contains(NEEDS_MARKER))?;

    let snippet: Vec<&str> = lines[needs_index + 1..]
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .take(config.needs_context_lines())
        .collect();

    let needs = COURSE_COUNT
        .captures(&snippet.join("\n"))
        .and_then(|captures| captures[1].parse::<u32>().ok())
        .and_then(NonZeroU32::new);

    Some((needs, snippet.join(" | ")))
}

fn is_upper(line: &str) -> bool {
    line.to_uppercase() == line
}

/// Whether `line` reads like a section header: upper case, no digits, no
/// commas, and at most `max_words` words.
fn looks_like_header(line: &str, max_words: usize) -> bool {
    is_upper(line)
        && !line.chars().any(|c| c.is_ascii_digit())
        && !line.contains(',')
        && line.split_whitespace().count() <= max_words
}
