//! Turning the raw text of a `SELECT FROM:` block into course options.
//!
//! The block is normalised, ranges are expanded, and the result is split on
//! commas. Each part is then matched against an ordered list of patterns
//! while a [`CurrentDepartment`] cell carries the most recently named
//! department from left to right, so `COM SCI 130,132` yields both
//! `COM SCI 130` and `COM SCI 132`.

use std::{collections::HashSet, sync::LazyLock};

use regex::{Captures, Regex};

use super::ranges::RangeExpander;
use crate::domain::{CourseToken, DepartmentCode, OptionGroup, Registry};

/// Prose words that never belong to a department name.
const STOP_WORDS: &[&str] = &[
    "OF", "AT", "LEAST", "UNITS", "TWENTY", "ONE", "TWO", "THREE", "FOUR", "FIVE", "FROM",
    "SELECT", "THE", "AND", "THROUGH", "TO", "THRU",
];

/// Single-letter course prefixes that belong to the current department
/// (`M151B` after `COM SCI` is `COM SCI M151B`).
const ATTACHABLE_PREFIXES: &[&str] = &["C", "M"];

/// Leading words marking a term or transfer-credit column rather than a
/// course.
const TERM_WORDS: &[&str] = &["FA", "WI", "SP", "SU", "AP", "WVC", "FOOTHILL", "TA"];

static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static OR_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bOR\b").unwrap());

static COURSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z&]+(?:\s+[A-Z&.]+){0,2})\s*(?:([A-Z])\s*)?(\d{1,3}[A-Z0-9]*)\b").unwrap()
});
static LEADING_NUMBER_THEN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,3}[A-Z0-9]*)\s+(.+)$").unwrap());
static CROSS_LISTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^CM(\d{1,3}[A-Z0-9]*)$").unwrap());
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,3}[A-Z0-9]*)\b").unwrap());
static NUMBER_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Z]\s*)?(\d{1,3}[A-Z0-9]*)$").unwrap());
static TERM_CODE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(FA|WI|SP|SU)\d{1,2}$").unwrap());
static TERM_CODE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(FA|WI|SP|SU)\s*\d{1,2}$").unwrap());

/// What a course-like match in free text turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Fragment {
    /// A known department followed by a course number.
    Department {
        department: DepartmentCode,
        number: String,
    },
    /// A single-letter prefix and number that belong to the current
    /// department (`M151B`).
    PrefixAttach(String),
    /// A number with no department text (`132`).
    BareNumber(String),
    /// Text kept as written, such as a cross-listing prefix (`CM121`).
    Raw(String),
    /// Prose, not a course.
    NoMatch,
}

/// The most recently recognised department in one block.
///
/// A fresh cell is used per block, so no state leaks between blocks or
/// between parses.
#[derive(Debug, Default)]
struct CurrentDepartment(Option<DepartmentCode>);

impl CurrentDepartment {
    /// Turns a fragment into course text, qualifying it with the current
    /// department where needed and updating the cell on a department match.
    fn resolve(&mut self, fragment: Fragment) -> Option<String> {
        match fragment {
            Fragment::Department { department, number } => {
                self.0 = Some(department);
                Some(format!("{department} {number}"))
            }
            Fragment::PrefixAttach(code) | Fragment::BareNumber(code) => {
                Some(self.qualify(&code).unwrap_or(code))
            }
            Fragment::Raw(code) => Some(code),
            Fragment::NoMatch => None,
        }
    }

    /// `<current department> <number>`, if a department has been seen.
    fn qualify(&self, number: &str) -> Option<String> {
        self.0.map(|department| format!("{department} {number}"))
    }
}

/// The options found in one block, plus the parts that yielded nothing.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Options in first-seen order, without repeats.
    pub options: Vec<OptionGroup>,
    /// Comma-separated parts (after range expansion) that produced no
    /// course.
    pub unparsed: Vec<String>,
}

/// Extracts course options from block text.
#[derive(Debug, Clone, Copy)]
pub struct TokenExtractor {
    ranges: RangeExpander,
}

impl TokenExtractor {
    /// Creates an extractor whose range expansion refuses spans of
    /// `max_range_span` numbers or more.
    #[must_use]
    pub const fn new(max_range_span: u32) -> Self {
        Self {
            ranges: RangeExpander::new(max_range_span),
        }
    }

    /// Extracts the options listed in one block.
    #[must_use]
    pub fn extract(&self, block: &str) -> Extraction {
        let normalized = ANNOTATION
            .replace_all(&block.replace(';', ","), "")
            .into_owned();
        let expanded = self.ranges.expand(&normalized);

        let mut current = CurrentDepartment::default();
        let mut extraction = Extraction::default();
        let mut seen = HashSet::new();

        for part in expanded.split(',').map(str::trim).filter(|part| !part.is_empty()) {
            let options: Vec<OptionGroup> = if part.to_uppercase().contains(" OR ") {
                let mut members = Vec::new();
                for alternative in OR_SEPARATOR.split(part) {
                    members.extend(part_courses(alternative, &mut current));
                }
                OptionGroup::from_members(tokens(&members)).into_iter().collect()
            } else {
                tokens(&part_courses(part, &mut current))
                    .into_iter()
                    .map(OptionGroup::Course)
                    .collect()
            };

            if options.is_empty() {
                tracing::trace!("no course in '{part}'");
                extraction.unparsed.push(part.to_string());
                continue;
            }

            for option in options {
                let Some(option) = option.retain(|course| !is_term_noise(course)) else {
                    continue;
                };
                if seen.insert(option.clone()) {
                    extraction.options.push(option);
                }
            }
        }

        extraction
    }
}

/// Course strings found in one comma-separated part.
///
/// Patterns are tried in order; the first that applies wins, except that a
/// leading number split off a longer part (`30A LIFESCI 3`) is kept and the
/// remainder goes through the remaining patterns.
fn part_courses(part: &str, current: &mut CurrentDepartment) -> Vec<String> {
    let mut courses = Vec::new();
    let mut part = part.trim();
    if part.is_empty() {
        return courses;
    }

    if let Some(captures) = LEADING_NUMBER_THEN_TEXT.captures(part) {
        let rest = captures.get(2).map_or("", |m| m.as_str()).trim();
        if rest.starts_with(|c: char| c.is_ascii_uppercase()) {
            if let Some(course) = current.qualify(&captures[1]) {
                courses.push(course);
                part = rest;
            }
        }
    }

    // A whole-part `CM<n>`, as range expansion emits, joins the current
    // department. With no current department it falls through and stays raw.
    if let Some(captures) = CROSS_LISTED.captures(part) {
        if let Some(course) = current.qualify(&format!("CM{}", &captures[1])) {
            courses.push(course);
            return courses;
        }
    }

    if let Some(captures) = COURSE.captures(part) {
        let fragment = classify(&captures);
        if fragment != Fragment::NoMatch {
            courses.extend(current.resolve(fragment));
            return courses;
        }
    }

    if let Some(captures) = LEADING_NUMBER.captures(part) {
        if let Some(course) = current.qualify(&captures[1]) {
            courses.push(course);
            return courses;
        }
    }

    if let Some(captures) = NUMBER_ONLY.captures(part) {
        courses.extend(current.resolve(Fragment::BareNumber(captures[1].to_string())));
        return courses;
    }

    // The first course-like match was prose; try every match instead, but
    // only trust short numbers after a known department.
    for captures in COURSE.captures_iter(part) {
        let fragment = classify(&captures);
        if !matches!(fragment, Fragment::Department { .. }) && digit_count(&captures[3]) < 2 {
            continue;
        }
        courses.extend(current.resolve(fragment));
    }
    courses
}

/// Classifies one match of the course pattern.
///
/// Prose ahead of the department words is dropped first (`FROM MATH 100`
/// names `MATH`). The longest trailing run of words naming a known
/// department wins; failing that, a trailing one- or two-letter course
/// prefix is peeled off (`COM SCI M` + `151B`).
fn classify(captures: &Captures) -> Fragment {
    let words: Vec<&str> = captures[1].split_whitespace().collect();
    let first = words
        .iter()
        .rposition(|word| STOP_WORDS.contains(word))
        .map_or(0, |index| index + 1);
    let words = &words[first..];
    if words.is_empty() {
        return Fragment::NoMatch;
    }

    let mid = captures.get(2).map_or("", |m| m.as_str());
    let number = &captures[3];

    if let Some(department) = trailing_department(words) {
        return Fragment::Department {
            department,
            number: format!("{mid}{number}"),
        };
    }

    if let Some((prefix, rest)) = words.split_last() {
        if is_course_prefix(prefix) {
            if let Some(department) = trailing_department(rest) {
                return Fragment::Department {
                    department,
                    number: format!("{prefix}{mid}{number}"),
                };
            }
        }
    }

    let joined = words.concat();
    if ATTACHABLE_PREFIXES.contains(&joined.as_str()) {
        return Fragment::PrefixAttach(format!("{joined}{mid}{number}"));
    }

    let department_end = captures.get(1).map_or(0, |m| m.end());
    let match_start = captures.get(0).map_or(0, |m| m.start());
    let after_department = &captures[0][department_end - match_start..];
    Fragment::Raw(format!("{}{after_department}", words.join(" ")))
}

fn trailing_department(words: &[&str]) -> Option<DepartmentCode> {
    let registry = Registry::global();
    (0..words.len()).find_map(|start| registry.match_known(&words[start..].join(" ")))
}

fn is_course_prefix(word: &str) -> bool {
    (1..=2).contains(&word.len()) && word.bytes().all(|b| b.is_ascii_uppercase())
}

fn digit_count(number: &str) -> usize {
    number.chars().filter(char::is_ascii_digit).count()
}

fn tokens(courses: &[String]) -> Vec<CourseToken> {
    courses
        .iter()
        .filter_map(|course| CourseToken::new(course))
        .collect()
}

/// Whether a token is really a term code or transfer-credit marker.
fn is_term_noise(course: &CourseToken) -> bool {
    let leading = course.leading_word().to_uppercase();
    TERM_WORDS.contains(&leading.as_str())
        || TERM_CODE_WORD.is_match(&leading)
        || TERM_CODE_TOKEN.is_match(&course.to_uppercase())
}
