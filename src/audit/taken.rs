//! Reading `FA23 COM SCI 31` lines out of the taken-courses section.

use std::sync::LazyLock;

use regex::Regex;
use tracing::instrument;

use super::sections::TakenSection;
use crate::domain::{CourseToken, Diagnostic, Registry, Season, TakenCourse, Term};

static TAKEN_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(FA|WI|SP|SU)(\d{2})\s+(.+)$").unwrap());

/// Extracts `(term, course)` records from the taken-courses section.
///
/// Only lines shaped like `FA23 COM SCI 31` are considered. The department
/// is the longest registry code the remainder starts with; whatever follows
/// it is the course number. Lines with a term prefix but no known department
/// are dropped and reported as diagnostics. Records keep document order and
/// repeats.
#[instrument(level = "debug", skip_all, fields(first_line = section.first_line))]
pub fn extract_taken_courses(
    section: TakenSection<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<TakenCourse> {
    let registry = Registry::global();
    let mut courses = Vec::new();

    for (offset, line) in section.text.split('\n').enumerate() {
        let line = line.trim();
        let Some(captures) = TAKEN_LINE.captures(line) else {
            continue;
        };
        let line_number = section.first_line + offset;

        let term = Season::from_code(&captures[1])
            .zip(captures[2].parse::<u8>().ok())
            .and_then(|(season, year)| Term::new(season, year));
        let remainder = captures[3].trim();

        let course = registry.longest_prefix_of(remainder).and_then(|department| {
            let number = remainder[department.len()..].trim();
            if number.is_empty() {
                None
            } else {
                CourseToken::qualified(department.as_str(), number)
            }
        });

        match (term, course) {
            (Some(term), Some(course)) => {
                tracing::trace!(line = line_number, %term, %course, "taken course");
                courses.push(TakenCourse { term, course });
            }
            _ => {
                tracing::debug!(line_number, "dropping taken line '{line}'");
                diagnostics.push(Diagnostic::UnrecognizedTakenLine {
                    line: line_number,
                    text: line.to_string(),
                });
            }
        }
    }

    courses
}
