//! The degree-audit parsing pipeline.
//!
//! A parse runs in two passes over the same text:
//!
//! 1. the taken-courses section is located and each `FA23 COM SCI 31` line
//!    becomes a [`TakenCourse`];
//! 2. every `SELECT FROM:` block is located, its option list expanded and
//!    tokenised, and the result assembled into a [`RequirementBlock`] with
//!    the courses from the first pass removed.
//!
//! Nothing here fails: input the heuristics cannot use is skipped and noted
//! in [`AuditReport::diagnostics`].

use std::collections::HashSet;

use tracing::instrument;

use crate::domain::{AuditReport, Config, CourseToken, Diagnostic, RequirementBlock, TakenCourse};

mod assemble;
mod blocks;
mod lines;
mod ranges;
mod sections;
mod taken;
mod tokens;

pub use ranges::RangeExpander;
pub use sections::{TakenSection, locate_taken_section};
pub use tokens::{Extraction, TokenExtractor};

/// Parses audit text into taken courses and outstanding requirements.
///
/// The parser holds only its configuration, so one instance can be shared
/// across threads and reused for any number of audits.
#[derive(Debug, Clone, Default)]
pub struct AuditParser {
    config: Config,
}

impl AuditParser {
    /// Creates a parser with the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// The parser's configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the full pipeline.
    ///
    /// Requirement options exclude every course found in the taken section.
    #[must_use]
    #[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
    pub fn parse(&self, text: &str) -> AuditReport {
        let mut diagnostics = Vec::new();
        let taken_courses = collect_taken(text, &mut diagnostics);
        let taken: HashSet<CourseToken> = taken_courses
            .iter()
            .map(|taken| taken.course.clone())
            .collect();
        let requirements = self.collect_requirements(text, &taken, &mut diagnostics);

        tracing::debug!(
            taken = taken_courses.len(),
            requirements = requirements.len(),
            diagnostics = diagnostics.len(),
            "parsed audit"
        );
        AuditReport {
            taken_courses,
            requirements,
            diagnostics,
        }
    }

    /// Extracts only the taken courses.
    #[must_use]
    pub fn taken_courses(&self, text: &str) -> AuditReport {
        let mut diagnostics = Vec::new();
        let taken_courses = collect_taken(text, &mut diagnostics);
        AuditReport {
            taken_courses,
            requirements: Vec::new(),
            diagnostics,
        }
    }

    /// Extracts only the requirements, removing the courses in `taken` from
    /// their options.
    #[must_use]
    pub fn requirements(&self, text: &str, taken: &HashSet<CourseToken>) -> AuditReport {
        let mut diagnostics = Vec::new();
        let requirements = self.collect_requirements(text, taken, &mut diagnostics);
        AuditReport {
            taken_courses: Vec::new(),
            requirements,
            diagnostics,
        }
    }

    fn collect_requirements(
        &self,
        text: &str,
        taken: &HashSet<CourseToken>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<RequirementBlock> {
        let lines = lines::split_lines(text);
        let extractor = TokenExtractor::new(self.config.max_range_span());

        blocks::locate_blocks(&lines, &self.config, diagnostics)
            .into_iter()
            .map(|block| {
                let extraction = extractor.extract(&block.text);
                assemble::assemble(block, extraction, taken, diagnostics)
            })
            .collect()
    }
}

fn collect_taken(text: &str, diagnostics: &mut Vec<Diagnostic>) -> Vec<TakenCourse> {
    let Some(section) = locate_taken_section(text) else {
        tracing::debug!("no taken-courses section");
        diagnostics.push(Diagnostic::MissingTakenSection);
        return Vec::new();
    };
    taken::extract_taken_courses(section, diagnostics)
}

/// Parses `text` with the default configuration.
#[must_use]
pub fn parse(text: &str) -> AuditReport {
    AuditParser::default().parse(text)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;
    use crate::domain::OptionGroup;

    const AUDIT: &str = "\
UNIVERSITY OF CALIFORNIA DEGREE AUDIT
ACADEMIC RECORD UNIT TOTAL 90.0
UCLA UNITS
FA23 COM SCI 31
WI24 COM SCI 32
WI24 MATH 31A
SP24 MATH 31A
SP24 XYZZY 1
GRADED UNIV CALIF
LOWER DIVISION COURSES

MAJOR REQUIREMENTS
NEEDS:
  2 COURSES
SELECT FROM: COM SCI 31, 32,
  33, 35L
-> NOT FROM: COM SCI 199

CALCULUS
NEEDS:
  1 COURSE
SELECT FROM: MATH 31A OR MATH 31AL

UPPER DIVISION ELECTIVES
SELECT FROM: COM SCI 111 TO 113, C174A,
  CM121-CM122
SP25 EC ENGR M146

SCI-TECH ELECTIVES
NEEDS:
  3 COURSES
SELECT FROM: PHYSICS 1A, 1B

ADDITIONAL
SELECT FROM: OF AT LEAST 5
";

    fn strings(options: &[OptionGroup]) -> Vec<String> {
        options.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn taken_courses_in_document_order() {
        let report = parse(AUDIT);
        let taken: Vec<String> = report.taken_courses.iter().map(ToString::to_string).collect();
        assert_eq!(
            taken,
            [
                "FA23: COM SCI 31",
                "WI24: COM SCI 32",
                "WI24: MATH 31A",
                "SP24: MATH 31A",
            ]
        );
    }

    #[test]
    fn requirements_exclude_taken_courses() {
        let report = parse(AUDIT);
        assert_eq!(report.requirements.len(), 4);

        let major = &report.requirements[0];
        assert_eq!(major.needs, NonZeroU32::new(2));
        assert_eq!(strings(&major.options), ["COM SCI 33", "COM SCI 35L"]);
        assert_eq!(
            major.needs_text.as_deref(),
            Some("2 COURSES | SELECT FROM: COM SCI 31, 32, | 33, 35L | -> NOT FROM: COM SCI 199 | CALCULUS | NEEDS:")
        );

        let calculus = &report.requirements[1];
        assert_eq!(calculus.needs, NonZeroU32::new(1));
        assert_eq!(strings(&calculus.options), ["MATH 31AL"]);
    }

    #[test]
    fn ranges_and_prefixes_expand() {
        let report = parse(AUDIT);
        let electives = &report.requirements[2];
        assert_eq!(
            strings(&electives.options),
            [
                "COM SCI 111",
                "COM SCI 112",
                "COM SCI 113",
                "COM SCI C174A",
                "COM SCI CM121",
                "COM SCI CM122",
            ]
        );
    }

    #[test]
    fn diagnostics_cover_skipped_input() {
        let report = parse(AUDIT);
        let last = report.requirements.last().unwrap();
        assert!(last.options.is_empty());

        let kinds: Vec<String> = report.diagnostics.iter().map(ToString::to_string).collect();
        assert_eq!(
            kinds,
            [
                "line 8: no known department in 'SP24 XYZZY 1'",
                "line 32: skipped science-technology elective block",
                "line 35: no course found in 'OF AT LEAST 5'",
                "line 35: requirement lists no course options",
            ]
        );
    }

    #[test]
    fn missing_taken_section() {
        let report = parse("NEEDS:\n1 COURSE\nSELECT FROM: COM SCI 130,132\n");
        assert!(report.taken_courses.is_empty());
        assert_eq!(report.diagnostics, vec![Diagnostic::MissingTakenSection]);
        assert_eq!(strings(&report.requirements[0].options), ["COM SCI 130", "COM SCI 132"]);
        assert_eq!(report.requirements[0].needs, NonZeroU32::new(1));
    }

    #[test]
    fn units_summary_without_aggregate_is_missing() {
        let report = parse("UCLA UNITS\nFA23 COM SCI 31\nSELECT FROM: COM SCI 31, 32\n");
        assert!(report.taken_courses.is_empty());
        assert_eq!(report.diagnostics, vec![Diagnostic::MissingTakenSection]);
        assert_eq!(
            strings(&report.requirements[0].options),
            ["COM SCI 31", "COM SCI 32"]
        );
    }

    #[test]
    fn range_without_needs() {
        let report = parse("SELECT FROM: COM SCI 111 TO 113");
        let block = &report.requirements[0];
        assert_eq!(block.needs, None);
        assert_eq!(block.needs_text, None);
        assert_eq!(strings(&block.options), ["COM SCI 111", "COM SCI 112", "COM SCI 113"]);
    }

    #[test]
    fn duplicate_options_collapse() {
        let report = parse("SELECT FROM: COM SCI 131,131,132");
        assert_eq!(
            strings(&report.requirements[0].options),
            ["COM SCI 131", "COM SCI 132"]
        );
    }

    #[test]
    fn requirements_with_explicit_taken_set() {
        let taken = HashSet::from([CourseToken::new("MATH 31A").unwrap()]);
        let report = AuditParser::default()
            .requirements("SELECT FROM: MATH 31A OR MATH 31AL", &taken);
        assert_eq!(strings(&report.requirements[0].options), ["MATH 31AL"]);
        assert!(report.taken_courses.is_empty());
    }

    #[test]
    fn page_breaks_split_lines() {
        let report = parse("NEEDS:\x0c2 COURSES\rSELECT FROM: MATH 31A,\u{2028}MATH 31B");
        let block = &report.requirements[0];
        assert_eq!(block.needs, NonZeroU32::new(2));
        assert_eq!(strings(&block.options), ["MATH 31A", "MATH 31B"]);
    }

    #[test]
    fn elective_blocks_kept_when_configured() {
        let mut config = Config::default();
        config.skip_sci_tech_electives = false;
        let report = AuditParser::new(config).parse(AUDIT);
        assert_eq!(report.requirements.len(), 5);
        assert_eq!(
            strings(&report.requirements[3].options),
            ["PHYSICS 1A", "PHYSICS 1B"]
        );
    }

    #[test]
    fn parsing_is_deterministic() {
        let parser = AuditParser::default();
        let first = serde_json::to_string(&parser.parse(AUDIT)).unwrap();
        let second = serde_json::to_string(&parser.parse(AUDIT)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuditParser>();
    }
}
