use std::collections::HashSet;

use super::{blocks::LocatedBlock, tokens::Extraction};
use crate::domain::{CourseToken, Diagnostic, RequirementBlock};

/// Leading words that mark a token as leftover prose or a term column.
const IMPLAUSIBLE_LEADING_WORDS: &[&str] = &[
    "FA", "WI", "SP", "SU", "AP", "WVC", "FOOTHILL", "TA", "TO", "OR", "NOT", "SELECT", "NEEDS",
    "ALTERNATE",
];

/// Builds the requirement for one located block.
///
/// Courses in `taken` are removed from every option; alternatives left with
/// a single member collapse to that course and options left with none are
/// dropped. A block whose list produced no course at all is still returned
/// (with no options) and reported.
pub fn assemble(
    block: LocatedBlock,
    extraction: Extraction,
    taken: &HashSet<CourseToken>,
    diagnostics: &mut Vec<Diagnostic>,
) -> RequirementBlock {
    diagnostics.extend(
        extraction
            .unparsed
            .into_iter()
            .map(|text| Diagnostic::UnparsedFragment {
                line: block.line,
                text,
            }),
    );
    if extraction.options.is_empty() {
        diagnostics.push(Diagnostic::EmptyRequirement { line: block.line });
    }

    let mut seen = HashSet::new();
    let options = extraction
        .options
        .into_iter()
        .filter_map(|option| option.retain(|course| !taken.contains(course) && is_plausible(course)))
        .filter(|option| seen.insert(option.clone()))
        .collect();

    RequirementBlock {
        needs: block.needs,
        options,
        needs_text: block.needs_text,
    }
}

fn is_plausible(course: &CourseToken) -> bool {
    !IMPLAUSIBLE_LEADING_WORDS.contains(&course.leading_word().to_uppercase().as_str())
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;
    use crate::domain::OptionGroup;

    fn course(raw: &str) -> CourseToken {
        CourseToken::new(raw).unwrap()
    }

    fn located(line: usize) -> LocatedBlock {
        LocatedBlock {
            line,
            text: String::new(),
            needs: NonZeroU32::new(2),
            needs_text: Some("2 COURSES".to_string()),
        }
    }

    fn options(members: &[&[&str]]) -> Vec<OptionGroup> {
        members
            .iter()
            .filter_map(|group| OptionGroup::from_members(group.iter().map(|c| course(c))))
            .collect()
    }

    #[test]
    fn taken_courses_are_removed() {
        let extraction = Extraction {
            options: options(&[&["COM SCI 31"], &["COM SCI 32"], &["MATH 31A", "MATH 31AL"]]),
            unparsed: vec![],
        };
        let taken = HashSet::from([course("COM SCI 31"), course("MATH 31A")]);
        let mut diagnostics = Vec::new();

        let block = assemble(located(3), extraction, &taken, &mut diagnostics);

        assert_eq!(block.options, options(&[&["COM SCI 32"], &["MATH 31AL"]]));
        assert_eq!(block.needs, NonZeroU32::new(2));
        assert_eq!(block.needs_text.as_deref(), Some("2 COURSES"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn group_survives_with_two_members() {
        let extraction = Extraction {
            options: options(&[&["MATH 31A", "MATH 31AL", "MATH 31B"]]),
            unparsed: vec![],
        };
        let taken = HashSet::from([course("MATH 31B")]);
        let block = assemble(located(1), extraction, &taken, &mut Vec::new());
        assert_eq!(block.options, options(&[&["MATH 31A", "MATH 31AL"]]));
    }

    #[test]
    fn fully_taken_group_is_dropped() {
        let extraction = Extraction {
            options: options(&[&["MATH 31A", "MATH 31AL"]]),
            unparsed: vec![],
        };
        let taken = HashSet::from([course("MATH 31A"), course("MATH 31AL")]);
        let mut diagnostics = Vec::new();
        let block = assemble(located(1), extraction, &taken, &mut diagnostics);
        assert!(block.options.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn implausible_tokens_are_dropped() {
        let extraction = Extraction {
            options: options(&[&["TO 5"], &["NOT COM SCI 199"], &["COM SCI 32", "SELECT 1"]]),
            unparsed: vec![],
        };
        let block = assemble(located(1), extraction, &HashSet::new(), &mut Vec::new());
        assert_eq!(block.options, options(&[&["COM SCI 32"]]));
    }

    #[test]
    fn collapsed_group_is_not_repeated() {
        let extraction = Extraction {
            options: options(&[&["MATH 31AL"], &["MATH 31A", "MATH 31AL"]]),
            unparsed: vec![],
        };
        let taken = HashSet::from([course("MATH 31A")]);
        let block = assemble(located(1), extraction, &taken, &mut Vec::new());
        assert_eq!(block.options, options(&[&["MATH 31AL"]]));
    }

    #[test]
    fn empty_and_unparsed_are_reported() {
        let extraction = Extraction {
            options: vec![],
            unparsed: vec!["OF AT LEAST 5".to_string()],
        };
        let mut diagnostics = Vec::new();
        let block = assemble(located(7), extraction, &HashSet::new(), &mut diagnostics);
        assert!(block.options.is_empty());
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::UnparsedFragment {
                    line: 7,
                    text: "OF AT LEAST 5".to_string()
                },
                Diagnostic::EmptyRequirement { line: 7 },
            ]
        );
    }
}
