//! Expansion of course-number ranges into comma lists.
//!
//! Five pattern families are applied in priority order, and the whole
//! sequence repeats until the text stops changing:
//!
//! 1. hyphenated prefix ranges: `CM121-CM187`, `CM121-187`
//! 2. hyphenated department ranges: `CH ENGR 100-187`
//! 3. worded prefix ranges: `C111 TO C174`
//! 4. worded department ranges: `COM SCI 111 TO 187`
//! 5. bare ranges: `100 TO 187`, `100-187`
//!
//! Each expansion emits a comma-joined list (`CM121,CM122,...`). Ranges
//! that run backwards or span too many numbers are left as written.

use std::{ops::RangeInclusive, sync::LazyLock};

use regex::{Captures, Regex};

/// Passes after which expansion stops even if the text is still changing.
const MAX_PASSES: usize = 16;

/// Words that can precede a department name without being part of it.
const CONNECTOR_WORDS: &[&str] = &[
    "OR", "AND", "NOT", "TO", "THRU", "THROUGH", "FROM", "SELECT", "OF", "AT", "LEAST", "THE",
    "UNITS",
];

static HYPHEN_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([A-Z]{1,3})(\d{1,3})\s*-\s*([A-Z]{1,3})?(\d{1,3})\b").unwrap()
});
static HYPHEN_DEPARTMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([A-Z][A-Z\s&.]{0,20}?)\s+(\d{1,3})\s*-\s*(\d{1,3})").unwrap()
});
static TO_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([A-Z]{1,3})(\d{1,3})\s+TO\s+([A-Z]{1,3})?(\d{1,3})\b").unwrap()
});
static TO_DEPARTMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([A-Z][A-Z\s&.]{0,20}?)\s+(\d{1,3})\s+TO\s+(\d{1,3})").unwrap()
});
static BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,3})(?:\s*-\s*|\s+TO\s+)(\d{1,3})\b").unwrap());

#[derive(Debug, Clone, Copy)]
enum Family {
    HyphenPrefix,
    HyphenDepartment,
    ToPrefix,
    ToDepartment,
    Bare,
}

const FAMILIES: [Family; 5] = [
    Family::HyphenPrefix,
    Family::HyphenDepartment,
    Family::ToPrefix,
    Family::ToDepartment,
    Family::Bare,
];

impl Family {
    fn regex(self) -> &'static Regex {
        match self {
            Self::HyphenPrefix => &HYPHEN_PREFIX,
            Self::HyphenDepartment => &HYPHEN_DEPARTMENT,
            Self::ToPrefix => &TO_PREFIX,
            Self::ToDepartment => &TO_DEPARTMENT,
            Self::Bare => &BARE,
        }
    }
}

/// Rewrites course ranges as explicit comma lists.
#[derive(Debug, Clone, Copy)]
pub struct RangeExpander {
    max_span: u32,
}

impl RangeExpander {
    /// Creates an expander that refuses ranges spanning `max_span` numbers
    /// or more.
    #[must_use]
    pub const fn new(max_span: u32) -> Self {
        Self { max_span }
    }

    /// Expands every range in `text` until no pattern applies, or until
    /// `MAX_PASSES` passes have run.
    #[must_use]
    pub fn expand(&self, text: &str) -> String {
        let mut current = text.to_string();
        for _ in 0..MAX_PASSES {
            let next = self.pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
        tracing::debug!("range expansion still changing after {MAX_PASSES} passes");
        current
    }

    fn pass(&self, text: &str) -> String {
        FAMILIES.iter().fold(text.to_string(), |text, &family| {
            family
                .regex()
                .replace_all(&text, |captures: &Captures| {
                    self.expand_match(family, captures)
                        .unwrap_or_else(|| captures[0].to_string())
                })
                .into_owned()
        })
    }

    fn expand_match(&self, family: Family, captures: &Captures) -> Option<String> {
        match family {
            Family::HyphenPrefix | Family::ToPrefix => {
                let prefix = captures[1].to_uppercase();
                let numbers = self.numbers(&captures[2], &captures[4], false)?;
                Some(join(numbers.map(|n| format!("{prefix}{n}"))))
            }
            Family::HyphenDepartment | Family::ToDepartment => {
                let (connectors, department) = split_connectors(&captures[1])?;
                let numbers = self.numbers(&captures[2], &captures[3], false)?;
                let expanded = join(numbers.map(|n| format!("{department} {n}")));
                if connectors.is_empty() {
                    Some(expanded)
                } else {
                    Some(format!("{connectors} {expanded}"))
                }
            }
            Family::Bare => {
                let numbers = self.numbers(&captures[1], &captures[2], true)?;
                Some(join(numbers.map(|n| n.to_string())))
            }
        }
    }

    /// The numbers a range covers, or `None` if the range is degenerate.
    ///
    /// `strict` additionally refuses single-number ranges.
    fn numbers(&self, start: &str, end: &str, strict: bool) -> Option<RangeInclusive<u32>> {
        let start: u32 = start.parse().ok()?;
        let end: u32 = end.parse().ok()?;
        let span = end.checked_sub(start)?;
        if (strict && span == 0) || span >= self.max_span {
            tracing::debug!(start, end, "leaving range unexpanded");
            return None;
        }
        Some(start..=end)
    }
}

/// Splits captured department words into leading connector words and the
/// department proper, upper-casing both.
///
/// `"OR MATH"` becomes `("OR", "MATH")`. Returns `None` when nothing but
/// connectors was captured.
fn split_connectors(words: &str) -> Option<(String, String)> {
    let words: Vec<String> = words.split_whitespace().map(str::to_uppercase).collect();
    let first_department_word = words
        .iter()
        .rposition(|word| CONNECTOR_WORDS.contains(&word.as_str()))
        .map_or(0, |index| index + 1);
    if first_department_word >= words.len() {
        return None;
    }
    Some((
        words[..first_department_word].join(" "),
        words[first_department_word..].join(" "),
    ))
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn expand(text: &str) -> String {
        RangeExpander::new(100).expand(text)
    }

    #[test_case("CM121-CM123", "CM121,CM122,CM123"; "hyphen prefix both sides")]
    #[test_case("CM121-123", "CM121,CM122,CM123"; "hyphen prefix one side")]
    #[test_case("cm1 - 2", "CM1,CM2"; "hyphen prefix lowercase")]
    #[test_case("CH ENGR 100-102", "CH ENGR 100,CH ENGR 101,CH ENGR 102"; "hyphen department")]
    #[test_case("C111 TO C113", "C111,C112,C113"; "worded prefix")]
    #[test_case("M119 TO 120", "M119,M120"; "worded prefix one side")]
    #[test_case("COM SCI 111 TO 113", "COM SCI 111,COM SCI 112,COM SCI 113"; "worded department")]
    #[test_case("100 TO 103", "100,101,102,103"; "bare worded")]
    #[test_case("100 - 101", "100,101"; "bare hyphen")]
    #[test_case("100-103", "100,101,102,103"; "bare hyphen unspaced")]
    fn expands(text: &str, expected: &str) {
        assert_eq!(expand(text), expected);
    }

    #[test_case("COM SCI 113 TO 111"; "backwards department")]
    #[test_case("113 TO 111"; "backwards bare")]
    #[test_case("100 TO 100"; "bare single number")]
    #[test_case("100 TO 300"; "bare too wide")]
    #[test_case("COM SCI 1 TO 187"; "department too wide")]
    #[test_case("CM1-CM200"; "prefix too wide")]
    #[test_case("103-101"; "backwards bare unspaced")]
    #[test_case("CM121-300"; "prefix too wide leaves number alone")]
    #[test_case("COM SCI 130,132"; "plain list")]
    fn leaves_untouched(text: &str) {
        assert_eq!(expand(text), text);
    }

    #[test]
    fn single_number_department_range() {
        assert_eq!(expand("COM SCI 111 TO 111"), "COM SCI 111");
    }

    #[test]
    fn connectors_stay_ahead_of_expansion() {
        assert_eq!(
            expand("COM SCI 31 OR MATH 100 TO 102"),
            "COM SCI 31 OR MATH 100,MATH 101,MATH 102"
        );
    }

    #[test]
    fn prose_before_department_is_kept() {
        assert_eq!(
            expand("SELECT COURSES FROM MATH 100-101"),
            "SELECT COURSES FROM MATH 100,MATH 101"
        );
    }

    #[test]
    fn several_ranges_in_one_list() {
        assert_eq!(
            expand("COM SCI 111 TO 112, CM121-CM122, 180 TO 181"),
            "COM SCI 111,COM SCI 112, CM121,CM122, 180,181"
        );
    }

    #[test]
    fn span_limit_is_configurable() {
        let expander = RangeExpander::new(3);
        assert_eq!(expander.expand("100 TO 102"), "100,101,102");
        assert_eq!(expander.expand("100 TO 103"), "100 TO 103");
    }

    #[test]
    fn expanded_text_is_a_fixed_point() {
        let once = expand("COM SCI 111 TO 113, C111-C112, 180-182, MATH 31A OR MATH 100 TO 101");
        assert_eq!(expand(&once), once);
    }

    #[test]
    fn connector_split() {
        assert_eq!(
            split_connectors("or  math"),
            Some(("OR".to_string(), "MATH".to_string()))
        );
        assert_eq!(
            split_connectors("COM SCI"),
            Some((String::new(), "COM SCI".to_string()))
        );
        assert_eq!(split_connectors("FROM THE"), None);
    }
}
