use std::{fmt, ops::Deref};

use serde::Serialize;

/// A normalised course identifier such as `COM SCI M151B`.
///
/// Normalisation collapses runs of whitespace to a single space and drops
/// anything from the first `(` onwards, so two tokens are equal exactly when
/// their normalised strings are.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CourseToken(String);

impl CourseToken {
    /// Normalises `raw` into a token.
    ///
    /// Returns `None` when nothing is left after normalisation.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let before_annotation = raw.split('(').next().unwrap_or_default();
        let normalized = before_annotation.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// Builds `<department> <number>`.
    #[must_use]
    pub fn qualified(department: &str, number: &str) -> Option<Self> {
        Self::new(&format!("{department} {number}"))
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first whitespace-separated word of the token.
    #[must_use]
    pub fn leading_word(&self) -> &str {
        self.0.split(' ').next().unwrap_or_default()
    }
}

impl Deref for CourseToken {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for CourseToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("COM SCI 31", "COM SCI 31"; "already normal")]
    #[test_case("  COM   SCI\t31 ", "COM SCI 31"; "collapses whitespace")]
    #[test_case("MATH 31A (FA23-9999)", "MATH 31A"; "strips annotation")]
    #[test_case("MATH 31A (unterminated", "MATH 31A"; "strips unterminated annotation")]
    fn normalizes(raw: &str, expected: &str) {
        assert_eq!(CourseToken::new(raw).unwrap().as_str(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("   "; "blank")]
    #[test_case("(FA23)"; "only annotation")]
    fn rejects_empty(raw: &str) {
        assert!(CourseToken::new(raw).is_none());
    }

    #[test]
    fn equality_ignores_layout() {
        assert_eq!(
            CourseToken::new("EC ENGR  M146"),
            CourseToken::new("EC ENGR M146 (SP25)")
        );
    }

    #[test]
    fn qualified_joins_department_and_number() {
        let token = CourseToken::qualified("COM SCI", "M151B").unwrap();
        assert_eq!(token.as_str(), "COM SCI M151B");
        assert_eq!(token.leading_word(), "COM");
    }
}
