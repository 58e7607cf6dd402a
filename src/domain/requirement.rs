//! Output records of a parse: taken courses and outstanding requirements.

use std::{fmt, num::NonZeroU32};

use serde::Serialize;

use super::{CourseToken, Diagnostic, Term};

/// A course the audit lists as completed, tagged with the term it was taken.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TakenCourse {
    /// The term the course was taken in.
    #[serde(rename = "quarter")]
    pub term: Term,
    /// The course taken.
    pub course: CourseToken,
}

impl fmt::Display for TakenCourse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.term, self.course)
    }
}

/// One slot of a requirement: a single course, or interchangeable
/// alternatives ("OR" group).
///
/// Serialises as a string for a single course and as a list of strings for
/// an alternative group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum OptionGroup {
    /// A single course.
    Course(CourseToken),
    /// Two or more distinct alternatives, in document order.
    Alternatives(Alternatives),
}

impl OptionGroup {
    /// Builds an option from the members of an "OR" expression.
    ///
    /// Repeated members are dropped. Two or more distinct members form an
    /// [`OptionGroup::Alternatives`], exactly one collapses to a plain
    /// [`OptionGroup::Course`], and none yields `None`.
    #[must_use]
    pub fn from_members(members: impl IntoIterator<Item = CourseToken>) -> Option<Self> {
        let mut distinct: Vec<CourseToken> = Vec::new();
        for member in members {
            if !distinct.contains(&member) {
                distinct.push(member);
            }
        }
        match distinct.len() {
            0 => None,
            1 => distinct.pop().map(Self::Course),
            _ => Some(Self::Alternatives(Alternatives(distinct))),
        }
    }

    /// Drops the members rejected by `keep`, collapsing or removing the
    /// option when too few members survive.
    #[must_use]
    pub fn retain(self, mut keep: impl FnMut(&CourseToken) -> bool) -> Option<Self> {
        match self {
            Self::Course(course) => keep(&course).then_some(Self::Course(course)),
            Self::Alternatives(Alternatives(members)) => {
                Self::from_members(members.into_iter().filter(|member| keep(member)))
            }
        }
    }

    /// The courses in this option, in order.
    #[must_use]
    pub fn courses(&self) -> &[CourseToken] {
        match self {
            Self::Course(course) => std::slice::from_ref(course),
            Self::Alternatives(alternatives) => alternatives.as_slice(),
        }
    }
}

impl From<CourseToken> for OptionGroup {
    fn from(course: CourseToken) -> Self {
        Self::Course(course)
    }
}

impl fmt::Display for OptionGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Course(course) => write!(f, "{course}"),
            Self::Alternatives(alternatives) => write!(f, "({alternatives})"),
        }
    }
}

/// Two or more distinct interchangeable courses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Alternatives(Vec<CourseToken>);

impl Alternatives {
    /// The alternatives, in document order.
    #[must_use]
    pub fn as_slice(&self) -> &[CourseToken] {
        &self.0
    }
}

impl fmt::Display for Alternatives {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(CourseToken::as_str)
            .collect::<Vec<_>>()
            .join(" or ");
        f.write_str(&joined)
    }
}

/// An outstanding requirement: take `needs` courses from `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementBlock {
    /// How many courses are needed, when the audit states it.
    pub needs: Option<NonZeroU32>,
    /// Candidate courses still available, in document order, without
    /// repeats.
    pub options: Vec<OptionGroup>,
    /// The descriptive lines following the `NEEDS:` marker, joined with
    /// `" | "`.
    pub needs_text: Option<String>,
}

impl fmt::Display for RequirementBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.needs.map(NonZeroU32::get) {
            None => f.write_str("Unknown number of courses")?,
            Some(1) => f.write_str("1 course")?,
            Some(n) => write!(f, "{n} courses")?,
        }

        if self.options.is_empty() {
            return f.write_str(" from {(no explicit options listed)}");
        }

        let options = self
            .options
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, " from {{{options}}}")
    }
}

/// Everything extracted from one audit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AuditReport {
    /// Completed courses in document order. Repeats are kept.
    pub taken_courses: Vec<TakenCourse>,
    /// Outstanding requirements in document order.
    pub requirements: Vec<RequirementBlock>,
    /// Non-fatal notes about input that was skipped.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}
