//! Degree-audit text parsing.
//!
//! Turns the plain text of a degree audit into the courses a student has
//! taken and the requirements still outstanding, each as "take N courses
//! from these options" with taken courses removed.
//!
//! ```
//! let report = dars::parse(
//!     "UCLA COURSEWORK\nFA23 MATH 31A\nNEEDS:\n1 COURSE\nSELECT FROM: MATH 31A OR MATH 31AL\n",
//! );
//! assert_eq!(report.taken_courses[0].to_string(), "FA23: MATH 31A");
//! assert_eq!(report.requirements[0].to_string(), "1 course from {MATH 31AL}");
//! ```

pub mod audit;
pub use audit::{AuditParser, parse};

pub mod domain;
pub use domain::{
    AuditReport, Config, ConfigError, CourseToken, DepartmentCode, Diagnostic, OptionGroup,
    Registry, RequirementBlock, TakenCourse, Term,
};

pub mod source;
pub use source::SourceError;
