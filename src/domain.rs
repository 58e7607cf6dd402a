//! Domain models for degree audits.
//!
//! This module contains the value types produced by a parse (terms, course
//! tokens, taken courses, requirement blocks), the department registry they
//! are matched against, and the parser configuration.

/// Department codes and the fixed registry they are drawn from.
pub mod department;
pub use department::{DepartmentCode, Registry};

mod config;
pub use config::{Config, ConfigError};

mod course;
pub use course::CourseToken;

mod diagnostic;
pub use diagnostic::Diagnostic;

/// Taken courses, option groups and requirement blocks.
pub mod requirement;
pub use requirement::{AuditReport, OptionGroup, RequirementBlock, TakenCourse};

/// Academic terms (`FA23`).
pub mod term;
pub use term::{Season, Term};
