//! Human-readable report output.

use std::path::Path;

use dars::{Diagnostic, RequirementBlock, TakenCourse};

use super::terminal::Colorize;

const RULE_WIDTH: usize = 50;

pub fn print_taken(taken: &[TakenCourse]) {
    if taken.is_empty() {
        return;
    }
    println!("{}", "Taken Courses:".info());
    println!("{}", "-".repeat(RULE_WIDTH));
    for course in taken {
        println!("{course}");
    }
    println!();
}

pub fn print_requirements(requirements: &[RequirementBlock]) {
    println!("{}", "Needed Courses (Requirements):".info());
    println!("{}", "-".repeat(RULE_WIDTH));
    if requirements.is_empty() {
        println!("{}", "No requirements parsed.".dim());
        return;
    }
    for requirement in requirements {
        println!("{requirement}");
    }
}

pub fn print_diagnostics(source: &Path, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!(
            "{}",
            format!("warning: {}: {diagnostic}", source.display()).warning()
        );
    }
}
