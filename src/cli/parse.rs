use std::{
    path::{Path, PathBuf},
    process,
};

use anyhow::Context;
use clap::Parser;
use dars::{AuditParser, AuditReport, Config, source::read_audit_text};
use rayon::prelude::*;
use serde::Serialize;
use tracing::instrument;

use super::{OutputFormat, render, terminal::Colorize};

/// Exit status when `--strict` finds diagnostics.
const STRICT_EXIT_CODE: i32 = 2;

#[derive(Debug, Parser)]
pub struct Parse {
    /// Audit files: plain text, or PDF via the configured extractor
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Output format (pretty, json)
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,

    /// Print diagnostics about skipped input to stderr
    #[arg(long)]
    diagnostics: bool,

    /// Exit with status 2 if any diagnostic was produced
    #[arg(long)]
    strict: bool,
}

/// One report in multi-file JSON output.
#[derive(Debug, Serialize)]
struct SourcedReport<'a> {
    source: &'a Path,
    #[serde(flatten)]
    report: &'a AuditReport,
}

impl Parse {
    #[instrument(level = "debug", skip_all, fields(inputs = self.paths.len()))]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        let parser = AuditParser::new(config);

        let reports = self
            .paths
            .par_iter()
            .map(|path| {
                let text = read_audit_text(path, parser.config())
                    .with_context(|| format!("Failed to load audit {}", path.display()))?;
                anyhow::Ok(parser.parse(&text))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        match self.output {
            OutputFormat::Json => self.output_json(&reports)?,
            OutputFormat::Pretty => self.output_pretty(&reports),
        }

        if self.diagnostics {
            for (path, report) in self.paths.iter().zip(&reports) {
                render::print_diagnostics(path, &report.diagnostics);
            }
        }

        if self.strict && reports.iter().any(|report| !report.diagnostics.is_empty()) {
            process::exit(STRICT_EXIT_CODE);
        }
        Ok(())
    }

    fn output_json(&self, reports: &[AuditReport]) -> anyhow::Result<()> {
        let json = if let [report] = reports {
            serde_json::to_string_pretty(report)?
        } else {
            let sourced: Vec<_> = self
                .paths
                .iter()
                .zip(reports)
                .map(|(source, report)| SourcedReport { source, report })
                .collect();
            serde_json::to_string_pretty(&sourced)?
        };
        println!("{json}");
        Ok(())
    }

    fn output_pretty(&self, reports: &[AuditReport]) {
        let many = reports.len() > 1;
        for (index, (path, report)) in self.paths.iter().zip(reports).enumerate() {
            if many {
                if index > 0 {
                    println!();
                }
                println!("{}", format!("==> {} <==", path.display()).dim());
            }
            render::print_taken(&report.taken_courses);
            render::print_requirements(&report.requirements);
        }
    }
}
