use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dars::{AuditParser, Config, source::read_audit_text};
use tracing::instrument;

use super::{OutputFormat, render};

#[derive(Debug, Parser)]
pub struct Taken {
    /// Audit file: plain text, or PDF via the configured extractor
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Output format (pretty, json)
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

impl Taken {
    #[instrument(level = "debug", skip(self, config), fields(path = %self.path.display()))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let text = read_audit_text(&self.path, config)
            .with_context(|| format!("Failed to load audit {}", self.path.display()))?;
        let report = AuditParser::new(config.clone()).taken_courses(&text);

        match self.output {
            OutputFormat::Json => {
                let json = serde_json::json!({ "taken_courses": report.taken_courses });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Pretty => {
                if report.taken_courses.is_empty() {
                    println!("No taken courses found.");
                } else {
                    render::print_taken(&report.taken_courses);
                }
            }
        }
        Ok(())
    }
}
