use std::{collections::HashSet, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use dars::{AuditParser, Config, source::read_audit_text};
use tracing::instrument;

use super::{OutputFormat, render};

#[derive(Debug, Parser)]
pub struct Requirements {
    /// Audit file: plain text, or PDF via the configured extractor
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Output format (pretty, json)
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,

    /// Keep courses the audit lists as taken in the options
    #[arg(long)]
    keep_taken: bool,
}

impl Requirements {
    #[instrument(level = "debug", skip(self, config), fields(path = %self.path.display()))]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        let text = read_audit_text(&self.path, &config)
            .with_context(|| format!("Failed to load audit {}", self.path.display()))?;
        let parser = AuditParser::new(config);

        let report = if self.keep_taken {
            parser.requirements(&text, &HashSet::new())
        } else {
            parser.parse(&text)
        };

        match self.output {
            OutputFormat::Json => {
                let json = serde_json::json!({ "requirements": report.requirements });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Pretty => render::print_requirements(&report.requirements),
        }
        Ok(())
    }
}
