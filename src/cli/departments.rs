use clap::Parser;
use dars::{DepartmentCode, Registry};

use super::{OutputFormat, terminal::terminal_width};

/// Line width used when the terminal size is unknown.
const DEFAULT_WIDTH: usize = 80;
const COLUMN_GAP: usize = 2;

#[derive(Debug, Parser)]
pub struct Departments {
    /// Output format (pretty, json)
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

impl Departments {
    pub fn run(self) -> anyhow::Result<()> {
        let codes = Registry::global().by_length();
        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(codes)?),
            OutputFormat::Pretty => {
                let width = terminal_width().map_or(DEFAULT_WIDTH, usize::from);
                for line in columns(codes, width) {
                    println!("{line}");
                }
            }
        }
        Ok(())
    }
}

/// Lays the codes out in equal-width columns that fit in `width`.
fn columns(codes: &[DepartmentCode], width: usize) -> Vec<String> {
    let cell = codes.iter().copied().map(DepartmentCode::len).max().unwrap_or(0) + COLUMN_GAP;
    let per_line = (width / cell).max(1);

    codes
        .chunks(per_line)
        .map(|chunk| {
            chunk
                .iter()
                .map(|code| format!("{:<cell$}", code.as_str()))
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_is_listed_once() {
        let codes = Registry::global().by_length();
        let lines = columns(codes, 80);
        let listed: Vec<&str> = lines.iter().flat_map(|line| line.split("  ")).collect();
        let listed: Vec<&str> = listed.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).collect();
        assert_eq!(listed.len(), codes.len());
    }

    #[test]
    fn narrow_width_gives_one_per_line() {
        let codes = &Registry::global().by_length()[..3];
        assert_eq!(columns(codes, 1).len(), 3);
    }
}
