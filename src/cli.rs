use std::path::{Path, PathBuf};

mod departments;
mod parse;
mod render;
mod requirements;
mod taken;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use dars::Config;
use departments::Departments;
use parse::Parse;
use requirements::Requirements;
use taken::Taken;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Parser configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = load_config(self.config.as_deref())?;
        self.command.run(config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries the report, so logs go to stderr
        let fmt_layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    tracing::info!("loading configuration from {}", path.display());
    Config::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Extract taken courses and outstanding requirements
    Parse(Parse),

    /// List the courses the audit shows as taken
    Taken(Taken),

    /// List the outstanding requirements
    Requirements(Requirements),

    /// List the known department codes, longest first
    Departments(Departments),

    /// Show the effective configuration as TOML
    Config(ShowConfig),
}

impl Command {
    fn run(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::Parse(command) => command.run(config)?,
            Self::Taken(command) => command.run(&config)?,
            Self::Requirements(command) => command.run(config)?,
            Self::Departments(command) => command.run()?,
            Self::Config(command) => command.run(&config)?,
        }
        Ok(())
    }
}

/// Output format shared by the reporting commands.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    #[default]
    Pretty,
    /// JSON
    Json,
}

#[derive(Debug, clap::Parser)]
pub struct ShowConfig {}

impl ShowConfig {
    #[instrument(level = "debug", skip_all)]
    fn run(self, config: &Config) -> anyhow::Result<()> {
        let toml = config.to_toml().context("Failed to render configuration")?;
        print!("{toml}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    #[test]
    fn parse_accepts_many_paths() {
        let cli = Cli::try_parse_from([
            "dars-audit",
            "-vv",
            "parse",
            "a.txt",
            "b.pdf",
            "--output",
            "json",
            "--strict",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Parse(_)));
    }

    #[test]
    fn parse_requires_a_path() {
        assert!(Cli::try_parse_from(["dars-audit", "parse"]).is_err());
    }

    #[test]
    fn config_flag_is_global() {
        let cli =
            Cli::try_parse_from(["dars-audit", "departments", "--config", "dars.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some(Path::new("dars.toml")));
    }

    #[test]
    fn missing_config_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), Config::default());
    }

    #[test]
    fn config_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nmax_range_span = 5\n").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.max_range_span(), 5);
    }

    #[test]
    fn unreadable_config_names_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing.toml");
        let error = load_config(Some(&path)).unwrap_err();
        assert!(error.to_string().contains("missing.toml"));
    }
}
