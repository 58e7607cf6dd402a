use std::{io, path::Path};

use serde::{Deserialize, Serialize};

/// Configuration for audit parsing.
///
/// The defaults reproduce the behaviour the parser was tuned against; the
/// file format only needs to mention the settings it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Whether `SELECT FROM:` blocks under a science-technology elective
    /// header are skipped.
    ///
    /// The heuristic scans backwards from the block for an upper-case
    /// `SCI-TECH` header before any unrelated header. It is tuned for a
    /// single audit layout, which is why it can be switched off.
    pub skip_sci_tech_electives: bool,

    /// How far (in lines) to look back from a `SELECT FROM:` marker for its
    /// `NEEDS:` marker or elective header.
    lookback_lines: usize,

    /// How many non-blank lines after `NEEDS:` form the requirement's
    /// description.
    needs_context_lines: usize,

    /// Ranges spanning this many numbers or more are left unexpanded.
    ///
    /// For example, with the default of 100, `100 TO 199` expands but
    /// `100 TO 200` does not.
    max_range_span: u32,

    /// Command used to turn a PDF into text.
    ///
    /// The first element is the program; `{input}` in any argument is
    /// replaced by the PDF path. The program must write text to stdout.
    pdf_extractor: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skip_sci_tech_electives: true,
            lookback_lines: default_lookback_lines(),
            needs_context_lines: default_needs_context_lines(),
            max_range_span: default_max_range_span(),
            pdf_extractor: default_pdf_extractor(),
        }
    }
}

/// Errors reading or writing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file: {0}")]
    Read(#[source] io::Error),

    /// The file is not valid configuration TOML.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The file could not be written.
    #[error("Failed to write config file: {0}")]
    Write(#[source] io::Error),
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Self::from_toml(&content)
    }

    /// Parses the configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }

    /// Lines searched backwards from a `SELECT FROM:` marker.
    #[must_use]
    pub const fn lookback_lines(&self) -> usize {
        self.lookback_lines
    }

    /// Non-blank lines collected after a `NEEDS:` marker.
    #[must_use]
    pub const fn needs_context_lines(&self) -> usize {
        self.needs_context_lines
    }

    /// Exclusive upper bound on the span of an expandable range.
    #[must_use]
    pub const fn max_range_span(&self) -> u32 {
        self.max_range_span
    }

    /// The PDF extraction command, with `{input}` placeholders unexpanded.
    #[must_use]
    pub fn pdf_extractor(&self) -> &[String] {
        &self.pdf_extractor
    }

    /// Sets the lookback window. A window of zero disables the `NEEDS:` and
    /// elective-header scans.
    pub const fn set_lookback_lines(&mut self, lines: usize) {
        self.lookback_lines = lines;
    }

    /// Sets the range span limit.
    pub const fn set_max_range_span(&mut self, span: u32) {
        self.max_range_span = span;
    }

    /// Replaces the PDF extraction command.
    pub fn set_pdf_extractor(&mut self, command: Vec<String>) {
        self.pdf_extractor = command;
    }
}

const fn default_lookback_lines() -> usize {
    40
}

const fn default_needs_context_lines() -> usize {
    6
}

const fn default_max_range_span() -> u32 {
    100
}

fn default_pdf_extractor() -> Vec<String> {
    ["pdftotext", "-enc", "UTF-8", "{input}", "-"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_true() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_true")]
        skip_sci_tech_electives: bool,

        #[serde(default = "default_lookback_lines")]
        lookback_lines: usize,

        #[serde(default = "default_needs_context_lines")]
        needs_context_lines: usize,

        #[serde(default = "default_max_range_span")]
        max_range_span: u32,

        #[serde(default = "default_pdf_extractor")]
        pdf_extractor: Vec<String>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                skip_sci_tech_electives,
                lookback_lines,
                needs_context_lines,
                max_range_span,
                pdf_extractor,
            } => Self {
                skip_sci_tech_electives,
                lookback_lines,
                needs_context_lines,
                max_range_span,
                pdf_extractor,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            skip_sci_tech_electives: config.skip_sci_tech_electives,
            lookback_lines: config.lookback_lines,
            needs_context_lines: config.needs_context_lines,
            max_range_span: config.max_range_span,
            pdf_extractor: config.pdf_extractor,
        }
    }
}
