//! Reading audit text from disk.
//!
//! Text files are read directly. PDFs are handed to the external command
//! configured in [`Config::pdf_extractor`], whose standard output is the
//! audit text.

use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use tracing::instrument;

use crate::domain::Config;

/// Placeholder replaced by the input path in extractor arguments.
const INPUT_PLACEHOLDER: &str = "{input}";

/// Errors obtaining audit text.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// The file that failed.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The PDF extractor could not be started.
    #[error("Failed to run PDF extractor '{program}': {source}")]
    ExtractorSpawn {
        /// The configured program.
        program: String,
        /// The underlying error.
        source: io::Error,
    },

    /// The PDF extractor ran but reported failure.
    #[error("PDF extractor '{program}' failed ({status}): {stderr}")]
    ExtractorFailed {
        /// The configured program.
        program: String,
        /// Its exit status.
        status: ExitStatus,
        /// What it wrote to standard error.
        stderr: String,
    },

    /// The configured extractor command is empty.
    #[error("No PDF extractor command is configured")]
    EmptyExtractorCommand,
}

/// Reads the audit text behind `path`.
///
/// Files with a `.pdf` extension (any case) go through the configured
/// extractor; anything else is read as UTF-8, with invalid bytes replaced.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if the extractor cannot
/// be started or exits unsuccessfully.
#[instrument(level = "debug", skip(config))]
pub fn read_audit_text(path: &Path, config: &Config) -> Result<String, SourceError> {
    if is_pdf(path) {
        extract_pdf(path, config.pdf_extractor())
    } else {
        let bytes = std::fs::read(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|extension| extension.eq_ignore_ascii_case("pdf"))
}

fn extract_pdf(path: &Path, command: &[String]) -> Result<String, SourceError> {
    let (program, args) = command
        .split_first()
        .ok_or(SourceError::EmptyExtractorCommand)?;
    let input = path.to_string_lossy();
    let args: Vec<String> = args
        .iter()
        .map(|arg| arg.replace(INPUT_PLACEHOLDER, &input))
        .collect();

    tracing::debug!("running {program} {}", args.join(" "));
    let output = Command::new(program)
        .args(&args)
        .output()
        .map_err(|source| SourceError::ExtractorSpawn {
            program: program.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(SourceError::ExtractorFailed {
            program: program.clone(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn config_with(command: &[&str]) -> Config {
        let mut config = Config::default();
        config.set_pdf_extractor(command.iter().map(ToString::to_string).collect());
        config
    }

    #[test]
    fn reads_text_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".txt").unwrap();
        file.write_all(b"UCLA UNITS\nFA23 COM SCI 31\n").unwrap();

        let text = read_audit_text(file.path(), &Config::default()).unwrap();
        assert_eq!(text, "UCLA UNITS\nFA23 COM SCI 31\n");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"MATH \xff31A").unwrap();

        let text = read_audit_text(file.path(), &Config::default()).unwrap();
        assert_eq!(text, "MATH \u{fffd}31A");
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let error = read_audit_text(&tmp.path().join("audit.txt"), &Config::default()).unwrap_err();
        assert!(matches!(error, SourceError::Read { .. }));
        assert!(error.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn pdf_detection_ignores_case() {
        assert!(is_pdf(Path::new("audit.PDF")));
        assert!(is_pdf(Path::new("dir/audit.pdf")));
        assert!(!is_pdf(Path::new("audit.pdf.txt")));
        assert!(!is_pdf(Path::new("audit")));
    }

    #[cfg(unix)]
    #[test]
    fn pdf_goes_through_extractor() {
        let mut file = tempfile::NamedTempFile::with_suffix(".pdf").unwrap();
        file.write_all(b"SELECT FROM: MATH 31A\n").unwrap();

        let text = read_audit_text(file.path(), &config_with(&["cat", "{input}"])).unwrap();
        assert_eq!(text, "SELECT FROM: MATH 31A\n");
    }

    #[cfg(unix)]
    #[test]
    fn failing_extractor_is_an_error() {
        let file = tempfile::NamedTempFile::with_suffix(".pdf").unwrap();
        let error = read_audit_text(file.path(), &config_with(&["false"])).unwrap_err();
        assert!(matches!(error, SourceError::ExtractorFailed { .. }));
    }

    #[test]
    fn missing_extractor_is_an_error() {
        let file = tempfile::NamedTempFile::with_suffix(".pdf").unwrap();
        let config = config_with(&["dars-no-such-extractor", "{input}"]);
        let error = read_audit_text(file.path(), &config).unwrap_err();
        assert!(matches!(error, SourceError::ExtractorSpawn { .. }));
    }

    #[test]
    fn empty_extractor_command() {
        let file = tempfile::NamedTempFile::with_suffix(".pdf").unwrap();
        let error = read_audit_text(file.path(), &config_with(&[])).unwrap_err();
        assert!(matches!(error, SourceError::EmptyExtractorCommand));
    }
}
