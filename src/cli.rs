use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::models::ConsentState;

#[derive(Parser, Debug)]
#[command(
    name = "privacy-checkr",
    about = "Scan privacy-policy text and audit cookie disclosure truthfulness",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Policy config file [default: ./.privacy-checkr/config.toml, fallback ~/.config/privacy-checkr/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, global = true, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Show full detail (every matched term / every classified cookie)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan policy text for collection, sharing, rights, security, and weasel language
    Analyze {
        /// Raw policy text to analyze
        #[arg(long)]
        text: Option<String>,

        /// Path to a text file containing the policy
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Cross-check observed cookie names against the policy's disclosure claims
    Audit {
        /// Raw policy text to check disclosures against
        #[arg(long)]
        text: Option<String>,

        /// Path to a text file containing the policy
        #[arg(long)]
        file: Option<PathBuf>,

        /// Observed cookie names, separated by newlines, commas, or semicolons
        #[arg(long)]
        cookies: Option<String>,

        /// Path to a file of observed cookie names
        #[arg(long)]
        cookies_file: Option<PathBuf>,

        /// Point in the consent lifecycle at which the cookies were observed
        #[arg(long, default_value = "before-consent")]
        consent: ConsentArg,
    },
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ConsentArg {
    BeforeConsent,
    AfterReject,
    AfterAccept,
}

impl From<&ConsentArg> for ConsentState {
    fn from(arg: &ConsentArg) -> Self {
        match arg {
            ConsentArg::BeforeConsent => ConsentState::BeforeConsent,
            ConsentArg::AfterReject => ConsentState::AfterReject,
            ConsentArg::AfterAccept => ConsentState::AfterAccept,
        }
    }
}

/// Resolve a literal/file input pair. The file wins when both are
/// given; supplying neither is a usage error named after the flags.
pub fn read_input(text: Option<String>, file: Option<&Path>, flags: &str) -> Result<String> {
    match (text, file) {
        (_, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        (Some(text), None) => Ok(text),
        (None, None) => bail!("Provide either {}", flags),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_input_prefers_file() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "from the file").unwrap();

        let content =
            read_input(Some("inline".to_string()), Some(f.path()), "--text or --file").unwrap();
        assert_eq!(content, "from the file");
    }

    #[test]
    fn test_read_input_falls_back_to_text() {
        let content = read_input(Some("inline".to_string()), None, "--text or --file").unwrap();
        assert_eq!(content, "inline");
    }

    #[test]
    fn test_read_input_requires_one_source() {
        let err = read_input(None, None, "--cookies or --cookies-file").unwrap_err();
        assert!(err.to_string().contains("--cookies"));
    }

    #[test]
    fn test_read_input_missing_file_is_fatal() {
        let err = read_input(None, Some(Path::new("/no/such/file.txt")), "--text or --file")
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
