use crate::utils::error::Result;
use crate::utils::validation::{validate_iso_date, validate_path, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IntakeMode {
    /// Simulated extraction returning a sample draft
    #[default]
    Placeholder,
    /// Documents are pre-extracted JSON drafts
    Json,
    /// No extraction backend; every upload fails
    Unavailable,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "contract-buyout")]
#[command(about = "Computes the cost of buying out the remaining term of service contracts")]
pub struct CliConfig {
    /// TOML portfolio file with settings and contracts
    #[arg(short, long)]
    pub portfolio: Option<String>,

    /// Evaluation date (YYYY-MM-DD); overrides the portfolio setting
    #[arg(long)]
    pub as_of: Option<String>,

    /// Documents to add through intake (repeatable)
    #[arg(long = "intake")]
    pub intake_files: Vec<String>,

    #[arg(long, value_enum, default_value_t = IntakeMode::Placeholder)]
    pub intake_mode: IntakeMode,

    /// Append N blank contracts, as with manual entry
    #[arg(long, default_value = "0")]
    pub blank: usize,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.portfolio {
            validate_path("portfolio", path)?;
        }
        if let Some(as_of) = &self.as_of {
            validate_iso_date("as_of", as_of)?;
        }
        for file in &self.intake_files {
            validate_path("intake", file)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let config = CliConfig::parse_from([
            "contract-buyout",
            "--portfolio",
            "book.toml",
            "--as-of",
            "2024-07-01",
            "--intake",
            "a.pdf",
            "--intake",
            "b.json",
            "--intake-mode",
            "json",
        ]);

        assert_eq!(config.portfolio.as_deref(), Some("book.toml"));
        assert_eq!(config.intake_files, vec!["a.pdf", "b.json"]);
        assert_eq!(config.intake_mode, IntakeMode::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_as_of_fails_validation() {
        let config = CliConfig::parse_from(["contract-buyout", "--as-of", "tomorrow"]);
        assert!(config.validate().is_err());
    }
}
