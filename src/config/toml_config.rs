use crate::core::store::ContractStore;
use crate::domain::model::ContractDraft;
use crate::utils::error::{ContractError, Result};
use crate::utils::validation::{validate_iso_date, validate_range, Validate};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A portfolio file: evaluation settings plus the contracts to price.
///
/// ```toml
/// [settings]
/// as_of = "2024-07-01"
///
/// [[contracts]]
/// name = "Fleet telematics"
/// start_date = "2024-01-01"
/// end_date = "2025-01-01"
///
/// [[contracts.line_items]]
/// product_name = "Vehicle Gateway"
/// quantity = 2
/// unit_price = 500.0
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub contracts: Vec<ContractDraft>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Evaluation date, `YYYY-MM-DD`. Defaults to today.
    pub as_of: Option<String>,
    /// Simulated delay of the placeholder intake adapter.
    pub intake_delay_ms: Option<u64>,
}

const MAX_INTAKE_DELAY_MS: u64 = 60_000;
const DEFAULT_INTAKE_DELAY_MS: u64 = 1_000;

impl PortfolioConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ContractError::ConfigParseError {
            message: e.to_string(),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ContractError::ConfigParseError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn as_of(&self) -> Result<Option<NaiveDate>> {
        self.settings
            .as_of
            .as_deref()
            .map(|value| validate_iso_date("settings.as_of", value))
            .transpose()
    }

    pub fn intake_delay_ms(&self) -> u64 {
        self.settings.intake_delay_ms.unwrap_or(DEFAULT_INTAKE_DELAY_MS)
    }

    /// Builds a store holding every configured contract, in file order.
    pub fn into_store(self) -> ContractStore {
        let mut store = ContractStore::new();
        for draft in self.contracts {
            store.insert_draft(draft);
        }
        store
    }
}

impl Validate for PortfolioConfig {
    // Contract dates are deliberately not checked here; a bad date prices
    // that contract at zero instead of rejecting the whole file.
    fn validate(&self) -> Result<()> {
        self.as_of()?;

        if let Some(delay) = self.settings.intake_delay_ms {
            validate_range("settings.intake_delay_ms", delay, 0, MAX_INTAKE_DELAY_MS)?;
        }

        Ok(())
    }
}
