pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, IntakeMode};

pub use config::PortfolioConfig;
pub use core::intake::IntakeService;
pub use core::metrics::calculate_contract_metrics;
pub use core::store::{ContractStore, PortfolioSummary};
pub use domain::model::{Contract, ContractCalculations, ContractDraft, ContractId, LineItem};
pub use utils::error::{ContractError, Result};
