pub mod duration;
pub mod intake;
pub mod metrics;
pub mod store;

pub use crate::domain::model::{Contract, ContractCalculations, ContractDraft, ContractId, LineItem};
pub use crate::domain::ports::{Clock, IntakeAdapter};
pub use crate::utils::error::Result;
