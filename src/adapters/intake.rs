use crate::domain::model::{ContractDraft, Document, LineItemDraft};
use crate::domain::ports::{Clock, IntakeAdapter, SystemClock};
use crate::utils::error::{ContractError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Stands in for a real extraction service: waits, then returns a sample
/// draft named after the uploaded file and dated today.
pub struct PlaceholderIntake<C: Clock = SystemClock> {
    delay: Duration,
    clock: C,
}

impl PlaceholderIntake<SystemClock> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> PlaceholderIntake<C> {
    pub fn with_clock(delay: Duration, clock: C) -> Self {
        Self { delay, clock }
    }
}

#[async_trait]
impl<C: Clock> IntakeAdapter for PlaceholderIntake<C> {
    async fn extract(&self, document: &Document) -> Result<ContractDraft> {
        let delay_ms = self.delay.as_millis() as u64;
        tracing::debug!(file = %document.file_name, delay_ms, "Simulating extraction");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let today = self.clock.today().format("%Y-%m-%d").to_string();
        Ok(ContractDraft {
            name: document.file_name.clone(),
            start_date: today.clone(),
            end_date: today,
            line_items: vec![LineItemDraft {
                product_name: "Sample Product".to_string(),
                quantity: 1,
                unit_price: 100.0,
            }],
        })
    }
}

/// Intake with no extraction backend configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableIntake;

#[async_trait]
impl IntakeAdapter for UnavailableIntake {
    async fn extract(&self, _document: &Document) -> Result<ContractDraft> {
        Err(ContractError::IntakeFailed {
            message: "Could not extract data.".to_string(),
        })
    }
}

/// Reads a draft that was already extracted elsewhere and saved as JSON
/// (`name`, `startDate`, `endDate`, `lineItems`).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDraftIntake;

#[async_trait]
impl IntakeAdapter for JsonDraftIntake {
    async fn extract(&self, document: &Document) -> Result<ContractDraft> {
        serde_json::from_slice(&document.bytes).map_err(|e| ContractError::IntakeFailed {
            message: format!("{} does not contain a contract draft: {}", document.file_name, e),
        })
    }
}
