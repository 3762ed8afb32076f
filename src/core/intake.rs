use crate::core::store::ContractStore;
use crate::domain::model::{ContractId, Document, ProcessingStatus};
use crate::domain::ports::IntakeAdapter;
use crate::utils::error::{ContractError, Result};
use crate::utils::validation::{validate_file_extension, ACCEPTED_DOCUMENT_EXTENSIONS};
use std::time::Duration;

/// How long a presentation layer keeps showing a finished upload's status
/// before calling [`IntakeService::reset`].
pub const STATUS_RESET_AFTER: Duration = Duration::from_secs(3);

const FALLBACK_FAILURE_MESSAGE: &str = "Failed to analyze contract. Ensure file is readable.";

/// Rejects uploads whose extension is not an accepted document format.
fn check_document_type(document: &Document) -> Result<()> {
    validate_file_extension("document", &document.file_name, ACCEPTED_DOCUMENT_EXTENSIONS)
        .map_err(|_| ContractError::IntakeFailed {
            message: format!(
                "{} is not a supported document. Upload one of: {}",
                document.file_name,
                ACCEPTED_DOCUMENT_EXTENSIONS.join(", ")
            ),
        })
}

/// Runs uploaded documents through an [`IntakeAdapter`] and appends the
/// resulting drafts to a [`ContractStore`].
///
/// One attempt per upload: no retries, no timeout. A failure leaves the
/// store untouched and keeps the message for display.
pub struct IntakeService<A: IntakeAdapter> {
    adapter: A,
    status: ProcessingStatus,
    last_error: Option<String>,
}

impl<A: IntakeAdapter> IntakeService<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            status: ProcessingStatus::Idle,
            last_error: None,
        }
    }

    pub fn status(&self) -> ProcessingStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.status == ProcessingStatus::Processing
    }

    pub fn reset(&mut self) {
        self.status = ProcessingStatus::Idle;
    }

    pub async fn ingest(
        &mut self,
        store: &mut ContractStore,
        document: &Document,
    ) -> Result<ContractId> {
        self.status = ProcessingStatus::Processing;
        self.last_error = None;
        tracing::info!(file = %document.file_name, "Analyzing contract document");

        let outcome = match check_document_type(document) {
            Ok(()) => self.adapter.extract(document).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(draft) => {
                let id = store.insert_draft(draft);
                self.status = ProcessingStatus::Success;
                tracing::info!(file = %document.file_name, contract = %id, "Contract extracted");
                Ok(id)
            }
            Err(e) => {
                let message = match &e {
                    ContractError::IntakeFailed { message } if !message.is_empty() => {
                        message.clone()
                    }
                    ContractError::IntakeFailed { .. } => {
                        FALLBACK_FAILURE_MESSAGE.to_string()
                    }
                    other => other.user_friendly_message(),
                };
                tracing::warn!(file = %document.file_name, error = %e, "Contract intake failed");
                self.status = ProcessingStatus::Error;
                self.last_error = Some(message);
                Err(e)
            }
        }
    }
}
