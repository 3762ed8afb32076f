use crate::domain::model::{ContractDraft, Document};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// Source of the evaluation instant. Read once per calculation by the caller.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Midnight UTC of the given day.
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Turns an uploaded document into a draft contract.
#[async_trait]
pub trait IntakeAdapter: Send + Sync {
    async fn extract(&self, document: &Document) -> Result<ContractDraft>;
}
