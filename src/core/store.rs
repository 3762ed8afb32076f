use crate::core::metrics::calculate_contract_metrics;
use crate::domain::model::{Contract, ContractCalculations, ContractDraft, ContractId, LineItem};
use crate::utils::error::{ContractError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// One row of a [`PortfolioSummary`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSummary {
    pub id: ContractId,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub metrics: ContractCalculations,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub evaluated_at: DateTime<Utc>,
    pub contracts: Vec<ContractSummary>,
    pub grand_total: f64,
}

/// Ordered, in-memory collection of the contracts of one session.
///
/// Generated names come from a counter that only ever grows, so deleting a
/// contract never lets a later one reuse its name. Numbers whose name is
/// already held by an inserted contract are skipped.
#[derive(Debug, Default)]
pub struct ContractStore {
    contracts: Vec<Contract>,
    names_issued: usize,
}

impl ContractStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn get(&self, id: ContractId) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.id == id)
    }

    fn position(&self, id: ContractId) -> Result<usize> {
        self.contracts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ContractError::ContractNotFound { id: id.to_string() })
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.contracts.len() {
            return Err(ContractError::IndexOutOfRange {
                index,
                len: self.contracts.len(),
            });
        }
        Ok(())
    }

    fn next_name(&mut self) -> String {
        loop {
            self.names_issued += 1;
            let name = format!("Contract {}", self.names_issued);
            if !self.contracts.iter().any(|c| c.name == name) {
                return name;
            }
        }
    }

    /// Appends a blank contract running from `today` to `today` with one
    /// default line item.
    pub fn create_empty(&mut self, today: NaiveDate) -> ContractId {
        let date = today.format("%Y-%m-%d").to_string();
        let name = self.next_name();
        let contract = Contract::new(name, date.clone(), date, vec![LineItem::default()]);
        let id = contract.id;

        tracing::debug!(contract = %id, name = %contract.name, "Created empty contract");
        self.contracts.push(contract);
        id
    }

    /// Appends a fully formed contract.
    pub fn insert(&mut self, contract: Contract) -> ContractId {
        let id = contract.id;
        tracing::debug!(contract = %id, name = %contract.name, "Added contract");
        self.contracts.push(contract);
        id
    }

    /// Appends a contract produced by intake.
    pub fn insert_draft(&mut self, draft: ContractDraft) -> ContractId {
        self.insert(draft.into_contract())
    }

    /// Replaces the whole contract at `index`.
    pub fn update_at(&mut self, index: usize, contract: Contract) -> Result<()> {
        self.check_index(index)?;
        self.contracts[index] = contract;
        Ok(())
    }

    /// Removes the contract at `index`; later contracts shift left.
    pub fn delete_at(&mut self, index: usize) -> Result<Contract> {
        self.check_index(index)?;
        Ok(self.contracts.remove(index))
    }

    /// Replaces the stored contract carrying the same id as `contract`.
    pub fn update(&mut self, contract: Contract) -> Result<()> {
        let index = self.position(contract.id)?;
        self.contracts[index] = contract;
        Ok(())
    }

    pub fn delete(&mut self, id: ContractId) -> Result<Contract> {
        let index = self.position(id)?;
        Ok(self.contracts.remove(index))
    }

    /// Metrics of every contract, in collection order.
    pub fn metrics(&self, now: DateTime<Utc>) -> Vec<(ContractId, ContractCalculations)> {
        self.contracts
            .iter()
            .map(|c| (c.id, calculate_contract_metrics(c, now)))
            .collect()
    }

    /// Sum of every contract's buyout, accumulated in collection order.
    pub fn grand_total(&self, now: DateTime<Utc>) -> f64 {
        self.contracts
            .iter()
            .fold(0.0, |acc, c| acc + calculate_contract_metrics(c, now).total_buyout)
    }

    pub fn summary(&self, now: DateTime<Utc>) -> PortfolioSummary {
        let contracts: Vec<ContractSummary> = self
            .contracts
            .iter()
            .map(|c| ContractSummary {
                id: c.id,
                name: c.name.clone(),
                start_date: c.start_date.clone(),
                end_date: c.end_date.clone(),
                metrics: calculate_contract_metrics(c, now),
            })
            .collect();
        let grand_total = contracts
            .iter()
            .fold(0.0, |acc, row| acc + row.metrics.total_buyout);

        PortfolioSummary {
            evaluated_at: now,
            contracts,
            grand_total,
        }
    }
}
