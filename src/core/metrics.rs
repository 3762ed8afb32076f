use crate::core::duration::{months_between, parse_contract_date};
use crate::domain::model::{Contract, ContractCalculations, LineItem};
use chrono::{DateTime, Utc};

/// Sum of `quantity * unit_price` over all line items. Not rounded.
pub fn monthly_total(line_items: &[LineItem]) -> f64 {
    line_items.iter().map(LineItem::line_total).sum()
}

/// Derives the financial figures of `contract` as seen at `now`.
///
/// Total over its input: an unparseable start or end date yields
/// [`ContractCalculations::ZERO`], and an end date before the start simply
/// clamps the contract length to zero.
pub fn calculate_contract_metrics(contract: &Contract, now: DateTime<Utc>) -> ContractCalculations {
    let (Some(start), Some(end)) = (
        parse_contract_date(&contract.start_date),
        parse_contract_date(&contract.end_date),
    ) else {
        tracing::debug!(
            contract = %contract.id,
            start = %contract.start_date,
            end = %contract.end_date,
            "Unparseable contract dates, reporting zero metrics"
        );
        return ContractCalculations::ZERO;
    };

    let total_contract_length_months = months_between(start, end);

    let remaining_months = if end < now {
        0.0
    } else {
        months_between(now, end)
    };

    let monthly_total = monthly_total(&contract.line_items);

    ContractCalculations {
        total_contract_length_months,
        remaining_months,
        monthly_total,
        total_buyout: monthly_total * remaining_months,
    }
}
