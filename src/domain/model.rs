use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(Uuid);

impl ContractId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContractId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(Uuid);

impl LineItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LineItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One priced product entry of a contract.
///
/// Quantities and prices are not range-checked: negative values flow
/// through the arithmetic unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: LineItemId,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(product_name: impl Into<String>, quantity: i64, unit_price: f64) -> Self {
        Self {
            id: LineItemId::new(),
            product_name: product_name.into(),
            quantity,
            unit_price,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

impl Default for LineItem {
    fn default() -> Self {
        Self::new("", 1, 0.0)
    }
}

/// A service contract as entered by the user or produced by intake.
///
/// Dates hold the raw `YYYY-MM-DD` text; they are parsed only when metrics
/// are derived, so an unparseable date degrades to zero metrics instead of
/// being rejected at entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: ContractId,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub line_items: Vec<LineItem>,
}

impl Contract {
    pub fn new(
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        line_items: Vec<LineItem>,
    ) -> Self {
        Self {
            id: ContractId::new(),
            name: name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            line_items,
        }
    }
}

/// Figures derived from a contract at one evaluation instant. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCalculations {
    pub total_contract_length_months: f64,
    pub remaining_months: f64,
    pub monthly_total: f64,
    pub total_buyout: f64,
}

impl ContractCalculations {
    pub const ZERO: Self = Self {
        total_contract_length_months: 0.0,
        remaining_months: 0.0,
        monthly_total: 0.0,
        total_buyout: 0.0,
    };
}

impl Default for ContractCalculations {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Line item as delivered by an intake adapter, before ids are assigned.
///
/// Reads both the camelCase JSON wire shape and snake_case TOML keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDraft {
    #[serde(default, alias = "product_name")]
    pub product_name: String,
    #[serde(default = "default_quantity", deserialize_with = "deserialize_quantity")]
    pub quantity: i64,
    #[serde(default, alias = "unit_price")]
    pub unit_price: f64,
}

fn default_quantity() -> i64 {
    1
}

/// Accepts integers and whole-number floats (`2`, `2.0`). Fractional
/// quantities are rejected rather than truncated.
fn deserialize_quantity<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct QuantityVisitor;

    impl<'de> Visitor<'de> for QuantityVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a whole-number quantity")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<i64, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<i64, E> {
            // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
            if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                Ok(v as i64)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(QuantityVisitor)
}

/// Contract record as delivered by an intake adapter or a portfolio file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDraft {
    pub name: String,
    #[serde(alias = "start_date")]
    pub start_date: String,
    #[serde(alias = "end_date")]
    pub end_date: String,
    #[serde(default, alias = "line_items")]
    pub line_items: Vec<LineItemDraft>,
}

impl ContractDraft {
    pub fn into_contract(self) -> Contract {
        let line_items = self
            .line_items
            .into_iter()
            .map(|item| LineItem::new(item.product_name, item.quantity, item.unit_price))
            .collect();
        Contract::new(self.name, self.start_date, self.end_date, line_items)
    }
}

/// Upload state surfaced to the user while intake runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Processing,
    Success,
    Error,
}

/// An uploaded document handed to an intake adapter.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}
