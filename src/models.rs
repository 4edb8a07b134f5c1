use std::collections::BTreeMap;
use std::fmt;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::currency::{amount_or_zero, RawAmount};

pub const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// The period every page fetches data for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Filter {
    pub year: i32,
    pub month: u32,
}

impl Filter {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::new(today.year(), today.month())
    }

    pub fn with_month(self, month: u32) -> Self {
        Self::new(self.year, month)
    }

    pub fn with_year(self, year: i32) -> Self {
        Self::new(year, self.month)
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Years offered by the navbar: two back and two ahead of `anchor`.
    pub fn selectable_years(anchor: i32) -> Vec<i32> {
        (anchor - 2..=anchor + 2).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ExpenseRecord {
    #[serde(default, alias = "uuid")]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub datetime: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub amount: Option<RawAmount>,
}

impl ExpenseRecord {
    pub fn amount_value(&self) -> f64 {
        amount_or_zero(self.amount.as_ref())
    }

    pub fn key(&self) -> Option<String> {
        match &self.id {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ExpenseSummary {
    #[serde(default)]
    pub total: Option<RawAmount>,
    #[serde(default)]
    pub total_by_expense_type: BTreeMap<String, Option<RawAmount>>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

impl ExpenseSummary {
    pub fn total_value(&self) -> f64 {
        amount_or_zero(self.total.as_ref())
    }

    pub fn categories(&self) -> Vec<CategoryTotal> {
        self.total_by_expense_type
            .iter()
            .map(|(name, value)| CategoryTotal {
                name: name.clone(),
                value: amount_or_zero(value.as_ref()),
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ExpensesResponse {
    #[serde(default)]
    pub expenses: ExpenseSummary,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct IncomeSummary {
    #[serde(default)]
    pub total_ars: Option<RawAmount>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct IncomeResponse {
    #[serde(default)]
    pub income: IncomeSummary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardNetwork {
    Visa,
    Mastercard,
}

impl CardNetwork {
    pub const ALL: [CardNetwork; 2] = [CardNetwork::Visa, CardNetwork::Mastercard];

    pub fn slug(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "visa",
            CardNetwork::Mastercard => "mastercard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "Visa",
            CardNetwork::Mastercard => "Mastercard",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.to_ascii_lowercase().as_str() {
            "visa" => Some(CardNetwork::Visa),
            "mastercard" => Some(CardNetwork::Mastercard),
            _ => None,
        }
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Which statements `/getResumeExpenses` should return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardScope {
    All,
    Network(CardNetwork),
}

impl CardScope {
    pub fn path_segment(&self) -> &'static str {
        match self {
            CardScope::All => "all",
            CardScope::Network(network) => network.slug(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CardExpense {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub descriptions: String,
    #[serde(default)]
    pub amount_pesos: Option<RawAmount>,
    #[serde(default)]
    pub amount_usd: Option<RawAmount>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CardHolder {
    #[serde(default)]
    pub holder: String,
    #[serde(default)]
    pub total_ars: Option<RawAmount>,
    #[serde(default)]
    pub total_usd: Option<RawAmount>,
    #[serde(default)]
    pub expenses: Vec<CardExpense>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub holders: Vec<CardHolder>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CardStatement {
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl CardStatement {
    /// Sum of every holder's `total_ars` across all cards.
    pub fn total_ars(&self) -> f64 {
        self.cards
            .iter()
            .flat_map(|card| card.holders.iter())
            .map(|holder| amount_or_zero(holder.total_ars.as_ref()))
            .sum()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SyncResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_clamps_month() {
        assert_eq!(Filter::new(2025, 0).month, 1);
        assert_eq!(Filter::new(2025, 13).month, 12);
        assert_eq!(Filter::new(2025, 6).with_month(2).month_name(), "febrero");
        assert_eq!(Filter::new(2025, 6).with_year(2024).year, 2024);
    }

    #[test]
    fn selectable_years_surround_the_anchor() {
        assert_eq!(
            Filter::selectable_years(2025),
            vec![2023, 2024, 2025, 2026, 2027]
        );
    }

    #[test]
    fn decodes_expenses_payload() {
        let payload = json!({
            "expenses": {
                "total": "1.500,00",
                "total_by_expense_type": { "Servicios": "1.000,00", "Delivery": "500,00" },
                "expenses": [
                    {
                        "uuid": "abc-1",
                        "datetime": "2025-06-01T10:00:00",
                        "description": "Luz",
                        "type": "Servicios",
                        "amount": "1.000,00"
                    }
                ]
            }
        });

        let decoded: ExpensesResponse = serde_json::from_value(payload).unwrap();

        assert_eq!(decoded.expenses.total_value(), 1500.0);
        assert_eq!(decoded.expenses.categories().len(), 2);
        let record = &decoded.expenses.expenses[0];
        assert_eq!(record.key().as_deref(), Some("abc-1"));
        assert_eq!(record.kind, "Servicios");
        assert_eq!(record.amount_value(), 1000.0);
    }

    #[test]
    fn missing_sections_decode_as_empty() {
        let expenses: ExpensesResponse = serde_json::from_value(json!({})).unwrap();
        let income: IncomeResponse = serde_json::from_value(json!({ "income": {} })).unwrap();
        let cards: CardStatement = serde_json::from_value(json!({ "cards": [{}] })).unwrap();

        assert_eq!(expenses.expenses.total_value(), 0.0);
        assert!(expenses.expenses.categories().is_empty());
        assert_eq!(amount_or_zero(income.income.total_ars.as_ref()), 0.0);
        assert_eq!(cards.total_ars(), 0.0);
    }

    #[test]
    fn statement_total_sums_every_holder() {
        let statement: CardStatement = serde_json::from_value(json!({
            "cards": [
                { "holders": [ { "holder": "Ana", "total_ars": "1.000,00" }, { "holder": "Luis", "total_ars": "250,50" } ] },
                { "holders": [ { "holder": "Ana", "total_ars": null } ] }
            ]
        }))
        .unwrap();

        assert_eq!(statement.total_ars(), 1250.5);
    }

    #[test]
    fn card_networks_round_trip_slugs() {
        for network in CardNetwork::ALL {
            assert_eq!(CardNetwork::from_slug(network.slug()), Some(network));
        }
        assert_eq!(CardNetwork::from_slug("VISA"), Some(CardNetwork::Visa));
        assert_eq!(CardNetwork::from_slug("amex"), None);
        assert_eq!(CardScope::All.path_segment(), "all");
    }
}
