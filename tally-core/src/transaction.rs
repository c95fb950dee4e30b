//! Bank transaction types consumed by the classification engines

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Money in or money out
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Income => "income",
            Direction::Expense => "expense",
        }
    }

    /// Parse "income"/"expense" (case-insensitive, surrounding whitespace ignored)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "credit" | "in" => Some(Direction::Income),
            "expense" | "debit" | "out" => Some(Direction::Expense),
            _ => None,
        }
    }

    /// Direction implied by a signed amount (negative = expense)
    pub fn from_signed_amount(amount: f64) -> Self {
        if amount < 0.0 {
            Direction::Expense
        } else {
            Direction::Income
        }
    }
}

/// A single bank-statement line as handed to the classifiers.
///
/// Produced by the import layer; the engines only ever read it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    /// Raw bank-statement description
    pub description: String,
    /// Signed or unsigned magnitude, as the import layer supplied it
    pub amount: f64,
    pub date: NaiveDate,
    pub direction: Direction,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        direction: Direction,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            amount,
            date,
            direction,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.direction == Direction::Expense
    }

    pub fn is_income(&self) -> bool {
        self.direction == Direction::Income
    }

    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// A transaction together with the category currently booked against it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    #[serde(default)]
    pub category: Option<String>,
}

impl BookedTransaction {
    pub fn new(transaction: Transaction, category: Option<String>) -> Self {
        Self {
            transaction,
            category,
        }
    }

    /// True when no category is booked (absent, blank or "Uncategorised")
    pub fn is_uncategorised(&self) -> bool {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(c) => c.eq_ignore_ascii_case("uncategorised") || c.eq_ignore_ascii_case("uncategorized"),
        }
    }
}
