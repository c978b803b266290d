//! Core expense domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Generated by the database when the expense is created.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub description: String,
    /// How much was spent.
    pub amount: f64,
    /// Usually one of the [Category] names, but any text is stored as given.
    pub category: String,
    /// When the expense was created, in UTC. Never changes after creation.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The fields of an expense that may be replaced by an update.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFields {
    #[allow(missing_docs)]
    pub description: String,
    /// Must be finite.
    pub amount: f64,
    #[allow(missing_docs)]
    pub category: String,
}

/// An amount as sent by a client: either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, e.g. `120.5`.
    Number(f64),
    /// A numeric string, e.g. `"120.50"`.
    Text(String),
}

impl AmountInput {
    /// Coerce the input into a finite number.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the text is not a number, or the number is NaN or infinite.
    pub fn to_amount(&self) -> Result<f64, Error> {
        match self {
            AmountInput::Number(number) if number.is_finite() => Ok(*number),
            AmountInput::Number(number) => Err(Error::InvalidAmount(number.to_string())),
            AmountInput::Text(text) => parse_amount(text),
        }
    }
}

/// Parse user entered text as an amount, ignoring surrounding whitespace.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `text` is not a finite number.
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| Error::InvalidAmount(text.to_owned()))
}

/// The request body for creating or updating an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ExpenseRequest {
    pub description: String,
    pub amount: AmountInput,
    pub category: String,
}

impl ExpenseRequest {
    /// Coerce the request into the fields stored in the database.
    ///
    /// Only the amount is checked. The description and category are kept as given.
    pub fn into_fields(self) -> Result<ExpenseFields, Error> {
        let amount = self.amount.to_amount()?;

        Ok(ExpenseFields {
            description: self.description,
            amount,
            category: self.category,
        })
    }
}

/// The body of a successful delete response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    /// E.g. "Expense deleted successfully".
    pub message: String,
}

/// The categories offered when entering an expense.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Food,
    Transport,
    Utilities,
    Entertainment,
    Other,
}

impl Category {
    /// Every category, in the order they are shown to the user.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Utilities,
        Category::Entertainment,
        Category::Other,
    ];

    /// The value stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }

    /// The text shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities & bills",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }

    /// Find the category with the stored value `name`, if there is one.
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The sum of the amounts of `expenses`.
pub fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}
