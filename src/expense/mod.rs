//! Expenses: the domain types, how they are stored and the JSON API that manages them.

mod api;
mod db;
mod domain;

pub use api::{
    ExpenseApiState, create_expense_endpoint, delete_expense_endpoint, list_expenses_endpoint,
    update_expense_endpoint,
};
pub use db::{
    create_expense, create_expense_table, delete_expense, get_all_expenses, get_expense,
    update_expense,
};
pub use domain::{
    AmountInput, Category, DeleteConfirmation, Expense, ExpenseFields, ExpenseId, ExpenseRequest,
    parse_amount, total_amount,
};
