//! Database operations for expenses.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    expense::{Expense, ExpenseFields, ExpenseId},
};

/// Create an expense and return it with its generated ID.
///
/// `created_at` is stored as given and never changes afterwards.
pub fn create_expense(
    fields: &ExpenseFields,
    created_at: OffsetDateTime,
    connection: &Connection,
) -> Result<Expense, Error> {
    connection
        .prepare(
            "INSERT INTO expense (description, amount, category, created_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, description, amount, category, created_at;",
        )?
        .query_row(
            (
                &fields.description,
                fields.amount,
                &fields.category,
                created_at,
            ),
            map_row,
        )
        .map_err(Error::from)
}

/// Retrieve a single expense by ID.
///
/// # Errors
/// Returns [Error::NotFound] if `expense_id` does not refer to an expense.
pub fn get_expense(expense_id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, category, created_at FROM expense WHERE id = :id;",
        )?
        .query_row(&[(":id", &expense_id)], map_row)
        .map_err(Error::from)
}

/// Retrieve all expenses, most recently created first.
///
/// Expenses created at the same instant are ordered by ID, highest first.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, category, created_at FROM expense
             ORDER BY created_at DESC, id DESC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::from))
        .collect()
}

/// Replace the description, amount and category of an expense.
///
/// The ID and creation time are left unchanged.
///
/// # Errors
/// Returns [Error::UpdateMissingExpense] if the expense doesn't exist.
pub fn update_expense(
    expense_id: ExpenseId,
    fields: &ExpenseFields,
    connection: &Connection,
) -> Result<Expense, Error> {
    connection
        .prepare(
            "UPDATE expense SET description = ?1, amount = ?2, category = ?3
             WHERE id = ?4
             RETURNING id, description, amount, category, created_at;",
        )?
        .query_row(
            (
                &fields.description,
                fields.amount,
                &fields.category,
                expense_id,
            ),
            map_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingExpense,
            error => error.into(),
        })
}

/// Delete an expense by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingExpense] if the expense doesn't exist.
pub fn delete_expense(expense_id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = ?1", [expense_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

/// Initialize the expense table and indexes.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expense_created_at ON expense(created_at);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        created_at: row.get(4)?,
    })
}
