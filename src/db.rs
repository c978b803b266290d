/*! Database set up for the application's SQLite database. */

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, expense::create_expense_table};

/// Create the tables for all domain models.
///
/// The tables are created inside a single exclusive transaction, so either
/// every table exists afterwards or none of them were created.
/// Calling this function on an already initialized database is a no-op.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
