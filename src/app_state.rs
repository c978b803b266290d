//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, timezone::get_timezone};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Bangkok".
    pub local_timezone: String,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Bangkok".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the timezone is not recognised.
    pub fn new(db_connection: Connection, local_timezone: &str) -> Result<Self, Error> {
        if get_timezone(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        initialize(&db_connection)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{AppState, Error};

    #[test]
    fn new_initializes_database() {
        let connection = Connection::open_in_memory().unwrap();

        let state = AppState::new(connection, "Etc/UTC").expect("Could not create app state");

        let connection = state.db_connection.lock().unwrap();
        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM expense", [], |row| row.get(0))
            .expect("expense table should exist");
        assert_eq!(count, 0);
    }

    #[test]
    fn new_rejects_unknown_timezone() {
        let connection = Connection::open_in_memory().unwrap();

        let result = AppState::new(connection, "Not/AZone");

        assert_eq!(
            result.err(),
            Some(Error::InvalidTimezoneError("Not/AZone".to_owned()))
        );
    }
}
