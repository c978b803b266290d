//! Expense Tracker is a small web app for recording personal expenses.
//!
//! This library provides a JSON API for managing expense records, HTML views
//! that are served directly by the same router, and a typed HTTP client for
//! the JSON API.

#![warn(missing_docs)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use tokio::signal;

mod alert;
mod app_state;
pub mod client;
mod dashboard;
mod db;
pub mod endpoints;
mod error_page;
pub mod expense;
mod history;
mod html;
mod logging;
mod navigation;
mod routing;
mod settings;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use html::format_currency;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use timezone::get_local_offset;

use crate::{alert::Alert, error_page::ErrorPage};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The amount could not be interpreted as a finite number.
    ///
    /// Holds the text that was submitted.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Tried to update an expense that does not exist
    #[error("tried to update an expense that is not in the database")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::UpdateMissingExpense | Error::DeleteMissingExpense => {
                ErrorPage::NotFound.into_response()
            }
            Error::InvalidTimezoneError(timezone) => ErrorPage::InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => ErrorPage::INTERNAL_SERVER_ERROR.into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorPage::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// The JSON body sent with every failed API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// A short, human readable description of what went wrong.
    pub error: String,
}

/// A failed API response: a status code and an `{"error": ...}` body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// The HTTP status code to respond with.
    pub status: StatusCode,
    /// The message placed in the `error` field of the body.
    pub message: String,
}

impl ApiError {
    /// Create an API error with a 400 status code.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::NotFound | Error::UpdateMissingExpense => Alert::Error {
                message: "Could not update expense".to_owned(),
                details: "The expense could not be found.".to_owned(),
            }
            .into_response_with_status(StatusCode::NOT_FOUND),
            Error::DeleteMissingExpense => Alert::Error {
                message: "Could not delete expense".to_owned(),
                details: "The expense could not be found. \
                    Try refreshing the page to see if the expense has already been deleted."
                    .to_owned(),
            }
            .into_response_with_status(StatusCode::NOT_FOUND),
            _ => Alert::Error {
                message: "Something went wrong".to_owned(),
                details: "An unexpected error occurred, check the server logs for more details."
                    .to_owned(),
            }
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    /// Convert the error into a JSON API error.
    ///
    /// `failure_message` is used for errors that the client cannot fix,
    /// e.g. "Failed to create expense".
    fn into_api_error(self, failure_message: &str) -> ApiError {
        match self {
            Error::InvalidAmount(amount) => {
                ApiError::bad_request(format!("\"{amount}\" is not a valid amount"))
            }
            Error::NotFound | Error::UpdateMissingExpense | Error::DeleteMissingExpense => {
                ApiError {
                    status: StatusCode::NOT_FOUND,
                    message: "Expense not found".to_owned(),
                }
            }
            _ => ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: failure_message.to_owned(),
            },
        }
    }
}
