//! JSON API route handlers for listing, creating, updating and deleting expenses.
//!
//! Every failure responds with a JSON body of the form `{"error": "..."}`.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{
        FromRef, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    ApiError, AppState, Error,
    expense::{
        DeleteConfirmation, ExpenseId, ExpenseRequest, create_expense, delete_expense,
        get_all_expenses, update_expense,
    },
};

/// The state needed by the expense API.
#[derive(Debug, Clone)]
pub struct ExpenseApiState {
    /// The connection to the expense database.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every expense, most recently created first.
pub async fn list_expenses_endpoint(State(state): State<ExpenseApiState>) -> Response {
    const FAILURE: &str = "Failed to fetch expenses";

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_error(FAILURE).into_response();
        }
    };

    match get_all_expenses(&connection) {
        Ok(expenses) => Json(expenses).into_response(),
        Err(error) => {
            tracing::error!("Error fetching expenses: {error}");
            error.into_api_error(FAILURE).into_response()
        }
    }
}

/// Create an expense from a JSON body and respond with the stored expense.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseApiState>,
    body: Result<Json<ExpenseRequest>, JsonRejection>,
) -> Response {
    const FAILURE: &str = "Failed to create expense";

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(rejection),
    };

    let fields = match request.into_fields() {
        Ok(fields) => fields,
        Err(error) => return error.into_api_error(FAILURE).into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_error(FAILURE).into_response();
        }
    };

    match create_expense(&fields, OffsetDateTime::now_utc(), &connection) {
        Ok(expense) => Json(expense).into_response(),
        Err(error) => {
            tracing::error!("Error creating expense {fields:?}: {error}");
            error.into_api_error(FAILURE).into_response()
        }
    }
}

/// Replace the description, amount and category of an expense.
pub async fn update_expense_endpoint(
    State(state): State<ExpenseApiState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
    body: Result<Json<ExpenseRequest>, JsonRejection>,
) -> Response {
    const FAILURE: &str = "Failed to update expense";

    let expense_id = match expense_id {
        Ok(Path(expense_id)) => expense_id,
        Err(rejection) => return path_rejection_response(rejection),
    };

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(rejection),
    };

    let fields = match request.into_fields() {
        Ok(fields) => fields,
        Err(error) => return error.into_api_error(FAILURE).into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_error(FAILURE).into_response();
        }
    };

    match update_expense(expense_id, &fields, &connection) {
        Ok(expense) => Json(expense).into_response(),
        Err(error) => {
            tracing::error!("Error updating expense {expense_id}: {error}");
            error.into_api_error(FAILURE).into_response()
        }
    }
}

/// Delete an expense and respond with a confirmation message.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseApiState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Response {
    const FAILURE: &str = "Failed to delete expense";

    let expense_id = match expense_id {
        Ok(Path(expense_id)) => expense_id,
        Err(rejection) => return path_rejection_response(rejection),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_error(FAILURE).into_response();
        }
    };

    match delete_expense(expense_id, &connection) {
        Ok(()) => Json(DeleteConfirmation {
            message: "Expense deleted successfully".to_owned(),
        })
        .into_response(),
        Err(error) => {
            tracing::error!("Error deleting expense {expense_id}: {error}");
            error.into_api_error(FAILURE).into_response()
        }
    }
}

fn json_rejection_response(rejection: JsonRejection) -> Response {
    tracing::debug!("rejected expense request body: {rejection}");
    ApiError::bad_request(rejection.body_text()).into_response()
}

fn path_rejection_response(rejection: PathRejection) -> Response {
    tracing::debug!("rejected expense ID: {rejection}");
    ApiError::bad_request(rejection.body_text()).into_response()
}
