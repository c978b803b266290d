//! The history page, which lists every expense, and the endpoint for deleting expenses from it.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRefresh;
use maud::{Markup, html};
use rusqlite::Connection;
use time_tz::Tz;

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints::{self, format_endpoint},
    expense::{Expense, ExpenseId, delete_expense, get_all_expenses},
    html::{
        BUTTON_DELETE_STYLE, CARD_STYLE, CARD_TITLE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        base, format_currency, format_local_date,
    },
    navigation::NavBar,
    timezone::get_timezone,
};

/// The state needed for the history page and deleting expenses.
#[derive(Debug, Clone)]
pub struct HistoryState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Bangkok".
    pub local_timezone: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for HistoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the history page with every expense, newest first.
pub async fn get_history_page(State(state): State<HistoryState>) -> Result<Response, Error> {
    let timezone = get_timezone(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(state.local_timezone.clone()))?;

    let expenses = {
        let connection = state.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        get_all_expenses(&connection).inspect_err(|error| {
            tracing::error!("Could not get expenses for the history page: {error}");
        })?
    };

    let nav_bar = NavBar::new(endpoints::HISTORY_VIEW).into_html();
    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class=(CARD_STYLE)
            {
                h2 class=(CARD_TITLE_STYLE) { "History" }

                (expense_list_view(&expenses, timezone))
            }
        }
    };

    Ok(base("History", &content).into_response())
}

/// Delete an expense and tell htmx to reload the page.
pub async fn delete_expense_form_endpoint(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<HistoryState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_expense(expense_id, &connection) {
        Ok(()) => (
            HxRefresh(true),
            Alert::SuccessSimple {
                message: "Expense deleted".to_owned(),
            },
        )
            .into_response(),
        Err(Error::DeleteMissingExpense) => Error::DeleteMissingExpense.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting expense {expense_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

/// Render `expenses` as a list, in the order given.
///
/// Each expense shows its description, category, the date it was created in
/// `timezone` and its amount, followed by edit and delete actions.
pub fn expense_list_view(expenses: &[Expense], timezone: &Tz) -> Markup {
    if expenses.is_empty() {
        return html! {
            p class="empty-list text-gray-500 dark:text-gray-400" { "No expenses yet" }
        };
    }

    html! {
        ul class="divide-y divide-gray-200 dark:divide-gray-700"
        {
            @for expense in expenses {
                (expense_row_view(expense, timezone))
            }
        }
    }
}

fn expense_row_view(expense: &Expense, timezone: &Tz) -> Markup {
    let edit_url = format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id);
    let delete_url = format_endpoint(endpoints::EXPENSE, expense.id);
    let confirm_message = format!(
        "Are you sure you want to delete '{}'? This cannot be undone.",
        expense.description
    );

    html! {
        li class="expense flex items-center justify-between gap-4 py-3" data-expense-id=(expense.id)
        {
            div class="min-w-0"
            {
                p class="expense-description font-medium truncate" { (expense.description) }
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    span class="expense-category" { (expense.category) }
                    " · "
                    time
                        class="expense-date"
                        datetime=(format_local_date(expense.created_at, timezone))
                    {
                        (format_local_date(expense.created_at, timezone))
                    }
                }
            }

            div class="flex items-center gap-4 shrink-0"
            {
                span class="expense-amount font-semibold" { (format_currency(expense.amount)) }

                a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_url)
                    hx-confirm=(confirm_message)
                    hx-target-error="#alert-container"
                {
                    "Delete"
                }
            }
        }
    }
}
