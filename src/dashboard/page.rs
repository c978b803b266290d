//! The dashboard page: summary cards, the expense form and the most recent expenses.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time_tz::Tz;

use crate::{
    AppState, Error,
    dashboard::form::{ExpenseFormState, expense_form_view},
    endpoints,
    expense::{Expense, ExpenseId, get_all_expenses, get_expense, total_amount},
    history::expense_list_view,
    html::{CARD_STYLE, CARD_TITLE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, format_currency},
    navigation::NavBar,
    timezone::get_timezone,
};

/// How many expenses are listed under "Recent expenses".
const RECENT_EXPENSE_COUNT: usize = 5;

/// The state needed for the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardPageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Bangkok".
    pub local_timezone: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Everything the dashboard shows, built fresh for each request.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// Every expense, newest first.
    pub expenses: Vec<Expense>,
    pub form: ExpenseFormState,
}

impl DashboardState {
    pub fn total(&self) -> f64 {
        total_amount(&self.expenses)
    }

    pub fn count(&self) -> usize {
        self.expenses.len()
    }

    pub fn recent_expenses(&self) -> &[Expense] {
        let end = self.expenses.len().min(RECENT_EXPENSE_COUNT);
        &self.expenses[..end]
    }
}

/// Display the dashboard with an empty expense form.
pub async fn get_dashboard_page(State(state): State<DashboardPageState>) -> Response {
    render_dashboard(&state, |_| Ok(ExpenseFormState::default()))
}

/// Display the dashboard with the expense form filled in from an existing expense.
///
/// Responds with the 404 page if the expense does not exist.
pub async fn get_edit_expense_page(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<DashboardPageState>,
) -> Response {
    render_dashboard(&state, |connection| {
        get_expense(expense_id, connection)
            .map(|expense| ExpenseFormState::for_expense(&expense))
    })
}

fn render_dashboard<F>(state: &DashboardPageState, get_form: F) -> Response
where
    F: FnOnce(&Connection) -> Result<ExpenseFormState, Error>,
{
    let Some(timezone) = get_timezone(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone.clone()).into_response();
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let form = match get_form(&connection) {
        Ok(form) => form,
        Err(error) => {
            tracing::debug!("Could not load the expense form: {error}");
            return error.into_response();
        }
    };

    let expenses = match get_all_expenses(&connection) {
        Ok(expenses) => expenses,
        Err(error) => {
            tracing::error!("Could not get expenses for the dashboard: {error}");
            return error.into_response();
        }
    };

    let dashboard = DashboardState { expenses, form };

    base("Dashboard", &dashboard_view(&dashboard, timezone)).into_response()
}

fn stat_card(id: &str, title: &str, value: &str) -> Markup {
    html! {
        div class=(CARD_STYLE) id=(id)
        {
            h3 class="text-sm font-medium text-gray-500 dark:text-gray-400" { (title) }
            p class="stat-value mt-2 text-3xl font-bold" { (value) }
        }
    }
}

fn dashboard_view(dashboard: &DashboardState, timezone: &Tz) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="grid w-full grid-cols-1 gap-4 sm:grid-cols-2"
            {
                (stat_card("total-card", "Total spent", &format_currency(dashboard.total())))
                (stat_card("count-card", "Expenses", &dashboard.count().to_string()))
            }

            (expense_form_view(&dashboard.form))

            section class=(CARD_STYLE)
            {
                div class="flex items-center justify-between"
                {
                    h2 class=(CARD_TITLE_STYLE) { "Recent expenses" }
                    a href=(endpoints::HISTORY_VIEW) class=(LINK_STYLE) { "View all" }
                }

                (expense_list_view(dashboard.recent_expenses(), timezone))
            }
        }
    }
}

#[cfg(test)]
mod dashboard_state_tests {
    use time::macros::datetime;

    use crate::{
        dashboard::{DashboardState, ExpenseFormState},
        expense::Expense,
    };

    fn expenses(amounts: &[f64]) -> Vec<Expense> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| Expense {
                id: i as i64 + 1,
                description: format!("Expense {i}"),
                amount,
                category: "Other".to_owned(),
                created_at: datetime!(2026-10-19 08:00:00 UTC),
            })
            .collect()
    }

    #[test]
    fn total_and_count_cover_every_expense() {
        let dashboard = DashboardState {
            expenses: expenses(&[120.5, 80.0, 1.0, 2.0, 3.0, 4.0]),
            form: ExpenseFormState::default(),
        };

        assert_eq!(dashboard.total(), 210.5);
        assert_eq!(dashboard.count(), 6);
        assert_eq!(dashboard.recent_expenses().len(), 5);
        assert_eq!(dashboard.recent_expenses()[0].amount, 120.5);
    }

    #[test]
    fn empty_dashboard_has_zero_total() {
        let dashboard = DashboardState {
            expenses: vec![],
            form: ExpenseFormState::default(),
        };

        assert_eq!(dashboard.total(), 0.0);
        assert_eq!(dashboard.count(), 0);
        assert!(dashboard.recent_expenses().is_empty());
    }
}
