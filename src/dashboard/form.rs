//! The expense form shown on the dashboard and the endpoints it submits to.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    expense::{
        Category, Expense, ExpenseFields, ExpenseId, create_expense, parse_amount, update_expense,
    },
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, CARD_TITLE_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
};

/// The values currently in the expense form.
///
/// `editing` holds the ID of the expense being edited. When it is `None`
/// submitting the form creates a new expense.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFormState {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub editing: Option<ExpenseId>,
    pub error_message: Option<String>,
}

impl Default for ExpenseFormState {
    fn default() -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            category: Category::default().to_string(),
            editing: None,
            error_message: None,
        }
    }
}

impl ExpenseFormState {
    /// A form filled in with the mutable fields of `expense`, ready for editing.
    pub fn for_expense(expense: &Expense) -> Self {
        Self {
            description: expense.description.clone(),
            amount: expense.amount.to_string(),
            category: expense.category.clone(),
            editing: Some(expense.id),
            error_message: None,
        }
    }

    /// A form that keeps what the user submitted and explains what went wrong.
    fn rejected(form: ExpenseFormData, editing: Option<ExpenseId>, error: &Error) -> Self {
        Self {
            description: form.description,
            amount: form.amount,
            category: form.category,
            editing,
            error_message: Some(format!("Error: {error}")),
        }
    }
}

/// The form data submitted by the expense form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseFormData {
    pub description: String,
    pub amount: String,
    pub category: String,
}

impl ExpenseFormData {
    fn to_fields(&self) -> Result<ExpenseFields, Error> {
        Ok(ExpenseFields {
            description: self.description.clone(),
            amount: parse_amount(&self.amount)?,
            category: self.category.clone(),
        })
    }
}

/// The state needed for creating and updating expenses from the form.
#[derive(Debug, Clone)]
pub struct ExpenseFormEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseFormEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle the expense form when it is used to add an expense.
///
/// Redirects to the dashboard on success, which reloads every expense.
pub async fn create_expense_form_endpoint(
    State(state): State<ExpenseFormEndpointState>,
    Form(form): Form<ExpenseFormData>,
) -> Response {
    let fields = match form.to_fields() {
        Ok(fields) => fields,
        Err(error) => {
            return expense_form_view(&ExpenseFormState::rejected(form, None, &error))
                .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_expense(&fields, OffsetDateTime::now_utc(), &connection) {
        Ok(_) => dashboard_redirect(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an expense: {error}");
            error.into_alert_response()
        }
    }
}

/// Handle the expense form when it is used to edit an expense.
pub async fn update_expense_form_endpoint(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<ExpenseFormEndpointState>,
    Form(form): Form<ExpenseFormData>,
) -> Response {
    let fields = match form.to_fields() {
        Ok(fields) => fields,
        Err(error) => {
            return expense_form_view(&ExpenseFormState::rejected(form, Some(expense_id), &error))
                .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_expense(expense_id, &fields, &connection) {
        Ok(_) => dashboard_redirect(),
        Err(Error::UpdateMissingExpense) => Error::UpdateMissingExpense.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating expense {expense_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn dashboard_redirect() -> Response {
    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

pub fn expense_form_view(form: &ExpenseFormState) -> Markup {
    let (title, submit_label) = match form.editing {
        Some(_) => ("Edit expense", "Save changes"),
        None => ("Add expense", "Add expense"),
    };
    let is_known_category = Category::from_name(&form.category).is_some();

    let form_fields = html! {
        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                id="description"
                type="text"
                name="description"
                placeholder="e.g. Lunch"
                value=(form.description)
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            input
                id="amount"
                type="number"
                name="amount"
                step="0.01"
                placeholder="0.00"
                value=(form.amount)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            select id="category" name="category" class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in Category::ALL {
                    option
                        value=(category.as_str())
                        selected[category.as_str() == form.category]
                    {
                        (category.label())
                    }
                }

                // Keep categories that were stored through the API, so editing
                // an expense does not silently change its category.
                @if !is_known_category {
                    option value=(form.category) selected { (form.category) }
                }
            }
        }

        @if let Some(error_message) = &form.error_message {
            p class="form-error text-red-600 dark:text-red-400"
            {
                (error_message)
            }
        }

        button
            type="submit"
            id="submit-button"
            class=(BUTTON_PRIMARY_STYLE)
        {
            span class="inline htmx-indicator" id="indicator"
            {
                (loading_spinner())
                "Saving… "
            }
            (submit_label)
        }
    };

    html! {
        section class=(CARD_STYLE) id="expense-form"
        {
            h2 class=(CARD_TITLE_STYLE) { (title) }

            @match form.editing {
                Some(expense_id) => {
                    form
                        hx-put=(format_endpoint(endpoints::EXPENSE, expense_id))
                        hx-target="#expense-form"
                        hx-swap="outerHTML"
                        hx-target-error="#alert-container"
                        hx-indicator="#indicator"
                        hx-disabled-elt="#submit-button"
                        class="w-full space-y-4 md:space-y-6"
                    {
                        (form_fields)

                        a href=(endpoints::DASHBOARD_VIEW) class=(BUTTON_SECONDARY_STYLE)
                        {
                            "Cancel"
                        }
                    }
                }
                None => {
                    form
                        hx-post=(endpoints::EXPENSES)
                        hx-target="#expense-form"
                        hx-swap="outerHTML"
                        hx-target-error="#alert-container"
                        hx-indicator="#indicator"
                        hx-disabled-elt="#submit-button"
                        class="w-full space-y-4 md:space-y-6"
                    {
                        (form_fields)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod expense_form_view_tests {
    use scraper::Html;
    use time::macros::datetime;

    use crate::{
        dashboard::form::{ExpenseFormState, expense_form_view},
        endpoints::{self, format_endpoint},
        expense::Expense,
        test_utils::{
            assert_form_input_with_value, assert_form_select_with_value,
            assert_form_submit_button_contains, assert_hx_endpoint, assert_valid_html,
            must_get_form, must_select_texts,
        },
    };

    #[test]
    fn empty_form_posts_new_expense() {
        let html = Html::parse_fragment(
            &expense_form_view(&ExpenseFormState::default()).into_string(),
        );
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::EXPENSES, "hx-post");
        assert_form_input_with_value(&form, "description", "text", "");
        assert_form_input_with_value(&form, "amount", "number", "");
        assert_form_select_with_value(&form, "category", "Food");
        assert_form_submit_button_contains(&form, "Add expense");
        assert!(must_select_texts(&html, "a").is_empty(), "want no cancel link");
    }

    #[test]
    fn edit_form_is_filled_in_and_puts_to_expense() {
        let expense = Expense {
            id: 7,
            description: "Bus".to_owned(),
            amount: 30.5,
            category: "Transport".to_owned(),
            created_at: datetime!(2026-10-19 08:00:00 UTC),
        };
        let html = Html::parse_fragment(
            &expense_form_view(&ExpenseFormState::for_expense(&expense)).into_string(),
        );
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, &format_endpoint(endpoints::EXPENSE, 7), "hx-put");
        assert_form_input_with_value(&form, "description", "text", "Bus");
        assert_form_input_with_value(&form, "amount", "number", "30.5");
        assert_form_select_with_value(&form, "category", "Transport");
        assert_form_submit_button_contains(&form, "Save changes");
        assert_eq!(must_select_texts(&html, "a"), ["Cancel"]);
    }

    #[test]
    fn keeps_unrecognised_category_selected() {
        let form_state = ExpenseFormState {
            category: "Groceries".to_owned(),
            ..Default::default()
        };
        let html = Html::parse_fragment(&expense_form_view(&form_state).into_string());

        let form = must_get_form(&html);
        assert_form_select_with_value(&form, "category", "Groceries");
    }

    #[test]
    fn shows_loading_indicator_in_submit_button() {
        let html = Html::parse_fragment(
            &expense_form_view(&ExpenseFormState::default()).into_string(),
        );

        let indicator = must_select_texts(&html, "button #indicator");
        assert_eq!(indicator, ["Saving…"]);
    }
}

#[cfg(test)]
mod expense_form_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::OffsetDateTime;

    use crate::{
        dashboard::form::{
            ExpenseFormData, ExpenseFormEndpointState, create_expense_form_endpoint,
            update_expense_form_endpoint,
        },
        endpoints::{self, format_endpoint},
        expense::{ExpenseFields, create_expense, get_all_expenses, get_expense},
        initialize_db,
        test_utils::{
            assert_form_error_message, assert_form_input_with_value, assert_hx_endpoint,
            assert_hx_redirect, assert_valid_html, must_get_form, parse_html_fragment,
        },
    };

    fn get_state() -> ExpenseFormEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");

        ExpenseFormEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn form(description: &str, amount: &str, category: &str) -> ExpenseFormData {
        ExpenseFormData {
            description: description.to_owned(),
            amount: amount.to_owned(),
            category: category.to_owned(),
        }
    }

    #[tokio::test]
    async fn create_redirects_to_dashboard() {
        let state = get_state();

        let response =
            create_expense_form_endpoint(State(state.clone()), Form(form("Lunch", "120.50", "Food")))
                .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        let expenses = get_all_expenses(&state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description, "Lunch");
        assert_eq!(expenses[0].amount, 120.5);
        assert_eq!(expenses[0].category, "Food");
    }

    #[tokio::test]
    async fn create_with_invalid_amount_keeps_entered_values() {
        let state = get_state();

        let response =
            create_expense_form_endpoint(State(state.clone()), Form(form("Lunch", "abc", "Other")))
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::EXPENSES, "hx-post");
        assert_form_input_with_value(&form, "description", "text", "Lunch");
        assert_form_input_with_value(&form, "amount", "number", "abc");
        assert_form_error_message(&form, "Error: \"abc\" is not a valid amount");
        assert_eq!(
            get_all_expenses(&state.db_connection.lock().unwrap()),
            Ok(vec![])
        );
    }

    #[tokio::test]
    async fn update_replaces_fields_and_redirects() {
        let state = get_state();
        let expense = create_expense(
            &ExpenseFields {
                description: "Lunch".to_owned(),
                amount: 120.5,
                category: "Food".to_owned(),
            },
            OffsetDateTime::now_utc(),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = update_expense_form_endpoint(
            Path(expense.id),
            State(state.clone()),
            Form(form("Dinner", "80", "Food")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        let updated = get_expense(expense.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(updated.description, "Dinner");
        assert_eq!(updated.amount, 80.0);
        assert_eq!(updated.created_at, expense.created_at);
    }

    #[tokio::test]
    async fn update_missing_expense_returns_not_found_alert() {
        let state = get_state();

        let response =
            update_expense_form_endpoint(Path(999), State(state), Form(form("Dinner", "80", "Food")))
                .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
    }

    #[tokio::test]
    async fn update_with_invalid_amount_rerenders_edit_form() {
        let state = get_state();

        let response =
            update_expense_form_endpoint(Path(3), State(state), Form(form("Dinner", "NaN", "Food")))
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, &format_endpoint(endpoints::EXPENSE, 3), "hx-put");
        assert_form_input_with_value(&form, "amount", "number", "NaN");
        assert_form_error_message(&form, "Error: \"NaN\" is not a valid amount");
    }
}
