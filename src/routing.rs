//! Application router configuration for the web views and the JSON API.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};

use crate::{
    AppState,
    dashboard::{
        create_expense_form_endpoint, get_dashboard_page, get_edit_expense_page,
        update_expense_form_endpoint,
    },
    endpoints,
    error_page::{get_404_not_found, get_internal_server_error_page},
    expense::{
        create_expense_endpoint, delete_expense_endpoint, list_expenses_endpoint,
        update_expense_endpoint,
    },
    history::{delete_expense_form_endpoint, get_history_page},
    settings::get_settings_page,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let view_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::HISTORY_VIEW, get(get_history_page))
        .route(endpoints::SETTINGS_VIEW, get(get_settings_page))
        .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // Targets for the htmx form and delete buttons, these respond with HTML fragments.
    let form_routes = Router::new()
        .route(endpoints::EXPENSES, post(create_expense_form_endpoint))
        .route(
            endpoints::EXPENSE,
            put(update_expense_form_endpoint).delete(delete_expense_form_endpoint),
        );

    let api_routes = Router::new()
        .route(
            endpoints::EXPENSES_API,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE_API,
            put(update_expense_endpoint).delete(delete_expense_endpoint),
        );

    view_routes
        .merge(form_routes)
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
