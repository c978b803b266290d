//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/expenses/{expense_id}', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with the expense form, totals and recent expenses.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page listing every expense.
pub const HISTORY_VIEW: &str = "/history";
/// The page for application settings.
pub const SETTINGS_VIEW: &str = "/settings";
/// The dashboard with the expense form filled in for editing an expense.
pub const EDIT_EXPENSE_VIEW: &str = "/expenses/{expense_id}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route the expense form posts to for creating an expense.
pub const EXPENSES: &str = "/expenses";
/// The route the expense form and history page use to update or delete an expense.
pub const EXPENSE: &str = "/expenses/{expense_id}";

/// The JSON API route for listing and creating expenses.
pub const EXPENSES_API: &str = "/api/expenses";
/// The JSON API route for updating and deleting a single expense.
pub const EXPENSE_API: &str = "/api/expenses/{expense_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/expenses/{expense_id}', '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
