//! Dashboard module
//!
//! Provides the overview page with the total spent, the expense form used to
//! add and edit expenses, and the most recent expenses.

mod form;
mod page;

pub use form::{
    ExpenseFormData, ExpenseFormEndpointState, ExpenseFormState, create_expense_form_endpoint,
    expense_form_view, update_expense_form_endpoint,
};
pub use page::{DashboardPageState, DashboardState, get_dashboard_page, get_edit_expense_page};
