//! Client side state: the cached expense list, the expense form and the edit target.

use crate::{
    client::{ClientError, ExpenseClient},
    expense::{AmountInput, Category, Expense, ExpenseId, ExpenseRequest, total_amount},
};

/// The values entered into the expense form.
///
/// The amount is kept as text and checked by the server when the form is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientExpenseForm {
    /// What the money was spent on.
    pub description: String,
    /// The amount as entered, e.g. "120.50".
    pub amount: String,
    /// The category name, e.g. "Food".
    pub category: String,
}

impl Default for ClientExpenseForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            category: Category::default().to_string(),
        }
    }
}

impl ClientExpenseForm {
    fn to_request(&self) -> ExpenseRequest {
        ExpenseRequest {
            description: self.description.clone(),
            amount: AmountInput::Text(self.amount.clone()),
            category: self.category.clone(),
        }
    }
}

/// A form submission that has started but not been sent yet.
///
/// Created by [ClientState::begin_submit]. Does not borrow the state, so the
/// state can be read, e.g. to show that it is loading, while the request is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmit {
    editing: Option<ExpenseId>,
    request: ExpenseRequest,
}

impl PendingSubmit {
    /// Send the request: an update if an expense was being edited, otherwise a create.
    pub async fn send(self, client: &ExpenseClient) -> Result<Expense, ClientError> {
        match self.editing {
            Some(expense_id) => client.update(expense_id, &self.request).await,
            None => client.create(&self.request).await,
        }
    }
}

/// The state of an expense tracker client.
///
/// The expense list is only changed by fetching it from the server, so it
/// always reflects the server's state at the time of the last fetch.
#[derive(Debug, Clone)]
pub struct ClientState {
    client: ExpenseClient,
    expenses: Option<Vec<Expense>>,
    form: ClientExpenseForm,
    editing: Option<ExpenseId>,
    is_loading: bool,
}

impl ClientState {
    /// Create a state with no expenses loaded and an empty form.
    pub fn new(client: ExpenseClient) -> Self {
        Self {
            client,
            expenses: None,
            form: ClientExpenseForm::default(),
            editing: None,
            is_loading: false,
        }
    }

    /// The loaded expenses, newest first. Empty until [ClientState::refresh] succeeds.
    pub fn expenses(&self) -> &[Expense] {
        self.expenses.as_deref().unwrap_or_default()
    }

    /// Whether the expenses have been fetched at least once.
    pub fn is_loaded(&self) -> bool {
        self.expenses.is_some()
    }

    /// Whether a form submission is in progress.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The ID of the expense the form will update, or `None` if it will create one.
    pub fn editing(&self) -> Option<ExpenseId> {
        self.editing
    }

    /// The sum of the amounts of the loaded expenses.
    pub fn total(&self) -> f64 {
        total_amount(self.expenses())
    }

    /// The current form values.
    pub fn form(&self) -> &ClientExpenseForm {
        &self.form
    }

    /// Edit the form values.
    pub fn form_mut(&mut self) -> &mut ClientExpenseForm {
        &mut self.form
    }

    /// Replace the loaded expenses with the server's list.
    ///
    /// # Errors
    /// Returns the client error if the list could not be fetched. The
    /// previously loaded expenses are kept.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let expenses = self.client.list().await.inspect_err(|error| {
            tracing::error!("Error fetching expenses: {error}");
        })?;
        self.expenses = Some(expenses);

        Ok(())
    }

    /// Create a new expense from the form, or update the expense being edited.
    ///
    /// This runs [ClientState::begin_submit], [PendingSubmit::send] and
    /// [ClientState::finish_submit] in turn. Call those directly to show the
    /// loading state while the request is in flight.
    ///
    /// # Errors
    /// Returns the client error if the server rejected the form or could not
    /// be reached. The form and edit target are kept so the user can try again.
    pub async fn submit(&mut self) -> Result<(), ClientError> {
        let pending = self.begin_submit();
        let result = pending.send(&self.client).await;

        self.finish_submit(result).await
    }

    /// Mark a submission as in progress and capture the form as a request.
    ///
    /// [ClientState::is_loading] stays true until [ClientState::finish_submit] is called.
    pub fn begin_submit(&mut self) -> PendingSubmit {
        self.is_loading = true;

        PendingSubmit {
            editing: self.editing,
            request: self.form.to_request(),
        }
    }

    /// The client used to talk to the server, e.g. for [PendingSubmit::send].
    pub fn client(&self) -> &ExpenseClient {
        &self.client
    }

    /// End a submission started with [ClientState::begin_submit].
    ///
    /// On success the form and edit target are cleared and the expenses are
    /// fetched again. On failure the form and edit target are kept.
    ///
    /// # Errors
    /// Returns `result`'s error, or the error from fetching the expenses again.
    pub async fn finish_submit(
        &mut self,
        result: Result<Expense, ClientError>,
    ) -> Result<(), ClientError> {
        if let Err(error) = result {
            tracing::error!("Error saving expense: {error}");
            self.is_loading = false;
            return Err(error);
        }

        self.form = ClientExpenseForm::default();
        self.editing = None;
        let refreshed = self.refresh().await;
        self.is_loading = false;

        refreshed
    }

    /// Fill in the form with a loaded expense and make it the edit target.
    ///
    /// # Errors
    /// Returns [ClientError::NotFound] if the expense has not been loaded.
    pub fn begin_edit(&mut self, expense_id: ExpenseId) -> Result<(), ClientError> {
        let expense = self
            .expenses()
            .iter()
            .find(|expense| expense.id == expense_id)
            .ok_or(ClientError::NotFound)?;

        self.form = ClientExpenseForm {
            description: expense.description.clone(),
            amount: expense.amount.to_string(),
            category: expense.category.clone(),
        };
        self.editing = Some(expense_id);

        Ok(())
    }

    /// Stop editing and clear the form. Does not contact the server.
    pub fn cancel_edit(&mut self) {
        self.form = ClientExpenseForm::default();
        self.editing = None;
    }

    /// Delete an expense and fetch the expenses again.
    pub async fn delete(&mut self, expense_id: ExpenseId) -> Result<(), ClientError> {
        self.client.delete(expense_id).await.inspect_err(|error| {
            tracing::error!("Error deleting expense {expense_id}: {error}");
        })?;

        self.refresh().await
    }
}
