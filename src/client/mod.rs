//! A typed HTTP client for the expense JSON API.

mod state;

pub use state::{ClientExpenseForm, ClientState, PendingSubmit};

use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
    ApiErrorBody, endpoints,
    endpoints::format_endpoint,
    expense::{DeleteConfirmation, Expense, ExpenseId, ExpenseRequest},
};

/// The ways a request to the expense API can fail.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The expense does not exist.
    #[error("expense not found")]
    NotFound,

    /// The server rejected the request, e.g. because the amount is not a number.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The server failed to handle the request.
    #[error("server error: {0}")]
    Server(String),

    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A client for the expense JSON API.
#[derive(Debug, Clone)]
pub struct ExpenseClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ExpenseClient {
    /// Create a client for the server at `base_url`, e.g. "http://127.0.0.1:3000".
    ///
    /// # Errors
    /// Returns [ClientError::InvalidBaseUrl] if `base_url` is not a valid URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|error| ClientError::InvalidBaseUrl(error.to_string()))?;

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Get every expense, most recently created first.
    pub async fn list(&self) -> Result<Vec<Expense>, ClientError> {
        let response = self.http.get(self.url(endpoints::EXPENSES_API)?).send().await?;

        parse_response(response).await
    }

    /// Create an expense and return it as stored by the server.
    pub async fn create(&self, request: &ExpenseRequest) -> Result<Expense, ClientError> {
        let response = self
            .http
            .post(self.url(endpoints::EXPENSES_API)?)
            .json(request)
            .send()
            .await?;

        parse_response(response).await
    }

    /// Replace the description, amount and category of an expense.
    pub async fn update(
        &self,
        expense_id: ExpenseId,
        request: &ExpenseRequest,
    ) -> Result<Expense, ClientError> {
        let response = self
            .http
            .put(self.url(&format_endpoint(endpoints::EXPENSE_API, expense_id))?)
            .json(request)
            .send()
            .await?;

        parse_response(response).await
    }

    /// Delete an expense and return the server's confirmation.
    pub async fn delete(&self, expense_id: ExpenseId) -> Result<DeleteConfirmation, ClientError> {
        let response = self
            .http
            .delete(self.url(&format_endpoint(endpoints::EXPENSE_API, expense_id))?)
            .send()
            .await?;

        parse_response(response).await
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|error| ClientError::InvalidBaseUrl(error.to_string()))
    }
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return response.json::<T>().await.map_err(ClientError::Transport);
    }

    let message = response
        .json::<ApiErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| "unknown error".to_owned());

    tracing::debug!("The server responded with {status}: {message}");

    let error = match status {
        StatusCode::NOT_FOUND => ClientError::NotFound,
        status if status.is_client_error() => ClientError::InvalidRequest(message),
        _ => ClientError::Server(message),
    };

    Err(error)
}

#[cfg(test)]
mod tests {
    use crate::{
        client::{ClientError, ExpenseClient},
        expense::{AmountInput, ExpenseRequest},
        test_utils::spawn_test_server,
    };

    fn request(description: &str, amount: AmountInput) -> ExpenseRequest {
        ExpenseRequest {
            description: description.to_owned(),
            amount,
            category: "Food".to_owned(),
        }
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = ExpenseClient::new("not a url");

        assert!(matches!(result, Err(ClientError::InvalidBaseUrl(_))));
    }

    #[tokio::test]
    async fn create_update_list_and_delete() {
        let client = ExpenseClient::new(&spawn_test_server().await).unwrap();

        let lunch = client
            .create(&request("Lunch", AmountInput::Text("120.50".to_owned())))
            .await
            .unwrap();
        let dinner = client
            .create(&request("Dinner", AmountInput::Number(80.0)))
            .await
            .unwrap();
        assert_eq!(lunch.amount, 120.5);

        let expenses = client.list().await.unwrap();
        assert_eq!(expenses, [dinner.clone(), lunch.clone()]);

        let updated = client
            .update(lunch.id, &request("Brunch", AmountInput::Number(95.0)))
            .await
            .unwrap();
        assert_eq!(updated.id, lunch.id);
        assert_eq!(updated.description, "Brunch");
        assert_eq!(updated.created_at, lunch.created_at);

        let confirmation = client.delete(dinner.id).await.unwrap();
        assert!(!confirmation.message.is_empty());
        assert_eq!(client.list().await.unwrap(), [updated]);
    }

    #[tokio::test]
    async fn invalid_amount_is_invalid_request() {
        let client = ExpenseClient::new(&spawn_test_server().await).unwrap();

        let result = client
            .create(&request("Lunch", AmountInput::Text("a lot".to_owned())))
            .await;

        match result {
            Err(ClientError::InvalidRequest(message)) => {
                assert_eq!(message, "\"a lot\" is not a valid amount")
            }
            other => panic!("want invalid request error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_expense_is_not_found() {
        let client = ExpenseClient::new(&spawn_test_server().await).unwrap();

        let update = client
            .update(42, &request("Lunch", AmountInput::Number(1.0)))
            .await;
        let delete = client.delete(42).await;

        assert!(matches!(update, Err(ClientError::NotFound)));
        assert!(matches!(delete, Err(ClientError::NotFound)));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let client = ExpenseClient::new("http://127.0.0.1:1").unwrap();

        let result = client.list().await;

        assert!(matches!(result, Err(ClientError::Transport(_))));
    }
}
