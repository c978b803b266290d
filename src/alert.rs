//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the page's
//! alert container.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// An alert message shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message.
    SuccessSimple { message: String },
    /// An error message with extra details.
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert as HTML.
    pub fn into_html(self) -> Markup {
        let (is_error, message, details) = match self {
            Alert::SuccessSimple { message } => (false, message, String::new()),
            Alert::Error { message, details } => (true, message, details),
        };

        let style = if is_error {
            "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400"
        } else {
            "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 dark:bg-gray-800 dark:text-green-400"
        };

        html! {
            div
                role="alert"
                class=(style)
                onclick="this.remove()"
            {
                p class="font-medium" { (message) }

                @if !details.is_empty() {
                    span { (details) }
                }
            }
        }
    }

    /// Render the alert with `status_code`.
    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, Html(self.into_html().into_string())).into_response()
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_response_with_status(StatusCode::OK)
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::{
        alert::Alert,
        test_utils::{assert_content_type, assert_valid_html, parse_html_fragment},
    };

    #[tokio::test]
    async fn error_alert_renders_message_and_details() {
        let response = Alert::Error {
            message: "Could not delete expense".to_owned(),
            details: "The expense could not be found.".to_owned(),
        }
        .into_response_with_status(StatusCode::NOT_FOUND);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text = html
            .select(&Selector::parse("div[role='alert']").unwrap())
            .next()
            .expect("No alert found")
            .text()
            .collect::<String>();
        assert!(text.contains("Could not delete expense"));
        assert!(text.contains("The expense could not be found."));
    }

    #[tokio::test]
    async fn simple_success_alert_is_ok() {
        let response = Alert::SuccessSimple {
            message: "Saved".to_owned(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
