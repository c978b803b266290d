//! Full page responses for requests that could not be served.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::Markup;

use crate::html::error_view;

/// A page explaining why a request failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorPage<'a> {
    /// The requested page or record does not exist.
    NotFound,
    /// Something went wrong on the server.
    ///
    /// `description` says what went wrong, `fix` says what the user can do about it.
    InternalServerError { description: &'a str, fix: &'a str },
}

impl ErrorPage<'static> {
    /// An internal server error with a generic explanation.
    pub const INTERNAL_SERVER_ERROR: Self = ErrorPage::InternalServerError {
        description: "Sorry, something went wrong.",
        fix: "Try again later or check the server logs",
    };
}

impl ErrorPage<'_> {
    fn status_code(&self) -> StatusCode {
        match self {
            ErrorPage::NotFound => StatusCode::NOT_FOUND,
            ErrorPage::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_html(self) -> Markup {
        match self {
            ErrorPage::NotFound => error_view(
                "Not Found",
                "404",
                "Something's missing.",
                "Sorry, we can't find that page. You'll find lots to explore on the home page.",
            ),
            ErrorPage::InternalServerError { description, fix } => {
                error_view("Internal Server Error", "500", description, fix)
            }
        }
    }
}

impl IntoResponse for ErrorPage<'_> {
    fn into_response(self) -> Response {
        (self.status_code(), Html(self.into_html().into_string())).into_response()
    }
}

/// The fallback route handler for paths that do not match any route.
pub async fn get_404_not_found() -> Response {
    ErrorPage::NotFound.into_response()
}

/// The route handler for the internal server error page.
pub async fn get_internal_server_error_page() -> Response {
    ErrorPage::INTERNAL_SERVER_ERROR.into_response()
}
