//! Finboard is a web app for getting an overview of your bank transactions.
//!
//! Upload a CSV bank statement, and Finboard will split it into expenses and
//! payments, auto-assign categories from your keyword dictionary, and render
//! summaries, trends, and an Excel export. Correcting a row's category
//! teaches the dictionary the new keyword for future uploads.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod dashboard;
mod endpoints;
mod export;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod routing;
mod statement;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use routing::build_router;

use crate::{
    alert::Alert,
    internal_server_error::{InternalServerErrorPageTemplate, render_internal_server_error},
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// Tried to create a category with a name that is already in the store.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategory(String),

    /// Tried to delete the reserved "Uncategorized" category.
    #[error("the \"Uncategorized\" category cannot be deleted")]
    ReservedCategory,

    /// The named category is not in the store.
    #[error("no category named \"{0}\" exists")]
    UnknownCategory(String),

    /// An empty (after trimming) string was used as a keyword.
    #[error("Keyword cannot be empty")]
    EmptyKeyword,

    /// The keyword is already in the category's keyword list.
    #[error("the keyword \"{0}\" is already in this category")]
    DuplicateKeyword(String),

    /// The category store could not be written to disk.
    ///
    /// The in-memory store is rolled back before this error is returned, so
    /// the store never holds state that a restart would lose.
    #[error("could not save the category store: {0}")]
    StoreSave(String),

    /// The multipart form could not be parsed as a list of CSV files.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The multipart form did not contain a CSV file.
    #[error("File is not a CSV")]
    NotCsv,

    /// The CSV had issues that prevented it from being parsed.
    #[error("Could not parse the CSV file: {0}")]
    InvalidCsv(String),

    /// An operation needed an uploaded transaction set but none is loaded.
    #[error("no transactions have been uploaded")]
    NoTransactions,

    /// The transaction index in the request does not refer to a loaded row.
    #[error("no transaction at index {0}")]
    UnknownTransaction(usize),

    /// The spreadsheet export could not be generated.
    #[error("could not generate the spreadsheet: {0}")]
    ExportFailed(String),

    /// Could not acquire the lock on the shared session state.
    #[error("could not acquire the state lock")]
    StateLock,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NoTransactions => render_internal_server_error(InternalServerErrorPageTemplate {
                description: "Nothing to show yet",
                fix: "Upload a CSV bank statement from the Import page first.",
            }),
            Error::StateLock => render_internal_server_error(Default::default()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(Default::default())
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::EmptyCategoryName | Error::EmptyKeyword => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: self.to_string(),
                }
                .into_html(),
            )
                .into_response(),
            Error::DuplicateCategory(name) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Duplicate category name".to_owned(),
                    details: format!(
                        "The category \"{name}\" already exists. \
                        Choose a different name, or edit the existing category."
                    ),
                }
                .into_html(),
            )
                .into_response(),
            Error::ReservedCategory => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Cannot delete category".to_owned(),
                    details: "\"Uncategorized\" is the fallback for transactions that match \
                        no keywords and cannot be removed."
                        .to_owned(),
                }
                .into_html(),
            )
                .into_response(),
            Error::UnknownCategory(name) => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Category not found".to_owned(),
                    details: format!(
                        "No category named \"{name}\" exists. \
                        Try refreshing the page to see the current categories."
                    ),
                }
                .into_html(),
            )
                .into_response(),
            Error::DuplicateKeyword(keyword) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Duplicate keyword".to_owned(),
                    details: format!("The keyword \"{keyword}\" is already in this category."),
                }
                .into_html(),
            )
                .into_response(),
            Error::NoTransactions => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "No transactions loaded".to_owned(),
                    details: "Upload a CSV bank statement from the Import page first.".to_owned(),
                }
                .into_html(),
            )
                .into_response(),
            Error::UnknownTransaction(index) => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update transaction".to_owned(),
                    details: format!(
                        "Row {index} is not in the currently loaded statement. \
                        Try refreshing the page."
                    ),
                }
                .into_html(),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    }
                    .into_html(),
                )
                    .into_response()
            }
        }
    }
}
