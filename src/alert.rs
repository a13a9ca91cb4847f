//! Alert messages for surfacing operation results to the user.
//!
//! Alerts render into the `#alert-container` element that the base layout
//! places on every page, either via `hx-target-error` or an htmx
//! out-of-band swap.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

const ALERT_SUCCESS_STYLE: &str = "flex flex-col p-4 mb-4 text-sm rounded-lg \
    text-green-800 bg-green-50 dark:bg-gray-800 dark:text-green-400 shadow";

const ALERT_ERROR_STYLE: &str = "flex flex-col p-4 mb-4 text-sm rounded-lg \
    text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400 shadow";

/// An alert message shown to the user after an operation.
#[derive(Debug, Clone)]
pub enum Alert {
    /// The operation succeeded.
    Success {
        /// A short headline, e.g. "Statement imported!".
        message: String,
        /// Supporting detail shown under the headline.
        details: String,
    },
    /// The operation failed.
    Error {
        /// A short headline, e.g. "Could not delete category".
        message: String,
        /// Supporting detail shown under the headline.
        details: String,
    },
    /// The operation failed; there is no useful detail to add.
    ErrorSimple {
        /// A short headline.
        message: String,
    },
}

impl Alert {
    /// Render the alert as an out-of-band swap into `#alert-container`.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (ALERT_SUCCESS_STYLE, message, details),
            Alert::Error { message, details } => (ALERT_ERROR_STYLE, message, details),
            Alert::ErrorSimple { message } => (ALERT_ERROR_STYLE, message, String::new()),
        };

        html!(
            div id="alert-container" hx-swap-oob="true" class="w-full max-w-md px-4"
            {
                div class=(style) role="alert"
                {
                    span class="font-medium" { (message) }

                    @if !details.is_empty() {
                        span { (details) }
                    }
                }
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
