//! The 404 not found page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// Route handler for unknown routes.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Build the 404 response directly, for use outside a route handler.
pub fn get_404_not_found_response() -> Response {
    let body = error_view(
        "Not Found",
        "404",
        "Page not found.",
        "Sorry, we couldn't find that page. Check the address, or head back home.",
    );

    (StatusCode::NOT_FOUND, body).into_response()
}
