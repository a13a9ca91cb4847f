//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{delete, get, post, put},
};

use crate::{
    AppState,
    category::{
        add_keyword_endpoint, create_category_endpoint, delete_category_endpoint,
        get_categories_page, remove_keyword_endpoint,
    },
    dashboard::{
        edit_transaction_category_endpoint, get_expenses_page, get_payments_page, get_trends_page,
    },
    endpoints,
    export::export_transactions,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    statement::{get_import_page, import_statement},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::PAYMENTS_VIEW, get(get_payments_page))
        .route(endpoints::TRENDS_VIEW, get(get_trends_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::IMPORT_VIEW, get(get_import_page))
        .route(endpoints::EXPORT, get(export_transactions))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::IMPORT, post(import_statement))
        .route(endpoints::POST_CATEGORY, post(create_category_endpoint))
        .route(endpoints::DELETE_CATEGORY, delete(delete_category_endpoint))
        .route(endpoints::POST_KEYWORD, post(add_keyword_endpoint))
        .route(endpoints::REMOVE_KEYWORD, post(remove_keyword_endpoint))
        .route(
            endpoints::PUT_TRANSACTION_CATEGORY,
            put(edit_transaction_category_endpoint),
        );

    page_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("I'm a teapot")).into_response()
}

/// The root path '/' redirects to the expenses page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::EXPENSES_VIEW)
}
