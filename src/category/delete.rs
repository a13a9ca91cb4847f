//! Category deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error,
    category::{engine::categorize, store::CategoryStore},
    endpoints,
    statement::TransactionSet,
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryState {
    /// The category store to delete from.
    pub category_store: Arc<Mutex<CategoryStore>>,
    /// The loaded transactions, which are re-categorized after the deletion
    /// so rows of the deleted category demote to "Uncategorized".
    pub transactions: Arc<Mutex<Option<TransactionSet>>>,
}

impl FromRef<AppState> for DeleteCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_store: state.category_store.clone(),
            transactions: state.transactions.clone(),
        }
    }
}

/// Handle a request to delete the category named in the path.
///
/// Deleting a category re-runs the categorizer over the loaded transaction
/// set (a full recompute; the sets are a single statement, so this is cheap),
/// which demotes the deleted category's rows to "Uncategorized".
pub async fn delete_category_endpoint(
    State(state): State<DeleteCategoryState>,
    Path(name): Path<String>,
) -> Response {
    let mut store = match state.category_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire state lock: {error}");
            return Error::StateLock.into_alert_response();
        }
    };

    if let Err(error) = store.delete_category(&name) {
        return error.into_alert_response();
    }

    tracing::info!("Deleted category \"{name}\"");

    let mut transactions = match state.transactions.lock() {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("could not acquire state lock: {error}");
            return Error::StateLock.into_alert_response();
        }
    };

    if let Some(transaction_set) = transactions.as_mut() {
        categorize(transaction_set.all_mut(), &store);
    }

    (
        HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
