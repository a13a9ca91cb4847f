//! The endpoint for manually changing a transaction's category.
//!
//! This is the feedback loop from the presentation layer into the category
//! store: a corrected row teaches its details string to the chosen category
//! as a new keyword, so future uploads auto-categorize the same way.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    category::CategoryStore,
    statement::TransactionSet,
};

/// The state needed for editing a transaction's category.
#[derive(Debug, Clone)]
pub struct EditCategoryState {
    /// The category store the edit feeds back into.
    pub category_store: Arc<Mutex<CategoryStore>>,
    /// The loaded transactions.
    pub transactions: Arc<Mutex<Option<TransactionSet>>>,
}

impl FromRef<AppState> for EditCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_store: state.category_store.clone(),
            transactions: state.transactions.clone(),
        }
    }
}

/// Form data for a category edit.
#[derive(Debug, Deserialize)]
pub struct EditCategoryFormData {
    /// The category the transaction should move to.
    pub category: String,
}

/// Handle a request to change the category of the transaction at `index` in
/// the loaded set.
///
/// An edit that does not change the category is a no-op. Otherwise the row is
/// updated and its details string is added to the new category's keyword
/// list. A duplicate keyword is fine (the association already exists), as is
/// learning into "Uncategorized" (the reserved keyword list is never matched,
/// so nothing is stored for it).
pub async fn edit_transaction_category_endpoint(
    State(state): State<EditCategoryState>,
    Path(index): Path<usize>,
    Form(form): Form<EditCategoryFormData>,
) -> Response {
    let mut store = match state.category_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire state lock: {error}");
            return Error::StateLock.into_alert_response();
        }
    };

    if !store.contains(&form.category) {
        return Error::UnknownCategory(form.category).into_alert_response();
    }

    let mut transactions = match state.transactions.lock() {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("could not acquire state lock: {error}");
            return Error::StateLock.into_alert_response();
        }
    };

    let Some(transaction_set) = transactions.as_mut() else {
        return Error::NoTransactions.into_alert_response();
    };

    let Some(transaction) = transaction_set.get_mut(index) else {
        return Error::UnknownTransaction(index).into_alert_response();
    };

    if transaction.category == form.category {
        return StatusCode::NO_CONTENT.into_response();
    }

    let details = transaction.details.clone();
    transaction.category = form.category.clone();
    drop(transactions);

    let learned = match store.add_keyword(&form.category, &details) {
        Ok(()) => true,
        // The association already exists, nothing new to learn.
        Err(Error::DuplicateKeyword(_)) => false,
        Err(error) => {
            tracing::error!("Could not learn keyword from category edit: {error}");
            return error.into_alert_response();
        }
    };

    tracing::info!(
        "Moved transaction {index} to category \"{}\" (keyword learned: {learned})",
        form.category
    );

    Alert::Success {
        message: format!("Moved to \"{}\"", form.category),
        details: if learned {
            format!("Future uploads of \"{details}\" will be categorized automatically.")
        } else {
            String::new()
        },
    }
    .into_response()
}
