//! Endpoints for adding and removing a category's keywords.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error,
    category::{domain::KeywordFormData, store::CategoryStore},
    endpoints,
};

/// The state needed for keyword mutations.
#[derive(Debug, Clone)]
pub struct KeywordState {
    /// The category store holding the keyword lists.
    pub category_store: Arc<Mutex<CategoryStore>>,
}

impl FromRef<AppState> for KeywordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_store: state.category_store.clone(),
        }
    }
}

/// Handle a form submission adding a keyword to the category named in the
/// path.
pub async fn add_keyword_endpoint(
    State(state): State<KeywordState>,
    Path(name): Path<String>,
    Form(form): Form<KeywordFormData>,
) -> Response {
    let mut store = match state.category_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire state lock: {error}");
            return Error::StateLock.into_alert_response();
        }
    };

    match store.add_keyword(&name, &form.keyword) {
        Ok(()) => {
            tracing::info!(
                "Added keyword \"{}\" to category \"{name}\"",
                form.keyword.trim()
            );

            (
                HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

/// Handle a form submission removing a keyword from the category named in
/// the path.
///
/// Removing a keyword that is no longer present still succeeds: the user's
/// intent (that keyword gone from that category) already holds.
pub async fn remove_keyword_endpoint(
    State(state): State<KeywordState>,
    Path(name): Path<String>,
    Form(form): Form<KeywordFormData>,
) -> Response {
    let mut store = match state.category_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire state lock: {error}");
            return Error::StateLock.into_alert_response();
        }
    };

    match store.remove_keyword(&name, &form.keyword) {
        Ok(()) => {
            tracing::info!("Removed keyword \"{}\" from category \"{name}\"", form.keyword);

            (
                HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}
