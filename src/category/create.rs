//! Category creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error,
    category::{domain::CategoryFormData, store::CategoryStore},
    endpoints,
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    /// The category store to insert into.
    pub category_store: Arc<Mutex<CategoryStore>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_store: state.category_store.clone(),
        }
    }
}

/// Handle category creation form submission.
///
/// On success the client is redirected back to the page the form named in
/// `redirect_to` (the expenses page carries its own add-category form), or to
/// the categories page by default.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    Form(new_category): Form<CategoryFormData>,
) -> Response {
    let mut store = match state.category_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire state lock: {error}");
            return Error::StateLock.into_alert_response();
        }
    };

    match store.add_category(&new_category.name) {
        Ok(()) => {
            tracing::info!("Created category \"{}\"", new_category.name.trim());

            (
                HxRedirect(redirect_target(new_category.redirect_to.as_deref()).to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

/// Only redirect to pages that carry an add-category form.
fn redirect_target(requested: Option<&str>) -> &'static str {
    match requested {
        Some(target) if target == endpoints::EXPENSES_VIEW => endpoints::EXPENSES_VIEW,
        _ => endpoints::CATEGORIES_VIEW,
    }
}

#[cfg(test)]
mod create_category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode, response::IntoResponse};
    use tempfile::TempDir;

    use crate::{
        category::{domain::CategoryFormData, store::CategoryStore},
        endpoints,
        test_utils::assert_hx_redirect,
    };

    use super::{CreateCategoryState, create_category_endpoint};

    fn get_test_state() -> (CreateCategoryState, TempDir) {
        let temp_dir = TempDir::new().expect("Could not create temp dir");
        let store = CategoryStore::load(temp_dir.path().join("categories.json"));

        (
            CreateCategoryState {
                category_store: Arc::new(Mutex::new(store)),
            },
            temp_dir,
        )
    }

    #[tokio::test]
    async fn can_create_category() {
        let (state, _temp_dir) = get_test_state();
        let form = CategoryFormData {
            name: "Food".to_string(),
            redirect_to: None,
        };

        let response = create_category_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::CATEGORIES_VIEW);
        assert!(state.category_store.lock().unwrap().contains("Food"));
    }

    #[tokio::test]
    async fn redirects_to_expenses_page_when_requested() {
        let (state, _temp_dir) = get_test_state();
        let form = CategoryFormData {
            name: "Food".to_string(),
            redirect_to: Some(endpoints::EXPENSES_VIEW.to_string()),
        };

        let response = create_category_endpoint(State(state), Form(form))
            .await
            .into_response();

        assert_hx_redirect(&response, endpoints::EXPENSES_VIEW);
    }

    #[tokio::test]
    async fn create_category_fails_on_empty_name() {
        let (state, _temp_dir) = get_test_state();
        let form = CategoryFormData {
            name: "".to_string(),
            redirect_to: None,
        };

        let response = create_category_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.category_store.lock().unwrap().names().count(), 1);
    }

    #[tokio::test]
    async fn create_category_fails_on_duplicate_name() {
        let (state, _temp_dir) = get_test_state();
        state
            .category_store
            .lock()
            .unwrap()
            .add_category("Food")
            .unwrap();
        let form = CategoryFormData {
            name: "Food".to_string(),
            redirect_to: None,
        };

        let response = create_category_endpoint(State(state), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
