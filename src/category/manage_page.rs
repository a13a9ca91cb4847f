//! The page for managing categories and their keywords.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    category::{domain::UNCATEGORIZED, store::CategoryStore},
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        KEYWORD_BADGE_STYLE, PAGE_CONTAINER_STYLE, base,
    },
    navigation::NavBar,
};

/// The state needed for displaying the categories page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    /// The category store to display.
    pub category_store: Arc<Mutex<CategoryStore>>,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_store: state.category_store.clone(),
        }
    }
}

/// A category with its keywords, detached from the store for rendering.
struct CategoryView {
    name: String,
    keywords: Vec<String>,
}

/// Route handler for the category management page.
pub async fn get_categories_page(
    State(state): State<CategoriesPageState>,
) -> Result<Response, Error> {
    let store = state
        .category_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire state lock: {error}"))
        .map_err(|_| Error::StateLock)?;

    let categories = store
        .iter()
        .map(|(name, keywords)| CategoryView {
            name: name.to_string(),
            keywords: keywords.to_vec(),
        })
        .collect::<Vec<_>>();

    Ok(categories_view(&categories).into_response())
}

fn categories_view(categories: &[CategoryView]) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl space-y-6"
            {
                div class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Categories" }
                }

                (new_category_form())

                @for category in categories {
                    (category_card(category))
                }
            }
        }
    );

    base("Categories", &[], &content)
}

fn new_category_form() -> Markup {
    html!(
        form
            hx-post=(endpoints::POST_CATEGORY)
            hx-target-error="#alert-container"
            class="flex items-end gap-2"
        {
            div class="grow"
            {
                label for="name" class=(FORM_LABEL_STYLE) { "New Category Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="e.g. Groceries"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class={(BUTTON_PRIMARY_STYLE) " max-w-40"} { "Add Category" }
        }
    )
}

fn category_card(category: &CategoryView) -> Markup {
    let is_reserved = category.name == UNCATEGORIZED;
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_CATEGORY, &category.name);
    let add_keyword_url = endpoints::format_endpoint(endpoints::POST_KEYWORD, &category.name);
    let remove_keyword_url = endpoints::format_endpoint(endpoints::REMOVE_KEYWORD, &category.name);

    html!(
        div class="bg-white dark:bg-gray-800 rounded-lg shadow p-4 space-y-3"
        {
            div class="flex justify-between items-center"
            {
                h2 class="text-lg font-semibold" { (category.name) }

                @if !is_reserved {
                    button
                        hx-delete=(delete_url)
                        hx-confirm={
                            "Are you sure you want to delete '" (category.name)
                            "'? Its transactions will be re-categorized as 'Uncategorized'."
                        }
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }

            @if is_reserved {
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "The fallback for transactions that match no keywords."
                }
            } @else {
                div class="flex flex-wrap gap-2"
                {
                    @for keyword in &category.keywords {
                        form
                            hx-post=(remove_keyword_url)
                            hx-target-error="#alert-container"
                            class="inline"
                        {
                            input type="hidden" name="keyword" value=(keyword);

                            span class=(KEYWORD_BADGE_STYLE)
                            {
                                (keyword)

                                button
                                    type="submit"
                                    class="ms-1.5 cursor-pointer"
                                    aria-label={"Remove keyword " (keyword)}
                                {
                                    "\u{00d7}"
                                }
                            }
                        }
                    }

                    @if category.keywords.is_empty() {
                        span class="text-sm text-gray-500 dark:text-gray-400" { "No keywords yet." }
                    }
                }

                form
                    hx-post=(add_keyword_url)
                    hx-target-error="#alert-container"
                    class="flex items-end gap-2"
                {
                    div class="grow"
                    {
                        input
                            type="text"
                            name="keyword"
                            placeholder="Add a keyword, e.g. coffee shop"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    button type="submit" class={(BUTTON_PRIMARY_STYLE) " max-w-40"}
                    {
                        "Add Keyword"
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod categories_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use tempfile::TempDir;

    use crate::{
        category::store::CategoryStore,
        endpoints,
        test_utils::{assert_hx_endpoint, assert_valid_html, must_get_form, parse_html_document},
    };

    use super::{CategoriesPageState, get_categories_page};

    fn get_test_state() -> (CategoriesPageState, TempDir) {
        let temp_dir = TempDir::new().expect("Could not create temp dir");
        let mut store = CategoryStore::load(temp_dir.path().join("categories.json"));
        store.add_category("Food").unwrap();
        store.add_keyword("Food", "coffee shop").unwrap();

        (
            CategoriesPageState {
                category_store: Arc::new(Mutex::new(store)),
            },
            temp_dir,
        )
    }

    #[tokio::test]
    async fn renders_categories_and_keywords() {
        let (state, _temp_dir) = get_test_state();

        let response = get_categories_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let text = html.html();
        assert!(text.contains("Food"));
        assert!(text.contains("coffee shop"));
        assert!(text.contains("Uncategorized"));

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::POST_CATEGORY, "hx-post");
    }

    #[tokio::test]
    async fn reserved_category_has_no_delete_button() {
        let (state, _temp_dir) = get_test_state();

        let response = get_categories_page(State(state)).await.unwrap();
        let html = parse_html_document(response).await;

        let delete_selector = scraper::Selector::parse("button[hx-delete]").unwrap();
        let delete_urls: Vec<_> = html
            .select(&delete_selector)
            .filter_map(|button| button.value().attr("hx-delete"))
            .collect();

        assert_eq!(delete_urls, vec!["/api/categories/Food"]);
    }
}
