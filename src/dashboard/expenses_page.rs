//! The expenses (debits) page: the categorized transaction table, the
//! per-category summary, and the expenses-by-category chart.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    category::CategoryStore,
    dashboard::{
        aggregation::category_totals,
        charts::{DashboardChart, ECHARTS_SCRIPT_URL, charts_script, charts_view,
            expenses_by_category_chart},
        no_data_view,
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    navigation::NavBar,
    statement::{Transaction, TransactionSet},
};

/// The state needed for displaying the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The category store, read for the category selector options.
    pub category_store: Arc<Mutex<CategoryStore>>,
    /// The loaded transactions.
    pub transactions: Arc<Mutex<Option<TransactionSet>>>,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_store: state.category_store.clone(),
            transactions: state.transactions.clone(),
        }
    }
}

/// A debit row detached from the shared state for rendering.
struct ExpenseRow {
    /// The row's index in the full transaction set, used to address it in
    /// category edit requests.
    index: usize,
    transaction: Transaction,
}

/// Display the debit transactions with editable categories, a summary table,
/// and a chart.
pub async fn get_expenses_page(State(state): State<ExpensesPageState>) -> Result<Response, Error> {
    let rows;
    {
        let transactions = state
            .transactions
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire state lock: {error}"))
            .map_err(|_| Error::StateLock)?;

        let Some(transaction_set) = transactions.as_ref() else {
            return Ok(no_data_view(endpoints::EXPENSES_VIEW, "Expenses").into_response());
        };

        rows = transaction_set
            .debits()
            .map(|(index, transaction)| ExpenseRow {
                index,
                transaction: transaction.clone(),
            })
            .collect::<Vec<_>>();
    }

    let category_names = {
        let store = state
            .category_store
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire state lock: {error}"))
            .map_err(|_| Error::StateLock)?;

        store.names().map(str::to_string).collect::<Vec<_>>()
    };

    let totals = category_totals(rows.iter().map(|row| &row.transaction));

    Ok(expenses_view(&rows, &category_names, &totals).into_response())
}

fn expenses_view(
    rows: &[ExpenseRow],
    category_names: &[String],
    totals: &[(String, f64)],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();

    let charts = [DashboardChart {
        id: "expenses-by-category-chart",
        options: expenses_by_category_chart(totals).to_string(),
    }];

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-8"
            {
                div class="flex justify-between flex-wrap items-end gap-4"
                {
                    h1 class="text-xl font-bold" { "Your Expenses" }

                    (new_category_form())
                }

                (expenses_table(rows, category_names))

                div
                {
                    h2 class="text-lg font-semibold mb-4" { "Expense Summary" }

                    (summary_table(totals))
                }

                (charts_view(&charts))

                a
                    href=(endpoints::EXPORT)
                    class="inline-flex text-white bg-blue-600 hover:bg-blue-800
                        font-medium rounded text-sm px-5 py-2.5 text-center"
                {
                    "Download Current Data as Excel"
                }
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        charts_script(&charts),
    ];

    base("Expenses", &scripts, &content)
}

fn new_category_form() -> Markup {
    html!(
        form
            hx-post=(endpoints::POST_CATEGORY)
            hx-target-error="#alert-container"
            class="flex items-end gap-2"
        {
            input type="hidden" name="redirect_to" value=(endpoints::EXPENSES_VIEW);

            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "New Category Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class={(BUTTON_PRIMARY_STYLE) " max-w-40"} { "Add Category" }
        }
    )
}

fn expenses_table(rows: &[ExpenseRow], category_names: &[String]) -> Markup {
    html!(
        div class="overflow-x-auto rounded-lg shadow dark:bg-gray-800"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Details" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    }
                }

                tbody
                {
                    @for row in rows {
                        (expense_row(row, category_names))
                    }

                    @if rows.is_empty() {
                        tr
                        {
                            td
                                colspan="4"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No debit transactions in the uploaded statement."
                            }
                        }
                    }
                }
            }
        }
    )
}

fn expense_row(row: &ExpenseRow, category_names: &[String]) -> Markup {
    let edit_url = endpoints::format_endpoint(
        endpoints::PUT_TRANSACTION_CATEGORY,
        &row.index.to_string(),
    );

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (row.transaction.date_string()) }
            td class=(TABLE_CELL_STYLE) { (row.transaction.details) }
            td class=(TABLE_CELL_STYLE) { (format_currency(row.transaction.amount)) }
            td class=(TABLE_CELL_STYLE)
            {
                // Changing the selection teaches the row's details string to
                // the chosen category as a new keyword.
                form
                {
                    select
                        name="category"
                        hx-put=(edit_url)
                        hx-trigger="change"
                        hx-target-error="#alert-container"
                        class=(FORM_SELECT_STYLE)
                    {
                        @for name in category_names {
                            option
                                value=(name)
                                selected[*name == row.transaction.category]
                            {
                                (name)
                            }
                        }
                    }
                }
            }
        }
    )
}

fn summary_table(totals: &[(String, f64)]) -> Markup {
    html!(
        div class="overflow-x-auto rounded-lg shadow dark:bg-gray-800"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                    }
                }

                tbody
                {
                    @for (category, total) in totals {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (category) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(*total)) }
                        }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod expenses_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use tempfile::TempDir;
    use time::macros::date;

    use crate::{
        category::CategoryStore,
        statement::{Direction, Transaction, TransactionSet},
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{ExpensesPageState, get_expenses_page};

    fn get_test_state(transactions: Option<TransactionSet>) -> (ExpensesPageState, TempDir) {
        let temp_dir = TempDir::new().expect("Could not create temp dir");
        let mut store = CategoryStore::load(temp_dir.path().join("categories.json"));
        store.add_category("Food").unwrap();

        (
            ExpensesPageState {
                category_store: Arc::new(Mutex::new(store)),
                transactions: Arc::new(Mutex::new(transactions)),
            },
            temp_dir,
        )
    }

    fn test_transaction_set() -> TransactionSet {
        TransactionSet::new(vec![
            Transaction {
                date: date!(2024 - 01 - 01),
                details: "Coffee Shop".to_string(),
                amount: 10.50,
                direction: Direction::Debit,
                category: "Food".to_string(),
            },
            Transaction {
                date: date!(2024 - 01 - 15),
                details: "Salary".to_string(),
                amount: 2500.00,
                direction: Direction::Credit,
                category: "Uncategorized".to_string(),
            },
        ])
    }

    #[tokio::test]
    async fn renders_debit_rows_only() {
        let (state, _temp_dir) = get_test_state(Some(test_transaction_set()));

        let response = get_expenses_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let text = html.html();
        assert!(text.contains("Coffee Shop"));
        assert!(text.contains("$10.50"));
        assert!(!text.contains("Salary"));
    }

    #[tokio::test]
    async fn category_selector_marks_current_assignment() {
        let (state, _temp_dir) = get_test_state(Some(test_transaction_set()));

        let response = get_expenses_page(State(state)).await.unwrap();
        let html = parse_html_document(response).await;

        let selected = scraper::Selector::parse("option[selected]").unwrap();
        let selected_values: Vec<_> = html
            .select(&selected)
            .filter_map(|option| option.value().attr("value"))
            .collect();

        assert_eq!(selected_values, vec!["Food"]);
    }

    #[tokio::test]
    async fn shows_upload_prompt_when_no_statement_is_loaded() {
        let (state, _temp_dir) = get_test_state(None);

        let response = get_expenses_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert!(html.html().contains("Upload"));
    }
}
