//! The expense trends page: monthly expense charts built from the debit rows.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{
            aggregate_by_month, format_month_labels, get_sorted_months, monthly_totals_by_category,
            monthly_values,
        },
        charts::{
            DashboardChart, ECHARTS_SCRIPT_URL, charts_script, charts_view,
            monthly_expenses_by_category_chart, monthly_expenses_chart,
        },
        no_data_view,
    },
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    statement::{Transaction, TransactionSet},
};

/// The state needed for displaying the trends page.
#[derive(Debug, Clone)]
pub struct TrendsPageState {
    /// The loaded transactions.
    pub transactions: Arc<Mutex<Option<TransactionSet>>>,
}

impl FromRef<AppState> for TrendsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
        }
    }
}

/// Display monthly expense trends, overall and per category.
pub async fn get_trends_page(State(state): State<TrendsPageState>) -> Result<Response, Error> {
    let transactions = state
        .transactions
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire state lock: {error}"))
        .map_err(|_| Error::StateLock)?;

    let Some(transaction_set) = transactions.as_ref() else {
        return Ok(no_data_view(endpoints::TRENDS_VIEW, "Trends").into_response());
    };

    let debits: Vec<Transaction> = transaction_set
        .debits()
        .map(|(_, transaction)| transaction.clone())
        .collect();
    drop(transactions);

    Ok(trends_view(&debits).into_response())
}

fn trends_view(debits: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRENDS_VIEW).into_html();

    let sorted_months = get_sorted_months(debits.iter());
    let labels = format_month_labels(&sorted_months);
    let totals = monthly_values(&aggregate_by_month(debits.iter()), &sorted_months);
    let by_category = monthly_totals_by_category(debits.iter(), &sorted_months);

    let charts = [
        DashboardChart {
            id: "monthly-expenses-chart",
            options: monthly_expenses_chart(labels.clone(), totals).to_string(),
        },
        DashboardChart {
            id: "monthly-expenses-by-category-chart",
            options: monthly_expenses_by_category_chart(labels, by_category).to_string(),
        },
    ];

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-8"
            {
                h1 class="text-xl font-bold" { "Expense Trends Over Time" }

                (charts_view(&charts))
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        charts_script(&charts),
    ];

    base("Trends", &scripts, &content)
}

#[cfg(test)]
mod trends_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use time::macros::date;

    use crate::{
        statement::{Direction, Transaction, TransactionSet},
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{TrendsPageState, get_trends_page};

    #[tokio::test]
    async fn renders_charts_for_loaded_statement() {
        let state = TrendsPageState {
            transactions: Arc::new(Mutex::new(Some(TransactionSet::new(vec![
                Transaction {
                    date: date!(2024 - 01 - 01),
                    details: "Coffee Shop".to_string(),
                    amount: 10.50,
                    direction: Direction::Debit,
                    category: "Food".to_string(),
                },
                Transaction {
                    date: date!(2024 - 02 - 10),
                    details: "Groceries".to_string(),
                    amount: 55.00,
                    direction: Direction::Debit,
                    category: "Food".to_string(),
                },
            ])))),
        };

        let response = get_trends_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let text = html.html();
        assert!(text.contains("monthly-expenses-chart"));
        assert!(text.contains("monthly-expenses-by-category-chart"));
        assert!(text.contains("Jan 2024"));
    }

    #[tokio::test]
    async fn shows_upload_prompt_when_no_statement_is_loaded() {
        let state = TrendsPageState {
            transactions: Arc::new(Mutex::new(None)),
        };

        let response = get_trends_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert!(html.html().contains("Upload"));
    }
}
