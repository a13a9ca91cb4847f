//! The payments (credits) page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    dashboard::{aggregation::total_amount, no_data_view},
    endpoints,
    html::{
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency,
    },
    navigation::NavBar,
    statement::{Transaction, TransactionSet},
};

/// The state needed for displaying the payments page.
#[derive(Debug, Clone)]
pub struct PaymentsPageState {
    /// The loaded transactions.
    pub transactions: Arc<Mutex<Option<TransactionSet>>>,
}

impl FromRef<AppState> for PaymentsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
        }
    }
}

/// Display the credit transactions and their total.
pub async fn get_payments_page(State(state): State<PaymentsPageState>) -> Result<Response, Error> {
    let transactions = state
        .transactions
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire state lock: {error}"))
        .map_err(|_| Error::StateLock)?;

    let Some(transaction_set) = transactions.as_ref() else {
        return Ok(no_data_view(endpoints::PAYMENTS_VIEW, "Payments").into_response());
    };

    let credits: Vec<Transaction> = transaction_set
        .credits()
        .map(|(_, transaction)| transaction.clone())
        .collect();
    drop(transactions);

    let total = total_amount(credits.iter());

    Ok(payments_view(&credits, total).into_response())
}

fn payments_view(credits: &[Transaction], total: f64) -> Markup {
    let nav_bar = NavBar::new(endpoints::PAYMENTS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-8"
            {
                h1 class="text-xl font-bold" { "Payment Summary" }

                div class="bg-white dark:bg-gray-800 rounded-lg shadow p-6 max-w-xs"
                {
                    p class="text-sm text-gray-500 dark:text-gray-400" { "Total Payments" }

                    p class="text-3xl font-bold" { (format_currency(total)) }
                }

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
                            }
                        }

                        tbody
                        {
                            @for transaction in credits {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td class=(TABLE_CELL_STYLE) { (transaction.date_string()) }
                                    td class=(TABLE_CELL_STYLE) { (transaction.details) }
                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        (format_currency(transaction.amount))
                                    }
                                }
                            }

                            @if credits.is_empty() {
                                tr
                                {
                                    td
                                        colspan="3"
                                        class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                    {
                                        "No credit transactions in the uploaded statement."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Payments", &[], &content)
}
