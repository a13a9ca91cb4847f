//! The endpoint for importing transactions from uploaded CSV files.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Multipart, State, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error,
    alert::Alert,
    category::{CategoryStore, categorize},
    endpoints,
    statement::{TransactionSet, csv::parse_statement_csv},
};

/// The state needed for importing transactions.
#[derive(Debug, Clone)]
pub struct ImportState {
    /// The category store used to categorize the parsed rows.
    pub category_store: Arc<Mutex<CategoryStore>>,
    /// The slot the new transaction set replaces.
    pub transactions: Arc<Mutex<Option<TransactionSet>>>,
}

impl FromRef<AppState> for ImportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_store: state.category_store.clone(),
            transactions: state.transactions.clone(),
        }
    }
}

/// Route handler for importing transactions from CSV files.
///
/// Parses the uploaded files, categorizes every row against the category
/// store, and replaces the loaded transaction set. A parse failure in any
/// file rejects the whole upload; the previously loaded set stays in place.
pub async fn import_statement(
    State(state): State<ImportState>,
    mut multipart: Multipart,
) -> Result<Response, Response> {
    let mut transactions = Vec::new();
    let mut file_count = 0;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(error) => {
                tracing::error!("Could not read multipart form field: {error}");
                return Err(Error::MultipartError(error.to_string()).into_alert_response());
            }
        };

        let csv_data = parse_multipart_field(field)
            .await
            .map_err(|error| match error {
                Error::NotCsv => (
                    StatusCode::BAD_REQUEST,
                    Alert::ErrorSimple {
                        message: "File type must be CSV.".to_owned(),
                    }
                    .into_html(),
                )
                    .into_response(),
                error => {
                    tracing::error!("Failed to parse multipart field: {}", error);
                    error.into_alert_response()
                }
            })?;

        transactions.extend(parse_statement_csv(&csv_data).map_err(|error| {
            tracing::debug!("Failed to parse CSV: {}", error);

            (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Failed to parse CSV".to_owned(),
                    details: error.to_string(),
                }
                .into_html(),
            )
                .into_response()
        })?);

        file_count += 1;
    }

    let store = state.category_store.lock().map_err(|error| {
        tracing::error!("could not acquire state lock: {error}");
        Error::StateLock.into_alert_response()
    })?;

    categorize(&mut transactions, &store);
    drop(store);

    let transaction_count = transactions.len();

    let mut loaded = state.transactions.lock().map_err(|error| {
        tracing::error!("could not acquire state lock: {error}");
        Error::StateLock.into_alert_response()
    })?;
    *loaded = Some(TransactionSet::new(transactions));

    tracing::info!(
        "Imported {transaction_count} transactions from {file_count} file(s)"
    );

    Ok((
        HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response())
}

async fn parse_multipart_field(field: Field<'_>) -> Result<String, Error> {
    if field.content_type() != Some("text/csv") {
        return Err(Error::NotCsv);
    }

    field.text().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("Could not read data from multipart form field.".to_owned())
    })
}
