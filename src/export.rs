//! The spreadsheet export of the loaded, categorized transactions.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use rust_xlsxwriter::Workbook;

use crate::{AppState, Error, statement::TransactionSet};

/// The MIME type for `.xlsx` spreadsheets.
const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// The fixed filename the browser saves the export as.
const EXPORT_FILENAME: &str = "categorized_transactions.xlsx";

const COLUMN_HEADERS: [&str; 5] = ["Date", "Details", "Amount", "Debit/Credit", "Category"];

/// The state needed for exporting transactions.
#[derive(Debug, Clone)]
pub struct ExportState {
    /// The loaded transactions.
    pub transactions: Arc<Mutex<Option<TransactionSet>>>,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
        }
    }
}

/// Route handler for downloading the loaded transactions as a single-sheet
/// `.xlsx` file.
pub async fn export_transactions(State(state): State<ExportState>) -> Result<Response, Error> {
    let transactions = state
        .transactions
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire state lock: {error}"))
        .map_err(|_| Error::StateLock)?;

    let transaction_set = transactions.as_ref().ok_or(Error::NoTransactions)?;

    let buffer = write_workbook(transaction_set)
        .inspect_err(|error| tracing::error!("Could not generate spreadsheet: {error}"))?;

    tracing::info!(
        "Exported {} transactions to {EXPORT_FILENAME}",
        transaction_set.len()
    );

    Ok((
        [
            (CONTENT_TYPE, XLSX_MIME_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        buffer,
    )
        .into_response())
}

fn write_workbook(transaction_set: &TransactionSet) -> Result<Vec<u8>, Error> {
    let export_error = |error: rust_xlsxwriter::XlsxError| Error::ExportFailed(error.to_string());

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Expenses").map_err(export_error)?;

    for (column, header) in COLUMN_HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, column as u16, *header)
            .map_err(export_error)?;
    }

    for (index, transaction) in transaction_set.all().iter().enumerate() {
        let row = index as u32 + 1;

        worksheet
            .write_string(row, 0, transaction.date_string())
            .map_err(export_error)?;
        worksheet
            .write_string(row, 1, &transaction.details)
            .map_err(export_error)?;
        worksheet
            .write_number(row, 2, transaction.amount)
            .map_err(export_error)?;
        worksheet
            .write_string(row, 3, transaction.direction.to_string())
            .map_err(export_error)?;
        worksheet
            .write_string(row, 4, &transaction.category)
            .map_err(export_error)?;
    }

    workbook.save_to_buffer().map_err(export_error)
}

#[cfg(test)]
mod export_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use time::macros::date;

    use crate::{
        Error,
        statement::{Direction, Transaction, TransactionSet},
        test_utils::get_header,
    };

    use super::{ExportState, export_transactions};

    fn get_test_state() -> ExportState {
        ExportState {
            transactions: Arc::new(Mutex::new(Some(TransactionSet::new(vec![Transaction {
                date: date!(2024 - 01 - 01),
                details: "Coffee Shop".to_string(),
                amount: 10.50,
                direction: Direction::Debit,
                category: "Food".to_string(),
            }])))),
        }
    }

    #[tokio::test]
    async fn export_produces_xlsx_download() {
        let state = get_test_state();

        let response = export_transactions(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            get_header(&response, "content-type"),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(
            get_header(&response, "content-disposition"),
            "attachment; filename=\"categorized_transactions.xlsx\""
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        // XLSX files are ZIP archives, which start with "PK".
        assert!(body.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn export_without_transactions_fails() {
        let state = ExportState {
            transactions: Arc::new(Mutex::new(None)),
        };

        let result = export_transactions(State(state)).await;

        assert!(matches!(result, Err(Error::NoTransactions)));
    }
}
