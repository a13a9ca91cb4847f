//! Parses an uploaded CSV bank statement into transactions.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    category::UNCATEGORIZED,
    statement::models::{Direction, Transaction},
};

const DATE_COLUMN: &str = "Date";
const DETAILS_COLUMN: &str = "Details";
const AMOUNT_COLUMN: &str = "Amount";
const DIRECTION_COLUMN: &str = "Debit/Credit";

/// Parses CSV data from an uploaded bank statement.
///
/// Expects `text` to contain a header row with (at least) the columns
/// `Date`, `Details`, `Amount`, and `Debit/Credit`. Header names are trimmed
/// of surrounding whitespace before matching. Dates use the `DD-Mon-YY`
/// format (e.g. `05-Jan-24`) and amounts may contain comma thousands
/// separators.
///
/// Returns the parsed transactions in statement order, each with its
/// category initialized to `Uncategorized` (the caller categorizes them
/// before the set becomes visible). Returns [Error::InvalidCsv] on any
/// malformed row; no partial result is produced.
pub fn parse_statement_csv(text: &str) -> Result<Vec<Transaction>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| Error::InvalidCsv(format!("could not read the header row: {error}")))?
        .clone();

    let column_index = |name: &str| -> Result<usize, Error> {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| Error::InvalidCsv(format!("missing required column \"{name}\"")))
    };

    let date_index = column_index(DATE_COLUMN)?;
    let details_index = column_index(DETAILS_COLUMN)?;
    let amount_index = column_index(AMOUNT_COLUMN)?;
    let direction_index = column_index(DIRECTION_COLUMN)?;

    let mut transactions = Vec::new();

    for (record_number, record) in reader.records().enumerate() {
        // Row numbers are reported as the user sees them in a spreadsheet,
        // counting the header as row 1.
        let row = record_number + 2;

        let record =
            record.map_err(|error| Error::InvalidCsv(format!("row {row}: {error}")))?;

        let field = |index: usize, name: &str| -> Result<&str, Error> {
            record
                .get(index)
                .ok_or_else(|| Error::InvalidCsv(format!("row {row}: missing \"{name}\" field")))
        };

        let date = parse_statement_date(field(date_index, DATE_COLUMN)?)
            .map_err(|error| Error::InvalidCsv(format!("row {row}: {error}")))?;
        let details = field(details_index, DETAILS_COLUMN)?.to_string();
        let amount = parse_amount(field(amount_index, AMOUNT_COLUMN)?)
            .map_err(|error| Error::InvalidCsv(format!("row {row}: {error}")))?;
        let direction = parse_direction(field(direction_index, DIRECTION_COLUMN)?)
            .map_err(|error| Error::InvalidCsv(format!("row {row}: {error}")))?;

        transactions.push(Transaction {
            date,
            details,
            amount,
            direction,
            category: UNCATEGORIZED.to_string(),
        });
    }

    Ok(transactions)
}

/// Parses a `DD-Mon-YY` date such as `05-Jan-24`.
///
/// The `time` crate refuses to parse two-digit years on its own (the century
/// would be a guess), so the year is expanded to 20xx before parsing.
fn parse_statement_date(text: &str) -> Result<Date, String> {
    const EXPANDED_FORMAT: &[BorrowedFormatItem] =
        format_description!("[day]-[month repr:short]-[year]");

    let text = text.trim();
    let error = || format!("\"{text}\" is not a date in DD-Mon-YY format");

    let (day_month, year) = text.rsplit_once('-').ok_or_else(error)?;

    if year.len() != 2 || !year.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(error());
    }

    let expanded = format!("{day_month}-20{year}");

    Date::parse(&expanded, &EXPANDED_FORMAT).map_err(|_| error())
}

/// Parses an amount string, stripping comma thousands separators.
fn parse_amount(text: &str) -> Result<f64, String> {
    text.replace(',', "")
        .trim()
        .parse()
        .map_err(|_| format!("\"{text}\" is not a number"))
}

fn parse_direction(text: &str) -> Result<Direction, String> {
    match text {
        "Debit" => Ok(Direction::Debit),
        "Credit" => Ok(Direction::Credit),
        other => Err(format!(
            "\"{other}\" is not a transaction direction, expected \"Debit\" or \"Credit\""
        )),
    }
}
