//! Uploading and parsing CSV bank statements.

mod csv;
mod import_endpoint;
mod import_page;
mod models;

pub use csv::parse_statement_csv;
pub use import_endpoint::import_statement;
pub use import_page::get_import_page;
pub use models::{DATE_FORMAT, Direction, Transaction, TransactionSet};
