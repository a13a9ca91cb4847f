//! Core transaction domain types for one uploaded bank statement.

use std::fmt::Display;

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// Whether a transaction is money going out (an expense) or coming in (a
/// payment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// An expense.
    Debit,
    /// An incoming payment.
    Credit,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Debit => write!(f, "Debit"),
            Direction::Credit => write!(f, "Credit"),
        }
    }
}

/// One row of an uploaded bank statement.
///
/// Transactions live only for the session: they are created by the CSV
/// loader, categorized immediately, and discarded when the next statement is
/// uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The calendar date of the transaction.
    pub date: Date,
    /// The free-text description from the bank statement.
    pub details: String,
    /// The transaction amount.
    pub amount: f64,
    /// Whether this row is a debit or a credit.
    pub direction: Direction,
    /// The assigned category name. Set by the categorizer at load time and
    /// by manual edits thereafter.
    pub category: String,
}

/// The format transaction dates are displayed in, e.g. `05-Jan-24`.
///
/// This matches the statement CSV date format so exported rows round-trip.
pub const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day]-[month repr:short]-[year repr:last_two]");

impl Transaction {
    /// The transaction date rendered as `DD-Mon-YY`.
    pub fn date_string(&self) -> String {
        self.date
            .format(&DATE_FORMAT)
            .unwrap_or_else(|_| self.date.to_string())
    }
}

/// The full ordered sequence of transactions from one uploaded statement.
///
/// The debit and credit subsets are views over the same rows; together they
/// partition the set exhaustively and disjointly.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSet {
    transactions: Vec<Transaction>,
}

impl TransactionSet {
    /// Wrap the parsed rows of one statement.
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// All rows in statement order.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Mutable access to all rows in statement order.
    pub fn all_mut(&mut self) -> &mut [Transaction] {
        &mut self.transactions
    }

    /// The debit (expense) rows, paired with their index in the full set.
    pub fn debits(&self) -> impl Iterator<Item = (usize, &Transaction)> {
        self.transactions
            .iter()
            .enumerate()
            .filter(|(_, transaction)| transaction.direction == Direction::Debit)
    }

    /// The credit (payment) rows, paired with their index in the full set.
    pub fn credits(&self) -> impl Iterator<Item = (usize, &Transaction)> {
        self.transactions
            .iter()
            .enumerate()
            .filter(|(_, transaction)| transaction.direction == Direction::Credit)
    }

    /// The row at `index`, if it exists.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Transaction> {
        self.transactions.get_mut(index)
    }

    /// The number of rows in the set.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the set has no rows.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
