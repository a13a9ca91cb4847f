//! Transaction data aggregation and transformation for tables and charts.

use std::collections::{HashMap, HashSet};

use time::Date;

use crate::{category::UNCATEGORIZED, statement::Transaction};

/// Sums amounts per category, sorted by total descending.
///
/// Ties are broken by category name so the output is deterministic.
pub(super) fn category_totals<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions {
        *totals.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
    }

    let mut totals: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(category, total)| (category.to_string(), total))
        .collect();

    totals.sort_by(|(name_a, total_a), (name_b, total_b)| {
        total_b
            .total_cmp(total_a)
            .then_with(|| name_a.cmp(name_b))
    });

    totals
}

/// Sums amounts over an iterator of transactions.
pub(super) fn total_amount<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> f64 {
    transactions.map(|transaction| transaction.amount).sum()
}

/// Aggregates transaction amounts by month.
///
/// Returns a map from each month (as a `Date` with day=1) to the sum of
/// transaction amounts in that month.
pub(super) fn aggregate_by_month<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
) -> HashMap<Date, f64> {
    let mut totals = HashMap::new();

    for transaction in transactions {
        let month = transaction.date.replace_day(1).unwrap();
        *totals.entry(month).or_insert(0.0) += transaction.amount;
    }

    totals
}

/// Extracts unique months from transactions and returns them in chronological order.
pub(super) fn get_sorted_months<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
) -> Vec<Date> {
    let mut months = HashSet::new();

    for transaction in transactions {
        let month = transaction.date.replace_day(1).unwrap();
        months.insert(month);
    }

    let mut sorted: Vec<_> = months.into_iter().collect();
    sorted.sort();
    sorted
}

/// Formats months as labels like "Jan 2024".
pub(super) fn format_month_labels(months: &[Date]) -> Vec<String> {
    use time::Month;

    let month_to_str = |date: &Date| {
        let month = match date.month() {
            Month::January => "Jan",
            Month::February => "Feb",
            Month::March => "Mar",
            Month::April => "Apr",
            Month::May => "May",
            Month::June => "Jun",
            Month::July => "Jul",
            Month::August => "Aug",
            Month::September => "Sep",
            Month::October => "Oct",
            Month::November => "Nov",
            Month::December => "Dec",
        };

        format!("{month} {}", date.year())
    };

    months.iter().map(month_to_str).collect()
}

/// Monthly totals in the order of `sorted_months`, with 0.0 for months that
/// have no transactions.
pub(super) fn monthly_values(
    monthly_totals: &HashMap<Date, f64>,
    sorted_months: &[Date],
) -> Vec<f64> {
    sorted_months
        .iter()
        .map(|month| monthly_totals.get(month).copied().unwrap_or(0.0))
        .collect()
}

/// Groups transactions by category and calculates monthly totals for each.
///
/// Returns one `(category, monthly_values)` entry per category with at least
/// one transaction, sorted by name with "Uncategorized" last. Each value list
/// has one entry per month in `sorted_months`.
pub(super) fn monthly_totals_by_category<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
    sorted_months: &[Date],
) -> Vec<(String, Vec<f64>)> {
    let mut transactions_by_category: HashMap<&str, Vec<&Transaction>> = HashMap::new();

    for transaction in transactions {
        transactions_by_category
            .entry(transaction.category.as_str())
            .or_default()
            .push(transaction);
    }

    let mut sorted_categories: Vec<&str> = transactions_by_category
        .keys()
        .copied()
        .filter(|&category| category != UNCATEGORIZED)
        .collect();
    sorted_categories.sort();

    if transactions_by_category.contains_key(UNCATEGORIZED) {
        sorted_categories.push(UNCATEGORIZED);
    }

    sorted_categories
        .into_iter()
        .map(|category| {
            let monthly_totals = aggregate_by_month(
                transactions_by_category[category].iter().copied(),
            );

            (
                category.to_owned(),
                monthly_values(&monthly_totals, sorted_months),
            )
        })
        .collect()
}
