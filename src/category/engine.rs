//! The auto-categorization engine.
//!
//! Assigns every transaction a category by exact, case-insensitive match of
//! its details against each category's keyword list.

use std::collections::HashSet;

use crate::{
    category::{domain::UNCATEGORIZED, store::CategoryStore},
    statement::Transaction,
};

/// Set every transaction's category from the store's keyword lists.
///
/// Every row starts as [UNCATEGORIZED]. Categories are then scanned in the
/// store's insertion order, skipping [UNCATEGORIZED] and categories with no
/// keywords; a row whose trimmed, case-folded details appear in a category's
/// keyword list takes that category's name.
///
/// When a row's details match keywords in more than one category, the **last
/// matching category in insertion order wins**: later categories overwrite
/// earlier assignments. This tie-break is deliberate and the tests depend on
/// it.
///
/// The store is never mutated, and the result depends only on `transactions`
/// and `store`, so repeated calls with the same store are idempotent.
pub fn categorize(transactions: &mut [Transaction], store: &CategoryStore) {
    for transaction in transactions.iter_mut() {
        transaction.category = UNCATEGORIZED.to_string();
    }

    for (name, keywords) in store.iter() {
        if name == UNCATEGORIZED || keywords.is_empty() {
            continue;
        }

        let lowered_keywords: HashSet<String> = keywords
            .iter()
            .map(|keyword| keyword.trim().to_lowercase())
            .collect();

        for transaction in transactions.iter_mut() {
            let details = transaction.details.trim().to_lowercase();

            if lowered_keywords.contains(&details) {
                transaction.category = name.to_string();
            }
        }
    }
}

#[cfg(test)]
mod categorize_tests {
    use tempfile::TempDir;
    use time::macros::date;

    use crate::{
        category::{UNCATEGORIZED, store::CategoryStore},
        statement::{Direction, Transaction},
    };

    use super::categorize;

    fn get_test_store() -> (CategoryStore, TempDir) {
        let temp_dir = TempDir::new().expect("Could not create temp dir");
        let store = CategoryStore::load(temp_dir.path().join("categories.json"));

        (store, temp_dir)
    }

    fn test_transaction(details: &str) -> Transaction {
        Transaction {
            date: date!(2024 - 01 - 01),
            details: details.to_string(),
            amount: 10.5,
            direction: Direction::Debit,
            category: UNCATEGORIZED.to_string(),
        }
    }

    #[test]
    fn assigns_matching_category() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();
        store.add_keyword("Food", "coffee shop").unwrap();
        let mut transactions = vec![test_transaction("Coffee Shop")];

        categorize(&mut transactions, &store);

        assert_eq!(transactions[0].category, "Food");
    }

    #[test]
    fn unmatched_rows_fall_back_to_uncategorized() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();
        store.add_keyword("Food", "coffee shop").unwrap();
        let mut transactions = vec![test_transaction("petrol station")];

        categorize(&mut transactions, &store);

        assert_eq!(transactions[0].category, UNCATEGORIZED);
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();
        store.add_keyword("Food", "Coffee Shop").unwrap();
        let mut transactions = vec![test_transaction("  COFFEE SHOP  ")];

        categorize(&mut transactions, &store);

        assert_eq!(transactions[0].category, "Food");
    }

    #[test]
    fn matching_is_exact_not_substring() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();
        store.add_keyword("Food", "coffee").unwrap();
        let mut transactions = vec![test_transaction("coffee shop")];

        categorize(&mut transactions, &store);

        assert_eq!(transactions[0].category, UNCATEGORIZED);
    }

    #[test]
    fn last_matching_category_in_insertion_order_wins() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();
        store.add_category("Drinks").unwrap();
        store.add_keyword("Food", "coffee shop").unwrap();
        store.add_keyword("Drinks", "coffee shop").unwrap();
        let mut transactions = vec![test_transaction("Coffee Shop")];

        categorize(&mut transactions, &store);

        assert_eq!(transactions[0].category, "Drinks");
    }

    #[test]
    fn categorize_is_idempotent() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();
        store.add_category("Drinks").unwrap();
        store.add_keyword("Food", "coffee shop").unwrap();
        store.add_keyword("Drinks", "brewery").unwrap();
        let mut transactions = vec![
            test_transaction("coffee shop"),
            test_transaction("brewery"),
            test_transaction("petrol station"),
        ];

        categorize(&mut transactions, &store);
        let first_pass = transactions.clone();

        categorize(&mut transactions, &store);

        assert_eq!(transactions, first_pass);
    }

    #[test]
    fn deleting_a_category_demotes_its_rows_on_recategorize() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();
        store.add_keyword("Food", "coffee shop").unwrap();
        let mut transactions = vec![test_transaction("coffee shop")];
        categorize(&mut transactions, &store);
        assert_eq!(transactions[0].category, "Food");

        store.delete_category("Food").unwrap();
        categorize(&mut transactions, &store);

        assert_eq!(transactions[0].category, UNCATEGORIZED);
        assert!(
            transactions
                .iter()
                .all(|transaction| transaction.category != "Food")
        );
    }

    #[test]
    fn uncategorized_keywords_are_never_matched() {
        // The reserved category's keyword list is conventionally empty, but a
        // hand-edited store file could put keywords there.
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        std::fs::write(&path, r#"{"Uncategorized": ["coffee shop"]}"#).unwrap();
        let store = CategoryStore::load(&path);
        let mut transactions = vec![test_transaction("coffee shop")];

        categorize(&mut transactions, &store);

        assert_eq!(transactions[0].category, UNCATEGORIZED);
    }
}
