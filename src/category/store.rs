//! The category store: an ordered mapping from category name to keyword list,
//! persisted as a single JSON object.
//!
//! The store is loaded once at startup and rewritten in full after every
//! successful mutation, so a restart always sees the latest state. Iteration
//! order is insertion order, which the categorizer relies on for its
//! deterministic last-match-wins tie-break.

use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::{
    Error,
    category::domain::{CategoryName, UNCATEGORIZED},
};

/// One category and its keyword list.
#[derive(Debug, Clone, PartialEq)]
struct CategoryEntry {
    name: String,
    keywords: Vec<String>,
}

/// An insertion-ordered mapping from category name to keyword list.
///
/// Serialized as a JSON object so the persisted file reads as
/// `{"Uncategorized": [], "Food": ["coffee shop"]}`. A `Vec` backs the map
/// because the categorizer's tie-break depends on insertion order, which the
/// standard map types do not preserve.
#[derive(Debug, Clone, PartialEq, Default)]
struct CategoryMap(Vec<CategoryEntry>);

impl Serialize for CategoryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for entry in &self.0 {
            map.serialize_entry(&entry.name, &entry.keywords)?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoryMapVisitor;

        impl<'de> Visitor<'de> for CategoryMapVisitor {
            type Value = CategoryMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category names to keyword lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<CategoryEntry> = Vec::new();

                while let Some((name, keywords)) = access.next_entry::<String, Vec<String>>()? {
                    // A duplicate key keeps its original position but takes
                    // the later keyword list, matching JSON object semantics.
                    match entries.iter_mut().find(|entry| entry.name == name) {
                        Some(entry) => entry.keywords = keywords,
                        None => entries.push(CategoryEntry { name, keywords }),
                    }
                }

                Ok(CategoryMap(entries))
            }
        }

        deserializer.deserialize_map(CategoryMapVisitor)
    }
}

/// The session-wide mapping from category name to keyword list.
///
/// All mutations persist synchronously: a mutation either fully succeeds
/// (in-memory change plus file write) or is fully rejected with the in-memory
/// state unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStore {
    path: PathBuf,
    categories: CategoryMap,
}

impl CategoryStore {
    /// Load the store persisted at `path`.
    ///
    /// A missing or unreadable file is not an error: the store falls back to
    /// the default single-entry mapping `{"Uncategorized": []}`. The reserved
    /// [UNCATEGORIZED] category is guaranteed to exist after loading.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let categories = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<CategoryMap>(&text) {
                Ok(categories) => categories,
                Err(error) => {
                    tracing::warn!(
                        "Could not parse category store {}, starting from the default store: {error}",
                        path.display()
                    );
                    CategoryMap::default()
                }
            },
            Err(error) => {
                tracing::debug!(
                    "Could not read category store {}, starting from the default store: {error}",
                    path.display()
                );
                CategoryMap::default()
            }
        };

        let mut store = Self { path, categories };
        store.ensure_uncategorized();
        store
    }

    /// The file the store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The category names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.0.iter().map(|entry| entry.name.as_str())
    }

    /// The name/keyword-list pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .0
            .iter()
            .map(|entry| (entry.name.as_str(), entry.keywords.as_slice()))
    }

    /// Whether a category with the exact `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.categories.0.iter().any(|entry| entry.name == name)
    }

    /// The keyword list for `name`, if the category exists.
    pub fn keywords(&self, name: &str) -> Option<&[String]> {
        self.categories
            .0
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.keywords.as_slice())
    }

    /// Add a category with an empty keyword list and persist the store.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyCategoryName] for a name that is empty after
    /// trimming, [Error::DuplicateCategory] if the name is already in the
    /// store, and [Error::StoreSave] if the store could not be written.
    pub fn add_category(&mut self, name: &str) -> Result<(), Error> {
        let name = CategoryName::new(name)?;

        if self.contains(name.as_ref()) {
            return Err(Error::DuplicateCategory(name.to_string()));
        }

        let mut categories = self.categories.clone();
        categories.0.push(CategoryEntry {
            name: name.to_string(),
            keywords: Vec::new(),
        });

        self.commit(categories)
    }

    /// Remove a category and persist the store.
    ///
    /// Transactions already assigned to the category are not touched here;
    /// the caller re-runs the categorizer over any loaded set so those rows
    /// demote to [UNCATEGORIZED].
    ///
    /// # Errors
    ///
    /// Returns [Error::ReservedCategory] for [UNCATEGORIZED],
    /// [Error::UnknownCategory] if the name is not in the store, and
    /// [Error::StoreSave] if the store could not be written.
    pub fn delete_category(&mut self, name: &str) -> Result<(), Error> {
        if name == UNCATEGORIZED {
            return Err(Error::ReservedCategory);
        }

        if !self.contains(name) {
            return Err(Error::UnknownCategory(name.to_string()));
        }

        let mut categories = self.categories.clone();
        categories.0.retain(|entry| entry.name != name);

        self.commit(categories)
    }

    /// Append a keyword to a category's list and persist the store.
    ///
    /// The keyword is trimmed before it is stored. Presence is checked
    /// case-insensitively on trimmed values, matching how the categorizer
    /// compares keywords.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyKeyword] for a keyword that is empty after
    /// trimming, [Error::UnknownCategory] if the category is not in the
    /// store, [Error::DuplicateKeyword] if the keyword is already present,
    /// and [Error::StoreSave] if the store could not be written.
    pub fn add_keyword(&mut self, category: &str, keyword: &str) -> Result<(), Error> {
        let keyword = keyword.trim();

        if keyword.is_empty() {
            return Err(Error::EmptyKeyword);
        }

        let index = self
            .categories
            .0
            .iter()
            .position(|entry| entry.name == category)
            .ok_or_else(|| Error::UnknownCategory(category.to_string()))?;

        let already_present = self.categories.0[index]
            .keywords
            .iter()
            .any(|existing| existing.trim().eq_ignore_ascii_case(keyword));

        if already_present {
            return Err(Error::DuplicateKeyword(keyword.to_string()));
        }

        let mut categories = self.categories.clone();
        categories.0[index].keywords.push(keyword.to_string());

        self.commit(categories)
    }

    /// Remove a literal keyword from a category's list and persist the store.
    ///
    /// Removing a keyword that is absent (or a category that does not exist)
    /// is a no-op success, so callers never need to check first.
    ///
    /// # Errors
    ///
    /// Returns [Error::StoreSave] if the store could not be written.
    pub fn remove_keyword(&mut self, category: &str, keyword: &str) -> Result<(), Error> {
        let Some(index) = self
            .categories
            .0
            .iter()
            .position(|entry| entry.name == category)
        else {
            return Ok(());
        };

        if !self.categories.0[index]
            .keywords
            .iter()
            .any(|existing| existing == keyword)
        {
            return Ok(());
        }

        let mut categories = self.categories.clone();
        categories.0[index].keywords.retain(|k| k != keyword);

        self.commit(categories)
    }

    /// Serialize the full mapping and rewrite the store file.
    ///
    /// # Errors
    ///
    /// Returns [Error::StoreSave] if serialization or the file write fails.
    pub fn save(&self) -> Result<(), Error> {
        let text = serde_json::to_string(&self.categories)
            .map_err(|error| Error::StoreSave(error.to_string()))?;

        fs::write(&self.path, text).map_err(|error| Error::StoreSave(error.to_string()))
    }

    /// Swap in `categories` and persist, rolling back on a failed write.
    fn commit(&mut self, categories: CategoryMap) -> Result<(), Error> {
        let previous = std::mem::replace(&mut self.categories, categories);

        if let Err(error) = self.save() {
            self.categories = previous;
            return Err(error);
        }

        Ok(())
    }

    fn ensure_uncategorized(&mut self) {
        if !self.contains(UNCATEGORIZED) {
            self.categories.0.insert(
                0,
                CategoryEntry {
                    name: UNCATEGORIZED.to_string(),
                    keywords: Vec::new(),
                },
            );
        }
    }
}

#[cfg(test)]
mod category_store_tests {
    use tempfile::TempDir;

    use crate::{Error, category::domain::UNCATEGORIZED};

    use super::CategoryStore;

    fn get_test_store() -> (CategoryStore, TempDir) {
        let temp_dir = TempDir::new().expect("Could not create temp dir");
        let store = CategoryStore::load(temp_dir.path().join("categories.json"));

        (store, temp_dir)
    }

    #[test]
    fn missing_file_falls_back_to_default_store() {
        let (store, _temp_dir) = get_test_store();

        assert_eq!(store.names().collect::<Vec<_>>(), vec![UNCATEGORIZED]);
        assert_eq!(store.keywords(UNCATEGORIZED), Some(&[] as &[String]));
    }

    #[test]
    fn unreadable_file_falls_back_to_default_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        std::fs::write(&path, "not json {").unwrap();

        let store = CategoryStore::load(&path);

        assert_eq!(store.names().collect::<Vec<_>>(), vec![UNCATEGORIZED]);
    }

    #[test]
    fn add_category_inserts_in_order() {
        let (mut store, _temp_dir) = get_test_store();

        store.add_category("Food").unwrap();
        store.add_category("Drinks").unwrap();

        assert_eq!(
            store.names().collect::<Vec<_>>(),
            vec![UNCATEGORIZED, "Food", "Drinks"]
        );
    }

    #[test]
    fn add_category_rejects_duplicate() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();

        let result = store.add_category("Food");

        assert_eq!(result, Err(Error::DuplicateCategory("Food".to_string())));
    }

    #[test]
    fn add_category_rejects_reserved_name_and_leaves_store_unchanged() {
        let (mut store, _temp_dir) = get_test_store();
        let before = store.clone();

        let result = store.add_category(UNCATEGORIZED);

        assert_eq!(
            result,
            Err(Error::DuplicateCategory(UNCATEGORIZED.to_string()))
        );
        assert_eq!(store, before);
    }

    #[test]
    fn add_category_rejects_empty_name() {
        let (mut store, _temp_dir) = get_test_store();

        assert_eq!(store.add_category("  "), Err(Error::EmptyCategoryName));
    }

    #[test]
    fn delete_category_rejects_reserved_category() {
        let (mut store, _temp_dir) = get_test_store();

        assert_eq!(
            store.delete_category(UNCATEGORIZED),
            Err(Error::ReservedCategory)
        );
    }

    #[test]
    fn delete_category_rejects_unknown_category() {
        let (mut store, _temp_dir) = get_test_store();

        assert_eq!(
            store.delete_category("Food"),
            Err(Error::UnknownCategory("Food".to_string()))
        );
    }

    #[test]
    fn delete_category_removes_entry() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();

        store.delete_category("Food").unwrap();

        assert!(!store.contains("Food"));
    }

    #[test]
    fn add_keyword_trims_and_appends() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();

        store.add_keyword("Food", "  coffee shop  ").unwrap();

        assert_eq!(
            store.keywords("Food"),
            Some(&["coffee shop".to_string()] as &[String])
        );
    }

    #[test]
    fn add_keyword_rejects_empty_keyword() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();

        assert_eq!(store.add_keyword("Food", "   "), Err(Error::EmptyKeyword));
    }

    #[test]
    fn add_keyword_rejects_duplicate_ignoring_case() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();
        store.add_keyword("Food", "coffee shop").unwrap();

        let result = store.add_keyword("Food", "Coffee Shop");

        assert_eq!(
            result,
            Err(Error::DuplicateKeyword("Coffee Shop".to_string()))
        );
    }

    #[test]
    fn add_keyword_rejects_unknown_category() {
        let (mut store, _temp_dir) = get_test_store();

        assert_eq!(
            store.add_keyword("Food", "coffee shop"),
            Err(Error::UnknownCategory("Food".to_string()))
        );
    }

    #[test]
    fn remove_keyword_removes_literal_keyword() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();
        store.add_keyword("Food", "coffee shop").unwrap();

        store.remove_keyword("Food", "coffee shop").unwrap();

        assert_eq!(store.keywords("Food"), Some(&[] as &[String]));
    }

    #[test]
    fn remove_keyword_of_absent_keyword_is_a_no_op() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();
        let before = store.clone();

        let result = store.remove_keyword("Food", "coffee shop");

        assert_eq!(result, Ok(()));
        assert_eq!(store, before);
    }

    #[test]
    fn remove_keyword_of_unknown_category_is_a_no_op() {
        let (mut store, _temp_dir) = get_test_store();

        assert_eq!(store.remove_keyword("Food", "coffee shop"), Ok(()));
    }

    #[test]
    fn save_then_load_round_trips_the_store() {
        let (mut store, _temp_dir) = get_test_store();
        store.add_category("Food").unwrap();
        store.add_category("Drinks").unwrap();
        store.add_keyword("Food", "coffee shop").unwrap();
        store.add_keyword("Drinks", "brewery").unwrap();

        let reloaded = CategoryStore::load(store.path());

        assert_eq!(reloaded, store);
        assert_eq!(
            reloaded.names().collect::<Vec<_>>(),
            vec![UNCATEGORIZED, "Food", "Drinks"]
        );
    }

    #[test]
    fn load_preserves_file_order_and_inserts_missing_uncategorized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        std::fs::write(&path, r#"{"Food": ["coffee shop"], "Drinks": []}"#).unwrap();

        let store = CategoryStore::load(&path);

        assert_eq!(
            store.names().collect::<Vec<_>>(),
            vec![UNCATEGORIZED, "Food", "Drinks"]
        );
    }
}
