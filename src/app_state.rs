//! Implements a struct that holds the state of the REST server.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use crate::{category::CategoryStore, statement::TransactionSet};

/// The state of the REST server.
///
/// Holds the session-wide category store and the currently loaded statement,
/// if any. Both are behind mutexes because axum handlers run concurrently,
/// but each operation locks, completes, and releases before responding —
/// there is no cross-request coordination.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The mapping from category name to keyword list, persisted to disk on
    /// every mutation.
    pub category_store: Arc<Mutex<CategoryStore>>,

    /// The transactions from the most recent upload. `None` until the first
    /// statement is uploaded; replaced wholesale by each new upload.
    pub transactions: Arc<Mutex<Option<TransactionSet>>>,
}

impl AppState {
    /// Create a new [AppState], loading the category store persisted at
    /// `store_path` (or the default store if no file exists there yet).
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            category_store: Arc::new(Mutex::new(CategoryStore::load(store_path))),
            transactions: Arc::new(Mutex::new(None)),
        }
    }
}
