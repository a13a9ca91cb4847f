//! Category management: the keyword dictionary, the auto-categorization
//! engine, and the endpoints and pages for maintaining both.

mod create;
mod delete;
mod domain;
mod engine;
mod keywords;
mod manage_page;
mod store;

pub use create::create_category_endpoint;
pub use delete::delete_category_endpoint;
pub use domain::{CategoryName, UNCATEGORIZED};
pub use engine::categorize;
pub use keywords::{add_keyword_endpoint, remove_keyword_endpoint};
pub use manage_page::get_categories_page;
pub use store::CategoryStore;
