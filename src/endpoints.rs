//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/categories/{name}', use
//! [format_endpoint].

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

/// The root route which redirects to the expenses page.
pub const ROOT: &str = "/";
/// The page listing debit transactions with their category assignments.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page summarizing credit transactions.
pub const PAYMENTS_VIEW: &str = "/payments";
/// The page with expense trends over time.
pub const TRENDS_VIEW: &str = "/trends";
/// The page for managing categories and their keywords.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The page for uploading a CSV bank statement.
pub const IMPORT_VIEW: &str = "/import";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route to download the loaded transactions as a spreadsheet.
pub const EXPORT: &str = "/export";

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
/// The route to upload CSV files for importing transactions.
pub const IMPORT: &str = "/api/import";
/// The route to create a category.
pub const POST_CATEGORY: &str = "/api/categories";
/// The route to delete a category.
pub const DELETE_CATEGORY: &str = "/api/categories/{name}";
/// The route to add a keyword to a category.
pub const POST_KEYWORD: &str = "/api/categories/{name}/keywords";
/// The route to remove a keyword from a category.
///
/// Removal is a POST with the keyword in the form body, since keywords may
/// contain characters that do not survive a path segment.
pub const REMOVE_KEYWORD: &str = "/api/categories/{name}/keywords/remove";
/// The route to change the category of a loaded transaction.
pub const PUT_TRANSACTION_CATEGORY: &str = "/api/transactions/{index}/category";

/// Replace the parameter in `endpoint_path` with the percent-encoded `param`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/categories/{name}', '{name}' is
/// the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter. If no parameter is found in `endpoint_path`, the
/// function returns the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, param: &str) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        utf8_percent_encode(param, NON_ALPHANUMERIC),
        &endpoint_path[param_end..]
    )
}
