//! The dashboard pages: expenses, payments, and trends, plus the
//! category-edit endpoint that feeds corrections back into the store.

mod aggregation;
mod charts;
mod edit_category;
mod expenses_page;
mod payments_page;
mod trends_page;

use maud::{Markup, html};

pub use edit_category::edit_transaction_category_endpoint;
pub use expenses_page::get_expenses_page;
pub use payments_page::get_payments_page;
pub use trends_page::get_trends_page;

use crate::{
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// The view shown on data pages before any statement has been uploaded.
fn no_data_view(active_endpoint: &str, title: &str) -> Markup {
    let nav_bar = NavBar::new(active_endpoint).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="text-center space-y-4"
            {
                h1 class="text-xl font-bold" { (title) }

                p
                {
                    "Upload a transaction CSV file to begin analyzing your finances! "

                    a href=(endpoints::IMPORT_VIEW) class=(LINK_STYLE)
                    {
                        "Go to the Import page"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}
