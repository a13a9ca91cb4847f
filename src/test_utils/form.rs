use scraper::{ElementRef, Html, Selector};

/// Get the first form in the document, panicking if there is none.
#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found in document")
}

/// Assert the form targets `endpoint` with the htmx attribute `hx_attribute`
/// (e.g. "hx-post").
#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef, endpoint: &str, hx_attribute: &str) {
    let form_endpoint = form
        .value()
        .attr(hx_attribute)
        .unwrap_or_else(|| panic!("{hx_attribute} attribute missing"));

    assert_eq!(
        form_endpoint, endpoint,
        "want form with attribute {hx_attribute}=\"{endpoint}\", got {form_endpoint:?}"
    );
}

/// Assert the form contains a submit button.
#[track_caller]
pub(crate) fn assert_form_submit_button(form: &ElementRef) {
    let has_submit_button = form
        .select(&Selector::parse("button").unwrap())
        .any(|button| button.value().attr("type") == Some("submit"));

    assert!(has_submit_button, "No submit button found in form");
}
