use axum::{body::Body, response::Response};

/// Get a response header as a string, panicking if it is missing.
#[track_caller]
pub(crate) fn get_header<'a>(response: &'a Response<Body>, header_name: &str) -> &'a str {
    response
        .headers()
        .get(header_name)
        .unwrap_or_else(|| panic!("{header_name} header missing"))
        .to_str()
        .expect("header value is not valid UTF-8")
}

/// Assert the response has the given content type.
#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    assert_eq!(get_header(response, "content-type"), content_type);
}

/// Assert the response redirects the htmx client to `endpoint`.
#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response<Body>, endpoint: &str) {
    assert_eq!(get_header(response, "hx-redirect"), endpoint);
}

/// Assert an [axum_test::TestResponse] redirects the htmx client to
/// `endpoint`.
#[track_caller]
pub(crate) fn assert_hx_redirect_header(response: &axum_test::TestResponse, endpoint: &str) {
    assert_eq!(
        response.header("hx-redirect").to_str().unwrap(),
        endpoint,
        "want HX-Redirect header \"{endpoint}\""
    );
}
