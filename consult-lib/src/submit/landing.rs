use consult_proto::{PAYMENT_QUERY_KEY, PAYMENT_QUERY_SUCCESS};
use url::Url;

pub const SUCCESS_TITLE: &str = "Success!";
pub const SUCCESS_MESSAGE: &str =
    "Thank you for submitting your details. You will receive detailed results within 2 days.";

/// Reports whether `url` carries `payment=success` and returns the URL to
/// show afterwards. The notice is consumed: the returned URL has no query, so
/// showing it again does nothing.
pub fn consume_payment_notice(url: &Url) -> (bool, Url) {
    let success = url
        .query_pairs()
        .any(|(key, value)| key == PAYMENT_QUERY_KEY && value == PAYMENT_QUERY_SUCCESS);
    if !success {
        return (false, url.clone());
    }

    let mut stripped = url.clone();
    stripped.set_query(None);
    stripped.set_fragment(None);
    (true, stripped)
}
