use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use reqwest::Url;

/// Regex matching every label produced by [`month_label`].
pub const MONTH_LABEL_PATTERN: &str = r"^[A-Za-z]+\s'\d{2}$";

/// Formats the month a track was saved in, e.g. `January '24`.
///
/// The timestamp's own offset decides the month. A track saved at
/// `2024-02-01T00:30:00+01:00` lands in February even though it is still
/// January in UTC.
pub fn month_label(added_at: &DateTime<FixedOffset>) -> String {
    added_at.format("%B '%y").to_string()
}

/// Returns the `pending` URIs not in `present`, keeping their order.
pub fn missing_uris(pending: &[String], present: &HashSet<String>) -> Vec<String> {
    pending
        .iter()
        .filter(|uri| !present.contains(*uri))
        .cloned()
        .collect()
}

/// Pulls the authorization code out of what the user pasted.
///
/// Accepts the bare code or the whole redirect URL with a `code` query
/// parameter. Returns `None` for blank input or a URL without a code.
pub fn extract_code(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    match Url::parse(input) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == "code")
            .map(|(_, value)| value.into_owned())
            .filter(|code| !code.is_empty()),
        Err(_) => Some(input.to_string()),
    }
}
