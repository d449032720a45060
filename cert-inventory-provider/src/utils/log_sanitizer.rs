//! Log sanitization utilities
//!
//! Keeps API secrets and oversized response bodies out of debug/error logs.

/// Maximum number of bytes of a response body written to the log.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret that stay visible.
const SECRET_VISIBLE_PREFIX: usize = 4;

/// Truncate a string for safe logging.
///
/// Strings within the limit are returned unchanged; longer ones are cut on a
/// char boundary at or below `TRUNCATE_LIMIT` bytes and suffixed with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }

    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);

    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Mask a secret identifier, keeping only a short prefix.
///
/// `AKIDz8krbsJ5yKBZQpn74WFkmLPx3EXAMPLE` -> `AKID****`
pub fn mask_secret(s: &str) -> String {
    let prefix: String = s.chars().take(SECRET_VISIBLE_PREFIX).collect();
    if prefix.len() == s.len() {
        "****".to_string()
    } else {
        format!("{prefix}****")
    }
}
