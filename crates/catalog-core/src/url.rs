//! Affiliate link normalization.

/// Scheme prepended to links entered without one.
pub const DEFAULT_SCHEME: &str = "https://";

/// Normalize an affiliate link as typed into the admin form.
///
/// Blank input yields `None`. Input that already starts with a URL scheme
/// (`scheme://`) is kept as is, otherwise `https://` is prepended. The
/// result is not checked for being a well-formed or reachable URL.
pub fn normalize_affiliate_url(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if has_scheme(value) {
        Some(value.to_string())
    } else {
        Some(format!("{}{}", DEFAULT_SCHEME, value))
    }
}

/// RFC 3986 scheme: a letter followed by letters, digits, `+`, `-` or `.`.
fn has_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}
