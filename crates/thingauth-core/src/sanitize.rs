//! Log sanitisation for externally supplied values (CWE-117).

use std::fmt::Display;

/// Remove carriage returns and line feeds from `unsanitized`.
///
/// Applied to device names, principals, object keys and URLs before they
/// reach a log line, so a crafted value cannot forge extra log entries.
#[must_use]
pub fn sanitize_str(unsanitized: &str) -> String {
    unsanitized.replace(['\n', '\r'], "")
}

/// Render any displayable value (a URL, a reference) and sanitize the result.
#[must_use]
pub fn sanitize_display<T: Display + ?Sized>(value: &T) -> String {
    sanitize_str(&value.to_string())
}
