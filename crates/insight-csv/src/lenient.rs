//! Best-effort decoding of JSON list cells.

use std::borrow::Cow;

/// Decode a list cell, falling back to an empty list on anything unexpected.
///
/// Accepts a plain JSON array of strings, or one still wrapped in a pair of
/// CSV quotes with its inner quotes doubled (`"[""a""]"`). Empty cells and
/// `""` decode to an empty list without a warning; every other failure is
/// logged and also yields an empty list. Never returns an error.
#[must_use]
pub fn best_effort_list(raw: &str) -> Vec<String> {
    if raw.is_empty() || raw == "\"\"" {
        return Vec::new();
    }

    let text: Cow<'_, str> = if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        Cow::Owned(raw[1..raw.len() - 1].replace("\"\"", "\""))
    } else {
        Cow::Borrowed(raw)
    };

    match serde_json::from_str::<Vec<String>>(&text) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(value = raw, error = %err, "unreadable list cell, using empty list");
            Vec::new()
        }
    }
}
