//! Quote-aware decoding of a single CSV line.
//!
//! Line splitting happens before decoding, so a quoted field can never span
//! physical lines. Malformed quoting is tolerated: an unterminated quote just
//! runs to the end of the line.

/// Split one line (without its trailing newline) into raw field strings.
///
/// A `"` toggles quoted mode, except that `""` inside quotes yields a literal
/// `"`. Commas outside quotes separate fields. The final field is always
/// emitted, even when empty, so an empty line decodes to one empty field.
#[must_use]
pub fn decode_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}
