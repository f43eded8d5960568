//! Normalization applied to every string before it is measured or placed on a page.

/// Replaces typographic punctuation with its ASCII equivalent and strips NUL bytes.
/// Everything else, other control characters included, passes through unchanged.
///
/// ```
/// use paperwork_gen::sanitize::sanitize;
///
/// assert_eq!(sanitize("\u{201c}Hi\u{201d} \u{2014} it\u{2019}s\u{2026}"), "\"Hi\" - it's...");
/// ```
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{201c}' | '\u{201d}' => out.push('"'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\0' => {}
            c => out.push(c),
        }
    }
    out
}
