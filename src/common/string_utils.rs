//! String helpers for file names and markdown anchors.

/// Convert a display name to kebab case
///
/// Runs of characters that are not ASCII alphanumeric become a single `-`,
/// camel case boundaries are split, and the result is lowercase.
///
/// # Examples
/// ```ignore
/// assert_eq!(kebab_case("My Project"), "my-project");
/// assert_eq!(kebab_case("devTools"), "dev-tools");
/// ```
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() && prev_lower {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        } else {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            prev_lower = false;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Anchor GitHub-flavored markdown generates for a heading
///
/// Lowercases, drops punctuation other than `-` and `_`, and turns spaces
/// into `-`. Non-ASCII symbols such as status glyphs are kept.
pub fn heading_anchor(heading: &str) -> String {
    heading
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_ascii_punctuation() => None,
            c => Some(c.to_lowercase().next().unwrap_or(c)),
        })
        .collect()
}
