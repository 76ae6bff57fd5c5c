//! Task identifier derivation from display names.

/// Derives the task identifier for a display name.
///
/// The name is transliterated to ASCII, split into words on any
/// non-alphanumeric character and on camel-case boundaries, lowercased, and
/// joined with `-`. Every input yields an identifier; names without any
/// alphanumeric content yield the empty string.
///
/// # Examples
///
/// ```
/// use kanbn_task_editor::editor::domain::derive_slug;
///
/// assert_eq!(derive_slug("Fix the Login page"), "fix-the-login-page");
/// assert_eq!(derive_slug("parseHTTPResponse"), "parse-http-response");
/// assert_eq!(derive_slug("  "), "");
/// ```
#[must_use]
pub fn derive_slug(name: &str) -> String {
    let transliterated = deunicode::deunicode(name);
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut previous: Option<char> = None;
    let mut chars = transliterated.chars().peekable();

    while let Some(ch) = chars.next() {
        if !ch.is_ascii_alphanumeric() {
            push_word(&mut words, &mut current);
            previous = None;
            continue;
        }

        if ch.is_ascii_uppercase() && starts_new_word(previous, chars.peek().copied()) {
            push_word(&mut words, &mut current);
        }

        current.push(ch.to_ascii_lowercase());
        previous = Some(ch);
    }

    push_word(&mut words, &mut current);
    words.join("-")
}

/// An uppercase letter opens a word after a lowercase letter or digit, or
/// when it is the last capital of an acronym followed by lowercase text.
fn starts_new_word(previous: Option<char>, next: Option<char>) -> bool {
    match previous {
        Some(prev) if prev.is_ascii_lowercase() || prev.is_ascii_digit() => true,
        Some(prev) if prev.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
        _ => false,
    }
}

fn push_word(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}
